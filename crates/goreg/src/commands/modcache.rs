use std::io::{self, Write};

use anyhow::Context;
use goreg_codegen::module_cache_path;

use crate::args::ModcacheCommand;
use crate::status::ExitStatus;

pub fn modcache(command: ModcacheCommand) -> anyhow::Result<ExitStatus> {
    let path = module_cache_path(&command.module, &command.version).with_context(|| {
        format!(
            "Failed to locate {}@{} in the module cache",
            command.module, command.version
        )
    })?;

    writeln!(io::stdout().lock(), "{}", path.display())?;
    Ok(ExitStatus::Success)
}
