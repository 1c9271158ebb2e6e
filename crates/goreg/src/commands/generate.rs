use std::io::{self, Write};

use anyhow::Context;
use goreg_codegen::{ModuleDescriptor, RegistryGenerator};
use tracing::info;

use crate::args::GenerateCommand;
use crate::status::ExitStatus;

pub fn generate(command: GenerateCommand) -> anyhow::Result<ExitStatus> {
    let root = command.root.canonicalize().with_context(|| {
        format!("Failed to resolve module root '{}'", command.root.display())
    })?;
    let descriptor = ModuleDescriptor::load(&root)?;

    let mut generator = RegistryGenerator::new();
    generator
        .set_package_name(&command.package)
        .set_var_name(&command.var_name)
        .dedup(command.dedup);
    generator
        .add_source_dir(&descriptor)
        .with_context(|| format!("Failed to scan module {}", descriptor.module()))?;

    if command.print {
        let mut stdout = io::stdout().lock();
        for symbol in generator.entries() {
            writeln!(stdout, "{symbol}")?;
        }
        return Ok(ExitStatus::Success);
    }

    generator.write_to_file(&command.output)?;
    info!(
        module = descriptor.module(),
        output = %command.output.display(),
        entries = generator.entries().len(),
        "generated registry"
    );

    Ok(ExitStatus::Success)
}
