use crate::args::Args;
use crate::args::Command;
use crate::status::ExitStatus;

pub mod args;
pub mod commands;
pub mod logging;
pub mod status;

pub use args::{GenerateCommand, ModcacheCommand};

pub fn run(args: Args) -> anyhow::Result<ExitStatus> {
    logging::init_logging(args.global_options.log_level);

    match args.command {
        Some(Command::Generate(command)) => commands::generate::generate(command),
        Some(Command::Modcache(command)) => commands::modcache::modcache(command),
        None => commands::generate::generate(args.generate),
    }
}
