use std::path::PathBuf;

use crate::logging::LogLevel;
use clap::{Parser, Subcommand};
use goreg_codegen::{DEFAULT_OUTPUT_FILE, DEFAULT_PACKAGE_NAME, DEFAULT_VAR_NAME};

#[derive(Parser)]
#[command(
    author,
    name = "goreg",
    about = "goreg: Generate a registry of the exported struct types of a Go module",
    after_help = "Without a subcommand, goreg behaves like `goreg generate`.",
    args_conflicts_with_subcommands = true
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
    #[clap(flatten)]
    pub(crate) generate: GenerateCommand,
    #[clap(flatten)]
    pub(crate) global_options: GlobalOptions,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Scan a module and write its registry file
    Generate(GenerateCommand),

    /// Print where a module version lives in the module cache
    Modcache(ModcacheCommand),
}

#[derive(Clone, Debug, clap::Args)]
pub struct GenerateCommand {
    #[arg(
        default_value = ".",
        help = "Root directory of the Go module, the one containing `go.mod`."
    )]
    pub root: PathBuf,
    #[arg(
        short,
        long,
        default_value = DEFAULT_OUTPUT_FILE,
        help = "File to write the registry to, relative to the current directory."
    )]
    pub output: PathBuf,
    #[arg(
        short,
        long,
        default_value = DEFAULT_PACKAGE_NAME,
        help = "Package clause of the generated file."
    )]
    pub package: String,
    #[arg(
        long,
        default_value = DEFAULT_VAR_NAME,
        help = "Name of the generated registry variable."
    )]
    pub var_name: String,
    #[arg(
        long,
        default_value = "false",
        help = "Emit each import and each registry entry only once."
    )]
    pub dedup: bool,
    #[arg(
        long,
        default_value = "false",
        help = "Print `<import path> <type>` for every symbol instead of writing a file."
    )]
    pub print: bool,
}

#[derive(Clone, Debug, clap::Args)]
pub struct ModcacheCommand {
    #[arg(help = "Module path, for example `github.com/BurntSushi/toml`.")]
    pub module: String,
    #[arg(help = "Module version, for example `v1.3.2`.")]
    pub version: String,
}

/// All configuration options that can be passed "globally"
#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Global options")]
pub(crate) struct GlobalOptions {
    /// The log level. One of: `error`, `warn`, `info`, `debug`, or `trace`. Defaults
    /// to `warn`, or to `RUST_LOG` when that is set.
    #[arg(long, global = true)]
    pub(crate) log_level: Option<LogLevel>,
}
