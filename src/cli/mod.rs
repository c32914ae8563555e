//! CLI module for kubetopo
//!
//! Subcommands:
//! - `kubetopo resolve` - Resolve and print the cluster topology tables
//! - `kubetopo check` - Validate the topology flags and report gaps

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::settings::KubeFlags;

mod commands;
mod display;

pub use commands::*;
pub use display::*;

#[derive(Parser, Debug)]
#[command(name = "kubetopo")]
#[command(about = "Resolve control plane, network and config topologies for multi-cluster environments")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a .env file (e.g. providing KUBECONFIG)
    #[arg(long, value_name = "FILE", global = true)]
    pub env_file: Option<PathBuf>,

    #[command(flatten)]
    pub kube: KubeFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve and print the topology tables
    Resolve(ResolveArgs),

    /// Validate the topology flags without printing the tables
    Check,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

/// Load `--env-file` (if any) and parse `args` again, so that `KUBETOPO_*`
/// values from the file reach the env-backed flags.
pub fn reparse_with_env_file<I, T>(cli: Cli, args: I) -> CommandResult<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Some(env_file) = cli.env_file.clone() else {
        return Ok(cli);
    };
    dotenvy::from_path(&env_file).map_err(|e| CommandError::EnvFile(env_file, e))?;
    Ok(Cli::try_parse_from(args)?)
}
