//! Command implementations for the CLI
//!
//! SBIO pattern: Commands return Results, I/O is handled by caller

use std::path::PathBuf;

use thiserror::Error;

use super::OutputFormat;
use crate::kubeconfig::{kube_configs_from_env, parse_kube_configs, KubeConfigError};
use crate::settings::{KubeFlags, Settings, SettingsBuilder, SettingsError};

/// Errors that can occur during command execution
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("KUBECONFIG: {0}")]
    KubeConfig(#[from] KubeConfigError),

    #[error("Invalid arguments: {0}")]
    Args(#[from] clap::Error),

    #[error("Failed to load env file {0}: {1}")]
    EnvFile(PathBuf, dotenvy::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for commands
pub type CommandResult<T> = Result<T, CommandError>;

// ============================================================================
// Resolve Commands
// ============================================================================

/// Build settings from flags, using `env_kube_configs` when the flags name
/// no kubeconfig.
pub fn resolve_settings(flags: &KubeFlags, env_kube_configs: Vec<PathBuf>) -> CommandResult<Settings> {
    let settings = SettingsBuilder::new(env_kube_configs)
        .with_flags(flags.clone())
        .build()?;
    Ok(settings)
}

/// Build settings from flags, reading `KUBECONFIG` only when the flags name
/// no kubeconfig
pub fn load_settings(flags: &KubeFlags) -> CommandResult<Settings> {
    let env_kube_configs = if parse_kube_configs(&flags.kube_config, ',')?.is_empty() {
        kube_configs_from_env()?
    } else {
        Vec::new()
    };
    resolve_settings(flags, env_kube_configs)
}

/// Render resolved settings in the requested format
pub fn render_settings(settings: &Settings, format: OutputFormat) -> CommandResult<String> {
    match format {
        OutputFormat::Table => Ok(super::format_settings(settings)),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(settings)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => Ok(serde_yaml::to_string(settings)?),
    }
}

// ============================================================================
// Check Commands
// ============================================================================

/// Result of checking the topology flags
#[derive(Debug)]
pub struct CheckResult {
    pub valid: bool,
    pub clusters: usize,
    pub control_planes: usize,
    pub networks: usize,
    /// Clusters left without an entry by an explicit mapping
    pub gaps: Vec<String>,
    pub error: Option<String>,
}

/// Summarize a resolution attempt, collecting clusters left uncovered
pub fn check_settings(resolved: CommandResult<Settings>) -> CheckResult {
    match resolved {
        Ok(settings) => {
            let n = settings.num_clusters();
            let mut gaps = Vec::new();
            for cluster in settings.control_plane_topology().missing(n) {
                gaps.push(format!("cluster {} has no control plane", cluster));
            }
            for cluster in settings.network_topology().missing(n) {
                gaps.push(format!("cluster {} has no network", cluster));
            }
            for cluster in settings.config_topology().missing(n) {
                gaps.push(format!("cluster {} has no config cluster", cluster));
            }
            CheckResult {
                valid: true,
                clusters: n,
                control_planes: settings.control_plane_clusters().len(),
                networks: settings.network_topology().networks().len(),
                gaps,
                error: None,
            }
        }
        Err(e) => CheckResult {
            valid: false,
            clusters: 0,
            control_planes: 0,
            networks: 0,
            gaps: Vec::new(),
            error: Some(e.to_string()),
        },
    }
}
