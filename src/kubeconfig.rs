//! Kubeconfig list handling
//!
//! Turns the raw kubeconfig list (from a flag or `KUBECONFIG`) into the
//! ordered cluster list. A cluster's index is its position in this list.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

/// Environment variable holding the kubeconfig list
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Used when neither the flag nor the environment name a kubeconfig
pub const DEFAULT_KUBE_CONFIG: &str = "~/.kube/config";

/// OS path list separator, as used by `KUBECONFIG`
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

/// Errors that can occur while building the kubeconfig list
#[derive(Error, Debug, PartialEq)]
pub enum KubeConfigError {
    #[error("Cannot expand user-specific home dir in {0}")]
    UserHomeDir(String),

    #[error("Home directory not found while expanding {0}")]
    HomeDirNotFound(String),
}

// ============================================================================
// SBIO: Pure parsing functions (no I/O)
// ============================================================================

/// Split `value` on `separator` into kubeconfig paths.
///
/// Empty parts are dropped; the rest are trimmed and `~` expanded.
pub fn parse_kube_configs(value: &str, separator: char) -> Result<Vec<PathBuf>, KubeConfigError> {
    if value.is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(separator)
        .filter(|part| !part.is_empty())
        .map(normalize_file)
        .collect()
}

/// Trim surrounding whitespace and expand a leading `~`.
pub fn normalize_file(path: &str) -> Result<PathBuf, KubeConfigError> {
    let path = path.trim();

    if let Some(rest) = path.strip_prefix('~') {
        if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\')) {
            return Err(KubeConfigError::UserHomeDir(path.to_string()));
        }
        if dirs::home_dir().is_none() {
            return Err(KubeConfigError::HomeDirNotFound(path.to_string()));
        }
    }

    let expanded = shellexpand::tilde(path);
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Replace commas in a `KUBECONFIG` value with the OS path list separator.
/// Returns the new value and whether anything changed.
pub fn normalize_kubeconfig_value(value: &str) -> (String, bool) {
    if value.contains(',') {
        (value.replace(',', &PATH_LIST_SEPARATOR.to_string()), true)
    } else {
        (value.to_string(), false)
    }
}

/// Kubeconfig list for an already normalized `KUBECONFIG` value, falling
/// back to [`DEFAULT_KUBE_CONFIG`].
pub fn kube_configs_from_value(value: &str) -> Result<Vec<PathBuf>, KubeConfigError> {
    let out = parse_kube_configs(value, PATH_LIST_SEPARATOR)?;
    if out.is_empty() {
        return Ok(vec![normalize_file(DEFAULT_KUBE_CONFIG)?]);
    }
    Ok(out)
}

// ============================================================================
// I/O boundary functions
// ============================================================================

/// Read the kubeconfig list from `KUBECONFIG`.
///
/// A comma-separated value is rewritten in the environment to use the OS
/// separator so that child tools see a well-formed `KUBECONFIG`.
pub fn kube_configs_from_env() -> Result<Vec<PathBuf>, KubeConfigError> {
    let raw = std::env::var(KUBECONFIG_ENV).unwrap_or_default();
    let (value, changed) = normalize_kubeconfig_value(&raw);
    if changed {
        warn!(
            "{} contains commas: {}. Replacing with {}: {}",
            KUBECONFIG_ENV, raw, PATH_LIST_SEPARATOR, value
        );
        std::env::set_var(KUBECONFIG_ENV, &value);
    }
    info!("{}: {}", KUBECONFIG_ENV, value);

    let out = kube_configs_from_value(&value)?;
    info!("Using {} array: {:?}", KUBECONFIG_ENV, out);
    Ok(out)
}
