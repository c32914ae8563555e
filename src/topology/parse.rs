use thiserror::Error;

use super::{ClusterIndex, IndexRole, TopologyError, TopologyKind};

/// Why a single `<left>:<right>` entry was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("expected exactly one ':' separator, found {0} part(s)")]
    Arity(usize),

    #[error("failed parsing {0}")]
    Index(IndexRole),

    #[error("failed parsing network name")]
    NetworkName,
}

// ============================================================================
// SBIO: Pure parsing functions (no I/O)
// ============================================================================

/// Split a mapping string into its comma-separated entries.
/// An empty string has no entries.
pub(super) fn entries(encoded: &str) -> impl Iterator<Item = &str> {
    let source = if encoded.is_empty() { None } else { Some(encoded) };
    source.into_iter().flat_map(|s| s.split(','))
}

/// Split one entry on ':' into exactly two parts.
pub(super) fn split_entry(entry: &str, kind: TopologyKind) -> Result<(&str, &str), TopologyError> {
    let parts: Vec<&str> = entry.split(':').collect();
    match parts.as_slice() {
        [left, right] => Ok((*left, *right)),
        _ => Err(parse_error(kind, entry, ParseFailure::Arity(parts.len()))),
    }
}

/// Parse one side of an entry as a non-negative index.
pub(super) fn parse_index(
    text: &str,
    entry: &str,
    kind: TopologyKind,
    role: IndexRole,
) -> Result<ClusterIndex, TopologyError> {
    text.parse::<usize>()
        .map(ClusterIndex)
        .map_err(|_| parse_error(kind, entry, ParseFailure::Index(role)))
}

pub(super) fn parse_error(kind: TopologyKind, entry: &str, reason: ParseFailure) -> TopologyError {
    TopologyError::Parse {
        kind,
        entry: entry.to_string(),
        reason,
    }
}

/// Parse `"<idx>:<idx>[,<idx>:<idx>...]"` into ordered pairs.
///
/// `host_role` names the right-hand side in error messages. No range
/// checking happens here; the whole string fails on the first bad entry.
pub fn parse_index_pairs(
    encoded: &str,
    kind: TopologyKind,
    host_role: IndexRole,
) -> Result<Vec<(ClusterIndex, ClusterIndex)>, TopologyError> {
    entries(encoded)
        .map(|entry| -> Result<_, TopologyError> {
            let (left, right) = split_entry(entry, kind)?;
            let cluster = parse_index(left, entry, kind, IndexRole::Cluster)?;
            let host = parse_index(right, entry, kind, host_role)?;
            Ok((cluster, host))
        })
        .collect()
}
