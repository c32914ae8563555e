//! Multi-cluster topology tables
//!
//! Every cluster is addressed by its position in the ordered kubeconfig list.
//! Three tables describe a deployment:
//!
//! - **control plane topology**: cluster -> cluster hosting its control plane
//! - **network topology**: cluster -> network name
//! - **config topology**: cluster -> cluster hosting its config
//!
//! The tables are resolved once from operator-supplied strings of the form
//! `"<idx>:<value>[,<idx>:<value>...]"` and are read-only afterwards.

mod parse;
mod resolve;

pub use parse::{parse_index_pairs, ParseFailure};
pub use resolve::{
    resolve_config_topology, resolve_control_plane_topology, resolve_network_topology,
    DEFAULT_NETWORK,
};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while resolving a topology mapping string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("failed parsing {kind} mapping entry {entry:?}: {reason}")]
    Parse {
        kind: TopologyKind,
        entry: String,
        reason: ParseFailure,
    },

    #[error("failed parsing {kind} topology: {role} {index} exceeds number of available clusters {limit}")]
    Range {
        kind: TopologyKind,
        role: IndexRole,
        index: usize,
        limit: usize,
    },
}

impl TopologyError {
    /// The topology table the error belongs to.
    pub fn kind(&self) -> TopologyKind {
        match self {
            TopologyError::Parse { kind, .. } | TopologyError::Range { kind, .. } => *kind,
        }
    }
}

/// Which side of a `<left>:<right>` entry an index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRole {
    Cluster,
    ControlPlane,
    Config,
}

impl fmt::Display for IndexRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexRole::Cluster => write!(f, "cluster index"),
            IndexRole::ControlPlane => write!(f, "control plane cluster index"),
            IndexRole::Config => write!(f, "config cluster index"),
        }
    }
}

/// Position of a cluster in the ordered kubeconfig list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterIndex(pub usize);

impl ClusterIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for ClusterIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for ClusterIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the three tables a mapping string describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyKind {
    ControlPlane,
    Network,
    Config,
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyKind::ControlPlane => write!(f, "control plane"),
            TopologyKind::Network => write!(f, "network"),
            TopologyKind::Config => write!(f, "config"),
        }
    }
}

/// Mapping from a cluster to another cluster (control plane or config host).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterTopology(BTreeMap<ClusterIndex, ClusterIndex>);

impl ClusterTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cluster maps to itself (replicated control planes).
    pub fn identity(num_clusters: usize) -> Self {
        (0..num_clusters)
            .map(|i| (ClusterIndex(i), ClusterIndex(i)))
            .collect()
    }

    pub fn insert(&mut self, cluster: ClusterIndex, host: ClusterIndex) -> Option<ClusterIndex> {
        self.0.insert(cluster, host)
    }

    pub fn get(&self, cluster: ClusterIndex) -> Option<ClusterIndex> {
        self.0.get(&cluster).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in ascending cluster order.
    pub fn iter(&self) -> impl Iterator<Item = (ClusterIndex, ClusterIndex)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// Clusters in `[0, num_clusters)` without an entry.
    pub fn missing(&self, num_clusters: usize) -> Vec<ClusterIndex> {
        (0..num_clusters)
            .map(ClusterIndex)
            .filter(|i| !self.0.contains_key(i))
            .collect()
    }

    /// Distinct host clusters, ascending.
    pub fn hosts(&self) -> Vec<ClusterIndex> {
        self.0
            .values()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<(ClusterIndex, ClusterIndex)> for ClusterTopology {
    fn from_iter<I: IntoIterator<Item = (ClusterIndex, ClusterIndex)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Mapping from a cluster to the name of its network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkTopology(BTreeMap<ClusterIndex, String>);

impl NetworkTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every cluster on [`DEFAULT_NETWORK`].
    pub fn single_network(num_clusters: usize) -> Self {
        (0..num_clusters)
            .map(|i| (ClusterIndex(i), DEFAULT_NETWORK.to_string()))
            .collect()
    }

    pub fn insert(&mut self, cluster: ClusterIndex, network: String) -> Option<String> {
        self.0.insert(cluster, network)
    }

    pub fn get(&self, cluster: ClusterIndex) -> Option<&str> {
        self.0.get(&cluster).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClusterIndex, &str)> + '_ {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn missing(&self, num_clusters: usize) -> Vec<ClusterIndex> {
        (0..num_clusters)
            .map(ClusterIndex)
            .filter(|i| !self.0.contains_key(i))
            .collect()
    }

    /// Distinct network names, sorted.
    pub fn networks(&self) -> Vec<&str> {
        self.0
            .values()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Clusters assigned to `network`, ascending.
    pub fn clusters_in(&self, network: &str) -> Vec<ClusterIndex> {
        self.0
            .iter()
            .filter(|(_, name)| name.as_str() == network)
            .map(|(k, _)| *k)
            .collect()
    }
}

impl FromIterator<(ClusterIndex, String)> for NetworkTopology {
    fn from_iter<I: IntoIterator<Item = (ClusterIndex, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
