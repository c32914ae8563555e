//! # kubetopo
//!
//! Resolves the topology of a multi-cluster environment from an ordered
//! kubeconfig list and three operator-supplied mapping strings:
//!
//! - which cluster hosts each cluster's control plane
//! - which network each cluster belongs to
//! - which cluster hosts each cluster's config
//!
//! ```
//! use kubetopo::topology::{resolve_control_plane_topology, ClusterIndex};
//!
//! let clusters = ["/kube/a", "/kube/b", "/kube/c"];
//! let topology = resolve_control_plane_topology(&clusters, "0:0,1:0,2:2").unwrap();
//! assert_eq!(topology.get(ClusterIndex(1)), Some(ClusterIndex(0)));
//! ```

pub mod cli;
pub mod kubeconfig;
pub mod settings;
pub mod topology;

pub use settings::{KubeFlags, Settings, SettingsBuilder, SettingsError};
pub use topology::{ClusterIndex, ClusterTopology, NetworkTopology, TopologyError};
