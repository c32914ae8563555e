use tracing::debug;

use super::parse::{entries, parse_error, parse_index, parse_index_pairs, split_entry};
use super::{
    ClusterIndex, ClusterTopology, IndexRole, NetworkTopology, ParseFailure, TopologyError,
    TopologyKind,
};

/// Network assigned to every cluster when no control plane topology is given
pub const DEFAULT_NETWORK: &str = "network-0";

// ============================================================================
// SBIO: Pure resolution logic (no I/O)
// ============================================================================

/// Resolve which cluster hosts the control plane of each cluster.
///
/// An empty mapping means a control plane per cluster: every cluster maps to
/// itself. An explicit mapping is range checked but not completed, so it may
/// leave clusters without an entry.
pub fn resolve_control_plane_topology<T>(
    clusters: &[T],
    encoded: &str,
) -> Result<ClusterTopology, TopologyError> {
    let num_clusters = clusters.len();
    let pairs = parse_index_pairs(encoded, TopologyKind::ControlPlane, IndexRole::ControlPlane)?;

    if pairs.is_empty() {
        debug!(
            "No control plane topology given, deploying a control plane in each of {} clusters",
            num_clusters
        );
        return Ok(ClusterTopology::identity(num_clusters));
    }

    let topology: ClusterTopology = pairs.into_iter().collect();
    check_range(
        &topology,
        num_clusters,
        TopologyKind::ControlPlane,
        IndexRole::ControlPlane,
    )?;
    Ok(topology)
}

/// Resolve the network name of each cluster.
///
/// The default is keyed off `control_plane_encoded`, not `network_encoded`:
/// without a control plane topology every cluster lands on
/// [`DEFAULT_NETWORK`] and the network string is ignored. Otherwise only the
/// clusters named in `network_encoded` get an entry.
pub fn resolve_network_topology<T>(
    clusters: &[T],
    control_plane_encoded: &str,
    network_encoded: &str,
) -> Result<NetworkTopology, TopologyError> {
    let num_clusters = clusters.len();
    let kind = TopologyKind::Network;

    if control_plane_encoded.is_empty() {
        debug!(
            "No control plane topology given, placing {} clusters on {}",
            num_clusters, DEFAULT_NETWORK
        );
        return Ok(NetworkTopology::single_network(num_clusters));
    }

    let mut topology = NetworkTopology::new();
    for entry in entries(network_encoded) {
        let (left, name) = split_entry(entry, kind)?;
        let cluster = parse_index(left, entry, kind, IndexRole::Cluster)?;
        if cluster.get() >= num_clusters {
            return Err(TopologyError::Range {
                kind,
                role: IndexRole::Cluster,
                index: cluster.get(),
                limit: num_clusters,
            });
        }
        if name.is_empty() {
            return Err(parse_error(kind, entry, ParseFailure::NetworkName));
        }
        topology.insert(cluster, name.to_string());
    }
    Ok(topology)
}

/// Resolve which cluster hosts the config of each cluster.
///
/// An empty mapping yields a copy of `fallback`, normally the resolved
/// control plane topology.
pub fn resolve_config_topology<T>(
    clusters: &[T],
    encoded: &str,
    fallback: &ClusterTopology,
) -> Result<ClusterTopology, TopologyError> {
    let num_clusters = clusters.len();
    let pairs = parse_index_pairs(encoded, TopologyKind::Config, IndexRole::Config)?;

    if pairs.is_empty() {
        debug!("No config topology given, using config from each control plane cluster");
        return Ok(fallback.clone());
    }

    let topology: ClusterTopology = pairs.into_iter().collect();
    check_range(&topology, num_clusters, TopologyKind::Config, IndexRole::Config)?;
    Ok(topology)
}

/// Every key and value must be below `num_clusters`.
fn check_range(
    topology: &ClusterTopology,
    num_clusters: usize,
    kind: TopologyKind,
    host_role: IndexRole,
) -> Result<(), TopologyError> {
    let out_of_range = |index: ClusterIndex, role: IndexRole| TopologyError::Range {
        kind,
        role,
        index: index.get(),
        limit: num_clusters,
    };

    for (cluster, host) in topology.iter() {
        if cluster.get() >= num_clusters {
            return Err(out_of_range(cluster, IndexRole::Cluster));
        }
        if host.get() >= num_clusters {
            return Err(out_of_range(host, host_role));
        }
    }
    Ok(())
}
