//! Multi-cluster environment settings
//!
//! Raw operator input ([`KubeFlags`]) is threaded explicitly through
//! [`SettingsBuilder`] into the topology resolver. The resulting
//! [`Settings`] are immutable and can be shared freely.

use std::path::PathBuf;

use clap::{ArgAction, Args};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::kubeconfig::{parse_kube_configs, KubeConfigError};
use crate::topology::{
    resolve_config_topology, resolve_control_plane_topology, resolve_network_topology,
    ClusterIndex, ClusterTopology, NetworkTopology, TopologyError,
};

/// Errors that can occur while building settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Flags must be parsed before building settings")]
    Precondition,

    #[error("Flag --{flag} is deprecated: {hint}")]
    DeprecatedFlag {
        flag: &'static str,
        hint: &'static str,
    },

    #[error("kubeconfig: {0}")]
    KubeConfig(#[from] KubeConfigError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Operator-supplied cluster environment flags
#[derive(Args, Debug, Clone, PartialEq)]
pub struct KubeFlags {
    /// A comma-separated list of paths to kube config files for cluster environments
    #[arg(long, env = "KUBETOPO_KUBE_CONFIG", default_value = "", global = true)]
    pub kube_config: String,

    /// Deprecated. See --loadbalancer. Setting this flag is an error
    #[arg(long, global = true)]
    pub minikube: bool,

    /// Whether clusters support external IPs for LoadBalancer services.
    /// Set --loadbalancer=false for local KinD/Minikube clusters without MetalLB
    #[arg(
        long,
        env = "KUBETOPO_LOADBALANCER",
        action = ArgAction::Set,
        default_value_t = true,
        global = true
    )]
    pub loadbalancer: bool,

    /// Mapping of each cluster to the cluster hosting its control plane, as a
    /// comma-separated list of <clusterIndex>:<controlPlaneClusterIndex>. Indexes
    /// follow the order of --kube-config. Default: a control plane per cluster (0:0,1:1,...)
    #[arg(
        long,
        env = "KUBETOPO_CONTROL_PLANE_TOPOLOGY",
        default_value = "",
        global = true
    )]
    pub control_plane_topology: String,

    /// Mapping of each cluster to its network name, as a comma-separated list of
    /// <clusterIndex>:<networkName>. Only read when --control-plane-topology is set;
    /// otherwise every cluster is on network-0
    #[arg(
        long,
        env = "KUBETOPO_NETWORK_TOPOLOGY",
        default_value = "",
        global = true
    )]
    pub network_topology: String,

    /// Mapping of each cluster to the cluster hosting its config, as a
    /// comma-separated list of <clusterIndex>:<configClusterIndex>.
    /// Default: each cluster uses its control plane cluster
    #[arg(
        long,
        env = "KUBETOPO_CONFIG_TOPOLOGY",
        default_value = "",
        global = true
    )]
    pub config_topology: String,
}

impl Default for KubeFlags {
    fn default() -> Self {
        Self {
            kube_config: String::new(),
            minikube: false,
            loadbalancer: true,
            control_plane_topology: String::new(),
            network_topology: String::new(),
            config_topology: String::new(),
        }
    }
}

/// Resolved multi-cluster environment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    kube_config: Vec<PathBuf>,
    load_balancer_supported: bool,
    control_plane_topology: ClusterTopology,
    network_topology: NetworkTopology,
    config_topology: ClusterTopology,
}

impl Settings {
    /// Ordered kubeconfig paths; a cluster's index is its position here.
    pub fn kube_config(&self) -> &[PathBuf] {
        &self.kube_config
    }

    pub fn num_clusters(&self) -> usize {
        self.kube_config.len()
    }

    pub fn load_balancer_supported(&self) -> bool {
        self.load_balancer_supported
    }

    pub fn control_plane_topology(&self) -> &ClusterTopology {
        &self.control_plane_topology
    }

    pub fn network_topology(&self) -> &NetworkTopology {
        &self.network_topology
    }

    pub fn config_topology(&self) -> &ClusterTopology {
        &self.config_topology
    }

    /// Cluster hosting the control plane of `cluster`.
    pub fn control_plane_cluster(&self, cluster: ClusterIndex) -> Option<ClusterIndex> {
        self.control_plane_topology.get(cluster)
    }

    /// Cluster hosting the config of `cluster`.
    pub fn config_cluster(&self, cluster: ClusterIndex) -> Option<ClusterIndex> {
        self.config_topology.get(cluster)
    }

    pub fn network_name(&self, cluster: ClusterIndex) -> Option<&str> {
        self.network_topology.get(cluster)
    }

    /// Clusters where a control plane is deployed.
    pub fn control_plane_clusters(&self) -> Vec<ClusterIndex> {
        self.control_plane_topology.hosts()
    }

    /// Clusters serving config to at least one cluster.
    pub fn config_clusters(&self) -> Vec<ClusterIndex> {
        self.config_topology.hosts()
    }

    pub fn is_multi_network(&self) -> bool {
        self.network_topology.networks().len() > 1
    }
}

/// Builds [`Settings`] from parsed flags and the environment kubeconfig list
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    env_kube_configs: Vec<PathBuf>,
    flags: Option<KubeFlags>,
}

impl SettingsBuilder {
    /// `env_kube_configs` is used when the flags name no kubeconfig.
    pub fn new(env_kube_configs: Vec<PathBuf>) -> Self {
        Self {
            env_kube_configs,
            flags: None,
        }
    }

    pub fn with_flags(mut self, flags: KubeFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn build(&self) -> Result<Settings, SettingsError> {
        let flags = self.flags.as_ref().ok_or(SettingsError::Precondition)?;

        if flags.minikube {
            return Err(SettingsError::DeprecatedFlag {
                flag: "minikube",
                hint: "use --loadbalancer=false instead",
            });
        }

        let mut kube_config = parse_kube_configs(&flags.kube_config, ',')?;
        if kube_config.is_empty() {
            kube_config = self.env_kube_configs.clone();
        }

        let control_plane_topology =
            resolve_control_plane_topology(&kube_config, &flags.control_plane_topology)?;
        let network_topology = resolve_network_topology(
            &kube_config,
            &flags.control_plane_topology,
            &flags.network_topology,
        )?;
        let config_topology = resolve_config_topology(
            &kube_config,
            &flags.config_topology,
            &control_plane_topology,
        )?;

        info!(
            "Resolved topology for {} clusters ({} control planes)",
            kube_config.len(),
            control_plane_topology.hosts().len()
        );

        Ok(Settings {
            kube_config,
            load_balancer_supported: flags.loadbalancer,
            control_plane_topology,
            network_topology,
            config_topology,
        })
    }
}
