//! Integration tests for topology resolution
//!
//! These tests build settings from kubeconfig files on disk, the way the
//! CLI does, and check the resolved tables.

use std::path::PathBuf;

use tempfile::TempDir;

use kubetopo::cli::{check_settings, resolve_settings, render_settings, OutputFormat};
use kubetopo::topology::{
    resolve_config_topology, resolve_control_plane_topology, resolve_network_topology,
    IndexRole, ParseFailure, TopologyKind,
};
use kubetopo::{
    ClusterIndex, ClusterTopology, KubeFlags, NetworkTopology, SettingsBuilder, SettingsError,
    TopologyError,
};

/// Write `n` empty kubeconfig files and return the dir with their paths
fn kube_configs(n: usize) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let paths = (0..n)
        .map(|i| {
            let path = dir.path().join(format!("cluster-{}.yaml", i));
            std::fs::write(&path, "apiVersion: v1\nkind: Config\n").expect("Failed to write");
            path
        })
        .collect();
    (dir, paths)
}

fn joined(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn topology(pairs: &[(usize, usize)]) -> ClusterTopology {
    pairs
        .iter()
        .map(|(k, v)| (ClusterIndex(*k), ClusterIndex(*v)))
        .collect()
}

#[test]
fn test_shared_control_plane_scenario() {
    let (_dir, paths) = kube_configs(3);
    let resolved = resolve_control_plane_topology(&paths, "0:0,1:0,2:2").unwrap();
    assert_eq!(resolved, topology(&[(0, 0), (1, 0), (2, 2)]));
}

#[test]
fn test_explicit_networks_scenario() {
    let (_dir, paths) = kube_configs(2);
    let resolved =
        resolve_network_topology(&paths, "0:0,1:1", "0:network-a,1:network-b").unwrap();
    let expected: NetworkTopology = [
        (ClusterIndex(0), "network-a".to_string()),
        (ClusterIndex(1), "network-b".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(resolved, expected);
}

#[test]
fn test_network_string_ignored_scenario() {
    let (_dir, paths) = kube_configs(2);
    let resolved = resolve_network_topology(&paths, "", "0:network-a,1:network-b").unwrap();
    assert_eq!(resolved, NetworkTopology::single_network(2));
}

#[test]
fn test_config_out_of_range_scenario() {
    let (_dir, paths) = kube_configs(2);
    let fallback = resolve_control_plane_topology(&paths, "").unwrap();
    let err = resolve_config_topology(&paths, "5:0", &fallback).unwrap_err();
    assert_eq!(
        err,
        TopologyError::Range {
            kind: TopologyKind::Config,
            role: IndexRole::Cluster,
            index: 5,
            limit: 2,
        }
    );
}

#[test]
fn test_config_default_is_independent_copy() {
    let (_dir, paths) = kube_configs(3);
    let mut fallback = topology(&[(0, 0), (1, 0), (2, 0)]);
    let resolved = resolve_config_topology(&paths, "", &fallback).unwrap();
    fallback.insert(ClusterIndex(2), ClusterIndex(2));
    assert_eq!(resolved.get(ClusterIndex(2)), Some(ClusterIndex(0)));
}

#[test]
fn test_empty_network_name() {
    let (_dir, paths) = kube_configs(3);
    let err = resolve_network_topology(&paths, "0:0", "0:a,2:").unwrap_err();
    assert!(matches!(
        err,
        TopologyError::Parse {
            reason: ParseFailure::NetworkName,
            ..
        }
    ));
}

#[test]
fn test_settings_from_kubeconfig_files() {
    let (_dir, paths) = kube_configs(3);
    let settings = SettingsBuilder::new(Vec::new())
        .with_flags(KubeFlags {
            kube_config: joined(&paths),
            control_plane_topology: "0:0,1:0,2:0".to_string(),
            network_topology: "0:east,1:east,2:west".to_string(),
            config_topology: "0:0,1:0,2:2".to_string(),
            loadbalancer: false,
            ..KubeFlags::default()
        })
        .build()
        .unwrap();

    assert_eq!(settings.kube_config(), paths.as_slice());
    assert!(!settings.load_balancer_supported());
    assert_eq!(settings.control_plane_clusters(), vec![ClusterIndex(0)]);
    assert_eq!(
        settings.config_clusters(),
        vec![ClusterIndex(0), ClusterIndex(2)]
    );
    assert_eq!(
        settings.network_topology().clusters_in("east"),
        vec![ClusterIndex(0), ClusterIndex(1)]
    );
    assert!(settings.is_multi_network());
}

#[test]
fn test_settings_fail_atomically() {
    let (_dir, paths) = kube_configs(2);
    let result = SettingsBuilder::new(Vec::new())
        .with_flags(KubeFlags {
            kube_config: joined(&paths),
            control_plane_topology: "0:0,1:0".to_string(),
            network_topology: "0:east,1".to_string(),
            ..KubeFlags::default()
        })
        .build();

    match result {
        Err(SettingsError::Topology(err)) => {
            assert_eq!(err.kind(), TopologyKind::Network);
            assert!(err.to_string().contains("\"1\""));
        }
        other => panic!("expected network topology error, got {:?}", other),
    }
}

#[test]
fn test_resolve_and_render_from_files() {
    let (_dir, paths) = kube_configs(2);
    let flags = KubeFlags {
        kube_config: joined(&paths),
        ..KubeFlags::default()
    };

    let settings = resolve_settings(&flags, Vec::new()).unwrap();
    let table = render_settings(&settings, OutputFormat::Table).unwrap();
    assert!(table.contains("cluster-0.yaml"));
    assert!(table.contains("network-0"));

    let check = check_settings(resolve_settings(&flags, Vec::new()));
    assert!(check.valid);
    assert_eq!(check.clusters, 2);
    assert_eq!(check.control_planes, 2);
}
