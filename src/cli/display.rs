//! Display formatting for CLI output
//!
//! SBIO pattern: Pure functions that format data for display

use super::commands::CheckResult;
use crate::settings::Settings;
use crate::topology::ClusterIndex;

// ============================================================================
// Table formatting helpers
// ============================================================================

/// Format a simple table with headers and rows
pub fn format_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "No clusters found.\n".to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut output = String::new();
    push_row(&mut output, headers.iter().map(|h| h.to_uppercase()), &widths);
    for row in rows {
        push_row(&mut output, row.into_iter(), &widths);
    }
    output
}

fn push_row(output: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push_str("   ");
        }
        match widths.get(i) {
            Some(width) => line.push_str(&format!("{:width$}", cell, width = *width)),
            None => line.push_str(&cell),
        }
    }
    output.push_str(line.trim_end());
    output.push('\n');
}

// ============================================================================
// Topology display
// ============================================================================

/// Format resolved settings as one row per cluster
pub fn format_settings(settings: &Settings) -> String {
    let headers = &["cluster", "kubeconfig", "control plane", "config", "network"];
    let index_or_dash = |index: Option<ClusterIndex>| {
        index
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let rows: Vec<Vec<String>> = settings
        .kube_config()
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let cluster = ClusterIndex(i);
            vec![
                cluster.to_string(),
                path.display().to_string(),
                index_or_dash(settings.control_plane_cluster(cluster)),
                index_or_dash(settings.config_cluster(cluster)),
                settings.network_name(cluster).unwrap_or("-").to_string(),
            ]
        })
        .collect();

    let mut output = format_table(headers, rows);
    output.push_str(&format!(
        "\nLoadBalancer supported: {}\n",
        settings.load_balancer_supported()
    ));
    output
}

// ============================================================================
// Check display
// ============================================================================

/// Format a check result for display
pub fn format_check_result(result: &CheckResult) -> String {
    let mut output = String::new();

    if result.valid {
        output.push_str("✓ topology is valid\n\n");
        output.push_str(&format!("  Clusters:       {}\n", result.clusters));
        output.push_str(&format!("  Control planes: {}\n", result.control_planes));
        output.push_str(&format!("  Networks:       {}\n", result.networks));
        if !result.gaps.is_empty() {
            output.push_str("\n  Uncovered:\n");
            for gap in &result.gaps {
                output.push_str(&format!("    - {}\n", gap));
            }
        }
    } else {
        output.push_str("✗ topology is invalid\n\n");
        if let Some(ref error) = result.error {
            output.push_str(&format!("  Error: {}\n", error));
        }
    }

    output
}
