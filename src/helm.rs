// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Release registration through the helm binary.
//!
//! `helm upgrade --install` keeps release registration idempotent, and
//! `--output json` lets the resolved release state be read back. Helm
//! failures surface with helm's own stderr as the message.

use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::deploy::{InstalledRelease, ReleaseInstaller};
use crate::error::{OutfitterError, Result};
use crate::types::ReleaseSpec;

/// Installs releases by running the helm binary from PATH.
pub struct HelmCli {
    /// When set, helm blocks until the release workloads are ready
    wait: bool,
}

impl HelmCli {
    pub fn new(wait: bool) -> Self {
        Self { wait }
    }
}

#[async_trait]
impl ReleaseInstaller for HelmCli {
    #[instrument(skip(self, release), fields(release = %release.name))]
    async fn install(&self, release: &ReleaseSpec) -> Result<InstalledRelease> {
        // Values go over stdin so the access token never appears in the
        // process list.
        let values = serde_yaml::to_string(&release.values)
            .map_err(|e| OutfitterError::ReleaseError(format!("Failed to render values: {}", e)))?;

        let args = install_args(release, self.wait);
        debug!("Running helm {}", args.join(" "));

        let mut child = Command::new("helm")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| OutfitterError::ReleaseError(format!("Failed to run helm: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| OutfitterError::ReleaseError("Failed to open helm stdin".to_string()))?;
        stdin
            .write_all(values.as_bytes())
            .await
            .map_err(|e| OutfitterError::ReleaseError(format!("Failed to pipe values: {}", e)))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| OutfitterError::ReleaseError(format!("Failed to run helm: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OutfitterError::ReleaseError(stderr.trim().to_string()));
        }

        parse_install_output(&output.stdout)
    }

    #[instrument(skip(self))]
    async fn uninstall(&self, name: &str, namespace: &str) -> Result<()> {
        let output = Command::new("helm")
            .args(["uninstall", name, "--namespace", namespace])
            .output()
            .await
            .map_err(|e| OutfitterError::ReleaseError(format!("Failed to run helm: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("not found") {
                debug!("Release {} not installed, nothing to uninstall", name);
                return Ok(());
            }
            return Err(OutfitterError::ReleaseError(stderr.trim().to_string()));
        }

        Ok(())
    }
}

fn install_args(release: &ReleaseSpec, wait: bool) -> Vec<String> {
    let mut args = vec![
        "upgrade".to_string(),
        "--install".to_string(),
        release.name.clone(),
        release.chart.clone(),
        "--version".to_string(),
        release.version.clone(),
        "--namespace".to_string(),
        release.namespace.clone(),
        "--values".to_string(),
        "-".to_string(),
        "--output".to_string(),
        "json".to_string(),
    ];
    if wait {
        args.push("--wait".to_string());
    }

    args
}

// The slice of helm's release status JSON this crate cares about. The
// top-level "version" is the release revision; the chart version sits under
// chart.metadata.
#[derive(Deserialize)]
struct HelmReleaseStatus {
    name: String,
    version: i64,
    info: HelmReleaseInfo,
    chart: HelmChart,
}

#[derive(Deserialize)]
struct HelmReleaseInfo {
    status: String,
}

#[derive(Deserialize)]
struct HelmChart {
    metadata: HelmChartMetadata,
}

#[derive(Deserialize)]
struct HelmChartMetadata {
    version: String,
}

fn parse_install_output(stdout: &[u8]) -> Result<InstalledRelease> {
    let status: HelmReleaseStatus = serde_json::from_slice(stdout)
        .map_err(|e| OutfitterError::ReleaseError(format!("Unexpected helm output: {}", e)))?;

    Ok(InstalledRelease {
        name: status.name,
        chart_version: status.chart.metadata.version,
        revision: status.version,
        status: status.info.status,
    })
}
