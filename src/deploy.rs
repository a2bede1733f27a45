// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deployment orchestration: walks the composition in dependency order on
//! the way up and in reverse on the way down, then projects the stack
//! outputs from what the engines actually created.

use anyhow::Context;
use async_trait::async_trait;
use kube::{Client, ResourceExt};
use serde::Serialize;
use tracing::info;

use crate::compose::Composition;
use crate::constants::resources;
use crate::error::Result;
use crate::kubernetes::{
    apply_namespace, apply_secret, delete_namespace, delete_secret, wait_namespace_deleted,
};
use crate::types::ReleaseSpec;

/// Installs and uninstalls Helm releases. The production implementation
/// shells out to helm; tests substitute their own.
#[async_trait]
pub trait ReleaseInstaller: Send + Sync {
    /// Install or upgrade a release, returning its resolved state.
    async fn install(&self, release: &ReleaseSpec) -> Result<InstalledRelease>;

    /// Uninstall a release; an absent release is not an error.
    async fn uninstall(&self, name: &str, namespace: &str) -> Result<()>;
}

/// Resolved state of an installed release as reported by the engine.
#[derive(Debug, Clone)]
pub struct InstalledRelease {
    pub name: String,
    pub chart_version: String,
    pub revision: i64,
    pub status: String,
}

/// Stack outputs, projected from the resolved identities of the created
/// resources rather than from the input configuration.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outputs {
    pub namespace: String,
    pub release_name: String,
    pub release_version: String,
}

impl Outputs {
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_yaml::to_string(self).context("Failed to render outputs as YAML")
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Failed to render outputs as JSON")
    }
}

/// Create the composed resources in dependency order: namespace, secret,
/// release. Any failure stops the walk and propagates unmodified.
pub async fn up(
    client: &Client,
    installer: &dyn ReleaseInstaller,
    composition: &Composition,
) -> Result<Outputs> {
    let namespace = apply_namespace(client, &composition.namespace).await?;
    info!("Namespace {} ready", namespace.name_any());

    let secret = apply_secret(client, &composition.secret).await?;
    info!(
        "Secret {}/{} ready",
        secret.namespace().unwrap_or_default(),
        secret.name_any()
    );

    let installed = installer.install(&composition.release).await?;
    info!(
        "Release {} ({}) revision {} is {}",
        installed.name, installed.chart_version, installed.revision, installed.status
    );

    Ok(Outputs {
        namespace: namespace.name_any(),
        release_name: installed.name,
        release_version: installed.chart_version,
    })
}

/// Tear the deployment down in reverse dependency order: release, secret,
/// namespace. Absent resources are skipped, so destroy can run repeatedly.
pub async fn destroy(client: &Client, installer: &dyn ReleaseInstaller, wait: bool) -> Result<()> {
    installer
        .uninstall(resources::RELEASE_NAME, resources::NAMESPACE)
        .await?;
    info!("Release {} removed", resources::RELEASE_NAME);

    delete_secret(client, resources::NAMESPACE, resources::SECRET_NAME).await?;

    let uid = delete_namespace(client, resources::NAMESPACE).await?;
    if wait {
        if let Some(uid) = uid {
            wait_namespace_deleted(client, resources::NAMESPACE, &uid).await?;
        }
    }

    Ok(())
}
