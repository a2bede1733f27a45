// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Composes a validated stack configuration into the three resource
//! declarations that make up a deployment: namespace, credentials secret,
//! and Helm release. Composition is pure; nothing here talks to a cluster.

use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::{Namespace, Secret};
use kube::api::ObjectMeta;
use kube::ResourceExt;
use std::collections::BTreeMap;

use crate::config::StackConfig;
use crate::constants::{chart, resources};
use crate::types::{OtlpValues, ReleaseSpec, ReleaseValues};

/// The composed declarations, in creation order.
#[derive(Clone, Debug, PartialEq)]
pub struct Composition {
    pub namespace: Namespace,
    pub secret: Secret,
    pub release: ReleaseSpec,
}

impl Composition {
    /// Compose the deployment. Each declaration is built from the ones
    /// before it: the secret reads the namespace's name, the release reads
    /// both. Identical configuration always composes identical declarations.
    pub fn compose(config: &StackConfig) -> Self {
        let namespace = build_namespace();
        let secret = build_secret(&namespace, config);
        let release = build_release(&namespace, &secret, config);

        Self {
            namespace,
            secret,
            release,
        }
    }

    /// Render the composition as multi-document YAML for inspection before
    /// applying. Secret values are redacted.
    pub fn render_preview(&self) -> Result<String> {
        let mut secret = self.secret.clone();
        if let Some(string_data) = secret.string_data.as_mut() {
            for value in string_data.values_mut() {
                *value = "[secret]".to_string();
            }
        }

        let mut out = String::new();
        out.push_str("---\n");
        out.push_str(
            &serde_yaml::to_string(&self.namespace).context("Failed to render namespace")?,
        );
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(&secret).context("Failed to render secret")?);
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(&self.release).context("Failed to render release")?);

        Ok(out)
    }
}

fn build_namespace() -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(resources::NAMESPACE.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn build_secret(namespace: &Namespace, config: &StackConfig) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(resources::SECRET_NAME.to_string()),
            namespace: Some(namespace.name_any()),
            ..Default::default()
        },
        string_data: Some(BTreeMap::from([(
            resources::SECRET_KEY.to_string(),
            config.pulumi_access_token.clone(),
        )])),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    }
}

fn build_release(namespace: &Namespace, secret: &Secret, config: &StackConfig) -> ReleaseSpec {
    // Split exactly as configured; empty elements pass through to the chart
    let organizations = config
        .organizations
        .split(',')
        .map(str::to_string)
        .collect();

    ReleaseSpec {
        name: resources::RELEASE_NAME.to_string(),
        chart: chart::LOCATION.to_string(),
        version: chart::VERSION.to_string(),
        namespace: namespace.name_any(),
        values: ReleaseValues {
            existing_secret: secret.name_any(),
            pulumi_organizations: organizations,
            collect_interval: config.collect_interval.clone(),
            max_concurrency: config.max_concurrency,
            otlp: OtlpValues::default(),
        },
    }
}
