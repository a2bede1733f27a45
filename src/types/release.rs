// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

use crate::constants::otlp;

/// A Helm release to install into a namespace.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSpec {
    pub name: String,
    /// Chart location, e.g. an oci:// reference
    pub chart: String,
    pub version: String,
    pub namespace: String,
    pub values: ReleaseValues,
}

/// Values for the pulumi-exporter chart. Field names serialize to the exact
/// keys the chart expects.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseValues {
    /// Name of an existing secret holding the Pulumi access token
    pub existing_secret: String,
    pub pulumi_organizations: Vec<String>,
    pub collect_interval: String,
    pub max_concurrency: i64,
    pub otlp: OtlpValues,
}

/// Where the exporter sends its telemetry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OtlpValues {
    pub endpoint: String,
    pub protocol: String,
    pub insecure: bool,
}

impl Default for OtlpValues {
    fn default() -> Self {
        Self {
            endpoint: otlp::ENDPOINT.to_string(),
            protocol: otlp::PROTOCOL.to_string(),
            insecure: otlp::INSECURE,
        }
    }
}
