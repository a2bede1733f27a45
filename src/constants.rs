// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Names of the deployed resources. Fixed so repeated deploys converge on
/// the same objects and teardown needs no stack configuration.
pub mod resources {
    /// Namespace everything is installed into
    pub const NAMESPACE: &str = "pulumi-exporter";
    /// Secret holding the Pulumi access token
    pub const SECRET_NAME: &str = "pulumi-credentials";
    /// Key inside the credentials secret
    pub const SECRET_KEY: &str = "access-token";
    /// Helm release name
    pub const RELEASE_NAME: &str = "pulumi-exporter";
}

/// Chart coordinates for the pulumi-exporter release
pub mod chart {
    /// OCI location of the chart
    pub const LOCATION: &str = "oci://ghcr.io/pulumi-labs/charts/pulumi-exporter";
    /// Pinned chart version
    pub const VERSION: &str = "0.1.1";
}

/// Telemetry wiring baked into the release values. The exporter ships its
/// metrics to an OTLP collector running alongside it.
pub mod otlp {
    pub const ENDPOINT: &str = "localhost:4318";
    pub const PROTOCOL: &str = "http/protobuf";
    pub const INSECURE: bool = true;
}

/// The field manager name used for server-side apply
pub const FIELD_MANAGER: &str = "outfitter";

/// Upper bound in seconds on waiting for namespace termination during destroy
pub const DELETE_WAIT_TIMEOUT_SECS: u64 = 300;
