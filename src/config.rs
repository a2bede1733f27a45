// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Stack configuration loading and validation.
//!
//! Values come from a YAML stack file overlaid with CLI/environment
//! overrides. All four keys are validated here, before anything talks to a
//! cluster; a missing or mistyped key is fatal.

use anyhow::{bail, Context, Result};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Stack file read from the working directory when no --config is given
pub const DEFAULT_STACK_FILE: &str = "outfitter.yaml";

/// Validated stack configuration for a deployment.
#[derive(Clone)]
pub struct StackConfig {
    /// Pulumi access token, mounted into the exporter via the secret
    pub pulumi_access_token: String,
    /// Comma-separated organization names, passed through verbatim
    pub organizations: String,
    /// Scrape interval, opaque at this layer (the chart interprets it)
    pub collect_interval: String,
    pub max_concurrency: i64,
}

/// Per-key overrides collected from CLI flags and environment variables.
/// An override always wins over the stack file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub pulumi_access_token: Option<String>,
    pub organizations: Option<String>,
    pub collect_interval: Option<String>,
    pub max_concurrency: Option<String>,
}

impl StackConfig {
    /// Load and validate the stack configuration.
    ///
    /// An explicitly given file must exist; the default stack file is
    /// optional so that flags and environment variables can carry the whole
    /// configuration.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut raw = match path {
            Some(p) => read_stack_file(p)?,
            None => {
                let default = Path::new(DEFAULT_STACK_FILE);
                if default.exists() {
                    read_stack_file(default)?
                } else {
                    BTreeMap::new()
                }
            }
        };

        if let Some(token) = &overrides.pulumi_access_token {
            raw.insert(
                "pulumi-access-token".to_string(),
                Value::String(token.clone()),
            );
        }
        if let Some(organizations) = &overrides.organizations {
            raw.insert(
                "organizations".to_string(),
                Value::String(organizations.clone()),
            );
        }
        if let Some(interval) = &overrides.collect_interval {
            raw.insert(
                "collect-interval".to_string(),
                Value::String(interval.clone()),
            );
        }
        if let Some(concurrency) = &overrides.max_concurrency {
            raw.insert(
                "max-concurrency".to_string(),
                Value::String(concurrency.clone()),
            );
        }

        Self::from_raw(&raw)
    }

    fn from_raw(raw: &BTreeMap<String, Value>) -> Result<Self> {
        Ok(Self {
            pulumi_access_token: require_string(raw, "pulumi-access-token")?,
            organizations: require_string(raw, "organizations")?,
            collect_interval: require_string(raw, "collect-interval")?,
            max_concurrency: require_number(raw, "max-concurrency")?,
        })
    }
}

// The access token must never end up in logs, so Debug renders it redacted.
impl fmt::Debug for StackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackConfig")
            .field("pulumi_access_token", &"[secret]")
            .field("organizations", &self.organizations)
            .field("collect_interval", &self.collect_interval)
            .field("max_concurrency", &self.max_concurrency)
            .finish()
    }
}

fn read_stack_file(path: &Path) -> Result<BTreeMap<String, Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read stack configuration file {}", path.display()))?;
    let parsed: Option<BTreeMap<String, Value>> = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse stack configuration file {}", path.display()))?;

    Ok(parsed.unwrap_or_default())
}

fn require_string(raw: &BTreeMap<String, Value>, key: &str) -> Result<String> {
    let value = raw
        .get(key)
        .with_context(|| format!("Missing required configuration key '{}'", key))?;
    let value = value
        .as_str()
        .with_context(|| format!("Configuration key '{}' must be a string", key))?;

    if value.is_empty() {
        bail!("Configuration key '{}' must not be empty", key);
    }

    Ok(value.to_string())
}

fn require_number(raw: &BTreeMap<String, Value>, key: &str) -> Result<i64> {
    let value = raw
        .get(key)
        .with_context(|| format!("Missing required configuration key '{}'", key))?;

    match value {
        Value::Number(n) => n
            .as_i64()
            .with_context(|| format!("Configuration key '{}' must be an integer", key)),
        // Flags and environment variables arrive as strings
        Value::String(s) => s
            .parse::<i64>()
            .with_context(|| format!("Configuration key '{}' must be a number, got '{}'", key, s)),
        _ => bail!("Configuration key '{}' must be a number", key),
    }
}
