// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command-line definitions for outfitter.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Parser)]
#[command(
    name = "outfitter",
    version,
    about = "Deploys the pulumi-exporter Helm chart and its prerequisites to a Kubernetes cluster"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Stack configuration file (YAML key/value map, defaults to outfitter.yaml)
    #[arg(long, global = true, env = "OUTFITTER_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Deploy the namespace, credentials secret, and Helm release
    Up {
        #[command(flatten)]
        stack: StackArgs,

        /// Do not wait for the release workloads to become ready
        #[arg(long)]
        no_wait: bool,

        /// Output format for the stack outputs
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        output: OutputFormat,
    },

    /// Render the composed resources without applying them
    Preview {
        #[command(flatten)]
        stack: StackArgs,
    },

    /// Remove the release, secret, and namespace
    Destroy {
        /// Wait until the namespace has fully terminated
        #[arg(long)]
        wait: bool,
    },
}

/// Stack configuration overrides. Each flag falls back to its environment
/// variable and, failing that, to the stack file.
#[derive(Args, Clone)]
pub struct StackArgs {
    /// Pulumi access token for the exporter
    #[arg(long, env = "PULUMI_ACCESS_TOKEN", hide_env_values = true)]
    pub pulumi_access_token: Option<String>,

    /// Comma-separated Pulumi organizations to collect from
    #[arg(long, env = "PULUMI_ORGANIZATIONS")]
    pub organizations: Option<String>,

    /// Collection interval handed to the exporter (e.g. "60s")
    #[arg(long, env = "PULUMI_COLLECT_INTERVAL")]
    pub collect_interval: Option<String>,

    /// Upper bound on concurrent Pulumi API requests
    #[arg(long, env = "PULUMI_MAX_CONCURRENCY")]
    pub max_concurrency: Option<String>,
}

impl From<StackArgs> for ConfigOverrides {
    fn from(args: StackArgs) -> Self {
        Self {
            pulumi_access_token: args.pulumi_access_token,
            organizations: args.organizations,
            collect_interval: args.collect_interval,
            max_concurrency: args.max_concurrency,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_up_accepts_stack_flags() {
        let cli = Cli::try_parse_from([
            "outfitter",
            "up",
            "--organizations",
            "acme,globex",
            "--max-concurrency",
            "4",
            "--no-wait",
        ])
        .unwrap();

        match cli.command {
            Commands::Up { stack, no_wait, .. } => {
                assert_eq!(stack.organizations.as_deref(), Some("acme,globex"));
                assert_eq!(stack.max_concurrency.as_deref(), Some("4"));
                assert!(no_wait);
            }
            _ => panic!("expected up"),
        }
    }

    #[test]
    fn test_output_format_defaults_to_yaml() {
        let cli = Cli::try_parse_from(["outfitter", "up"]).unwrap();

        match cli.command {
            Commands::Up { output, .. } => assert_eq!(output, OutputFormat::Yaml),
            _ => panic!("expected up"),
        }
    }

    #[test]
    fn test_destroy_takes_wait_flag() {
        let cli = Cli::try_parse_from(["outfitter", "destroy", "--wait"]).unwrap();

        match cli.command {
            Commands::Destroy { wait } => assert!(wait),
            _ => panic!("expected destroy"),
        }
    }
}
