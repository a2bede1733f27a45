// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use kube::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use outfitter::cli::{Cli, Commands, OutputFormat};
use outfitter::compose::Composition;
use outfitter::config::StackConfig;
use outfitter::deploy;
use outfitter::helm::HelmCli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Up {
            stack,
            no_wait,
            output,
        } => {
            let config = StackConfig::load(cli.config.as_deref(), &stack.into())?;
            let composition = Composition::compose(&config);

            let client = Client::try_default().await?;
            info!("Connected to Kubernetes cluster");

            let installer = HelmCli::new(!no_wait);
            let outputs = deploy::up(&client, &installer, &composition).await?;

            let rendered = match output {
                OutputFormat::Yaml => outputs.to_yaml()?,
                OutputFormat::Json => outputs.to_json()?,
            };
            println!("{}", rendered.trim_end());
        }

        Commands::Preview { stack } => {
            let config = StackConfig::load(cli.config.as_deref(), &stack.into())?;
            let composition = Composition::compose(&config);

            println!("{}", composition.render_preview()?.trim_end());
        }

        Commands::Destroy { wait } => {
            let client = Client::try_default().await?;
            info!("Connected to Kubernetes cluster");

            let installer = HelmCli::new(false);
            deploy::destroy(&client, &installer, wait).await?;
            info!("Deployment removed");
        }
    }

    Ok(())
}

// Logs go to stderr so stdout stays machine-readable for outputs and
// previews.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
