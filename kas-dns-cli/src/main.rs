//! `kas-dns` entry point
//!
//! Resolves credentials, builds the API client and runs one reconciliation.
//! Exit code 0 once the run completes, even with per-record failures; 1 when the
//! settings are invalid or no credentials could be found.

mod cli;

use std::collections::HashMap;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use kas_dns_core::config::Settings;
use kas_dns_core::credentials::{
    default_resolver, hub_token_remediation, remediation, resolve_hub_token,
};
use kas_dns_core::{CoreError, Reconciler, RunSummary};
use kas_dns_provider::{create_client, ApiClient, ClientConfig, HubClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(summary) => {
            print!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(filter)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let settings = cli.settings()?;
    let plan = settings.plan()?;

    let client = if cli.via_hub {
        settings.check_hub_tools()?;
        hub_client(&settings)?
    } else {
        kas_client(&settings).await?
    };

    tracing::info!(
        "Zone {} via {}: {} record(s), mode {}",
        plan.zone,
        client.id(),
        plan.targets.len(),
        plan.mode
    );
    Ok(Reconciler::new(client, plan).run().await)
}

fn hub_tools(settings: &Settings) -> HashMap<String, String> {
    settings
        .hub
        .tools
        .iter()
        .map(|(action, tool)| (action.clone(), tool.clone()))
        .collect()
}

fn hub_token(settings: &Settings) -> Result<String, CoreError> {
    resolve_hub_token(&settings.hub.token_var).inspect_err(|_| {
        eprintln!("{}", hub_token_remediation(&settings.hub));
    })
}

fn hub_client(settings: &Settings) -> anyhow::Result<Arc<dyn ApiClient>> {
    let token = hub_token(settings)?;
    let client = create_client(ClientConfig::Hub {
        token,
        endpoint: settings.hub.endpoint.clone(),
        timeout: Duration::from_secs(settings.hub.timeout_secs),
        tools: hub_tools(settings),
    })
    .context("cannot create hub client")?;
    Ok(client)
}

async fn kas_client(settings: &Settings) -> anyhow::Result<Arc<dyn ApiClient>> {
    // the hub credential tool only joins the chain when a token is available
    let hub_source = match &settings.hub.credential_tool {
        Some(tool) => match resolve_hub_token(&settings.hub.token_var) {
            Ok(token) => {
                let client = HubClient::builder(token)
                    .endpoint(&settings.hub.endpoint)
                    .timeout(Duration::from_secs(settings.hub.timeout_secs))
                    .build()
                    .context("cannot create hub client")?;
                Some((Arc::new(client), tool.clone()))
            }
            Err(e) => {
                tracing::debug!("Skipping hub credential tool: {e}");
                None
            }
        },
        None => None,
    };

    let resolver = default_resolver(&settings.credentials, hub_source);
    let credential = resolver.resolve().await.inspect_err(|_| {
        eprintln!("{}", remediation(&settings.credentials));
    })?;

    let client = create_client(ClientConfig::Kas {
        credential,
        endpoint: settings.kas.endpoint.clone(),
        nameserver: settings.kas.nameserver.clone(),
        timeout: Duration::from_secs(settings.kas.timeout_secs),
    })
    .context("cannot create KAS client")?;
    Ok(client)
}
