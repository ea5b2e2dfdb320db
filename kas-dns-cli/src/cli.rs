//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use kas_dns_core::config::ModeName;
use kas_dns_core::{CoreResult, Settings};
use kas_dns_provider::RecordType;

#[derive(Debug, Parser)]
#[command(name = "kas-dns")]
#[command(about = "Reconcile DNS records through the All-Inkl KAS API", long_about = None)]
pub struct Cli {
    /// TOML settings file (built-in defaults when omitted)
    #[arg(short, long, env = "KAS_DNS_CONFIG")]
    pub config: Option<PathBuf>,

    /// add, replace or prune
    #[arg(long)]
    pub mode: Option<ModeName>,

    /// Record type deleted by replace and prune
    #[arg(long, value_name = "TYPE")]
    pub remove_type: Option<RecordType>,

    /// Send requests through the automation hub instead of the KAS endpoint
    #[arg(long)]
    pub via_hub: bool,

    /// Seconds to wait between two records
    #[arg(long, value_name = "N")]
    pub delay_secs: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Settings from `--config` (or defaults) with command line overrides applied.
    pub fn settings(&self) -> CoreResult<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(mode) = self.mode {
            settings.reconcile.mode = mode;
        }
        if let Some(remove_type) = self.remove_type {
            settings.reconcile.remove_type = remove_type;
        }
        if let Some(delay) = self.delay_secs {
            settings.reconcile.delay_secs = delay;
        }
        Ok(settings)
    }
}
