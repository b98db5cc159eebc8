use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ticketero_driver::{Config, Driver, TicketeroClient};

/// ----------------------------------------------------------------------
/// 1  Kommandozeilen-Argumente
/// ----------------------------------------------------------------------
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// YAML-Datei mit Overrides (Basis-URL, Tickets, Wartezeiten)
    #[arg(long, env = "TICKETERO_CONFIG")]
    config: Option<PathBuf>,

    /// Basis-URL des Ticketero-Service (Default http://localhost:8080)
    #[arg(long, env = "TICKETERO_BASE_URL")]
    base_url: Option<String>,

    /// Maximale Anzahl Zyklen
    #[arg(long)]
    max_cycles: Option<u32>,

    /// Log-Filter, z.B. "info" oder "ticketero_driver=debug"
    #[arg(long, env = "TICKETERO_LOG", default_value = "info")]
    log_level: String,
}

/// ----------------------------------------------------------------------
/// 2  Konfiguration zusammenbauen (Datei → CLI-Overrides → Validierung)
/// ----------------------------------------------------------------------
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(max_cycles) = cli.max_cycles {
        config.max_cycles = max_cycles;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// `--log-level` / `TICKETERO_LOG` is the only source; `RUST_LOG` is not consulted.
fn log_filter(cli: &Cli) -> EnvFilter {
    EnvFilter::new(&cli.log_level)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    let client = TicketeroClient::from_config(&config)?;
    info!("Using Ticketero at {}", client.base_url());

    let report = Driver::new(client, config).run().await;
    info!(
        outcome = ?report.outcome,
        tickets_created = report.tickets_created,
        completed_by_sweep = report.completed_by_sweep,
        "automation finished"
    );
    Ok(())
}

/// ----------------------------------------------------------------------
/// 3  Programmstart
/// ----------------------------------------------------------------------
#[tokio::main]
async fn main() {
    // a) CLI
    let cli = Cli::parse();

    // b) Logging
    tracing_subscriber::fmt().with_env_filter(log_filter(&cli)).init();

    // c) Lauf, abbrechbar mit Ctrl-C
    tokio::select! {
        result = run(cli) => {
            if let Err(error) = result {
                error!("Error: {:#}", error);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Script interrupted by user");
        }
    }
}
