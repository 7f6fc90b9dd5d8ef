//! Finance dashboard backend
//!
//! `serve` relays the spreadsheet endpoint to the browser app; `report`
//! prints the same dashboard in the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use finance_server::config::FileConfig;
use finance_server::proxy;
use finance_server::report::{self, ReportOptions};
use finance_server::upstream::Upstream;

/// Default config file path
const CONFIG_FILE: &str = "config.toml";

#[derive(Parser, Debug)]
#[command(name = "finance-dash")]
#[command(about = "Yearly income and expense dashboard backed by a spreadsheet")]
struct Args {
    /// Config file (defaults apply when ./config.toml is absent)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP proxy (default)
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        /// Directory with the built web app
        #[arg(long)]
        site_dir: Option<PathBuf>,
    },

    /// Print the dashboard in the terminal
    Report {
        /// Years to include (repeatable, default: all)
        #[arg(long = "year")]
        years: Vec<i32>,

        /// Category to focus instead of the overview
        #[arg(long)]
        category: Option<String>,

        /// Mask monetary values and percentages
        #[arg(long)]
        hide_values: bool,

        /// Also write the table to a CSV file
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "finance_dash=debug,finance_server=debug,tower_http=debug"
    } else {
        "finance_dash=info,finance_server=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => FileConfig::load_or_default(path, true)?,
        None => FileConfig::load_or_default(Path::new(CONFIG_FILE), false)?,
    };
    let upstream = Upstream::new(&config.source)?;
    tracing::debug!(url = upstream.url(), "Upstream configured");

    match args.command {
        Some(Command::Report {
            years,
            category,
            hide_values,
            csv,
        }) => {
            let opts = ReportOptions {
                years,
                category,
                hide_values,
                csv,
            };
            let mut stdout = std::io::stdout().lock();
            report::run(
                &upstream,
                config.schema.schema(),
                config.schema.expense_policy,
                &opts,
                &mut stdout,
            )
            .await
        }
        Some(Command::Serve { host, port, site_dir }) => {
            let mut server = config.server;
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            if site_dir.is_some() {
                server.site_dir = site_dir;
            }
            proxy::serve(&server, upstream, config.schema.settings()).await
        }
        None => proxy::serve(&config.server, upstream, config.schema.settings()).await,
    }
}
