mod commands;
mod output;
mod xml_output;

use std::time::Duration;

use agritechtz_api::{Client, ClientConfig};
use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Environment variable overriding the API host.
const BASE_URL_ENV: &str = "AGRITECHTZ_API_URL";

#[derive(Parser)]
#[command(name = "agritechtz")]
#[command(about = "Query crop market prices from the agritechtz export")]
struct Cli {
    /// Output format: table, json, csv, markdown or xml
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API host, e.g. https://agritech.co.tz (overrides AGRITECHTZ_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch crop prices
    Prices(commands::prices::PricesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agritechtz=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        "xml" => OutputFormat::Xml,
        _ => OutputFormat::Table,
    };

    let config = client_config(cli.base_url, cli.timeout_secs);
    tracing::debug!(endpoint = %config.endpoint(), "using crop price export");
    let client = Client::with_config(config);

    match &cli.command {
        Commands::Prices(args) => commands::prices::run(args, &client, &format).await?,
    }

    Ok(())
}

fn client_config(base_url: Option<String>, timeout_secs: Option<u64>) -> ClientConfig {
    let base_url = base_url.or_else(|| std::env::var(BASE_URL_ENV).ok());
    let config = match base_url {
        Some(url) => ClientConfig::with_base_url(&url),
        None => ClientConfig::default(),
    };
    match timeout_secs {
        Some(secs) => config.timeout(Duration::from_secs(secs)),
        None => config,
    }
}
