//! research-presence - ADS publications vs. web presence
//!
//! Reads a list of researcher names, looks each one up in NASA ADS and in
//! Google Programmable Search, then writes a CSV table and an anonymized
//! log-log scatter plot.
//!
//! ## Usage
//!
//! ```bash
//! research-presence --names names.txt --config config.yaml --ads_refereed --ads_year 2000-2025
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use research_presence::{
    ads::AdsClient,
    aggregate,
    config::{self, Settings},
    google::GoogleSearchClient,
    lookup::CountLookup,
    names::{self, InputFormat},
    output,
    query::{QueryFilters, YearRange},
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Compare researchers' ADS publication counts with their web search presence
#[derive(Parser)]
#[command(name = "research-presence")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TXT file (one name per line) or CSV file with a 'name' column
    #[arg(long)]
    names: PathBuf,

    /// Names file layout: text or csv (default: inferred from extension)
    #[arg(long = "names_format")]
    names_format: Option<InputFormat>,

    /// Path to config.yaml, config.toml or config.json with API credentials
    #[arg(long)]
    config: PathBuf,

    /// Output CSV path
    #[arg(long = "out_csv", default_value = "output.csv")]
    out_csv: PathBuf,

    /// Output scatter plot path
    #[arg(long = "out_png", default_value = "scatter.png")]
    out_png: PathBuf,

    /// Count refereed papers only
    #[arg(long = "ads_refereed")]
    ads_refereed: bool,

    /// Affiliation substring filter
    #[arg(long = "ads_aff")]
    ads_aff: Option<String>,

    /// Inclusive publication year range (e.g. "2000-2025" or "2010")
    #[arg(long = "ads_year")]
    ads_year: Option<YearRange>,

    /// ADS collection to search (empty string searches all collections)
    #[arg(long = "ads_collection", default_value = "astronomy")]
    ads_collection: String,

    /// Restrict to papers claimed by this ORCID iD
    #[arg(long = "ads_orcid")]
    ads_orcid: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long = "json_logs")]
    json_logs: bool,
}

impl Cli {
    fn filters(&self) -> QueryFilters {
        QueryFilters {
            collection: Some(self.ads_collection.clone()),
            refereed_only: self.ads_refereed,
            affiliation: self.ads_aff.clone(),
            year_range: self.ads_year,
            orcid: self.ads_orcid.clone(),
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug, cli.json_logs);

    run(cli).await
}

fn init_logging(debug: bool, json: bool) {
    let log_level = if debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    let builder = fmt().with_env_filter(filter).with_target(true).with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Fatal setup: everything here fails before any API call is made
    let settings = config::load_config(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    let names = names::load_names(&cli.names, cli.names_format)
        .with_context(|| format!("Failed to load names from {}", cli.names.display()))?;

    let filters = cli.filters();
    info!(filters = ?filters, researchers = names.len(), "Starting survey");

    let ads = build_ads_client(&settings)?;
    let search = build_search_client(&settings)?;

    let rows = aggregate::survey(
        &names,
        &filters,
        &ads,
        search.as_ref().map(|s| s as &dyn CountLookup),
    )
    .await;

    output::write_csv(&cli.out_csv, &rows)
        .with_context(|| format!("Failed to write CSV {}", cli.out_csv.display()))?;

    let plot = output::render_scatter(&cli.out_png, &rows)
        .with_context(|| format!("Failed to write plot {}", cli.out_png.display()))?;

    info!(
        rows = rows.len(),
        plotted = plot.len(),
        csv = %cli.out_csv.display(),
        png = %cli.out_png.display(),
        "Done"
    );
    Ok(())
}

fn build_ads_client(settings: &Settings) -> Result<AdsClient> {
    let client = AdsClient::new(
        settings.credentials.ads_token.clone(),
        settings.ads_api_url.clone(),
    )
    .context("Failed to create ADS client")?;
    Ok(client.with_delay(settings.ads_delay))
}

fn build_search_client(settings: &Settings) -> Result<Option<GoogleSearchClient>> {
    let Some(credentials) = settings.credentials.google.clone() else {
        return Ok(None);
    };

    let client = GoogleSearchClient::new(credentials, settings.google_api_url.clone())
        .context("Failed to create Google search client")?;
    Ok(Some(client.with_delay(settings.google_delay)))
}
