//! Alertmap entry point.
//!
//! Downloads Ukrainian region boundaries, real-time alert statuses, and the
//! world map, then writes enriched alert data and statistics for the
//! mapping front end.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alertmap::config::AlertmapConfig;
use alertmap::enricher::AlertEnricher;
use alertmap::error::Result;
use alertmap::fetch::AlertsFetcher;
use alertmap::pipeline::{EnrichmentPipeline, PipelineOptions};
use alertmap::storage::DataStore;

#[derive(Debug, Parser)]
#[command(name = "alertmap")]
#[command(about = "Download and enrich Ukraine air-raid alert data")]
struct Args {
    /// Output directory for data files (overrides ALERTMAP_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<std::path::PathBuf>,

    /// Skip downloading region boundaries
    #[arg(long)]
    skip_regions: bool,

    /// Skip downloading alert data
    #[arg(long)]
    skip_alerts: bool,

    /// Skip downloading the world map
    #[arg(long)]
    skip_world: bool,

    /// Download boundaries only for these regions (by name)
    #[arg(long, num_args = 1..)]
    regions: Option<Vec<String>>,

    /// List all available regions and exit
    #[arg(long)]
    list_regions: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Log level via RUST_LOG (trace, debug, info, warn, error); info default
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.list_regions {
        list_regions();
        return Ok(());
    }

    tracing::info!(
        build = env!("BUILD_TIMESTAMP"),
        commit = option_env!("GIT_COMMIT").unwrap_or("unknown"),
        "Alertmap starting"
    );

    let mut config = AlertmapConfig::from_env()?;
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    tracing::info!(output_dir = %config.output_dir.display(), "Configuration loaded");

    let fetcher = AlertsFetcher::new(&config)?;
    let enricher = AlertEnricher::builtin();
    let store = DataStore::new(&config.output_dir)?;
    let pipeline = EnrichmentPipeline::new(fetcher, enricher, store);

    let options = PipelineOptions {
        download_boundaries: !args.skip_regions,
        download_alerts: !args.skip_alerts,
        download_world: !args.skip_world,
        region_filter: args.regions,
    };

    let report = pipeline.run(&options).await?;

    tracing::info!(
        boundaries_downloaded = report.boundaries_downloaded,
        boundary_failures = report.boundary_failures,
        alerts_processed = report.alerts_processed,
        world_map_downloaded = report.world_map_downloaded,
        "Run completed"
    );

    Ok(())
}

/// Print the region catalog to stdout.
fn list_regions() {
    let catalog = alertmap::catalog::RegionCatalog::builtin();
    println!("Available regions ({}):", catalog.len());
    for (i, region) in catalog.iter().enumerate() {
        println!(
            "{:2}. {:35} (OSM: {:7}) [{}]",
            i + 1,
            region.name,
            region.osm_id,
            region.name_en
        );
    }
}
