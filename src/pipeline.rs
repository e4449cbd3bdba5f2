//! End-to-end pipeline: fetch, enrich, aggregate, persist.
//!
//! The enrichment core is pure; this module wires it to the HTTP and file
//! collaborators. Per-region boundary failures are logged and skipped so a
//! flaky polygon service cannot take down an alerts refresh.

use chrono::{DateTime, Utc};

use crate::enricher::AlertEnricher;
use crate::error::Result;
use crate::fetch::AlertsFetcher;
use crate::models::{EnhancedAlert, RawAlertRecord};
use crate::stats;
use crate::storage::DataStore;

/// What a pipeline run should download.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Download region boundary polygons.
    pub download_boundaries: bool,
    /// Download alert statuses and produce the enriched artifacts.
    pub download_alerts: bool,
    /// Download the world countries map.
    pub download_world: bool,
    /// Restrict boundary downloads to these regions (raw names accepted).
    pub region_filter: Option<Vec<String>>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            download_boundaries: true,
            download_alerts: true,
            download_world: true,
            region_filter: None,
        }
    }
}

/// Counters reported after a pipeline run.
#[derive(Debug, Default, Clone)]
pub struct RunReport {
    pub boundaries_downloaded: usize,
    pub boundary_failures: usize,
    pub alerts_processed: usize,
    pub world_map_downloaded: bool,
}

/// Ties the fetcher, enricher, and store together.
pub struct EnrichmentPipeline {
    fetcher: AlertsFetcher,
    enricher: AlertEnricher,
    store: DataStore,
}

impl EnrichmentPipeline {
    /// Build a pipeline from its collaborators.
    pub fn new(fetcher: AlertsFetcher, enricher: AlertEnricher, store: DataStore) -> Self {
        Self {
            fetcher,
            enricher,
            store,
        }
    }

    /// Execute one full run according to the options.
    pub async fn run(&self, options: &PipelineOptions) -> Result<RunReport> {
        let mut report = RunReport::default();

        if options.download_boundaries {
            self.download_boundaries(options.region_filter.as_deref(), &mut report)
                .await;
        }

        if options.download_alerts {
            report.alerts_processed = self.refresh_alerts().await?;
        }

        if options.download_world {
            match self.fetch_and_save_world_map().await {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "World map saved");
                    report.world_map_downloaded = true;
                }
                Err(error) => {
                    tracing::error!(%error, "Failed to download world map");
                }
            }
        }

        Ok(report)
    }

    async fn fetch_and_save_world_map(&self) -> Result<std::path::PathBuf> {
        let world = self.fetcher.fetch_world_map().await?;
        self.store.save_world_map(&world)
    }

    /// Download boundary polygons for all (or the selected) regions.
    async fn download_boundaries(&self, filter: Option<&[String]>, report: &mut RunReport) {
        let catalog = self.enricher.regions();
        let selected: Vec<_> = match filter {
            Some(names) => {
                let canonical: Vec<&str> =
                    names.iter().map(|n| catalog.normalize(n)).collect();
                catalog
                    .iter()
                    .filter(|r| canonical.contains(&r.name))
                    .collect()
            }
            None => catalog.iter().collect(),
        };

        tracing::info!(count = selected.len(), "Downloading region boundaries");

        for region in selected {
            let downloaded_at = Utc::now();
            match self
                .fetcher
                .fetch_boundary(region.osm_id, region.name, region.name_en, downloaded_at)
                .await
            {
                Ok(boundary) => match self.store.save_boundary(region.name, &boundary) {
                    Ok(path) => {
                        tracing::info!(region = %region.name, path = %path.display(), "Boundary saved");
                        report.boundaries_downloaded += 1;
                    }
                    Err(error) => {
                        tracing::error!(region = %region.name, %error, "Failed to save boundary");
                        report.boundary_failures += 1;
                    }
                },
                Err(error) => {
                    tracing::error!(region = %region.name, %error, "Failed to download boundary");
                    report.boundary_failures += 1;
                }
            }
        }
    }

    /// Fetch the statuses feed, enrich every record, and persist the
    /// snapshot, the enhanced map, and the statistics summary.
    async fn refresh_alerts(&self) -> Result<usize> {
        let snapshot = self.fetcher.fetch_statuses().await?;
        tracing::info!(count = snapshot.records.len(), "Downloaded alert statuses");

        let now = Utc::now();
        let enriched = enrich_batch(&self.enricher, &snapshot.records, now);

        self.store.save_statuses_snapshot(&snapshot.document)?;
        self.store.save_enhanced_alerts(&enriched)?;

        let statistics = stats::aggregate(&enriched, now);
        self.store.save_statistics(&statistics)?;

        tracing::info!(
            total_regions = statistics.total_regions,
            active_alerts = statistics.active_alerts,
            critical_alerts = statistics.critical_alerts,
            "Alert statistics generated"
        );
        if let Some(longest) = &statistics.longest_alert {
            tracing::info!(
                region = %longest.region,
                total_hours = longest.total_hours,
                "Longest running alert"
            );
        }
        if let Some(highest) = &statistics.highest_intensity {
            tracing::info!(
                region = %highest.region,
                intensity = highest.intensity,
                "Highest intensity alert"
            );
        }

        Ok(enriched.len())
    }
}

/// Enrich a batch of raw records, preserving the input iteration order that
/// statistics tie-breaking depends on.
pub fn enrich_batch(
    enricher: &AlertEnricher,
    records: &[(String, RawAlertRecord)],
    now: DateTime<Utc>,
) -> Vec<(String, EnhancedAlert)> {
    records
        .iter()
        .map(|(name, record)| enricher.enrich(name, record, now))
        .collect()
}
