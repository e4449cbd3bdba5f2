//! HTTP collaborators: alert statuses, region boundaries, world map.
//!
//! These are thin wrappers around upstream services; the enrichment core
//! never performs I/O itself. Boundary downloads are rate limited to stay
//! polite to the polygon service.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use governor::{Quota, RateLimiter as GovRateLimiter};
use serde_json::Value;

use crate::config::AlertmapConfig;
use crate::error::{AlertmapError, Result};
use crate::models::RawAlertRecord;

/// Rate limiter type alias.
type RateLimiter = GovRateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Raw statuses feed, both the original document (persisted verbatim for
/// compatibility) and the decoded per-region records in feed order.
#[derive(Debug)]
pub struct StatusesSnapshot {
    /// The feed document as received.
    pub document: Value,
    /// Region name to raw record, in feed iteration order.
    pub records: Vec<(String, RawAlertRecord)>,
}

/// HTTP client for the upstream alert and geometry services.
pub struct AlertsFetcher {
    client: reqwest::Client,
    statuses_url: String,
    polygons_url: String,
    world_map_url: String,
    boundary_limiter: Arc<RateLimiter>,
}

impl AlertsFetcher {
    /// Build a fetcher from the pipeline configuration.
    pub fn new(config: &AlertmapConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let quota = Quota::per_minute(
            NonZeroU32::new(config.boundary_requests_per_minute).unwrap_or(NonZeroU32::MIN),
        );
        let boundary_limiter = Arc::new(GovRateLimiter::direct(quota));

        Ok(Self {
            client,
            statuses_url: config.statuses_url.clone(),
            polygons_url: config.polygons_url.clone(),
            world_map_url: config.world_map_url.clone(),
            boundary_limiter,
        })
    }

    /// Download and decode the alert statuses feed.
    pub async fn fetch_statuses(&self) -> Result<StatusesSnapshot> {
        let document: Value = self.get_json(&self.statuses_url).await?;
        let records = decode_statuses(&document);
        Ok(StatusesSnapshot { document, records })
    }

    /// Download the boundary GeoJSON for one OSM relation, annotating its
    /// `properties` with the region name and download time.
    pub async fn fetch_boundary(
        &self,
        osm_id: u64,
        name: &str,
        name_en: &str,
        downloaded_at: DateTime<Utc>,
    ) -> Result<Value> {
        self.boundary_limiter.until_ready().await;

        let url = format!("{}?id={}&params=0", self.polygons_url, osm_id);
        let mut boundary = self.get_json(&url).await?;
        annotate_boundary(&mut boundary, name, name_en, osm_id, downloaded_at);
        Ok(boundary)
    }

    /// Download the world countries GeoJSON.
    pub async fn fetch_world_map(&self) -> Result<Value> {
        self.get_json(&self.world_map_url).await
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AlertmapError::Upstream(format!("HTTP {}: {}", status, body)));
        }

        Ok(response.json().await?)
    }
}

/// Decode the statuses document into per-region records, preserving feed
/// order.
///
/// The feed wraps the region map in a top-level `states` object but older
/// snapshots are bare; both shapes are accepted. Records that fail to
/// decode are kept as disabled defaults rather than dropping the region.
pub(crate) fn decode_statuses(document: &Value) -> Vec<(String, RawAlertRecord)> {
    let states = document
        .get("states")
        .and_then(Value::as_object)
        .or_else(|| document.as_object());

    let Some(states) = states else {
        tracing::warn!("Statuses document is not a JSON object");
        return Vec::new();
    };

    states
        .iter()
        .map(|(name, value)| {
            let record = match serde_json::from_value(value.clone()) {
                Ok(record) => record,
                Err(error) => {
                    tracing::warn!(region = %name, %error, "Undecodable status record");
                    RawAlertRecord::default()
                }
            };
            (name.clone(), record)
        })
        .collect()
}

/// Inject region metadata into a boundary document's `properties`.
pub(crate) fn annotate_boundary(
    boundary: &mut Value,
    name: &str,
    name_en: &str,
    osm_id: u64,
    downloaded_at: DateTime<Utc>,
) {
    let Some(root) = boundary.as_object_mut() else {
        return;
    };

    let properties = root
        .entry("properties")
        .or_insert_with(|| Value::Object(serde_json::Map::new()));

    if let Some(properties) = properties.as_object_mut() {
        properties.insert("name".to_string(), name.into());
        properties.insert("name_en".to_string(), name_en.into());
        properties.insert("id".to_string(), osm_id.into());
        properties.insert(
            "downloaded_at".to_string(),
            downloaded_at.to_rfc3339().into(),
        );
    }
}
