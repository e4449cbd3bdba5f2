//! Configuration loading from environment.
//!
//! Every knob has a default so the binary runs with no configuration at
//! all; environment variables (optionally via a `.env` file) override them
//! and CLI flags override both.

use std::env;
use std::path::PathBuf;

use crate::error::{AlertmapError, Result};

/// Default output directory for generated JSON data.
pub const DEFAULT_OUTPUT_DIR: &str = "data";
/// Default real-time alert statuses feed.
pub const DEFAULT_STATUSES_URL: &str = "https://vadimklimenko.com/map/statuses.json";
/// Default region polygon service (takes an OSM relation id).
pub const DEFAULT_POLYGONS_URL: &str = "https://polygons.openstreetmap.fr/get_geojson.py";
/// Default world countries GeoJSON source.
pub const DEFAULT_WORLD_MAP_URL: &str =
    "https://datahub.io/core/geo-countries/r/countries.geojson";
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default boundary-download budget per minute, to stay polite to the
/// polygon service.
pub const DEFAULT_BOUNDARY_REQUESTS_PER_MINUTE: u32 = 60;

/// Main configuration for the alertmap pipeline.
#[derive(Debug, Clone)]
pub struct AlertmapConfig {
    /// Directory the JSON artifacts are written to.
    pub output_dir: PathBuf,
    /// Alert statuses feed URL.
    pub statuses_url: String,
    /// Region polygon service URL.
    pub polygons_url: String,
    /// World map GeoJSON URL.
    pub world_map_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Boundary downloads allowed per minute.
    pub boundary_requests_per_minute: u32,
}

impl Default for AlertmapConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            statuses_url: DEFAULT_STATUSES_URL.to_string(),
            polygons_url: DEFAULT_POLYGONS_URL.to_string(),
            world_map_url: DEFAULT_WORLD_MAP_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            boundary_requests_per_minute: DEFAULT_BOUNDARY_REQUESTS_PER_MINUTE,
        }
    }
}

impl AlertmapConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ALERTMAP_OUTPUT_DIR`: output directory (default: `data`)
    /// - `ALERTMAP_STATUSES_URL`: alert statuses feed
    /// - `ALERTMAP_POLYGONS_URL`: region polygon service
    /// - `ALERTMAP_WORLD_MAP_URL`: world map GeoJSON source
    /// - `ALERTMAP_REQUEST_TIMEOUT_SECS`: per-request timeout (default: 30)
    /// - `ALERTMAP_BOUNDARY_RPM`: boundary downloads per minute (default: 60)
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let boundary_requests_per_minute = parse_env(
            "ALERTMAP_BOUNDARY_RPM",
            defaults.boundary_requests_per_minute,
        )?;
        if boundary_requests_per_minute == 0 {
            return Err(AlertmapError::Config(
                "ALERTMAP_BOUNDARY_RPM must be positive".to_string(),
            ));
        }

        Ok(Self {
            output_dir: env::var("ALERTMAP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            statuses_url: env_or("ALERTMAP_STATUSES_URL", defaults.statuses_url),
            polygons_url: env_or("ALERTMAP_POLYGONS_URL", defaults.polygons_url),
            world_map_url: env_or("ALERTMAP_WORLD_MAP_URL", defaults.world_map_url),
            request_timeout_secs: parse_env(
                "ALERTMAP_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            boundary_requests_per_minute,
        })
    }
}

/// Read an environment variable, falling back to a default.
fn env_or(var_name: &str, default: String) -> String {
    env::var(var_name).unwrap_or(default)
}

/// Parse an environment variable, erroring on malformed values rather than
/// silently falling back.
fn parse_env<T: std::str::FromStr>(var_name: &str, default: T) -> Result<T> {
    match env::var(var_name) {
        Ok(raw) => raw.parse().map_err(|_| {
            AlertmapError::Config(format!("{} has invalid value: {}", var_name, raw))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AlertmapConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("data"));
        assert!(config.statuses_url.starts_with("https://"));
        assert!(config.polygons_url.starts_with("https://"));
        assert!(config.request_timeout_secs > 0);
        assert!(config.boundary_requests_per_minute > 0);
    }

    #[test]
    fn env_or_uses_default_when_unset() {
        let var_name = "TEST_ALERTMAP_ENV_OR_UNSET";
        env::remove_var(var_name);
        assert_eq!(env_or(var_name, "fallback".to_string()), "fallback");
    }

    #[test]
    fn env_or_reads_set_variable() {
        let var_name = "TEST_ALERTMAP_ENV_OR_SET";
        env::set_var(var_name, "https://example.test/feed.json");
        assert_eq!(
            env_or(var_name, "fallback".to_string()),
            "https://example.test/feed.json"
        );
        env::remove_var(var_name);
    }

    #[test]
    fn parse_env_default_when_unset() {
        let var_name = "TEST_ALERTMAP_PARSE_UNSET";
        env::remove_var(var_name);
        assert_eq!(parse_env(var_name, 42u64).unwrap(), 42);
    }

    #[test]
    fn parse_env_reads_valid_value() {
        let var_name = "TEST_ALERTMAP_PARSE_VALID";
        env::set_var(var_name, "120");
        assert_eq!(parse_env(var_name, 42u64).unwrap(), 120);
        env::remove_var(var_name);
    }

    #[test]
    fn parse_env_rejects_malformed_value() {
        let var_name = "TEST_ALERTMAP_PARSE_BAD";
        env::set_var(var_name, "not-a-number");
        let result = parse_env(var_name, 42u64);
        assert!(matches!(result, Err(AlertmapError::Config(_))));
        env::remove_var(var_name);
    }
}
