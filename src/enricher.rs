//! Per-region alert enrichment.
//!
//! Orchestrates duration calculation, threat classification, and intensity
//! scoring into one `EnhancedAlert`. Pure function of its inputs: the same
//! raw record and instant always produce the same output, and the record is
//! assembled atomically with its derived fields.

use chrono::{DateTime, Utc};

use crate::catalog::{region_slug, RegionCatalog, ThreatCatalog};
use crate::classifier;
use crate::duration;
use crate::intensity;
use crate::models::{EnhancedAlert, RawAlertRecord};

/// Builds `EnhancedAlert`s from raw status records using the injected
/// catalogs.
pub struct AlertEnricher {
    regions: RegionCatalog,
    threats: ThreatCatalog,
}

impl AlertEnricher {
    /// Create an enricher over the given catalogs.
    pub fn new(regions: RegionCatalog, threats: ThreatCatalog) -> Self {
        Self { regions, threats }
    }

    /// Enricher over the embedded builtin catalogs.
    pub fn builtin() -> Self {
        Self::new(RegionCatalog::builtin(), ThreatCatalog::builtin())
    }

    /// Region catalog backing this enricher.
    pub fn regions(&self) -> &RegionCatalog {
        &self.regions
    }

    /// Enrich one raw record into an `EnhancedAlert`.
    ///
    /// Returns the canonical region name (the output map key) together with
    /// the enriched record. A disabled record short-circuits to the
    /// all-cleared shape without running classification or scoring.
    pub fn enrich(
        &self,
        raw_name: &str,
        record: &RawAlertRecord,
        now: DateTime<Utc>,
    ) -> (String, EnhancedAlert) {
        let canonical = self.regions.normalize(raw_name).to_string();
        let name_en = self.regions.name_en(&canonical).to_string();
        let slug = region_slug(&canonical);

        if !record.enabled {
            let alert = EnhancedAlert::cleared(slug, canonical.clone(), name_en, now);
            return (canonical, alert);
        }

        let elapsed = duration::elapsed(
            record.enabled_at.as_deref(),
            record.disabled_at.as_deref(),
            now,
        );
        let threat_types = classifier::derive_threats(true, &elapsed, &canonical);
        let alert_level = classifier::alert_level(true, &threat_types);
        let intensity = intensity::score(&self.threats, &threat_types, &elapsed);

        let alert = EnhancedAlert {
            region_id: slug,
            region_name: canonical.clone(),
            region_name_en: name_en,
            alert_level,
            threat_types,
            start_time: record.enabled_at.clone(),
            end_time: record.disabled_at.clone(),
            duration: elapsed,
            intensity,
            is_active: true,
            last_updated: now,
        };

        (canonical, alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertDuration, AlertLevel};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn active_record(enabled_at: &str) -> RawAlertRecord {
        RawAlertRecord {
            enabled: true,
            enabled_at: Some(enabled_at.to_string()),
            disabled_at: None,
        }
    }

    #[test]
    fn disabled_record_yields_cleared_alert() {
        let enricher = AlertEnricher::builtin();
        let record = RawAlertRecord {
            enabled: false,
            enabled_at: Some("2024-05-01T00:00:00Z".to_string()),
            disabled_at: Some("2024-05-02T00:00:00Z".to_string()),
        };

        let (key, alert) = enricher.enrich("Львівська область", &record, now());

        assert_eq!(key, "Львівська область");
        assert_eq!(alert.alert_level, AlertLevel::None);
        assert!(alert.threat_types.is_empty());
        assert_eq!(alert.duration, AlertDuration::ZERO);
        assert_eq!(alert.intensity, 0);
        assert!(!alert.is_active);
    }

    #[test]
    fn fresh_alert_is_air_raid_high() {
        let enricher = AlertEnricher::builtin();
        let record = active_record("2024-06-01T10:00:00Z");

        let (_, alert) = enricher.enrich("Одеська область", &record, now());

        assert!(alert.is_active);
        assert_eq!(alert.threat_types, vec!["air_raid"]);
        assert_eq!(alert.alert_level, AlertLevel::High);
        assert_eq!(
            alert.duration,
            AlertDuration {
                days: 0,
                hours: 2,
                minutes: 0
            }
        );
        // air_raid weight alone saturates the score
        assert_eq!(alert.intensity, 100);
        assert_eq!(alert.region_id, "одеська_область");
        assert_eq!(alert.region_name_en, "Odesa");
    }

    #[test]
    fn alias_name_resolves_to_canonical_key() {
        let enricher = AlertEnricher::builtin();
        let record = active_record("2024-06-01T11:00:00Z");

        let (key, alert) = enricher.enrich("АР Крим", &record, now());

        assert_eq!(key, "Автономна Республіка Крим");
        assert_eq!(alert.region_name, "Автономна Республіка Крим");
        assert_eq!(alert.region_name_en, "Crimea");
    }

    #[test]
    fn year_long_contested_alert_gets_full_threat_set() {
        let enricher = AlertEnricher::builtin();
        let record = active_record("2022-04-04T16:45:00Z");

        let (_, alert) = enricher.enrich("Луганська область", &record, now());

        assert_eq!(
            alert.threat_types,
            vec!["air_raid", "street_fighting", "artillery"]
        );
        assert_eq!(alert.alert_level, AlertLevel::High);
        assert_eq!(alert.intensity, 100);
    }

    #[test]
    fn unknown_region_passes_through_verbatim() {
        let enricher = AlertEnricher::builtin();
        let record = active_record("2024-06-01T11:30:00Z");

        let (key, alert) = enricher.enrich("Тестова область", &record, now());

        assert_eq!(key, "Тестова область");
        assert_eq!(alert.region_name, "Тестова область");
        assert_eq!(alert.region_name_en, "Тестова область");
        assert_eq!(alert.region_id, "тестова_область");
    }

    #[test]
    fn malformed_start_time_degrades_to_zero_duration() {
        let enricher = AlertEnricher::builtin();
        let record = active_record("not-a-timestamp");

        let (_, alert) = enricher.enrich("Сумська область", &record, now());

        assert!(alert.is_active);
        assert_eq!(alert.duration, AlertDuration::ZERO);
        assert_eq!(alert.threat_types, vec!["air_raid"]);
        // raw value is preserved even though it could not be parsed
        assert_eq!(alert.start_time.as_deref(), Some("not-a-timestamp"));
    }

    #[test]
    fn enrichment_is_deterministic() {
        let enricher = AlertEnricher::builtin();
        let record = active_record("2024-05-28T00:00:00Z");

        let first = enricher.enrich("Харківська область", &record, now());
        let second = enricher.enrich("Харківська область", &record, now());

        assert_eq!(first, second);
    }
}
