//! Core data models for the alert enrichment pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known threat type identifiers.
///
/// The wire format uses plain snake_case strings so that identifiers coming
/// from merged upstream sources that we do not know about survive the
/// pipeline; this enum covers the set the classifier and catalog reason
/// about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreatType {
    AirRaid,
    TacticalAviation,
    CruiseMissiles,
    BallisticMissiles,
    Drones,
    Artillery,
    Chemical,
    Nuclear,
    StreetFighting,
}

impl ThreatType {
    /// All known threat types, in catalog order.
    pub const ALL: [ThreatType; 9] = [
        ThreatType::AirRaid,
        ThreatType::TacticalAviation,
        ThreatType::CruiseMissiles,
        ThreatType::BallisticMissiles,
        ThreatType::Drones,
        ThreatType::Artillery,
        ThreatType::Chemical,
        ThreatType::Nuclear,
        ThreatType::StreetFighting,
    ];

    /// Wire identifier for this threat type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatType::AirRaid => "air_raid",
            ThreatType::TacticalAviation => "tactical_aviation",
            ThreatType::CruiseMissiles => "cruise_missiles",
            ThreatType::BallisticMissiles => "ballistic_missiles",
            ThreatType::Drones => "drones",
            ThreatType::Artillery => "artillery",
            ThreatType::Chemical => "chemical",
            ThreatType::Nuclear => "nuclear",
            ThreatType::StreetFighting => "street_fighting",
        }
    }
}

/// Coarse 5-tier alert severity used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl AlertLevel {
    /// Wire identifier for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::None => "none",
            AlertLevel::Low => "low",
            AlertLevel::Medium => "medium",
            AlertLevel::High => "high",
            AlertLevel::Critical => "critical",
        }
    }
}

/// Raw per-region alert status as decoded from the statuses feed.
///
/// No invariants are enforced here; timestamps may be missing or malformed
/// and the pipeline must tolerate both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAlertRecord {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub enabled_at: Option<String>,
    #[serde(default)]
    pub disabled_at: Option<String>,
}

/// Elapsed alert time floored to whole minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDuration {
    pub days: u32,
    /// Always in 0..=23.
    pub hours: u32,
    /// Always in 0..=59.
    pub minutes: u32,
}

impl AlertDuration {
    /// The zero duration used for cleared and unparseable records.
    pub const ZERO: AlertDuration = AlertDuration {
        days: 0,
        hours: 0,
        minutes: 0,
    };

    /// Total elapsed whole hours, the unit used by classification bands
    /// and statistics tie-breaking.
    pub fn total_hours(&self) -> u64 {
        u64::from(self.days) * 24 + u64::from(self.hours)
    }
}

/// Fully enriched per-region alert record, the pipeline's output entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedAlert {
    /// Derived display slug (lowercase, spaces to underscores, punctuation
    /// stripped). Not guaranteed unique; the canonical region name keys the
    /// output map.
    pub region_id: String,
    pub region_name: String,
    pub region_name_en: String,
    pub alert_level: AlertLevel,
    /// Threat identifiers in classification order.
    pub threat_types: Vec<String>,
    /// Raw start timestamp as received from upstream.
    pub start_time: Option<String>,
    /// Raw end timestamp; `None` means the alert is ongoing.
    pub end_time: Option<String>,
    pub duration: AlertDuration,
    /// Synthetic severity score in 0..=100.
    pub intensity: u8,
    pub is_active: bool,
    pub last_updated: DateTime<Utc>,
}

impl EnhancedAlert {
    /// Build the all-cleared record for a region without an active alert.
    pub fn cleared(
        region_id: String,
        region_name: String,
        region_name_en: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            region_id,
            region_name,
            region_name_en,
            alert_level: AlertLevel::None,
            threat_types: Vec::new(),
            start_time: None,
            end_time: None,
            duration: AlertDuration::ZERO,
            intensity: 0,
            is_active: false,
            last_updated: now,
        }
    }
}

/// Reference to the longest-running active alert in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongestAlert {
    pub region: String,
    pub region_en: String,
    pub duration: AlertDuration,
    pub total_hours: u64,
}

/// Reference to the highest-intensity active alert in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighestIntensity {
    pub region: String,
    pub region_en: String,
    pub intensity: u8,
    pub threats: Vec<String>,
}

/// Aggregate summary over a batch of enhanced alerts.
///
/// Recomputed fresh on every pipeline run; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_regions: usize,
    pub active_alerts: usize,
    pub clear_regions: usize,
    /// Threat identifier to number of active regions reporting it.
    pub threat_type_counts: serde_json::Map<String, serde_json::Value>,
    pub critical_alerts: usize,
    pub high_alerts: usize,
    pub medium_alerts: usize,
    pub low_alerts: usize,
    pub longest_alert: Option<LongestAlert>,
    pub highest_intensity: Option<HighestIntensity>,
    pub generated_at: DateTime<Utc>,
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_duration() -> impl Strategy<Value = AlertDuration> {
        (0u32..2000, 0u32..24, 0u32..60).prop_map(|(days, hours, minutes)| AlertDuration {
            days,
            hours,
            minutes,
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Serializing an alert to JSON and decoding it back reproduces
        /// identical field values.
        #[test]
        fn prop_alert_json_round_trip(
            duration in arb_duration(),
            intensity in 0u8..=100,
            threats in prop::collection::vec("[a-z_]{3,20}", 0..5),
        ) {
            let alert = EnhancedAlert {
                region_id: "region".to_string(),
                region_name: "Регіон".to_string(),
                region_name_en: "Region".to_string(),
                alert_level: AlertLevel::Medium,
                threat_types: threats,
                start_time: Some("2024-01-01T00:00:00Z".to_string()),
                end_time: None,
                duration,
                intensity,
                is_active: true,
                last_updated: Utc::now(),
            };

            let json = serde_json::to_string(&alert).expect("serialize");
            let parsed: EnhancedAlert = serde_json::from_str(&json).expect("deserialize");
            prop_assert_eq!(alert, parsed);
        }

        /// `total_hours` agrees with the days/hours breakdown.
        #[test]
        fn prop_total_hours_consistent(duration in arb_duration()) {
            prop_assert_eq!(
                duration.total_hours(),
                u64::from(duration.days) * 24 + u64::from(duration.hours)
            );
        }
    }
}
