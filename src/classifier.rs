//! Threat derivation and alert-level classification.
//!
//! Threats are inferred from how long an alert has been running: the feeds
//! only expose an on/off flag, so sustained alerts are read as frontline
//! activity. The alert level is a strict priority scan over the derived
//! threat set, independent of the intensity score.

use crate::models::{AlertDuration, AlertLevel, ThreatType};

const HOURS_PER_YEAR: u64 = 8760;
const HOURS_PER_WEEK: u64 = 168;

/// Regions with historically contested territory, matched as substrings of
/// the raw region name.
const CONTESTED_MARKERS: [&str; 4] = ["Крим", "Севастополь", "Луганськ", "Донецьк"];

/// Threats that force the `critical` level.
const CRITICAL_TIER: [&str; 2] = ["nuclear", "ballistic_missiles"];
/// Threats that force at least the `high` level.
const HIGH_TIER: [&str; 3] = ["air_raid", "cruise_missiles", "chemical"];
/// Threats that force at least the `medium` level.
const MEDIUM_TIER: [&str; 2] = ["tactical_aviation", "artillery"];

/// Derive the active threat set for a region from its elapsed duration.
///
/// Inactive alerts produce no threats. Active alerts always carry
/// `air_raid`; exactly one duration band can add to that baseline:
/// over a year adds street fighting (plus artillery in contested regions),
/// over a week adds artillery and street fighting, over 72 or 24 hours adds
/// artillery. Insertion order is classification order.
pub fn derive_threats(enabled: bool, duration: &AlertDuration, region_name: &str) -> Vec<String> {
    if !enabled {
        return Vec::new();
    }

    let mut threats = vec![ThreatType::AirRaid.as_str().to_string()];
    let total_hours = duration.total_hours();

    if total_hours > HOURS_PER_YEAR {
        threats.push(ThreatType::StreetFighting.as_str().to_string());
        if CONTESTED_MARKERS.iter().any(|m| region_name.contains(m)) {
            threats.push(ThreatType::Artillery.as_str().to_string());
        }
    } else if total_hours > HOURS_PER_WEEK {
        threats.push(ThreatType::Artillery.as_str().to_string());
        threats.push(ThreatType::StreetFighting.as_str().to_string());
    } else if total_hours > 72 {
        threats.push(ThreatType::Artillery.as_str().to_string());
    } else if total_hours > 24 {
        threats.push(ThreatType::Artillery.as_str().to_string());
    }

    threats
}

/// Classify the alert level for a threat set.
///
/// Strict priority order, not a weighted vote: a single critical-tier
/// threat outranks any number of lower-tier ones. An active alert with an
/// empty threat set falls through to `low`.
pub fn alert_level(enabled: bool, threats: &[String]) -> AlertLevel {
    if !enabled {
        return AlertLevel::None;
    }

    if threats.iter().any(|t| CRITICAL_TIER.contains(&t.as_str())) {
        return AlertLevel::Critical;
    }
    if threats.iter().any(|t| HIGH_TIER.contains(&t.as_str())) {
        return AlertLevel::High;
    }
    if threats.iter().any(|t| MEDIUM_TIER.contains(&t.as_str())) {
        return AlertLevel::Medium;
    }

    AlertLevel::Low
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
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Any active alert carries `air_raid` first, whatever its age.
        #[test]
        fn prop_active_alert_starts_with_air_raid(
            duration in arb_duration(),
            name in "[а-яА-ЯіїєІЇЄ ]{3,30}",
        ) {
            let threats = derive_threats(true, &duration, &name);
            prop_assert_eq!(threats.first().map(String::as_str), Some("air_raid"));
        }

        /// The derived threat set never contains duplicates.
        #[test]
        fn prop_no_duplicate_threats(
            duration in arb_duration(),
            name in "[а-яА-ЯіїєІЇЄ ]{3,30}",
        ) {
            let threats = derive_threats(true, &duration, &name);
            let mut unique = threats.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(threats.len(), unique.len());
        }

        /// Ballistic missiles force `critical` no matter what else is
        /// present alongside them.
        #[test]
        fn prop_ballistic_missiles_always_critical(
            mut extra in prop::collection::vec("[a-z_]{3,20}", 0..5),
        ) {
            extra.push("ballistic_missiles".to_string());
            prop_assert_eq!(alert_level(true, &extra), AlertLevel::Critical);
        }

        /// A year-long alert in a region whose name mentions Crimea yields
        /// at least air raid, street fighting, and artillery.
        #[test]
        fn prop_crimea_year_long_superset(extra_hours in 1u64..5000) {
            let total = 8760 + extra_hours;
            let duration = AlertDuration {
                days: (total / 24) as u32,
                hours: (total % 24) as u32,
                minutes: 0,
            };
            let threats = derive_threats(true, &duration, "АР Крим");

            for expected in ["air_raid", "street_fighting", "artillery"] {
                prop_assert!(
                    threats.iter().any(|t| t == expected),
                    "missing {} in {:?}", expected, threats
                );
            }
        }
    }
}
