//! Batch statistics over enhanced alerts.
//!
//! The summary is recomputed fresh from each batch; iteration order is the
//! caller's input order and ties for the longest or most intense alert are
//! resolved by first occurrence, which keeps runs deterministic.

use chrono::{DateTime, Utc};

use crate::models::{AlertLevel, EnhancedAlert, HighestIntensity, LongestAlert, Statistics};

/// Aggregate a batch of enhanced alerts into a `Statistics` summary.
///
/// An empty batch is not an error: all counts are zero and the extreme
/// references are `None`.
pub fn aggregate(batch: &[(String, EnhancedAlert)], generated_at: DateTime<Utc>) -> Statistics {
    let mut threat_type_counts = serde_json::Map::new();
    let mut critical_alerts = 0;
    let mut high_alerts = 0;
    let mut medium_alerts = 0;
    let mut low_alerts = 0;
    let mut active_alerts = 0;

    let mut longest: Option<(&EnhancedAlert, u64)> = None;
    let mut highest: Option<&EnhancedAlert> = None;

    for (_, alert) in batch {
        if !alert.is_active {
            continue;
        }
        active_alerts += 1;

        match alert.alert_level {
            AlertLevel::Critical => critical_alerts += 1,
            AlertLevel::High => high_alerts += 1,
            AlertLevel::Medium => medium_alerts += 1,
            AlertLevel::Low => low_alerts += 1,
            AlertLevel::None => {}
        }

        for threat in &alert.threat_types {
            let count = threat_type_counts
                .get(threat)
                .and_then(|v| v.as_u64())
                .unwrap_or(0);
            threat_type_counts.insert(threat.clone(), (count + 1).into());
        }

        // Strict comparisons keep the first-seen alert on ties.
        let total_hours = alert.duration.total_hours();
        if longest.map_or(true, |(_, best)| total_hours > best) {
            longest = Some((alert, total_hours));
        }
        if highest.map_or(true, |best| alert.intensity > best.intensity) {
            highest = Some(alert);
        }
    }

    Statistics {
        total_regions: batch.len(),
        active_alerts,
        clear_regions: batch.len() - active_alerts,
        threat_type_counts,
        critical_alerts,
        high_alerts,
        medium_alerts,
        low_alerts,
        longest_alert: longest.map(|(alert, total_hours)| LongestAlert {
            region: alert.region_name.clone(),
            region_en: alert.region_name_en.clone(),
            duration: alert.duration,
            total_hours,
        }),
        highest_intensity: highest.map(|alert| HighestIntensity {
            region: alert.region_name.clone(),
            region_en: alert.region_name_en.clone(),
            intensity: alert.intensity,
            threats: alert.threat_types.clone(),
        }),
        generated_at,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::models::AlertDuration;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn arb_alert() -> impl Strategy<Value = (String, EnhancedAlert)> {
        (
            "[a-z]{3,12}",
            any::<bool>(),
            0u64..2000,
            0u8..=100,
            prop::collection::vec("[a-z_]{3,15}", 0..4),
        )
            .prop_map(|(name, is_active, total_hours, intensity, threats)| {
                let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
                let alert = EnhancedAlert {
                    region_id: name.clone(),
                    region_name: name.clone(),
                    region_name_en: name.clone(),
                    alert_level: if is_active {
                        AlertLevel::High
                    } else {
                        AlertLevel::None
                    },
                    threat_types: if is_active { threats } else { Vec::new() },
                    start_time: None,
                    end_time: None,
                    duration: if is_active {
                        AlertDuration {
                            days: (total_hours / 24) as u32,
                            hours: (total_hours % 24) as u32,
                            minutes: 0,
                        }
                    } else {
                        AlertDuration::ZERO
                    },
                    intensity: if is_active { intensity } else { 0 },
                    is_active,
                    last_updated: now,
                };
                (name, alert)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Active plus clear always equals the batch size.
        #[test]
        fn prop_counts_partition_batch(batch in prop::collection::vec(arb_alert(), 0..20)) {
            let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
            let stats = aggregate(&batch, now);

            prop_assert_eq!(stats.total_regions, batch.len());
            prop_assert_eq!(stats.active_alerts + stats.clear_regions, batch.len());
        }

        /// Extreme references exist exactly when the batch has an active
        /// alert, and the longest reference really is maximal.
        #[test]
        fn prop_extremes_consistent(batch in prop::collection::vec(arb_alert(), 0..20)) {
            let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
            let stats = aggregate(&batch, now);
            let any_active = batch.iter().any(|(_, a)| a.is_active);

            prop_assert_eq!(stats.longest_alert.is_some(), any_active);
            prop_assert_eq!(stats.highest_intensity.is_some(), any_active);

            if let Some(longest) = &stats.longest_alert {
                for (_, alert) in batch.iter().filter(|(_, a)| a.is_active) {
                    prop_assert!(alert.duration.total_hours() <= longest.total_hours);
                }
            }
        }
    }
}
