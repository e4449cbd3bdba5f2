//! Synthetic 0-100 intensity scoring.
//!
//! The score combines the priority weights of the present threats with a
//! small bonus for long-running alerts, clamped to 100.

use crate::catalog::ThreatCatalog;
use crate::models::AlertDuration;

/// Maximum intensity score.
pub const MAX_INTENSITY: u32 = 100;

/// Score a threat set and elapsed duration into an intensity in 0..=100.
///
/// Each threat contributes its catalog priority weight times ten; unknown
/// identifiers fall back to the catalog's default weight. Durations over 72
/// hours add 20, over 24 hours add 10, over 6 hours add 5.
pub fn score(catalog: &ThreatCatalog, threats: &[String], duration: &AlertDuration) -> u8 {
    let mut intensity: u32 = threats
        .iter()
        .map(|t| u32::from(catalog.priority(t)) * 10)
        .sum();

    let total_hours = duration.total_hours();
    if total_hours > 72 {
        intensity += 20;
    } else if total_hours > 24 {
        intensity += 10;
    } else if total_hours > 6 {
        intensity += 5;
    }

    intensity.min(MAX_INTENSITY) as u8
}
