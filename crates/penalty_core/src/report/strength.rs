//! Skater strength over time
//!
//! Each running bay term takes one skater off the court, but a team never
//! drops below the rink's minimum.

use serde::{Deserialize, Serialize};

use crate::engine::Rink;
use crate::models::{BayEntry, Seconds};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthSegment {
    pub from: Seconds,
    /// `None` for the trailing segment.
    pub to: Option<Seconds>,
    pub skaters: u8,
}

/// Piecewise-constant skater count starting at game time 0.
///
/// Adjacent segments with the same count are merged.
pub fn strength_timeline(bay: &[BayEntry], rink: Rink) -> Vec<StrengthSegment> {
    let mut points: Vec<Seconds> = bay
        .iter()
        .flat_map(|e| [e.started_at, e.ended_at])
        .flatten()
        .collect();
    points.push(0);
    points.sort_unstable();
    points.dedup();

    let full = rink.skaters();
    let minimum = rink.minimum_skaters();
    let mut segments: Vec<StrengthSegment> = Vec::new();

    for (i, &from) in points.iter().enumerate() {
        let to = points.get(i + 1).copied();
        let serving = bay.iter().filter(|e| e.is_serving_at(from)).count();
        let running = u8::try_from(serving).unwrap_or(u8::MAX);
        let skaters = full.saturating_sub(running).max(minimum);

        match segments.last_mut() {
            Some(last) if last.skaters == skaters => last.to = to,
            _ => segments.push(StrengthSegment { from, to, skaters }),
        }
    }
    segments
}
