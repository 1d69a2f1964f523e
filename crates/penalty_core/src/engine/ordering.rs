//! Event ordering
//!
//! Validates raw records and puts them on one monotonic time axis.
//!
//! ## Order
//! - Primary: `time_seconds` ascending
//! - Secondary: kind code ascending, so a goal is settled before a penalty
//!   called at the same instant
//! - Tertiary: input position (the sort is stable)

use std::cmp::Ordering;

use crate::error::{Result, TimekeepingError};
use crate::models::{EventRecord, RawEvent};

/// Sort key comparator for two validated events.
#[inline]
pub fn compare_events(a: &RawEvent, b: &RawEvent) -> Ordering {
    a.time_seconds
        .cmp(&b.time_seconds)
        .then_with(|| a.kind.code().cmp(&b.kind.code()))
}

/// Validate every record and return them in processing order.
///
/// The caller's slice is left untouched. The first malformed record aborts
/// the whole log.
pub fn order_events(records: &[EventRecord]) -> Result<Vec<RawEvent>> {
    let mut events = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .validate(index)
                .map_err(|reason| TimekeepingError::MalformedEvent { index, reason })
        })
        .collect::<Result<Vec<_>>>()?;

    // `sort_by` is stable: equal keys keep their input order.
    events.sort_by(compare_events);
    Ok(events)
}

/// Distinct team identifiers in order of first appearance.
pub fn teams_in_order(events: &[RawEvent]) -> Vec<String> {
    let mut teams: Vec<String> = Vec::new();
    for event in events {
        if !teams.iter().any(|team| *team == event.team) {
            teams.push(event.team.clone());
        }
    }
    teams
}
