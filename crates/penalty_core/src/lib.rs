//! # penalty_core - Floorball Penalty Bay Timekeeping
//!
//! Reconstructs when every penalty actually started and ended from a
//! chronological log of goals and infractions.
//!
//! ## Features
//! - Two-slot penalty bay per team with queued, stacked and staggered terms
//! - Early release of a penalized player on a power-play goal
//! - Substitutes serving bay terms for ejected players, with a pausable
//!   10 minute personal clock
//! - Deterministic: the same log always yields the same ledgers
//! - JSON API and named dataset files for tooling

// Doc formatting lints
#![allow(clippy::doc_lazy_continuation)]

pub mod api;
pub mod engine;
pub mod error;
pub mod io;
pub mod models;
pub mod report;

// Re-export main API functions
pub use api::{run_request, timekeeping_json, TimekeepingRequest, TimekeepingResponse};
pub use engine::{timekeeping, Rink, Timekeeper, TimekeepingConfig};
pub use error::{MalformedReason, Result, TimekeepingError};

// Re-export ledger types
pub use models::{
    BayEntry, EventKind, EventRecord, ExclusionEntry, ExclusionKind, InfractionSummary, LedgerRow,
    Occupant, RawEvent, Seconds, TeamLedger, TimekeepingReport,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub use api::SCHEMA_VERSION;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exclusion_round_trip_through_json_api() {
        let request = json!({
            "schema_version": SCHEMA_VERSION,
            "events": [
                {"Team": "Home", "Player": 4, "Event": 3, "Minutes": 0, "Seconds": 0},
                {"Team": "Away", "Player": 9, "Event": 2, "Minutes": 5, "Seconds": 0}
            ]
        });

        let response: TimekeepingResponse =
            serde_json::from_str(&timekeeping_json(&request.to_string()).unwrap()).unwrap();
        let home = &response.teams[0];

        assert_eq!(home.bay[0].occupant, Occupant::Substitute("4".into()));
        assert_eq!(home.exclusions[0].started_at, Some(120));
        assert_eq!(home.exclusions[0].ended_at, Some(720));
    }

    #[test]
    fn test_malformed_event_is_reported_with_index() {
        let records = vec![
            EventRecord::new("A", "1", EventKind::Minor, 0, 10),
            EventRecord {
                event: 17,
                ..EventRecord::new("A", "2", EventKind::Minor, 0, 20)
            },
        ];
        let err = timekeeping(&records, &TimekeepingConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TimekeepingError::MalformedEvent {
                index: 1,
                reason: MalformedReason::UnknownKind(17)
            }
        ));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(SCHEMA_VERSION, 1);
    }
}
