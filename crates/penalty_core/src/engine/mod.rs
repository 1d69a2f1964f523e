//! Penalty bay reconstruction engine.

pub mod bay;
pub mod config;
pub mod exclusion;
pub mod ordering;
pub mod timekeeper;

pub use bay::BayLedger;
pub use config::{Rink, TimekeepingConfig, BAY_CAPACITY};
pub use exclusion::{ExclusionLedger, PersonalClock};
pub use ordering::{compare_events, order_events, teams_in_order};
pub use timekeeper::{timekeeping, Timekeeper};

#[cfg(test)]
mod properties;
