//! # Timekeeping configuration
//!
//! Every tunable constant of the engine in one serde struct.
//!
//! ```rust
//! use penalty_core::engine::config::{Rink, TimekeepingConfig};
//!
//! let config = TimekeepingConfig::default();
//! assert_eq!(config.rink, Rink::Large);
//! let small = TimekeepingConfig::small_court();
//! assert_eq!(small.rink.skaters(), 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{Seconds, BAY_TERM_SECONDS, PERSONAL_CLOCK_SECONDS};

/// Court size, which fixes how many skaters a team fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Rink {
    /// Großfeld: 5 skaters plus goalkeeper.
    #[default]
    #[serde(rename = "GF", alias = "large")]
    Large,
    /// Kleinfeld: 3 skaters plus goalkeeper.
    #[serde(rename = "KF", alias = "small")]
    Small,
}

impl Rink {
    /// Players on court at full strength.
    pub fn skaters(self) -> u8 {
        match self {
            Rink::Large => 6,
            Rink::Small => 4,
        }
    }

    /// Penalties never reduce a team below this.
    pub fn minimum_skaters(self) -> u8 {
        match self {
            Rink::Large => 4,
            Rink::Small => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimekeepingConfig {
    /// Service time of one bay term (default: 120)
    pub bay_term_seconds: Seconds,
    /// Personal clock of a personal penalty (default: 600)
    pub personal_clock_seconds: Seconds,
    /// Settlement pass runs this far past the last event (default: 10000)
    pub settle_horizon_seconds: Seconds,
    /// Added to exclusion ids in combined ledger rows (default: 999)
    pub exclusion_id_offset: usize,
    /// Name of the synthesized opponent for single-team logs
    pub placeholder_team: String,
    pub rink: Rink,
}

impl Default for TimekeepingConfig {
    fn default() -> Self {
        Self {
            bay_term_seconds: BAY_TERM_SECONDS,
            personal_clock_seconds: PERSONAL_CLOCK_SECONDS,
            settle_horizon_seconds: 10_000,
            exclusion_id_offset: 999,
            placeholder_team: "Opponent".to_string(),
            rink: Rink::Large,
        }
    }
}

impl TimekeepingConfig {
    /// Regular large-court floorball (default)
    pub fn floorball() -> Self {
        Self::default()
    }

    /// Small-court floorball; same penalty durations, fewer skaters.
    pub fn small_court() -> Self {
        Self {
            rink: Rink::Small,
            ..Self::default()
        }
    }
}

/// Two slots per team; the admission rule is written for exactly this size.
pub const BAY_CAPACITY: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let config = TimekeepingConfig::default();
        assert_eq!(config.bay_term_seconds, 120);
        assert_eq!(config.personal_clock_seconds, 600);
        assert_eq!(config.exclusion_id_offset, 999);
        assert_eq!(TimekeepingConfig::floorball(), config);
    }

    #[test]
    fn test_rink_strength() {
        assert_eq!(Rink::Large.skaters(), 6);
        assert_eq!(Rink::Large.minimum_skaters(), 4);
        assert_eq!(Rink::Small.skaters(), 4);
        assert_eq!(Rink::Small.minimum_skaters(), 3);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: TimekeepingConfig =
            serde_json::from_str(r#"{"rink": "KF", "settle_horizon_seconds": 500}"#).unwrap();
        assert_eq!(config.rink, Rink::Small);
        assert_eq!(config.settle_horizon_seconds, 500);
        assert_eq!(config.bay_term_seconds, 120);
        assert_eq!(config.placeholder_team, "Opponent");
    }
}
