//! Ledger records
//!
//! Bay entries describe one 2 minute term on the penalty bench; exclusion
//! entries describe an ejected player's own clock. Both are append-only and
//! become immutable once `ended_at` is set.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::events::{EventKind, Seconds};

/// Who physically sits on the bench for a bay term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "role", content = "player", rename_all = "snake_case")]
pub enum Occupant {
    Player(String),
    /// Stands in for an ejected player; the ejected player never enters the bay.
    Substitute(String),
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupant::Player(player) => f.write_str(player),
            Occupant::Substitute(player) => write!(f, "Sub. {player}"),
        }
    }
}

// =============================================================================
// Bay ledger
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BayEntry {
    pub source_event_id: usize,
    pub occupant: Occupant,
    /// When the occupant went to the bench.
    pub queued_at: Seconds,
    #[serde(default)]
    pub started_at: Option<Seconds>,
    #[serde(default)]
    pub ended_at: Option<Seconds>,
}

impl BayEntry {
    pub fn queued(source_event_id: usize, occupant: Occupant, queued_at: Seconds) -> Self {
        Self {
            source_event_id,
            occupant,
            queued_at,
            started_at: None,
            ended_at: None,
        }
    }

    /// Started and not yet ended.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    /// Not started and already on the bench at `now`.
    pub fn is_waiting(&self, now: Seconds) -> bool {
        self.started_at.is_none() && self.queued_at <= now
    }

    pub fn is_closed(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Whether the entry holds a bay slot at instant `t`.
    pub fn is_serving_at(&self, t: Seconds) -> bool {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => start <= t && t < end,
            (Some(start), None) => start <= t,
            _ => false,
        }
    }
}

// =============================================================================
// Exclusion ledger
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionKind {
    /// 10 minute personal clock, paused while the substitute sits in the bay.
    Personal,
    /// Ejected for the rest of the game.
    Match,
}

impl ExclusionKind {
    pub fn from_event(kind: EventKind) -> Option<Self> {
        match kind {
            EventKind::Personal => Some(ExclusionKind::Personal),
            EventKind::Match => Some(ExclusionKind::Match),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionEntry {
    pub source_event_id: usize,
    pub excluded_player: String,
    pub kind: ExclusionKind,
    pub queued_at: Seconds,
    /// Personal: instant the personal clock starts running.
    /// Match: the ejection itself.
    #[serde(default)]
    pub started_at: Option<Seconds>,
    #[serde(default)]
    pub ended_at: Option<Seconds>,
    /// Boundaries where the personal clock paused and resumed, in order.
    #[serde(default)]
    pub pause_marks: Vec<Seconds>,
}

impl ExclusionEntry {
    pub fn new(
        source_event_id: usize,
        excluded_player: impl Into<String>,
        kind: ExclusionKind,
        queued_at: Seconds,
    ) -> Self {
        let started_at = match kind {
            ExclusionKind::Personal => None,
            ExclusionKind::Match => Some(queued_at),
        };
        Self {
            source_event_id,
            excluded_player: excluded_player.into(),
            kind,
            queued_at,
            started_at,
            ended_at: None,
            pause_marks: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// The identity serving bay terms for this player.
    pub fn substitute(&self) -> Occupant {
        Occupant::Substitute(self.excluded_player.clone())
    }
}

/// Whether the substitute of an ejected player is in the bay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BayPresence {
    /// Substitute is back on court; the personal clock runs.
    OffBay,
    /// Substitute is serving; the personal clock is paused.
    OnBay,
}

impl BayPresence {
    pub fn toggled(self) -> Self {
        match self {
            BayPresence::OffBay => BayPresence::OnBay,
            BayPresence::OnBay => BayPresence::OffBay,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockInterval {
    pub presence: BayPresence,
    pub start: Seconds,
    pub end: Seconds,
}

impl ClockInterval {
    pub fn duration(&self) -> Seconds {
        self.end.saturating_sub(self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupant_display() {
        assert_eq!(Occupant::Player("7".into()).to_string(), "7");
        assert_eq!(Occupant::Substitute("7".into()).to_string(), "Sub. 7");
    }

    #[test]
    fn test_bay_entry_states() {
        let mut entry = BayEntry::queued(0, Occupant::Player("9".into()), 30);
        assert!(!entry.is_waiting(29));
        assert!(entry.is_waiting(30));
        assert!(!entry.is_running());

        entry.started_at = Some(30);
        assert!(entry.is_running());
        assert!(!entry.is_waiting(40));

        entry.ended_at = Some(150);
        assert!(entry.is_closed());
        assert!(entry.is_serving_at(30));
        assert!(entry.is_serving_at(149));
        assert!(!entry.is_serving_at(150));
        assert!(!entry.is_serving_at(29));
    }

    #[test]
    fn test_match_exclusion_starts_immediately() {
        let personal = ExclusionEntry::new(1, "4", ExclusionKind::Personal, 90);
        assert_eq!(personal.started_at, None);

        let ejection = ExclusionEntry::new(2, "4", ExclusionKind::Match, 90);
        assert_eq!(ejection.started_at, Some(90));
        assert!(ejection.is_open());
        assert_eq!(ejection.substitute(), Occupant::Substitute("4".into()));
    }

    #[test]
    fn test_occupant_serde_shape() {
        let json = serde_json::to_value(Occupant::Substitute("11".into())).unwrap();
        assert_eq!(json, serde_json::json!({"role": "substitute", "player": "11"}));
    }
}
