//! Event model
//!
//! The closed set of goal and infraction kinds with their static bay
//! attributes, the raw input record as stored in datasets, and the validated
//! [`RawEvent`] the engine consumes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MalformedReason;

/// Elapsed game time in whole seconds.
pub type Seconds = u32;

/// Service time of one bay term (2 minutes).
pub const BAY_TERM_SECONDS: Seconds = 120;

/// Personal clock of a 10 minute personal penalty.
pub const PERSONAL_CLOCK_SECONDS: Seconds = 600;

// =============================================================================
// Event kinds
// =============================================================================

/// Goal and infraction categories.
///
/// The discriminants are the persisted kind codes and must never change:
/// existing datasets store them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum EventKind {
    Goal = 0,
    PenaltyShotGoal = 1,
    Minor = 2,
    Personal = 3,
    Major = 4,
    Match = 5,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::Goal,
        EventKind::PenaltyShotGoal,
        EventKind::Minor,
        EventKind::Personal,
        EventKind::Major,
        EventKind::Match,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(EventKind::Goal),
            1 => Some(EventKind::PenaltyShotGoal),
            2 => Some(EventKind::Minor),
            3 => Some(EventKind::Personal),
            4 => Some(EventKind::Major),
            5 => Some(EventKind::Match),
            _ => None,
        }
    }

    /// Label shown in event tables.
    pub fn display_name(self) -> &'static str {
        match self {
            EventKind::Goal => "goal",
            EventKind::PenaltyShotGoal => "goal by penalty shot",
            EventKind::Minor => "minor penalty (2')",
            EventKind::Personal => "personal penalty (10')",
            EventKind::Major => "major penalty (2'+2')",
            EventKind::Match => "personal penalty (match penalty)",
        }
    }

    /// Whether the event queues at least one bay term.
    pub fn occupies_bay(self) -> bool {
        self.bay_terms() > 0
    }

    /// Number of stacked 2 minute bay terms the infraction creates.
    pub fn bay_terms(self) -> usize {
        match self {
            EventKind::Goal | EventKind::PenaltyShotGoal => 0,
            EventKind::Minor | EventKind::Personal => 1,
            EventKind::Major | EventKind::Match => 2,
        }
    }

    /// Major and match penalties queue a second term with the same occupant.
    pub fn is_double(self) -> bool {
        self.bay_terms() == 2
    }

    /// A plain goal may end an opposing bay term early. Penalty shot goals
    /// never do.
    pub fn can_terminate_penalty(self) -> bool {
        self == EventKind::Goal
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<u8> for EventKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        EventKind::from_code(code as i64).ok_or_else(|| format!("unknown event kind code {code}"))
    }
}

impl From<EventKind> for u8 {
    fn from(kind: EventKind) -> Self {
        kind.code()
    }
}

// =============================================================================
// Input records
// =============================================================================

/// One row of an event log, as entered at the scorer's table.
///
/// `minutes`/`seconds` are the clock reading; `event` is the raw kind code and
/// is only checked during [`EventRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(alias = "Team", deserialize_with = "deserialize_label")]
    pub team: String,
    #[serde(alias = "Player", deserialize_with = "deserialize_label")]
    pub player: String,
    #[serde(alias = "Event")]
    pub event: i64,
    #[serde(alias = "Minutes")]
    pub minutes: i64,
    #[serde(alias = "Seconds")]
    pub seconds: i64,
}

impl EventRecord {
    pub fn new(
        team: impl Into<String>,
        player: impl Into<String>,
        kind: EventKind,
        minutes: i64,
        seconds: i64,
    ) -> Self {
        Self {
            team: team.into(),
            player: player.into(),
            event: kind.code() as i64,
            minutes,
            seconds,
        }
    }

    /// Game time on the single monotonic axis.
    pub fn time_seconds(&self) -> Result<Seconds, MalformedReason> {
        if self.minutes < 0 || self.seconds < 0 {
            return Err(MalformedReason::NegativeTime {
                minutes: self.minutes,
                seconds: self.seconds,
            });
        }
        self.minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(self.seconds))
            .and_then(|total| Seconds::try_from(total).ok())
            .ok_or(MalformedReason::TimeOutOfRange {
                minutes: self.minutes,
                seconds: self.seconds,
            })
    }

    /// Convert into a [`RawEvent`] carrying `id` as its source position.
    pub fn validate(&self, id: usize) -> Result<RawEvent, MalformedReason> {
        if self.team.trim().is_empty() {
            return Err(MalformedReason::EmptyField("team"));
        }
        if self.player.trim().is_empty() {
            return Err(MalformedReason::EmptyField("player"));
        }
        let kind = EventKind::from_code(self.event).ok_or(MalformedReason::UnknownKind(self.event))?;
        let time_seconds = self.time_seconds()?;

        Ok(RawEvent {
            id,
            team: self.team.clone(),
            player: self.player.clone(),
            kind,
            time_seconds,
        })
    }
}

/// Validated event on the engine's time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Position of the originating record in the caller's input.
    pub id: usize,
    pub team: String,
    pub player: String,
    pub kind: EventKind,
    pub time_seconds: Seconds,
}

/// Identifiers are usually strings, but spreadsheets happily export jersey
/// numbers as JSON numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum Label {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Label {
    pub(crate) fn into_string(self) -> String {
        match self {
            Label::Text(text) => text,
            Label::Integer(n) => n.to_string(),
            Label::Float(f) => f.to_string(),
        }
    }
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Label::deserialize(deserializer).map(Label::into_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_stable() {
        let codes: Vec<u8> = EventKind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_code(kind.code() as i64), Some(kind));
        }
        assert_eq!(EventKind::from_code(6), None);
        assert_eq!(EventKind::from_code(-1), None);
    }

    #[test]
    fn test_bay_attributes() {
        assert_eq!(EventKind::Goal.bay_terms(), 0);
        assert_eq!(EventKind::Minor.bay_terms(), 1);
        assert_eq!(EventKind::Personal.bay_terms(), 1);
        assert_eq!(EventKind::Major.bay_terms(), 2);
        assert_eq!(EventKind::Match.bay_terms(), 2);

        assert!(EventKind::Major.is_double());
        assert!(!EventKind::Personal.is_double());

        assert!(EventKind::Goal.can_terminate_penalty());
        assert!(!EventKind::PenaltyShotGoal.can_terminate_penalty());
        assert!(!EventKind::PenaltyShotGoal.occupies_bay());
    }

    #[test]
    fn test_kind_serializes_as_code() {
        assert_eq!(serde_json::to_string(&EventKind::Major).unwrap(), "4");
        let kind: EventKind = serde_json::from_str("3").unwrap();
        assert_eq!(kind, EventKind::Personal);
        assert!(serde_json::from_str::<EventKind>("9").is_err());
    }

    #[test]
    fn test_record_time_normalization() {
        let record = EventRecord::new("A", "7", EventKind::Minor, 12, 34);
        assert_eq!(record.time_seconds(), Ok(754));

        let raw = record.validate(5).unwrap();
        assert_eq!(raw.id, 5);
        assert_eq!(raw.time_seconds, 754);
        assert_eq!(raw.kind, EventKind::Minor);
    }

    #[test]
    fn test_record_rejects_malformed_fields() {
        let mut record = EventRecord::new("A", "7", EventKind::Minor, 1, 0);
        record.event = 42;
        assert_eq!(record.validate(0), Err(MalformedReason::UnknownKind(42)));

        let record = EventRecord::new("A", "7", EventKind::Minor, 0, -5);
        assert_eq!(
            record.validate(0),
            Err(MalformedReason::NegativeTime { minutes: 0, seconds: -5 })
        );

        let record = EventRecord::new(" ", "7", EventKind::Goal, 0, 0);
        assert_eq!(record.validate(0), Err(MalformedReason::EmptyField("team")));

        let record = EventRecord::new("A", "", EventKind::Goal, 0, 0);
        assert_eq!(record.validate(0), Err(MalformedReason::EmptyField("player")));
    }

    #[test]
    fn test_record_accepts_numeric_labels_and_capitalized_keys() {
        let record: EventRecord = serde_json::from_str(
            r#"{"Team": "A", "Player": 17, "Event": 2, "Minutes": 3, "Seconds": 15}"#,
        )
        .unwrap();
        assert_eq!(record.player, "17");
        assert_eq!(record.time_seconds(), Ok(195));
    }
}
