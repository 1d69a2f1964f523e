use thiserror::Error;

/// Why a single input record was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("unknown event kind code {0}")]
    UnknownKind(i64),

    #[error("negative game time {minutes}:{seconds}")]
    NegativeTime { minutes: i64, seconds: i64 },

    #[error("game time {minutes}:{seconds} is out of range")]
    TimeOutOfRange { minutes: i64, seconds: i64 },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

#[derive(Error, Debug)]
pub enum TimekeepingError {
    #[error("Malformed event #{index}: {reason}")]
    MalformedEvent {
        index: usize,
        reason: MalformedReason,
    },

    #[error("Expected at most two teams, found {}: {teams:?}", teams.len())]
    AmbiguousTeamSet { teams: Vec<String> },

    #[error("Event log is empty, at least one team is required")]
    EmptyLog,

    #[error("Events were already ingested by this timekeeper")]
    AlreadyIngested,

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchema(u8),

    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("Malformed dataset: {0}")]
    MalformedDataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TimekeepingError {
    /// Errors caused by the event log itself, as opposed to its transport.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TimekeepingError::MalformedEvent { .. }
                | TimekeepingError::AmbiguousTeamSet { .. }
                | TimekeepingError::EmptyLog
        )
    }
}

pub type Result<T> = std::result::Result<T, TimekeepingError>;
