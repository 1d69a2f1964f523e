pub mod events;
pub mod ledger;
pub mod team;

pub use events::{
    EventKind, EventRecord, RawEvent, Seconds, BAY_TERM_SECONDS, PERSONAL_CLOCK_SECONDS,
};
pub use ledger::{
    BayEntry, BayPresence, ClockInterval, ExclusionEntry, ExclusionKind, Occupant,
};
pub use team::{InfractionSummary, LedgerRow, RowSource, TeamLedger, TimekeepingReport};
