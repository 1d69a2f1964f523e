//! Presentation helpers shared by the CLI and downstream tables.

pub mod clock;
pub mod strength;

pub use clock::{format_clock, format_optional_clock};
pub use strength::{strength_timeline, StrengthSegment};
