//! Penalty CLI support
//!
//! Loading helpers and plain-text tables for the `penalty_cli` binary.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use penalty_core::engine::TimekeepingConfig;
use penalty_core::report::{format_clock, format_optional_clock, strength_timeline};
use penalty_core::{RawEvent, Rink, TeamLedger};

/// Read a [`TimekeepingConfig`] from a JSON file. Missing keys keep their
/// defaults.
pub fn load_config(path: &Path) -> Result<TimekeepingConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: TimekeepingConfig = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    log::debug!("loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

/// Event log, as returned by `order_events`.
pub fn render_event_table(events: &[RawEvent]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{:<6} {:<16} {:<8} Event", "Time", "Team", "Player")?;
    for event in events {
        writeln!(
            out,
            "{:<6} {:<16} {:<8} {}",
            format_clock(event.time_seconds),
            event.team,
            event.player,
            event.kind.display_name()
        )?;
    }
    Ok(out)
}

/// Bay and exclusion rows of one team.
pub fn render_penalty_table(ledger: &TeamLedger, exclusion_id_offset: usize) -> Result<String> {
    let mut out = String::new();
    let title = if ledger.placeholder {
        format!("{} (placeholder)", ledger.team)
    } else {
        ledger.team.clone()
    };
    writeln!(out, "{title}")?;
    writeln!(
        out,
        "{:>5} {:<10} {:<9} {:<6} {:<6}",
        "Id", "Player", "To bench", "Start", "End"
    )?;

    let rows = ledger.rows(exclusion_id_offset);
    if rows.is_empty() {
        writeln!(out, "  (no penalties)")?;
    }
    for row in rows {
        writeln!(
            out,
            "{:>5} {:<10} {:<9} {:<6} {:<6}",
            row.id,
            row.player,
            format_clock(row.queued_at),
            format_optional_clock(row.started_at),
            format_optional_clock(row.ended_at)
        )?;
    }
    Ok(out)
}

/// Skater strength segments of one team.
pub fn render_strength(ledger: &TeamLedger, rink: Rink) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{} on court", ledger.team)?;
    for segment in strength_timeline(&ledger.bay, rink) {
        let to = segment
            .to
            .map_or_else(|| "end".to_string(), format_clock);
        writeln!(
            out,
            "  {} - {:<5} {} skaters",
            format_clock(segment.from),
            to,
            segment.skaters
        )?;
    }
    Ok(out)
}
