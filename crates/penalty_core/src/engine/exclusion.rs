//! Exclusion ledger
//!
//! Ejected players never sit in the bay; a substitute serves their bay terms
//! while the player's own 10 minute clock runs off court. That clock starts
//! when the substitute's first term ends and pauses whenever the substitute
//! is back on the bench for a further term booked against the same player.

use super::bay::BayLedger;
use crate::models::{
    BayEntry, BayPresence, ClockInterval, ExclusionEntry, ExclusionKind, Occupant, Seconds,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionLedger {
    entries: Vec<ExclusionEntry>,
}

impl ExclusionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ExclusionEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ExclusionEntry> {
        self.entries
    }

    /// Record an ejection and return the identity that serves its bay terms.
    pub fn open(
        &mut self,
        source_event_id: usize,
        player: &str,
        kind: ExclusionKind,
        at: Seconds,
    ) -> Occupant {
        let entry = ExclusionEntry::new(source_event_id, player, kind, at);
        let substitute = entry.substitute();
        self.entries.push(entry);
        substitute
    }

    pub fn has_open(&self, player: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.is_open() && e.excluded_player == player)
    }

    /// Advance every open personal clock to `now`, closing those that have
    /// run for `clock_seconds` of off-bay time. Match exclusions stay open.
    pub fn settle(&mut self, bay: &BayLedger, now: Seconds, clock_seconds: Seconds) {
        for entry in self
            .entries
            .iter_mut()
            .filter(|e| e.is_open() && e.kind == ExclusionKind::Personal)
        {
            let clock = PersonalClock::observe(bay, &entry.substitute(), entry.queued_at);
            entry.started_at = clock.started_at();
            entry.pause_marks = clock.pause_marks();

            let Some(start) = entry.started_at else {
                continue;
            };
            let Some(intervals) = clock.intervals(now) else {
                continue;
            };

            let elapsed = total(&intervals, BayPresence::OffBay);
            if elapsed >= clock_seconds {
                let paused = total(&intervals, BayPresence::OnBay);
                let end = start + paused + clock_seconds;
                entry.ended_at = Some(end);
                log::debug!(
                    "exclusion: {} personal clock expires at {} ({}s paused)",
                    entry.excluded_player,
                    end,
                    paused
                );
            }
        }
    }
}

fn total(intervals: &[ClockInterval], presence: BayPresence) -> Seconds {
    intervals
        .iter()
        .filter(|i| i.presence == presence)
        .map(ClockInterval::duration)
        .sum()
}

/// Alternating off-bay/on-bay boundaries of a substitute's terms.
///
/// The first boundary is the end of the first term; every later term that
/// was queued after the previous boundary adds a pause (`queued_at`) and a
/// resume (`ended_at`). Terms queued before the running boundary extend it.
/// `None` marks a term that has not ended yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalClock {
    boundaries: Vec<Option<Seconds>>,
}

impl PersonalClock {
    /// Stints queued before `since` belong to an earlier exclusion of the
    /// same player and are ignored.
    pub fn observe(bay: &BayLedger, substitute: &Occupant, since: Seconds) -> Self {
        Self::from_stints(bay.stints_since(substitute, since))
    }

    pub fn from_stints<'a>(stints: impl IntoIterator<Item = &'a BayEntry>) -> Self {
        let mut stints = stints.into_iter();
        let mut boundaries = Vec::new();
        if let Some(first) = stints.next() {
            boundaries.push(first.ended_at);
        }
        for stint in stints {
            let merges = matches!(boundaries.last(), Some(Some(last)) if stint.queued_at <= *last);
            if merges {
                if let Some(last) = boundaries.last_mut() {
                    *last = stint.ended_at;
                }
            } else {
                boundaries.push(Some(stint.queued_at));
                boundaries.push(stint.ended_at);
            }
        }
        Self { boundaries }
    }

    pub fn started_at(&self) -> Option<Seconds> {
        self.boundaries.first().copied().flatten()
    }

    /// Known interior boundaries, in order.
    pub fn pause_marks(&self) -> Vec<Seconds> {
        self.boundaries.iter().skip(1).flatten().copied().collect()
    }

    /// Tagged decomposition up to `now`, or `None` while any term is still
    /// open.
    pub fn intervals(&self, now: Seconds) -> Option<Vec<ClockInterval>> {
        let mut points = self.boundaries.iter().copied().collect::<Option<Vec<_>>>()?;
        if points.is_empty() {
            return None;
        }
        points.push(now);

        let mut presence = BayPresence::OffBay;
        let intervals: Vec<ClockInterval> = points
            .windows(2)
            .map(|w| {
                let interval = ClockInterval {
                    presence,
                    start: w[0],
                    end: w[1],
                };
                presence = presence.toggled();
                interval
            })
            .collect();
        Some(intervals)
    }
}
