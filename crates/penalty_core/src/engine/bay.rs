//! Bay ledger
//!
//! Per-team model of the two-slot penalty bench. Entries are queued when an
//! infraction is called and are started, closed or terminated by the
//! [`Timekeeper`](super::timekeeper::Timekeeper) as game time advances.
//!
//! Start times are reconstructed after the fact: a settle pass at `now` may
//! close several terms at once, so an admitted entry starts at the vacancy it
//! actually filled (derived from recorded end times), not at `now`.

use super::config::BAY_CAPACITY;
use crate::models::{BayEntry, Occupant, Seconds};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BayLedger {
    entries: Vec<BayEntry>,
}

impl BayLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[BayEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<BayEntry> {
        self.entries
    }

    pub fn running_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_running()).count()
    }

    fn is_occupant_running(&self, occupant: &Occupant) -> bool {
        self.entries
            .iter()
            .any(|e| e.is_running() && e.occupant == *occupant)
    }

    /// Append a waiting entry and return its index.
    pub fn queue(&mut self, source_event_id: usize, occupant: Occupant, at: Seconds) -> usize {
        self.entries
            .push(BayEntry::queued(source_event_id, occupant, at));
        self.entries.len() - 1
    }

    /// Every term served for `occupant`, in queued order.
    pub fn stints_of<'a>(&'a self, occupant: &'a Occupant) -> impl Iterator<Item = &'a BayEntry> + 'a {
        self.entries.iter().filter(move |e| e.occupant == *occupant)
    }

    /// Terms served for `occupant` that were queued at or after `since`.
    pub fn stints_since<'a>(
        &'a self,
        occupant: &'a Occupant,
        since: Seconds,
    ) -> impl Iterator<Item = &'a BayEntry> + 'a {
        self.stints_of(occupant).filter(move |e| e.queued_at >= since)
    }

    // =========================================================================
    // Admission
    // =========================================================================

    /// Indices of entries that may start at `now`: waiting, occupant not
    /// already serving, first waiting entry per occupant only.
    pub fn candidates(&self, now: Seconds) -> Vec<usize> {
        let mut seen: Vec<&Occupant> = Vec::new();
        let mut candidates = Vec::new();
        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.is_waiting(now) || seen.contains(&&entry.occupant) {
                continue;
            }
            seen.push(&entry.occupant);
            if !self.is_occupant_running(&entry.occupant) {
                candidates.push(index);
            }
        }
        candidates
    }

    /// Close expired terms and admit waiting ones until nothing changes.
    pub fn settle(&mut self, now: Seconds, term: Seconds) {
        loop {
            self.close_expired(now, term);
            if self.running_count() >= BAY_CAPACITY {
                break;
            }
            let candidates = self.candidates(now);
            if candidates.is_empty() {
                break;
            }
            self.admit(&candidates, now);
        }
        log::trace!("bay settled at {}: {} running", now, self.running_count());
    }

    fn close_expired(&mut self, now: Seconds, term: Seconds) {
        for entry in self.entries.iter_mut().filter(|e| e.is_running()) {
            if let Some(start) = entry.started_at {
                let end = start.saturating_add(term);
                if now >= end {
                    entry.ended_at = Some(end);
                }
            }
        }
    }

    /// End times of closed entries, ascending.
    fn closed_end_times(&self) -> Vec<Seconds> {
        let mut ends: Vec<Seconds> = self.entries.iter().filter_map(|e| e.ended_at).collect();
        ends.sort_unstable();
        ends
    }

    fn last_end_of(&self, occupant: &Occupant) -> Option<Seconds> {
        self.stints_of(occupant).filter_map(|e| e.ended_at).max()
    }

    fn admit(&mut self, candidates: &[usize], now: Seconds) {
        let first = candidates[0];
        let ends = self.closed_end_times();
        let own_last = self.last_end_of(&self.entries[first].occupant);
        let free_slots = BAY_CAPACITY.saturating_sub(self.running_count());

        if free_slots == 1 || candidates.len() == 1 || ends.len() < 2 {
            // One vacancy to fill: never before the occupant's own last term
            // ended, never after the bay's most recent vacancy.
            let at = match (own_last, ends.last().copied()) {
                (Some(own), Some(latest)) => own.min(latest),
                (own, latest) => own.or(latest).unwrap_or(now),
            };
            self.start(first, at);
            return;
        }

        // Both slots opened in the same pass: stagger the two admissions over
        // the two most recent vacancies.
        let latest = ends[ends.len() - 1];
        let second_latest = ends[ends.len() - 2];
        let at = own_last.map_or(second_latest, |own| own.max(second_latest));
        self.start(first, at);

        let next_at = if at != second_latest {
            second_latest
        } else {
            latest
        };
        if let Some(&next) = self.candidates(now).first() {
            self.start(next, next_at);
        }
    }

    fn start(&mut self, index: usize, at: Seconds) {
        let entry = &mut self.entries[index];
        let at = at.max(entry.queued_at);
        entry.started_at = Some(at);
        log::debug!("bay: {} starts at {} (queued {})", entry.occupant, at, entry.queued_at);
    }

    /// Start a freshly queued entry at `now` if the bay has room and the
    /// entry is the first in line for its occupant.
    pub fn admit_on_arrival(&mut self, index: usize, now: Seconds) -> bool {
        if self.running_count() >= BAY_CAPACITY || !self.candidates(now).contains(&index) {
            return false;
        }
        self.start(index, now);
        true
    }

    // =========================================================================
    // Early termination
    // =========================================================================

    /// End the longest-served running term at `now`.
    pub fn terminate_earliest(&mut self, now: Seconds) -> Option<usize> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_running())
            .min_by_key(|(i, e)| (e.started_at, *i))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[index];
        entry.ended_at = Some(now);
        log::debug!("bay: {} terminated at {} by goal", entry.occupant, now);
        Some(index)
    }

    /// Start the first waiting candidate at `now`.
    pub fn admit_next(&mut self, now: Seconds) -> Option<usize> {
        if self.running_count() >= BAY_CAPACITY {
            return None;
        }
        let next = *self.candidates(now).first()?;
        self.start(next, now);
        Some(next)
    }
}
