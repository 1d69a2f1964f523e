use serde::{Deserialize, Serialize};

use super::events::Seconds;
use super::ledger::{BayEntry, ExclusionEntry};

/// Both ledgers of one team after a completed pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLedger {
    pub team: String,
    /// Synthesized opponent for single-team logs.
    #[serde(default)]
    pub placeholder: bool,
    pub bay: Vec<BayEntry>,
    pub exclusions: Vec<ExclusionEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSource {
    Bay,
    Exclusion,
}

/// Flat row of the combined ledger, as shown in penalty tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub id: usize,
    pub source: RowSource,
    pub player: String,
    pub queued_at: Seconds,
    pub started_at: Option<Seconds>,
    pub ended_at: Option<Seconds>,
}

/// One infraction with its stacked terms collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfractionSummary {
    pub source_event_id: usize,
    pub player: String,
    pub queued_at: Seconds,
    pub started_at: Option<Seconds>,
    /// End of the last stacked term.
    pub ended_at: Option<Seconds>,
    pub terms: usize,
}

impl TeamLedger {
    pub fn new(team: impl Into<String>, placeholder: bool) -> Self {
        Self {
            team: team.into(),
            placeholder,
            bay: Vec::new(),
            exclusions: Vec::new(),
        }
    }

    /// Bay rows followed by exclusion rows. Exclusion ids are shifted by
    /// `exclusion_id_offset` so the two id spaces never collide.
    pub fn rows(&self, exclusion_id_offset: usize) -> Vec<LedgerRow> {
        let bay = self.bay.iter().map(|entry| LedgerRow {
            id: entry.source_event_id,
            source: RowSource::Bay,
            player: entry.occupant.to_string(),
            queued_at: entry.queued_at,
            started_at: entry.started_at,
            ended_at: entry.ended_at,
        });
        let exclusions = self.exclusions.iter().map(|entry| LedgerRow {
            id: entry.source_event_id + exclusion_id_offset,
            source: RowSource::Exclusion,
            player: entry.excluded_player.clone(),
            queued_at: entry.queued_at,
            started_at: entry.started_at,
            ended_at: entry.ended_at,
        });
        bay.chain(exclusions).collect()
    }

    pub fn infraction_summary(&self) -> Vec<InfractionSummary> {
        let mut summary: Vec<InfractionSummary> = Vec::new();
        for entry in &self.bay {
            match summary.iter_mut().find(|s| s.source_event_id == entry.source_event_id) {
                Some(existing) => {
                    existing.ended_at = entry.ended_at;
                    existing.terms += 1;
                }
                None => summary.push(InfractionSummary {
                    source_event_id: entry.source_event_id,
                    player: entry.occupant.to_string(),
                    queued_at: entry.queued_at,
                    started_at: entry.started_at,
                    ended_at: entry.ended_at,
                    terms: 1,
                }),
            }
        }
        summary
    }

    /// Sum of every recorded end time, bay and exclusion rows alike.
    /// Handy as a single-number fingerprint of a whole ledger.
    pub fn end_time_checksum(&self) -> u64 {
        let bay = self.bay.iter().filter_map(|e| e.ended_at);
        let exclusions = self.exclusions.iter().filter_map(|e| e.ended_at);
        bay.chain(exclusions).map(u64::from).sum()
    }
}

/// Engine output: exactly two team ledgers in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimekeepingReport {
    pub teams: Vec<TeamLedger>,
}

impl TimekeepingReport {
    pub fn team(&self, name: &str) -> Option<&TeamLedger> {
        self.teams.iter().find(|ledger| ledger.team == name)
    }

    pub fn team_names(&self) -> Vec<&str> {
        self.teams.iter().map(|ledger| ledger.team.as_str()).collect()
    }
}
