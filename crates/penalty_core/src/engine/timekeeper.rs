//! Simulation driver
//!
//! Replays an event log once, front to back, against both teams' ledgers.
//!
//! ## Tick order
//! 1. Settle every team's bay, then its personal clocks, at the tick's time
//! 2. Queue the tick's infraction (if any) for the penalized team
//! 3. Apply the tick's goal (if any) to the opponent's bay
//!
//! [`Timekeeper::finalize`] settles once more far past the last event so that
//! every queue drains and every personal clock that can expire does.

use std::borrow::Cow;
use std::cmp::Ordering;

use super::bay::BayLedger;
use super::config::TimekeepingConfig;
use super::exclusion::ExclusionLedger;
use super::ordering::{compare_events, order_events, teams_in_order};
use crate::error::{Result, TimekeepingError};
use crate::models::{
    EventRecord, ExclusionKind, Occupant, RawEvent, Seconds, TeamLedger, TimekeepingReport,
};

#[derive(Debug, Clone)]
struct TeamState {
    name: String,
    placeholder: bool,
    bay: BayLedger,
    exclusions: ExclusionLedger,
}

impl TeamState {
    fn new(name: String, placeholder: bool) -> Self {
        Self {
            name,
            placeholder,
            bay: BayLedger::new(),
            exclusions: ExclusionLedger::new(),
        }
    }

    fn settle(&mut self, now: Seconds, config: &TimekeepingConfig) {
        self.bay.settle(now, config.bay_term_seconds);
        self.exclusions
            .settle(&self.bay, now, config.personal_clock_seconds);
    }

    fn into_ledger(self) -> TeamLedger {
        TeamLedger {
            team: self.name,
            placeholder: self.placeholder,
            bay: self.bay.into_entries(),
            exclusions: self.exclusions.into_entries(),
        }
    }
}

/// Two-phase driver: [`ingest`](Timekeeper::ingest) the whole log, then
/// [`finalize`](Timekeeper::finalize) into a report.
#[derive(Debug, Clone)]
pub struct Timekeeper {
    config: TimekeepingConfig,
    teams: Vec<TeamState>,
    last_time: Option<Seconds>,
    ingested: bool,
}

impl Timekeeper {
    pub fn new(config: TimekeepingConfig) -> Self {
        Self {
            config,
            teams: Vec::new(),
            last_time: None,
            ingested: false,
        }
    }

    /// Validate, order and replay the complete event log.
    ///
    /// Rejects the log before touching any ledger if a record is malformed or
    /// more than two teams appear. A timekeeper accepts exactly one log.
    pub fn ingest(&mut self, records: &[EventRecord]) -> Result<()> {
        if self.ingested {
            return Err(TimekeepingError::AlreadyIngested);
        }
        let events = order_events(records)?;
        self.ingest_events(&events)
    }

    /// Replay events that were already validated by [`order_events`].
    ///
    /// Out-of-order input is put into processing order first.
    pub fn ingest_events(&mut self, events: &[RawEvent]) -> Result<()> {
        if self.ingested {
            return Err(TimekeepingError::AlreadyIngested);
        }

        let in_order = events
            .windows(2)
            .all(|w| compare_events(&w[0], &w[1]) != Ordering::Greater);
        let events: Cow<'_, [RawEvent]> = if in_order {
            Cow::Borrowed(events)
        } else {
            let mut sorted = events.to_vec();
            sorted.sort_by(compare_events);
            Cow::Owned(sorted)
        };

        self.teams = self.resolve_teams(&events)?;
        self.ingested = true;

        for event in events.iter() {
            self.tick(event);
        }
        self.last_time = events.last().map(|e| e.time_seconds);

        log::debug!(
            "ingested {} events for {:?}",
            events.len(),
            self.teams.iter().map(|t| t.name.as_str()).collect::<Vec<_>>()
        );
        Ok(())
    }

    fn resolve_teams(&self, events: &[RawEvent]) -> Result<Vec<TeamState>> {
        let names = teams_in_order(events);
        if names.len() > 2 {
            return Err(TimekeepingError::AmbiguousTeamSet { teams: names });
        }

        match names.as_slice() {
            [only] => {
                let mut placeholder = self.config.placeholder_team.clone();
                while placeholder == *only {
                    placeholder.push('\'');
                }
                log::info!("single-team log, adding placeholder opponent '{}'", placeholder);
                Ok(vec![
                    TeamState::new(only.clone(), false),
                    TeamState::new(placeholder, true),
                ])
            }
            [home, away] => Ok(vec![
                TeamState::new(home.clone(), false),
                TeamState::new(away.clone(), false),
            ]),
            _ => Err(TimekeepingError::EmptyLog),
        }
    }

    fn tick(&mut self, event: &RawEvent) {
        let now = event.time_seconds;
        self.settle_all(now);

        if event.kind.occupies_bay() {
            self.apply_infraction(event);
        }
        if event.kind.can_terminate_penalty() {
            self.apply_goal(event);
        }
    }

    fn settle_all(&mut self, now: Seconds) {
        for team in &mut self.teams {
            team.settle(now, &self.config);
        }
    }

    fn team_index(&self, name: &str) -> Option<usize> {
        self.teams.iter().position(|t| t.name == name)
    }

    /// Queue the bay terms of an infraction, routing them to a substitute
    /// when the player is (or becomes) ejected.
    fn apply_infraction(&mut self, event: &RawEvent) {
        let Some(index) = self.team_index(&event.team) else {
            return;
        };
        let now = event.time_seconds;
        let team = &mut self.teams[index];

        let occupant = match ExclusionKind::from_event(event.kind) {
            Some(kind) => team.exclusions.open(event.id, &event.player, kind, now),
            None if team.exclusions.has_open(&event.player) => {
                Occupant::Substitute(event.player.clone())
            }
            None => Occupant::Player(event.player.clone()),
        };

        let first = team.bay.queue(event.id, occupant.clone(), now);
        if event.kind.is_double() {
            team.bay.queue(event.id, occupant.clone(), now);
        }
        let started = team.bay.admit_on_arrival(first, now);
        log::debug!(
            "{} {} for {} at {} ({})",
            team.name,
            event.kind,
            occupant,
            now,
            if started { "started" } else { "queued" }
        );
    }

    /// A goal against a team with more players in the bay ends that team's
    /// longest-served term.
    fn apply_goal(&mut self, event: &RawEvent) {
        let Some(scorer) = self.team_index(&event.team) else {
            return;
        };
        let opponent = 1 - scorer;
        let now = event.time_seconds;
        let scorer_running = self.teams[scorer].bay.running_count();

        let team = &mut self.teams[opponent];
        if team.bay.running_count() > scorer_running {
            team.bay.terminate_earliest(now);
            team.bay.admit_next(now);
        }
    }

    /// Run the closing settlement and hand out both ledgers.
    pub fn finalize(mut self) -> TimekeepingReport {
        let horizon = self
            .last_time
            .unwrap_or(0)
            .saturating_add(self.config.settle_horizon_seconds);
        self.settle_all(horizon);

        TimekeepingReport {
            teams: self.teams.into_iter().map(TeamState::into_ledger).collect(),
        }
    }
}

/// One-shot helper: ingest `records` and finalize.
pub fn timekeeping(records: &[EventRecord], config: &TimekeepingConfig) -> Result<TimekeepingReport> {
    let mut keeper = Timekeeper::new(config.clone());
    keeper.ingest(records)?;
    Ok(keeper.finalize())
}
