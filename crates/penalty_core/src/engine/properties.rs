//! Property tests over random event logs.

use proptest::prelude::*;

use super::*;
use crate::models::{EventKind, EventRecord, ExclusionKind, Occupant, Seconds, TimekeepingReport};

fn record_strategy() -> impl Strategy<Value = EventRecord> {
    record_strategy_from(0)
}

/// Records whose kind is drawn from `EventKind::ALL[first_kind..]`.
fn record_strategy_from(first_kind: usize) -> impl Strategy<Value = EventRecord> {
    (0usize..2, 0u8..4, first_kind..EventKind::ALL.len(), 0i64..3600).prop_map(
        |(team, player, kind, at)| {
            EventRecord::new(
                ["Home", "Away"][team],
                player.to_string(),
                EventKind::ALL[kind],
                at / 60,
                at % 60,
            )
        },
    )
}

fn log_strategy() -> impl Strategy<Value = Vec<EventRecord>> {
    prop::collection::vec(record_strategy(), 1..40)
}

fn run(records: &[EventRecord]) -> TimekeepingReport {
    timekeeping(records, &TimekeepingConfig::default()).unwrap()
}

type Span = (Occupant, Seconds, Option<Seconds>, Option<Seconds>);

fn bay_spans(report: &TimekeepingReport) -> Vec<Vec<Span>> {
    report
        .teams
        .iter()
        .map(|team| {
            team.bay
                .iter()
                .map(|e| (e.occupant.clone(), e.queued_at, e.started_at, e.ended_at))
                .collect()
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: queued <= started <= ended, and no term outlasts 2 minutes
    #[test]
    fn prop_bay_terms_are_well_ordered(records in log_strategy()) {
        let report = run(&records);
        for entry in report.teams.iter().flat_map(|t| &t.bay) {
            if let Some(start) = entry.started_at {
                prop_assert!(entry.queued_at <= start);
            }
            if let Some(end) = entry.ended_at {
                let start = entry.started_at.unwrap();
                prop_assert!(start <= end);
                prop_assert!(end - start <= 120);
            }
        }
    }

    /// Property: without goals every closed term runs exactly 2 minutes
    #[test]
    fn prop_terms_without_goals_run_full_length(
        records in prop::collection::vec(record_strategy_from(1), 1..40)
    ) {
        let report = run(&records);
        for entry in report.teams.iter().flat_map(|t| &t.bay) {
            if let (Some(start), Some(end)) = (entry.started_at, entry.ended_at) {
                prop_assert_eq!(end - start, 120);
            }
        }
    }

    /// Property: a closed personal clock ran at least 10 minutes
    #[test]
    fn prop_closed_exclusions_run_full_clock(records in log_strategy()) {
        let report = run(&records);
        for entry in report.teams.iter().flat_map(|t| &t.exclusions) {
            if let Some(start) = entry.started_at {
                prop_assert!(start >= entry.queued_at);
            }
            match entry.kind {
                ExclusionKind::Match => prop_assert!(entry.is_open()),
                ExclusionKind::Personal => {
                    if let Some(end) = entry.ended_at {
                        prop_assert!(end >= entry.started_at.unwrap() + 600);
                    }
                }
            }
        }
    }

    /// Property: re-running the same log yields identical ledgers
    #[test]
    fn prop_rerun_is_deterministic(records in log_strategy()) {
        prop_assert_eq!(run(&records), run(&records));
    }

    /// Property: with distinct (time, kind) keys, input order is irrelevant
    #[test]
    fn prop_input_order_is_irrelevant(records in log_strategy()) {
        let mut seen = std::collections::HashSet::new();
        let distinct: Vec<EventRecord> = records
            .into_iter()
            .filter(|r| seen.insert((r.minutes * 60 + r.seconds, r.event)))
            .collect();
        let reversed: Vec<EventRecord> = distinct.iter().rev().cloned().collect();

        let forward = run(&distinct);
        let backward = run(&reversed);
        prop_assert_eq!(forward.team_names(), backward.team_names());
        prop_assert_eq!(bay_spans(&forward), bay_spans(&backward));
    }

    /// Property: the bay never holds more than two running terms
    #[test]
    fn prop_running_terms_never_exceed_capacity(
        arrivals in prop::collection::vec((0u8..5, 0u32..60), 1..30)
    ) {
        let mut bay = BayLedger::new();
        let mut now = 0;
        for (id, (player, gap)) in arrivals.into_iter().enumerate() {
            now += gap;
            bay.settle(now, 120);
            prop_assert!(bay.running_count() <= BAY_CAPACITY);

            let index = bay.queue(id, Occupant::Player(player.to_string()), now);
            bay.admit_on_arrival(index, now);
            prop_assert!(bay.running_count() <= BAY_CAPACITY);
        }
        bay.settle(now + 10_000, 120);
        prop_assert_eq!(bay.running_count(), 0);
    }
}
