//! Named event datasets
//!
//! A dataset file is a JSON object mapping a dataset name to an event log.
//! Logs are stored either row-wise (a list of records) or column-wise, the
//! way spreadsheet exports write them:
//!
//! ```json
//! {
//!   "power_play": [{"team": "A", "player": "7", "event": 2, "minutes": 1, "seconds": 0}],
//!   "columns":    {"team": ["A"], "player": [7], "event": [2], "minutes": [1], "seconds": [0]}
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, TimekeepingError};
use crate::models::events::Label;
use crate::models::EventRecord;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetEvents {
    Records(Vec<EventRecord>),
    Columns(EventColumns),
}

#[derive(Debug, Deserialize)]
struct EventColumns {
    #[serde(alias = "Team")]
    team: Vec<Label>,
    #[serde(alias = "Player")]
    player: Vec<Label>,
    #[serde(alias = "Event")]
    event: Vec<i64>,
    #[serde(alias = "Minutes")]
    minutes: Vec<i64>,
    #[serde(alias = "Seconds")]
    seconds: Vec<i64>,
}

impl EventColumns {
    fn into_records(self, name: &str) -> Result<Vec<EventRecord>> {
        let len = self.team.len();
        let lengths = [
            self.player.len(),
            self.event.len(),
            self.minutes.len(),
            self.seconds.len(),
        ];
        if lengths.iter().any(|&l| l != len) {
            return Err(TimekeepingError::MalformedDataset(format!(
                "columns of dataset '{name}' have different lengths"
            )));
        }

        Ok(self
            .team
            .into_iter()
            .zip(self.player)
            .zip(self.event)
            .zip(self.minutes.into_iter().zip(self.seconds))
            .map(|(((team, player), event), (minutes, seconds))| EventRecord {
                team: team.into_string(),
                player: player.into_string(),
                event,
                minutes,
                seconds,
            })
            .collect())
    }
}

/// Parse every dataset of a dataset document.
pub fn parse_datasets(json: &str) -> Result<BTreeMap<String, Vec<EventRecord>>> {
    let raw: BTreeMap<String, DatasetEvents> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(|(name, events)| {
            let records = match events {
                DatasetEvents::Records(records) => records,
                DatasetEvents::Columns(columns) => columns.into_records(&name)?,
            };
            Ok((name, records))
        })
        .collect()
}

pub fn load_datasets(path: &Path) -> Result<BTreeMap<String, Vec<EventRecord>>> {
    let json = fs::read_to_string(path)?;
    let datasets = parse_datasets(&json)?;
    log::debug!("loaded {} datasets from {}", datasets.len(), path.display());
    Ok(datasets)
}

/// Load one named dataset.
pub fn load_dataset(path: &Path, name: &str) -> Result<Vec<EventRecord>> {
    load_datasets(path)?
        .remove(name)
        .ok_or_else(|| TimekeepingError::DatasetNotFound(name.to_string()))
}

pub fn dataset_names(path: &Path) -> Result<Vec<String>> {
    Ok(load_datasets(path)?.into_keys().collect())
}
