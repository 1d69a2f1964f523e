use serde::{Deserialize, Serialize};

use crate::engine::{timekeeping, TimekeepingConfig};
use crate::error::{Result, TimekeepingError};
use crate::models::{EventRecord, TeamLedger};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct TimekeepingRequest {
    pub schema_version: u8,
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub config: Option<TimekeepingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimekeepingResponse {
    pub schema_version: u8,
    pub teams: Vec<TeamLedger>,
}

/// Run a request value through the engine.
pub fn run_request(request: TimekeepingRequest) -> Result<TimekeepingResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(TimekeepingError::UnsupportedSchema(request.schema_version));
    }
    let config = request.config.unwrap_or_default();
    let report = timekeeping(&request.events, &config)?;

    Ok(TimekeepingResponse {
        schema_version: SCHEMA_VERSION,
        teams: report.teams,
    })
}

/// JSON in, JSON out.
pub fn timekeeping_json(request: &str) -> Result<String> {
    let request: TimekeepingRequest = serde_json::from_str(request)?;
    let response = run_request(request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_request() {
        let request = json!({
            "schema_version": 1,
            "events": [
                {"team": "A", "player": "7", "event": 2, "minutes": 0, "seconds": 0},
                {"team": "B", "player": "3", "event": 0, "minutes": 1, "seconds": 0}
            ]
        });

        let response = timekeeping_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();

        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["teams"][0]["team"], "A");
        assert_eq!(parsed["teams"][0]["bay"][0]["started_at"], 0);
        // Power-play goal at 1:00 ends the minor early.
        assert_eq!(parsed["teams"][0]["bay"][0]["ended_at"], 60);
        assert_eq!(parsed["teams"][1]["bay"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_determinism() {
        let request = json!({
            "schema_version": 1,
            "events": [
                {"team": "A", "player": "7", "event": 4, "minutes": 3, "seconds": 0},
                {"team": "A", "player": "8", "event": 3, "minutes": 3, "seconds": 30},
                {"team": "B", "player": "1", "event": 0, "minutes": 4, "seconds": 0},
                {"team": "A", "player": "8", "event": 2, "minutes": 9, "seconds": 0}
            ]
        })
        .to_string();

        let first = timekeeping_json(&request).unwrap();
        let second = timekeeping_json(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_request_config_is_applied() {
        let request = json!({
            "schema_version": 1,
            "events": [{"team": "A", "player": "7", "event": 2, "minutes": 0, "seconds": 0}],
            "config": {"placeholder_team": "Guests"}
        });
        let response: TimekeepingResponse =
            serde_json::from_str(&timekeeping_json(&request.to_string()).unwrap()).unwrap();
        assert_eq!(response.teams[1].team, "Guests");
        assert!(response.teams[1].placeholder);
    }

    #[test]
    fn test_rejects_unknown_schema_version() {
        let request = json!({"schema_version": 2, "events": []}).to_string();
        assert!(matches!(
            timekeeping_json(&request),
            Err(TimekeepingError::UnsupportedSchema(2))
        ));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            timekeeping_json("{not json"),
            Err(TimekeepingError::Json(_))
        ));
    }
}
