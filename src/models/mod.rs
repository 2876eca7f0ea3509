use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a match, derived from its time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
}

impl MatchStatus {
    /// Derive the status of a match from its time window.
    ///
    /// Both boundary instants count as live: a match that starts or ends
    /// exactly now is in progress.
    pub fn from_window(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now < start {
            MatchStatus::Scheduled
        } else if now <= end {
            MatchStatus::Live
        } else {
            MatchStatus::Finished
        }
    }
}

/// A stored match as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: i64,
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

/// A validated creation payload, before status derivation and persistence
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
}

/// A validated score-update payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub home_score: i64,
    pub away_score: i64,
}

/// Response wrapper for the list endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub data: Vec<Match>,
}

/// Response wrapper for the create endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub data: Match,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        let start = "2026-01-01T18:00:00Z".parse::<DateTime<Utc>>().unwrap();
        (start, start + Duration::hours(2))
    }

    #[test]
    fn before_start_is_scheduled() {
        let (start, end) = window();
        let now = start - Duration::seconds(1);
        assert_eq!(MatchStatus::from_window(start, end, now), MatchStatus::Scheduled);
    }

    #[test]
    fn between_bounds_is_live() {
        let (start, end) = window();
        let now = start + Duration::hours(1);
        assert_eq!(MatchStatus::from_window(start, end, now), MatchStatus::Live);
    }

    #[test]
    fn after_end_is_finished() {
        let (start, end) = window();
        let now = end + Duration::seconds(1);
        assert_eq!(MatchStatus::from_window(start, end, now), MatchStatus::Finished);
    }

    #[test]
    fn boundary_instants_are_live() {
        let (start, end) = window();
        assert_eq!(MatchStatus::from_window(start, end, start), MatchStatus::Live);
        assert_eq!(MatchStatus::from_window(start, end, end), MatchStatus::Live);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MatchStatus::Scheduled).unwrap(), "\"scheduled\"");
        assert_eq!(serde_json::to_string(&MatchStatus::Live).unwrap(), "\"live\"");
        assert_eq!(serde_json::to_string(&MatchStatus::Finished).unwrap(), "\"finished\"");
    }
}
