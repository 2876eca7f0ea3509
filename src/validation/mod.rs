use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::models::{NewMatch, ScoreUpdate};

/// Highest limit a caller may request when listing matches
pub const MAX_LIST_LIMIT: i64 = 100;

/// A single field-level validation problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    fn new(path: &str, message: impl Into<String>) -> Self {
        FieldIssue {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of a validator: a typed value or a non-empty ordered issue list
pub type ValidationResult<T> = Result<T, Vec<FieldIssue>>;

// Field rules. Each appends to the issue list instead of failing fast so a
// caller gets every problem in one response.

fn require_non_empty_string(body: &Value, field: &str, issues: &mut Vec<FieldIssue>) -> Option<String> {
    match body.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::String(_)) => {
            issues.push(FieldIssue::new(field, format!("{field} must be a non-empty string")));
            None
        }
        _ => {
            issues.push(FieldIssue::new(field, format!("{field} must be a string")));
            None
        }
    }
}

fn require_instant(body: &Value, field: &str, issues: &mut Vec<FieldIssue>) -> Option<DateTime<Utc>> {
    let raw = match body.get(field) {
        Some(Value::String(s)) => s,
        _ => {
            issues.push(FieldIssue::new(field, format!("{field} must be a string")));
            return None;
        }
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(_) => {
            issues.push(FieldIssue::new(
                field,
                format!("{field} must be an ISO-8601 date-time"),
            ));
            None
        }
    }
}

/// Coerce a JSON number or numeric string to an integer.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn score_field(body: &Value, field: &str, required: bool, issues: &mut Vec<FieldIssue>) -> Option<i64> {
    let value = match body.get(field) {
        Some(Value::Null) | None => {
            if required {
                issues.push(FieldIssue::new(field, format!("{field} is required")));
            }
            return None;
        }
        Some(v) => v,
    };
    match coerce_int(value) {
        Some(n) if n >= 0 => Some(n),
        _ => {
            issues.push(FieldIssue::new(
                field,
                format!("{field} must be a non-negative integer"),
            ));
            None
        }
    }
}

/// Validate the list query's optional `limit`.
///
/// Defaulting and clamping are the handler's job; this only accepts or
/// rejects what the caller sent.
pub fn validate_list_query(limit: Option<&str>) -> ValidationResult<Option<i64>> {
    let raw = match limit {
        Some(s) => s,
        None => return Ok(None),
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 && n <= MAX_LIST_LIMIT => Ok(Some(n)),
        Ok(n) if n > MAX_LIST_LIMIT => Err(vec![FieldIssue::new(
            "limit",
            format!("limit must not exceed {MAX_LIST_LIMIT}"),
        )]),
        _ => Err(vec![FieldIssue::new("limit", "limit must be a positive integer")]),
    }
}

/// Validate a match id path parameter as a coerced positive integer.
pub fn validate_match_id(raw: &str) -> ValidationResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(vec![FieldIssue::new("id", "id must be a positive integer")]),
    }
}

/// Validate a creation payload.
///
/// The cross-field window check runs only once every field-level rule has
/// passed, and its issue is attached to `endTime`.
pub fn validate_create_match(body: &Value) -> ValidationResult<NewMatch> {
    let mut issues = Vec::new();

    let sport = require_non_empty_string(body, "sport", &mut issues);
    let home_team = require_non_empty_string(body, "homeTeam", &mut issues);
    let away_team = require_non_empty_string(body, "awayTeam", &mut issues);
    let start_time = require_instant(body, "startTime", &mut issues);
    let end_time = require_instant(body, "endTime", &mut issues);
    let home_score = score_field(body, "homeScore", false, &mut issues);
    let away_score = score_field(body, "awayScore", false, &mut issues);

    if !issues.is_empty() {
        return Err(issues);
    }

    // All field rules passed, so the unwraps below cannot fire.
    let start_time = start_time.unwrap();
    let end_time = end_time.unwrap();

    if end_time <= start_time {
        return Err(vec![FieldIssue::new(
            "endTime",
            "endTime must be chronologically after startTime",
        )]);
    }

    Ok(NewMatch {
        sport: sport.unwrap(),
        home_team: home_team.unwrap(),
        away_team: away_team.unwrap(),
        start_time,
        end_time,
        home_score,
        away_score,
    })
}

/// Validate a score-update payload: both scores required, coerced, >= 0.
pub fn validate_score_update(body: &Value) -> ValidationResult<ScoreUpdate> {
    let mut issues = Vec::new();

    let home_score = score_field(body, "homeScore", true, &mut issues);
    let away_score = score_field(body, "awayScore", true, &mut issues);

    if !issues.is_empty() {
        return Err(issues);
    }

    Ok(ScoreUpdate {
        home_score: home_score.unwrap(),
        away_score: away_score.unwrap(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(issues: &[FieldIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.path.as_str()).collect()
    }

    fn valid_payload() -> Value {
        json!({
            "sport": "soccer",
            "homeTeam": "A",
            "awayTeam": "B",
            "startTime": "2099-01-01T00:00:00Z",
            "endTime": "2099-01-01T02:00:00Z",
        })
    }

    #[test]
    fn list_query_accepts_missing_limit() {
        assert_eq!(validate_list_query(None), Ok(None));
    }

    #[test]
    fn list_query_coerces_numeric_string() {
        assert_eq!(validate_list_query(Some("25")), Ok(Some(25)));
    }

    #[test]
    fn list_query_rejects_limit_over_max() {
        let issues = validate_list_query(Some("500")).unwrap_err();
        assert_eq!(paths(&issues), ["limit"]);
        assert_eq!(issues[0].message, "limit must not exceed 100");
    }

    #[test]
    fn list_query_accepts_limit_at_max() {
        assert_eq!(validate_list_query(Some("100")), Ok(Some(100)));
    }

    #[test]
    fn list_query_rejects_zero_negative_and_garbage() {
        assert!(validate_list_query(Some("0")).is_err());
        assert!(validate_list_query(Some("-3")).is_err());
        assert!(validate_list_query(Some("abc")).is_err());
    }

    #[test]
    fn match_id_coerces_and_rejects() {
        assert_eq!(validate_match_id("7"), Ok(7));
        assert!(validate_match_id("0").is_err());
        assert!(validate_match_id("-1").is_err());
        assert!(validate_match_id("seven").is_err());
    }

    #[test]
    fn create_accepts_valid_payload() {
        let m = validate_create_match(&valid_payload()).unwrap();
        assert_eq!(m.sport, "soccer");
        assert_eq!(m.home_team, "A");
        assert_eq!(m.away_team, "B");
        assert_eq!(m.home_score, None);
        assert_eq!(m.away_score, None);
    }

    #[test]
    fn create_coerces_string_scores() {
        let mut body = valid_payload();
        body["homeScore"] = json!("3");
        body["awayScore"] = json!(1);
        let m = validate_create_match(&body).unwrap();
        assert_eq!(m.home_score, Some(3));
        assert_eq!(m.away_score, Some(1));
    }

    #[test]
    fn create_rejects_negative_score_string() {
        let mut body = valid_payload();
        body["awayScore"] = json!("-1");
        let issues = validate_create_match(&body).unwrap_err();
        assert_eq!(paths(&issues), ["awayScore"]);
    }

    #[test]
    fn create_rejects_empty_strings_in_field_order() {
        let mut body = valid_payload();
        body["sport"] = json!("");
        body["awayTeam"] = json!("");
        let issues = validate_create_match(&body).unwrap_err();
        assert_eq!(paths(&issues), ["sport", "awayTeam"]);
    }

    #[test]
    fn create_rejects_unparseable_times() {
        let mut body = valid_payload();
        body["startTime"] = json!("yesterday");
        let issues = validate_create_match(&body).unwrap_err();
        assert_eq!(paths(&issues), ["startTime"]);
    }

    #[test]
    fn create_rejects_end_not_after_start() {
        let mut body = valid_payload();
        body["endTime"] = json!("2099-01-01T00:00:00Z");
        let issues = validate_create_match(&body).unwrap_err();
        assert_eq!(paths(&issues), ["endTime"]);
        assert_eq!(issues[0].message, "endTime must be chronologically after startTime");
    }

    #[test]
    fn window_check_waits_for_field_rules() {
        // A payload with a bad sport and an inverted window reports only the
        // field-level issue; the window rule runs after field rules pass.
        let mut body = valid_payload();
        body["sport"] = json!("");
        body["endTime"] = json!("2098-01-01T00:00:00Z");
        let issues = validate_create_match(&body).unwrap_err();
        assert_eq!(paths(&issues), ["sport"]);
    }

    #[test]
    fn create_accepts_offset_timestamps() {
        let mut body = valid_payload();
        body["startTime"] = json!("2099-01-01T02:00:00+02:00");
        let m = validate_create_match(&body).unwrap();
        assert_eq!(m.start_time, "2099-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn score_update_requires_both_fields() {
        let issues = validate_score_update(&json!({ "homeScore": 2 })).unwrap_err();
        assert_eq!(paths(&issues), ["awayScore"]);
        assert_eq!(issues[0].message, "awayScore is required");
    }

    #[test]
    fn score_update_coerces_and_rejects_negatives() {
        let ok = validate_score_update(&json!({ "homeScore": "2", "awayScore": 0 })).unwrap();
        assert_eq!(ok, ScoreUpdate { home_score: 2, away_score: 0 });

        let issues = validate_score_update(&json!({ "homeScore": -2, "awayScore": "x" })).unwrap_err();
        assert_eq!(paths(&issues), ["homeScore", "awayScore"]);
    }
}
