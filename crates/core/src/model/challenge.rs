use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

use crate::model::ids::ChallengeId;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty: {raw}")]
pub struct DifficultyParseError {
    raw: String,
}

/// Difficulty tier of a challenge.
///
/// The wire string doubles as the style key on cards and detail headers, so
/// `as_str` must return it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Novice,
    Advanced,
    Expert,
}

impl Difficulty {
    /// All tiers in ascending order, for filter buttons and summaries.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Novice,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    /// The wire/style key for this tier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Novice => "novice",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        }
    }

    /// Stable index into per-difficulty tables.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Difficulty::Beginner => 0,
            Difficulty::Novice => 1,
            Difficulty::Advanced => 2,
            Difficulty::Expert => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "novice" => Ok(Difficulty::Novice),
            "advanced" => Ok(Difficulty::Advanced),
            "expert" => Ok(Difficulty::Expert),
            other => Err(DifficultyParseError {
                raw: other.to_string(),
            }),
        }
    }
}

//
// ─── CHALLENGE ─────────────────────────────────────────────────────────────────
//

/// A named learning resource attached to a challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub name: String,
    pub url: Url,
}

/// A single catalog entry, parsed from the remote challenge document.
///
/// Read-only for the lifetime of a run; all mutable state (completion,
/// filters) lives outside this record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: ChallengeId,
    pub name: String,
    pub difficulty: Difficulty,
    pub short_description: String,
    pub full_description: String,
    #[serde(deserialize_with = "deserialize_time_created")]
    pub time_created: DateTime<Utc>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub example_code: Option<String>,
    #[serde(default)]
    pub example_output: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceLink>,
}

impl Challenge {
    /// Fractional age in days at `now`, measured in whole milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn age_days(&self, now: DateTime<Utc>) -> f64 {
        let millis = now.signed_duration_since(self.time_created).num_milliseconds();
        millis as f64 / 86_400_000.0
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
///
/// The challenge document is hand-maintained; date-only entries are common
/// and must resolve to midnight UTC.
fn deserialize_time_created<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| serde::de::Error::custom("invalid date"))?;
        return Ok(midnight.and_utc());
    }

    Err(serde::de::Error::custom(format!(
        "unparseable timeCreated: {raw}"
    )))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_round_trips_wire_strings() {
        for tier in Difficulty::ALL {
            let parsed: Difficulty = tier.as_str().parse().unwrap();
            assert_eq!(parsed, tier);
        }
    }

    #[test]
    fn difficulty_rejects_unknown_string() {
        let err = "impossible".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.to_string(), "unknown difficulty: impossible");
    }

    #[test]
    fn challenge_parses_full_record() {
        let json = r#"{
            "id": 1,
            "name": "Loop Basics",
            "difficulty": "beginner",
            "shortDescription": "Write your first loop.",
            "fullDescription": "Write a loop that prints numbers 1 through 10.",
            "timeCreated": "2024-06-01T12:00:00Z",
            "requirements": ["Use a for loop"],
            "exampleCode": "for i in 1..=10 {}",
            "exampleOutput": "1 2 3",
            "hint": "Start from 1.",
            "resources": [{"name": "Loops", "url": "https://example.com/loops"}]
        }"#;

        let challenge: Challenge = serde_json::from_str(json).unwrap();
        assert_eq!(challenge.id, ChallengeId::new(1));
        assert_eq!(challenge.difficulty, Difficulty::Beginner);
        assert_eq!(challenge.requirements.len(), 1);
        assert_eq!(challenge.resources[0].name, "Loops");
        assert_eq!(challenge.hint.as_deref(), Some("Start from 1."));
    }

    #[test]
    fn challenge_parses_minimal_record_with_date_only_timestamp() {
        let json = r#"{
            "id": 7,
            "name": "Minimal",
            "difficulty": "expert",
            "shortDescription": "s",
            "fullDescription": "f",
            "timeCreated": "2024-06-01"
        }"#;

        let challenge: Challenge = serde_json::from_str(json).unwrap();
        assert!(challenge.requirements.is_empty());
        assert!(challenge.example_code.is_none());
        assert!(challenge.resources.is_empty());
        assert_eq!(
            challenge.time_created,
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc()
        );
    }

    #[test]
    fn challenge_rejects_unparseable_timestamp() {
        let json = r#"{
            "id": 7,
            "name": "Bad",
            "difficulty": "novice",
            "shortDescription": "s",
            "fullDescription": "f",
            "timeCreated": "yesterday"
        }"#;

        assert!(serde_json::from_str::<Challenge>(json).is_err());
    }

    #[test]
    fn age_days_is_fractional() {
        let json = r#"{
            "id": 1,
            "name": "Age",
            "difficulty": "novice",
            "shortDescription": "s",
            "fullDescription": "f",
            "timeCreated": "2024-06-01T00:00:00Z"
        }"#;
        let challenge: Challenge = serde_json::from_str(json).unwrap();

        let now = challenge.time_created + chrono::Duration::hours(36);
        assert!((challenge.age_days(now) - 1.5).abs() < 1e-9);
    }
}
