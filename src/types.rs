use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BrightError;

/// Brightest office region. `All` targets every region; the other values
/// carry the exact names the API uses in paths and record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Region {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "Brightest North")]
    North,
    #[serde(rename = "Brightest East")]
    East,
    #[serde(rename = "Brightest West")]
    West,
}

impl Region {
    /// The value the API expects in URLs and record fields.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Region::All => "all",
            Region::North => "Brightest North",
            Region::East => "Brightest East",
            Region::West => "Brightest West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for Region {
    type Err = BrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Region::All),
            "north" | "brightest north" => Ok(Region::North),
            "east" | "brightest east" => Ok(Region::East),
            "west" | "brightest west" => Ok(Region::West),
            _ => Err(BrightError::InvalidRegion(s.to_string())),
        }
    }
}

pub const VALID_REGIONS: &[&str] = &["all", "north", "east", "west"];

/// A form question as the API stores it: multiple-choice questions are
/// distinguished only by a non-empty `possibleAnswers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub possible_answers: Vec<String>,
}

/// Canonical event record as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub emoji: String,
    pub location: Region,
    pub address: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub created_by: String,
    #[serde(default)]
    pub attendances: Vec<String>,
    #[serde(default)]
    pub declined_users: Vec<String>,
    /// Co-organizer user ids. Field name as the API spells it.
    #[serde(default)]
    pub organizors: Vec<String>,
    pub validated: bool,
    #[serde(default)]
    pub form: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal_reason: Option<String>,
    pub paid_by_brightest: bool,
}

/// One poll option with its tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    pub text: String,
    #[serde(default)]
    pub voters_id: Vec<String>,
    #[serde(default)]
    pub votes: u64,
}

/// Canonical poll record as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub description: String,
    pub location: Region,
    pub options: Vec<PollOption>,
    pub created_by: String,
    #[serde(default)]
    pub created_by_username: String,
    #[serde(default)]
    pub created_at: String,
    pub end_date: String,
}

impl PollRecord {
    /// Total votes across all options.
    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|o| o.votes).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub role: String,
    pub location: Region,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub created_at: String,
    pub read: bool,
}

/// What a report targets. A closed set, matched exhaustively; the API
/// carries it as the `reportType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Event,
    Poll,
}

impl ReportKind {
    /// Plural path segment used by the reports endpoint.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ReportKind::Event => "events",
            ReportKind::Poll => "polls",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Event => write!(f, "event"),
            ReportKind::Poll => write!(f, "poll"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = BrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "event" => Ok(ReportKind::Event),
            "poll" => Ok(ReportKind::Poll),
            _ => Err(BrightError::Other(format!(
                "invalid report kind '{}', expected 'event' or 'poll'",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub report_type: ReportKind,
    pub target_id: String,
    pub report_data: String,
    #[serde(default)]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_display() {
        assert_eq!(Region::All.to_string(), "all");
        assert_eq!(Region::North.to_string(), "Brightest North");
        assert_eq!(Region::East.to_string(), "Brightest East");
        assert_eq!(Region::West.to_string(), "Brightest West");
    }

    #[test]
    fn test_region_from_str() {
        assert_eq!("all".parse::<Region>().unwrap(), Region::All);
        assert_eq!("north".parse::<Region>().unwrap(), Region::North);
        assert_eq!("Brightest West".parse::<Region>().unwrap(), Region::West);
        assert_eq!("EAST".parse::<Region>().unwrap(), Region::East);
        assert!("south".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_serde_wire_names() {
        let json = serde_json::to_string(&Region::North).unwrap();
        assert_eq!(json, "\"Brightest North\"");
        let parsed: Region = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, Region::All);
    }

    #[test]
    fn test_report_kind_path_segment() {
        assert_eq!(ReportKind::Event.path_segment(), "events");
        assert_eq!(ReportKind::Poll.path_segment(), "polls");
    }

    #[test]
    fn test_event_record_wire_shape() {
        let json = r#"{
            "_id": "ev1",
            "title": "Team BBQ",
            "description": "Food",
            "emoji": "🎉",
            "location": "all",
            "address": "Main St",
            "startDate": "2025-06-01T18:00:00",
            "createdBy": "u1",
            "attendances": [],
            "declinedUsers": [],
            "organizors": ["u2"],
            "validated": false,
            "form": [{"question": "Allergies?", "possibleAnswers": []}],
            "paidByBrightest": true
        }"#;
        let event: EventRecord = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "ev1");
        assert_eq!(event.location, Region::All);
        assert_eq!(event.organizors, vec!["u2".to_string()]);
        assert!(event.form[0].possible_answers.is_empty());
        assert!(event.end_date.is_none());
    }
}
