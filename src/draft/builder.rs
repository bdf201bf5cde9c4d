//! Payload assembly for validated drafts.
//!
//! Pure functions, no I/O: field strings become the wire shapes the API
//! expects. Date and time pairs are combined into one ISO-8601 civil
//! datetime, the address gets word capitalization, and the UI's
//! multiple-choice question shape collapses into `possibleAnswers`
//! (empty when the toggle is off).

use serde::{Deserialize, Serialize};

use crate::draft::{EventDraft, PollDraft, combine_date_time};
use crate::error::{BrightError, Result};
use crate::types::{PollRecord, Question, Region};
use crate::utils::capitalize_words;

/// Event create/update body, field names as the API spells them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub emoji: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub address: String,
    pub location: Region,
    pub paid_by_brightest: bool,
    pub organizors: Vec<String>,
    pub form: Vec<Question>,
    pub created_by: String,
}

/// Poll create body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollPayload {
    pub question: String,
    pub description: String,
    pub location: Region,
    pub options: Vec<String>,
    pub end_date: String,
    pub created_by: String,
}

/// Poll update option carrying the preserved tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOptionUpdate {
    pub text: String,
    pub votes: u64,
}

fn unvalidated(field: &str) -> BrightError {
    BrightError::Validation(format!("cannot build payload: invalid {field}"))
}

/// Assemble the wire payload for an event draft. Expects a draft that
/// already passed validation; the creator id is attached here.
pub fn build_event_payload(draft: &EventDraft, creator_id: &str) -> Result<EventPayload> {
    let start = combine_date_time(&draft.start_date, &draft.start_time)
        .ok_or_else(|| unvalidated("start date"))?;

    let end_date = if !draft.end_date.is_empty() && !draft.end_time.is_empty() {
        let end = combine_date_time(&draft.end_date, &draft.end_time)
            .ok_or_else(|| unvalidated("end date"))?;
        Some(end.to_string())
    } else {
        None
    };

    let form = draft
        .questions
        .iter()
        .map(|q| Question {
            question: q.question.clone(),
            possible_answers: q.options.clone(),
        })
        .collect();

    Ok(EventPayload {
        title: draft.title.clone(),
        description: draft.description.clone(),
        emoji: draft.emoji.clone(),
        start_date: start.to_string(),
        end_date,
        address: capitalize_words(&draft.address),
        location: draft.region.ok_or_else(|| unvalidated("region"))?,
        paid_by_brightest: draft
            .paid_by_brightest
            .ok_or_else(|| unvalidated("paid-by answer"))?,
        organizors: draft.organizers.clone(),
        form,
        created_by: creator_id.to_string(),
    })
}

/// Assemble the wire payload for a poll draft. Options are trimmed.
pub fn build_poll_payload(draft: &PollDraft, creator_id: &str) -> Result<PollPayload> {
    Ok(PollPayload {
        question: draft.question.clone(),
        description: draft.description.clone(),
        location: draft.region.ok_or_else(|| unvalidated("region"))?,
        options: draft.options.iter().map(|o| o.trim().to_string()).collect(),
        end_date: draft.end_date.clone(),
        created_by: creator_id.to_string(),
    })
}

/// Carry existing tallies into a poll update: an option whose text is
/// unchanged at the same position keeps its votes, anything else starts
/// over at zero.
pub fn preserve_votes(options: &[String], current: &PollRecord) -> Vec<PollOptionUpdate> {
    options
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let votes = match current.options.get(index) {
                Some(old) if old.text == *text => old.votes,
                _ => 0,
            };
            PollOptionUpdate {
                text: text.clone(),
                votes,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::QuestionDraft;
    use crate::types::PollOption;

    fn bbq_draft() -> EventDraft {
        EventDraft {
            title: "Team BBQ".to_string(),
            description: "Food".to_string(),
            emoji: "🎉".to_string(),
            start_date: "2025-06-01".to_string(),
            start_time: "18:00".to_string(),
            address: "Main St".to_string(),
            region: Some(Region::All),
            paid_by_brightest: Some(true),
            ..EventDraft::default()
        }
    }

    #[test]
    fn test_event_payload_combines_start_and_empty_form() {
        let payload = build_event_payload(&bbq_draft(), "u1").unwrap();
        assert_eq!(payload.start_date, "2025-06-01T18:00:00");
        assert!(payload.end_date.is_none());
        assert!(payload.form.is_empty());
        assert_eq!(payload.created_by, "u1");
    }

    #[test]
    fn test_event_payload_capitalizes_address() {
        let mut draft = bbq_draft();
        draft.address = "main st".to_string();
        let payload = build_event_payload(&draft, "u1").unwrap();
        assert_eq!(payload.address, "Main St");
    }

    #[test]
    fn test_event_payload_question_shapes() {
        let mut draft = bbq_draft();
        draft.questions.push(QuestionDraft {
            question: "Allergies?".to_string(),
            multiple_choice: false,
            options: Vec::new(),
        });
        draft.questions.push(QuestionDraft {
            question: "Drink?".to_string(),
            multiple_choice: true,
            options: vec!["Beer".to_string(), "Water".to_string()],
        });

        let payload = build_event_payload(&draft, "u1").unwrap();
        assert!(payload.form[0].possible_answers.is_empty());
        assert_eq!(payload.form[1].possible_answers, vec!["Beer", "Water"]);
    }

    #[test]
    fn test_event_payload_wire_field_names() {
        let mut draft = bbq_draft();
        draft.organizers = vec!["u2".to_string()];
        let value = serde_json::to_value(build_event_payload(&draft, "u1").unwrap()).unwrap();
        assert!(value.get("organizors").is_some());
        assert!(value.get("startDate").is_some());
        assert!(value.get("paidByBrightest").is_some());
        assert!(value.get("createdBy").is_some());
        // No end date was set, so the key is absent rather than null.
        assert!(value.get("endDate").is_none());
    }

    #[test]
    fn test_poll_payload_trims_options() {
        let draft = PollDraft {
            question: "Where should we eat?".to_string(),
            description: "Lunch spot".to_string(),
            region: Some(Region::East),
            options: vec![" Tacos ".to_string(), "Pizza".to_string()],
            end_date: "2025-07-01".to_string(),
        };
        let payload = build_poll_payload(&draft, "u7").unwrap();
        assert_eq!(payload.options, vec!["Tacos", "Pizza"]);
        assert_eq!(payload.created_by, "u7");
    }

    #[test]
    fn test_preserve_votes_keeps_unchanged_options() {
        let current = PollRecord {
            id: "p1".to_string(),
            question: "Where should we eat?".to_string(),
            description: String::new(),
            location: Region::All,
            options: vec![
                PollOption {
                    text: "Tacos".to_string(),
                    voters_id: vec![],
                    votes: 4,
                },
                PollOption {
                    text: "Pizza".to_string(),
                    voters_id: vec![],
                    votes: 2,
                },
            ],
            created_by: "u1".to_string(),
            created_by_username: String::new(),
            created_at: String::new(),
            end_date: "2025-07-01".to_string(),
        };

        let updated = preserve_votes(
            &["Tacos".to_string(), "Sushi".to_string()],
            &current,
        );
        assert_eq!(updated[0].votes, 4);
        assert_eq!(updated[1].votes, 0);
        assert_eq!(updated[1].text, "Sushi");
    }
}
