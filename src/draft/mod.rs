//! Client-side drafts for events and polls.
//!
//! A draft holds raw field state the way a form holds it: dates and times
//! stay strings until validation combines them. Drafts are created empty
//! (create mode) or pre-populated from a canonical record (update mode),
//! mutated only through their owning form's edit handlers, and discarded
//! after a successful submission. Nothing here is persisted.

pub mod builder;
pub mod form;
pub mod validate;

use jiff::civil;

use crate::types::{EventRecord, PollRecord, Question, Region};
use crate::draft::validate::{EVENT_DESCRIPTION_MAX, POLL_DESCRIPTION_MAX};

/// UI-side shape of a form question. Multiple choice is an explicit
/// toggle here; on the wire it is implied by a non-empty answer list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub multiple_choice: bool,
    pub options: Vec<String>,
}

impl QuestionDraft {
    /// Recover the UI shape from a wire question.
    pub fn from_wire(question: &Question) -> Self {
        let multiple_choice = !question.possible_answers.is_empty();
        QuestionDraft {
            question: question.question.clone(),
            multiple_choice,
            options: if multiple_choice {
                question.possible_answers.clone()
            } else {
                Vec::new()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub emoji: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `HH:MM`
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub address: String,
    pub region: Option<Region>,
    /// None until the organizer picks an answer.
    pub paid_by_brightest: Option<bool>,
    pub organizers: Vec<String>,
    pub questions: Vec<QuestionDraft>,
}

impl EventDraft {
    /// Pre-populate a draft from the server's canonical record.
    pub fn from_record(record: &EventRecord) -> Self {
        let (start_date, start_time) = split_timestamp(&record.start_date);
        let (end_date, end_time) = record
            .end_date
            .as_deref()
            .map(split_timestamp)
            .unwrap_or_default();

        EventDraft {
            title: record.title.clone(),
            description: record.description.clone(),
            emoji: record.emoji.clone(),
            start_date,
            start_time,
            end_date,
            end_time,
            address: record.address.clone(),
            region: Some(record.location),
            paid_by_brightest: Some(record.paid_by_brightest),
            organizers: record.organizors.clone(),
            questions: record.form.iter().map(QuestionDraft::from_wire).collect(),
        }
    }

    /// Set the description, capping input at the field limit the way the
    /// form's edit handler does.
    pub fn set_description(&mut self, text: &str) {
        if text.chars().count() <= EVENT_DESCRIPTION_MAX {
            self.description = text.to_string();
        }
    }

    pub fn add_question(&mut self) {
        self.questions.push(QuestionDraft::default());
    }

    pub fn remove_question(&mut self, index: usize) {
        if index < self.questions.len() {
            self.questions.remove(index);
        }
    }

    /// Flip a question's multiple-choice toggle. Either way the option
    /// list restarts as two empty slots, matching the form behavior.
    pub fn toggle_multiple_choice(&mut self, index: usize) {
        if let Some(q) = self.questions.get_mut(index) {
            q.multiple_choice = !q.multiple_choice;
            q.options = vec![String::new(), String::new()];
        }
    }

    pub fn add_option(&mut self, question_index: usize) {
        if let Some(q) = self.questions.get_mut(question_index) {
            q.options.push(String::new());
        }
    }

    pub fn remove_option(&mut self, question_index: usize, option_index: usize) {
        if let Some(q) = self.questions.get_mut(question_index)
            && option_index < q.options.len()
        {
            q.options.remove(option_index);
        }
    }

    /// Add or remove a co-organizer by user id.
    pub fn toggle_organizer(&mut self, user_id: &str) {
        if let Some(pos) = self.organizers.iter().position(|id| id == user_id) {
            self.organizers.remove(pos);
        } else {
            self.organizers.push(user_id.to_string());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollDraft {
    pub question: String,
    /// Optional; empty means no description.
    pub description: String,
    pub region: Option<Region>,
    pub options: Vec<String>,
    /// `YYYY-MM-DD`
    pub end_date: String,
}

impl PollDraft {
    /// An empty draft starts with two blank option slots.
    pub fn new() -> Self {
        PollDraft {
            options: vec![String::new(), String::new()],
            ..PollDraft::default()
        }
    }

    /// Pre-populate a draft from the server's canonical record.
    pub fn from_record(record: &PollRecord) -> Self {
        PollDraft {
            question: record.question.clone(),
            description: record.description.clone(),
            region: Some(record.location),
            options: record.options.iter().map(|o| o.text.clone()).collect(),
            end_date: split_timestamp(&record.end_date).0,
        }
    }

    pub fn set_description(&mut self, text: &str) {
        if text.chars().count() <= POLL_DESCRIPTION_MAX {
            self.description = text.to_string();
        }
    }

    pub fn add_option(&mut self) {
        self.options.push(String::new());
    }

    pub fn remove_option(&mut self, index: usize) {
        if index < self.options.len() {
            self.options.remove(index);
        }
    }
}

/// Parse a server timestamp, accepting both instant (`...Z`) and civil
/// forms.
pub(crate) fn parse_timestamp(s: &str) -> Option<civil::DateTime> {
    if let Ok(ts) = s.parse::<jiff::Timestamp>() {
        return Some(ts.to_zoned(jiff::tz::TimeZone::UTC).datetime());
    }
    s.parse::<civil::DateTime>().ok()
}

/// Split a server timestamp back into the form's date and time fields.
fn split_timestamp(s: &str) -> (String, String) {
    match parse_timestamp(s) {
        Some(dt) => (
            dt.date().to_string(),
            format!("{:02}:{:02}", dt.hour(), dt.minute()),
        ),
        None => (String::new(), String::new()),
    }
}

/// Combine a `YYYY-MM-DD` date field and an `HH:MM` time field.
pub(crate) fn combine_date_time(date: &str, time: &str) -> Option<civil::DateTime> {
    let d: civil::Date = date.parse().ok()?;
    let t: civil::Time = time.parse().ok()?;
    Some(d.to_datetime(t))
}
