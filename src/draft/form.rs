//! Submission forms for events and polls.
//!
//! A form owns one draft and walks it through
//! `Editing → Submitting → Success`. Submission validates first (a draft
//! that fails a rule never touches the network), then builds the payload
//! and issues exactly one write. The outcome lands in a single visible
//! error or success message; every failure leaves the form editable, and
//! nothing is retried automatically.

use jiff::Zoned;

use crate::draft::builder::{build_event_payload, build_poll_payload, preserve_votes};
use crate::draft::validate::{validate_event, validate_poll};
use crate::draft::{EventDraft, PollDraft};
use crate::error::BrightError;
use crate::remote::{Api, PollUpdateBody};
use crate::session::Session;
use crate::types::{EventRecord, PollRecord};

/// Shown when the transport or credential layer fails; server-rejected
/// submissions surface the server's own message instead.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

const EVENT_CREATED_MESSAGE: &str = "Your event request was submitted.";
const EVENT_UPDATED_MESSAGE: &str = "The event has been updated successfully";
const POLL_CREATED_MESSAGE: &str = "Your poll was successfully created.";
const POLL_UPDATED_MESSAGE: &str = "The poll has been updated successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    Success,
}

/// Map an error to the single string the form shows. Validation and
/// server rejections are specific; everything else is opaque.
fn surface(err: &BrightError) -> String {
    match err {
        BrightError::Validation(msg) | BrightError::Rejected(msg) => msg.clone(),
        _ => UNKNOWN_ERROR_MESSAGE.to_string(),
    }
}

#[derive(Debug, Clone)]
enum EventFormMode {
    Create,
    Update { id: String },
}

pub struct EventForm {
    pub draft: EventDraft,
    mode: EventFormMode,
    phase: FormPhase,
    error: Option<String>,
    success: Option<String>,
}

impl EventForm {
    pub fn create() -> Self {
        EventForm {
            draft: EventDraft::default(),
            mode: EventFormMode::Create,
            phase: FormPhase::default(),
            error: None,
            success: None,
        }
    }

    /// Edit an existing event, pre-populating the draft from its record.
    pub fn update(record: &EventRecord) -> Self {
        EventForm {
            draft: EventDraft::from_record(record),
            mode: EventFormMode::Update {
                id: record.id.clone(),
            },
            phase: FormPhase::default(),
            error: None,
            success: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Restore every field to its initial empty value and clear both
    /// messages. Idempotent, no network call.
    pub fn reset(&mut self) {
        self.draft = EventDraft::default();
        self.error = None;
        self.success = None;
        self.phase = FormPhase::Editing;
    }

    /// Validate, build, and send the draft. One outbound write at most;
    /// a second call while one is in flight is a no-op.
    pub async fn submit<A: Api>(&mut self, api: &A, session: &Session) {
        if self.is_busy() {
            return;
        }
        self.success = None;

        let now = Zoned::now().datetime();
        if let Err(err) = validate_event(&self.draft, now) {
            self.error = Some(surface(&err));
            return;
        }

        let payload = match build_event_payload(&self.draft, &session.user.id) {
            Ok(payload) => payload,
            Err(err) => {
                self.error = Some(surface(&err));
                return;
            }
        };

        self.phase = FormPhase::Submitting;
        let mode = self.mode.clone();
        let outcome = match &mode {
            EventFormMode::Create => api.create_event(&payload).await.map(|ack| {
                ack.message
                    .unwrap_or_else(|| EVENT_CREATED_MESSAGE.to_string())
            }),
            EventFormMode::Update { id } => match api.update_event(id, &payload).await {
                Ok(record) => {
                    // The server's canonical record replaces the draft.
                    self.draft = EventDraft::from_record(&record);
                    Ok(EVENT_UPDATED_MESSAGE.to_string())
                }
                Err(err) => Err(err),
            },
        };

        match outcome {
            Ok(message) => {
                self.phase = FormPhase::Success;
                self.error = None;
                self.success = Some(message);
            }
            Err(err) => {
                self.phase = FormPhase::Editing;
                self.error = Some(surface(&err));
            }
        }
    }
}

#[derive(Debug, Clone)]
enum PollFormMode {
    Create,
    Update {
        id: String,
        /// Fetched record, kept to carry tallies into the update body.
        current: PollRecord,
    },
}

pub struct PollForm {
    pub draft: PollDraft,
    mode: PollFormMode,
    phase: FormPhase,
    error: Option<String>,
    success: Option<String>,
}

impl PollForm {
    pub fn create() -> Self {
        PollForm {
            draft: PollDraft::new(),
            mode: PollFormMode::Create,
            phase: FormPhase::default(),
            error: None,
            success: None,
        }
    }

    pub fn update(record: &PollRecord) -> Self {
        PollForm {
            draft: PollDraft::from_record(record),
            mode: PollFormMode::Update {
                id: record.id.clone(),
                current: record.clone(),
            },
            phase: FormPhase::default(),
            error: None,
            success: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn reset(&mut self) {
        self.draft = PollDraft::new();
        self.error = None;
        self.success = None;
        self.phase = FormPhase::Editing;
    }

    pub async fn submit<A: Api>(&mut self, api: &A, session: &Session) {
        if self.is_busy() {
            return;
        }
        self.success = None;

        let now = Zoned::now().datetime();
        if let Err(err) = validate_poll(&self.draft, now) {
            self.error = Some(surface(&err));
            return;
        }

        let payload = match build_poll_payload(&self.draft, &session.user.id) {
            Ok(payload) => payload,
            Err(err) => {
                self.error = Some(surface(&err));
                return;
            }
        };

        self.phase = FormPhase::Submitting;
        let mode = self.mode.clone();
        let outcome = match &mode {
            PollFormMode::Create => api
                .create_poll(&payload)
                .await
                .map(|_| POLL_CREATED_MESSAGE.to_string()),
            PollFormMode::Update { id, current } => {
                let body = PollUpdateBody {
                    question: payload.question.clone(),
                    description: payload.description.clone(),
                    location: payload.location,
                    options: preserve_votes(&payload.options, current),
                    user_id: session.user.id.clone(),
                    end_date: payload.end_date.clone(),
                };
                match api.update_poll(id, &body).await {
                    Ok(record) => {
                        self.draft = PollDraft::from_record(&record);
                        Ok(POLL_UPDATED_MESSAGE.to_string())
                    }
                    Err(err) => Err(err),
                }
            }
        };

        match outcome {
            Ok(message) => {
                self.phase = FormPhase::Success;
                self.error = None;
                self.success = Some(message);
            }
            Err(err) => {
                self.phase = FormPhase::Editing;
                self.error = Some(surface(&err));
            }
        }
    }
}
