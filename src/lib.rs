pub mod commands;
pub mod config;
pub mod display;
pub mod draft;
pub mod error;
pub mod notifications;
pub mod remote;
pub mod session;
pub mod types;
pub mod utils;

pub use config::Config;
pub use draft::builder::{
    EventPayload, PollOptionUpdate, PollPayload, build_event_payload, build_poll_payload,
    preserve_votes,
};
pub use draft::form::{EventForm, FormPhase, PollForm, UNKNOWN_ERROR_MESSAGE};
pub use draft::validate::{validate_event, validate_poll};
pub use draft::{EventDraft, PollDraft, QuestionDraft};
pub use error::{BrightError, Result};
pub use notifications::NotificationFeed;
pub use remote::{Acknowledgement, Api, HttpApi, PollUpdateBody};
pub use session::Session;
pub use types::{
    EventRecord, Notification, PollOption, PollRecord, Question, Region, Report, ReportKind, User,
};
