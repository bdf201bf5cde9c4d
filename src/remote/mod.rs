//! Brightest API surface.
//!
//! The write operations the submission forms depend on live behind the
//! [`Api`] trait so tests can substitute a fake server; everything else
//! (lists, votes, moderation, notifications) is inherent to the concrete
//! [`client::HttpApi`].

pub mod client;

use serde::{Deserialize, Serialize};

use crate::draft::builder::{EventPayload, PollOptionUpdate, PollPayload};
use crate::error::Result;
use crate::types::{EventRecord, PollRecord, Region};

pub use client::HttpApi;

/// Acknowledgement body for writes that answer with a message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledgement {
    pub message: Option<String>,
}

/// Flat body for `PUT /api/polls/{id}`; options carry preserved tallies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollUpdateBody {
    pub question: String,
    pub description: String,
    pub location: Region,
    pub options: Vec<PollOptionUpdate>,
    pub user_id: String,
    pub end_date: String,
}

/// The draft write operations, one network call each.
pub trait Api: Send + Sync {
    /// `POST /api/events`
    fn create_event(
        &self,
        payload: &EventPayload,
    ) -> impl std::future::Future<Output = Result<Acknowledgement>> + Send;

    /// `PUT /api/events/{id}`, returning the canonical record
    fn update_event(
        &self,
        id: &str,
        payload: &EventPayload,
    ) -> impl std::future::Future<Output = Result<EventRecord>> + Send;

    /// `POST /api/polls`
    fn create_poll(
        &self,
        payload: &PollPayload,
    ) -> impl std::future::Future<Output = Result<Acknowledgement>> + Send;

    /// `PUT /api/polls/{id}`, returning the canonical record
    fn update_poll(
        &self,
        id: &str,
        body: &PollUpdateBody,
    ) -> impl std::future::Future<Output = Result<PollRecord>> + Send;
}
