//! HTTP implementation of the Brightest API.
//!
//! Every request carries the bearer credential. The token is held in a
//! `SecretBox` and attached through a redacting wrapper type, so the
//! Authorization value shows up as `[REDACTED]` even if reqwest's debug
//! logging is enabled.

use std::fmt;
use std::time::Duration;

use http::header;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretBox};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::{Acknowledgement, Api, PollUpdateBody};
use crate::config::Config;
use crate::draft::builder::{EventPayload, PollPayload};
use crate::error::{BrightError, Result};
use crate::types::{
    EventRecord, Notification, PollRecord, Region, Report, ReportKind, User,
};

/// Authorization header value that redacts itself in any formatting.
struct BearerToken {
    value: String,
}

impl BearerToken {
    fn new(token: &str) -> Self {
        BearerToken {
            value: format!("Bearer {token}"),
        }
    }

    fn as_header_value(&self) -> Result<header::HeaderValue> {
        header::HeaderValue::from_str(&self.value).map_err(|_| {
            BrightError::Auth("access token contains characters not valid in a header".to_string())
        })
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Deserialize)]
struct EventsBody {
    events: Vec<EventRecord>,
}

#[derive(Deserialize)]
struct EventBody {
    event: EventRecord,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedEventBody {
    updated_event: EventRecord,
}

#[derive(Deserialize)]
struct PollsBody {
    polls: Vec<PollRecord>,
}

#[derive(Deserialize)]
struct PollBody {
    poll: PollRecord,
}

#[derive(Deserialize)]
struct UsersBody {
    users: Vec<User>,
}

#[derive(Deserialize)]
struct UserBody {
    user: User,
}

#[derive(Deserialize)]
struct NotificationsBody {
    notifications: Vec<Notification>,
}

#[derive(Deserialize)]
struct ReportsBody {
    reports: Vec<Report>,
}

#[derive(Deserialize)]
struct CountBody {
    count: u64,
}

/// Concrete client against a Brightest server.
pub struct HttpApi {
    client: Client,
    base_url: Url,
    token: SecretBox<String>,
}

impl HttpApi {
    /// Build a client from configuration (URL and token may come from the
    /// environment). Configures 30s connect and 60s total timeouts.
    pub fn from_config(config: &Config) -> Result<Self> {
        let url = config.server_url().ok_or_else(|| {
            BrightError::Config(
                "server URL not configured. Set BRIGHT_SERVER_URL or run: bright config set server.url <url>"
                    .to_string(),
            )
        })?;
        let token = config.access_token().ok_or_else(|| {
            BrightError::Auth(
                "access token not configured. Set BRIGHT_TOKEN or run: bright config set auth.token <token>"
                    .to_string(),
            )
        })?;

        Self::new(&url, &token)
    }

    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(HttpApi {
            client,
            base_url,
            token: SecretBox::new(Box::new(token.to_string())),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Attach the credential, send, and map non-success statuses to
    /// [`BrightError::Rejected`] carrying the server's message verbatim.
    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let auth = BearerToken::new(self.token.expose_secret());
        let response = builder
            .header(header::AUTHORIZATION, auth.as_header_value()?)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Err(BrightError::Rejected(message))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Validated events visible to a region.
    pub async fn events(&self, region: Region) -> Result<Vec<EventRecord>> {
        let url = self.endpoint(&format!("api/events/{}", region.wire_name()))?;
        let body: EventsBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.events)
    }

    pub async fn event_detail(&self, id: &str) -> Result<EventRecord> {
        let url = self.endpoint(&format!("api/events/detail/{id}"))?;
        let body: EventBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.event)
    }

    /// Register attendance, carrying the answers to the event's form.
    pub async fn attend_event(&self, id: &str, answers: &[String], user_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/events/attend-event/{id}"))?;
        let body = json!({ "answers": answers, "userId": user_id });
        self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    pub async fn withdraw_attendance(&self, event_id: &str, user_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/events/{event_id}/attendances/{user_id}"))?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    /// Mark the event as declined for this user.
    pub async fn decline_event(&self, event_id: &str, user_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/events/decline-event/{event_id}"))?;
        let body = json!({ "eventId": event_id, "userId": user_id });
        self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    /// Approve a pending event request (admin).
    pub async fn approve_event(&self, id: &str, user_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/events/approve/{id}"))?;
        let body = json!({ "userId": user_id });
        self.send(self.client.put(url).json(&body)).await?;
        Ok(())
    }

    /// Refuse a pending event request with a reason (admin).
    pub async fn deny_event(&self, id: &str, user_id: &str, reason: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/events/deny/{id}"))?;
        let body = json!({ "userId": user_id, "refusalReason": reason });
        self.send(self.client.put(url).json(&body)).await?;
        Ok(())
    }

    pub async fn delete_event(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/events/{id}"))?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    pub async fn event_count(&self) -> Result<u64> {
        let url = self.endpoint("api/events/count")?;
        let body: CountBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.count)
    }

    // ------------------------------------------------------------------
    // Polls
    // ------------------------------------------------------------------

    /// Polls for a region, or every poll when `region` is `None`.
    pub async fn polls(&self, region: Option<Region>) -> Result<Vec<PollRecord>> {
        let path = match region {
            Some(region) => format!("api/polls/{}", region.wire_name()),
            None => "api/polls/all".to_string(),
        };
        let url = self.endpoint(&path)?;
        let body: PollsBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.polls)
    }

    pub async fn poll_detail(&self, id: &str) -> Result<PollRecord> {
        let url = self.endpoint(&format!("api/polls/detail/{id}"))?;
        let body: PollBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.poll)
    }

    /// Cast a vote; the server answers with the updated poll.
    pub async fn vote(&self, poll_id: &str, option: &str, voter_id: &str) -> Result<PollRecord> {
        let url = self.endpoint(&format!("api/polls/vote/{poll_id}"))?;
        let body = json!({ "selectedOption": option, "voterId": voter_id });
        let response = self.send(self.client.post(url).json(&body)).await?;
        let body: PollBody = response.json().await?;
        Ok(body.poll)
    }

    pub async fn delete_poll(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/polls/{id}"))?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    pub async fn poll_count(&self) -> Result<u64> {
        let url = self.endpoint("api/polls/count")?;
        let body: CountBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.count)
    }

    // ------------------------------------------------------------------
    // Users and notifications
    // ------------------------------------------------------------------

    pub async fn users(&self) -> Result<Vec<User>> {
        let url = self.endpoint("api/users")?;
        let body: UsersBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.users)
    }

    pub async fn user(&self, id: &str) -> Result<User> {
        let url = self.endpoint(&format!("api/users/{id}"))?;
        let body: UserBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.user)
    }

    pub async fn user_count(&self) -> Result<u64> {
        let url = self.endpoint("api/users/count")?;
        let body: CountBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.count)
    }

    pub async fn notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        let url = self.endpoint(&format!("api/users/notifications/{user_id}"))?;
        let body: NotificationsBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.notifications)
    }

    /// Delete one notification; the body identifies it, there is no id.
    pub async fn delete_notification(
        &self,
        user_id: &str,
        notification: &Notification,
    ) -> Result<()> {
        let url = self.endpoint(&format!("api/users/notifications/{user_id}"))?;
        let body = json!({
            "createdAt": notification.created_at,
            "message": notification.message,
            "type": notification.kind,
            "userId": user_id,
        });
        self.send(self.client.delete(url).json(&body)).await?;
        Ok(())
    }

    pub async fn clear_notifications(&self, user_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/users/notifications-all/{user_id}"))?;
        let body = json!({ "userId": user_id });
        self.send(self.client.delete(url).json(&body)).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    pub async fn reports(&self) -> Result<Vec<Report>> {
        let url = self.endpoint("api/reports")?;
        let body: ReportsBody = self.send(self.client.get(url)).await?.json().await?;
        Ok(body.reports)
    }

    pub async fn report(
        &self,
        kind: ReportKind,
        target_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<()> {
        let url = self.endpoint(&format!("api/reports/{}/{target_id}", kind.path_segment()))?;
        let body = json!({ "userId": user_id, "reportData": text });
        self.send(self.client.post(url).json(&body)).await?;
        Ok(())
    }

    pub async fn delete_report(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&format!("api/reports/{id}"))?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

impl Api for HttpApi {
    async fn create_event(&self, payload: &EventPayload) -> Result<Acknowledgement> {
        let url = self.endpoint("api/events")?;
        let body = json!({ "eventData": payload, "userId": payload.created_by });
        let response = self.send(self.client.post(url).json(&body)).await?;
        // A success body without a message is fine; the form has a default.
        Ok(response.json().await.unwrap_or_default())
    }

    async fn update_event(&self, id: &str, payload: &EventPayload) -> Result<EventRecord> {
        let url = self.endpoint(&format!("api/events/{id}"))?;
        let body = json!({ "eventData": payload, "userId": payload.created_by });
        let response = self.send(self.client.put(url).json(&body)).await?;
        let body: UpdatedEventBody = response.json().await?;
        Ok(body.updated_event)
    }

    async fn create_poll(&self, payload: &PollPayload) -> Result<Acknowledgement> {
        let url = self.endpoint("api/polls")?;
        let body = json!({ "pollData": payload });
        let response = self.send(self.client.post(url).json(&body)).await?;
        Ok(response.json().await.unwrap_or_default())
    }

    async fn update_poll(&self, id: &str, body: &PollUpdateBody) -> Result<PollRecord> {
        let url = self.endpoint(&format!("api/polls/{id}"))?;
        let response = self.send(self.client.put(url).json(body)).await?;
        Ok(response.json().await?)
    }
}
