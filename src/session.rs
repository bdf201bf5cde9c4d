//! Session context.
//!
//! The current user is fetched once and passed explicitly to whatever
//! needs it; there is no ambient global, so tests can hand-construct a
//! session with any user they like.

use crate::config::Config;
use crate::error::{BrightError, Result};
use crate::remote::HttpApi;
use crate::types::User;

#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Session { user }
    }

    /// Resolve the configured user id against the server.
    pub async fn establish(api: &HttpApi, config: &Config) -> Result<Self> {
        let user_id = config.user_id().ok_or_else(|| {
            BrightError::Config(
                "user id not configured. Set BRIGHT_USER_ID or run: bright config set auth.user_id <id>"
                    .to_string(),
            )
        })?;

        let user = api.user(&user_id).await?;
        Ok(Session { user })
    }

    /// Whether the current user may moderate events and users.
    pub fn is_admin(&self) -> bool {
        self.user.role.eq_ignore_ascii_case("admin")
    }
}
