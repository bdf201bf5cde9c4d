//! CLI command implementations.
//!
//! Commands are thin orchestration: load config, build the client,
//! establish the session where the caller's identity matters, then call
//! one API operation (or drive one form through a single submission) and
//! print the outcome.

pub mod config;
pub mod event;
pub mod notifications;
pub mod poll;
pub mod report;
pub mod user;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use event::{
    EventFieldArgs, cmd_event_approve, cmd_event_attend, cmd_event_create, cmd_event_decline,
    cmd_event_deny, cmd_event_ls, cmd_event_rm, cmd_event_show, cmd_event_update,
    cmd_event_withdraw,
};
pub use notifications::{
    cmd_notifications_clear, cmd_notifications_ls, cmd_notifications_rm, cmd_notifications_watch,
};
pub use poll::{
    PollFieldArgs, cmd_poll_create, cmd_poll_ls, cmd_poll_rm, cmd_poll_show, cmd_poll_update,
    cmd_poll_vote,
};
pub use report::{cmd_report, cmd_report_rm, cmd_reports_ls};
pub use user::{cmd_stats, cmd_users_ls, cmd_whoami};

use owo_colors::OwoColorize;

use crate::config::Config;
use crate::display;
use crate::error::{BrightError, Result};
use crate::remote::HttpApi;
use crate::session::Session;

/// Load config and build the API client.
pub(crate) fn connect() -> Result<(Config, HttpApi)> {
    let config = Config::load()?;
    let api = HttpApi::from_config(&config)?;
    Ok((config, api))
}

/// Same, plus the resolved session for commands that act as the user.
pub(crate) async fn connect_with_session() -> Result<(Config, HttpApi, Session)> {
    let (config, api) = connect()?;
    let session = Session::establish(&api, &config).await?;
    Ok((config, api, session))
}

/// Print a form's single outcome message and turn an error into a
/// non-zero exit.
pub(crate) fn finish_form(error: Option<&str>, success: Option<&str>) -> Result<()> {
    if let Some(message) = error {
        return Err(BrightError::Other(message.to_string()));
    }
    if let Some(message) = success {
        print_success(message);
    }
    Ok(())
}

pub(crate) fn print_success(message: &str) {
    if display::stdout_is_tty() {
        println!("{}", message.green());
    } else {
        println!("{message}");
    }
}

/// Guard for moderation commands; the server enforces this too.
pub(crate) fn require_admin(session: &Session) -> Result<()> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(BrightError::Auth(
            "this command requires an admin role".to_string(),
        ))
    }
}
