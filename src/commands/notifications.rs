use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;

use crate::commands::{connect_with_session, print_success};
use crate::display::{format_notification_line, stdout_is_tty};
use crate::error::{BrightError, Result};
use crate::notifications::NotificationFeed;

pub async fn cmd_notifications_ls() -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    let notifications = api.notifications(&session.user.id).await?;

    if notifications.is_empty() {
        println!("No notifications.");
        return Ok(());
    }

    let colored = stdout_is_tty();
    for notification in &notifications {
        println!("{}", format_notification_line(notification, colored));
    }
    Ok(())
}

/// Poll the server and print each new notification as it appears, until
/// interrupted.
pub async fn cmd_notifications_watch() -> Result<()> {
    let (config, api, session) = connect_with_session().await?;
    let interval = Duration::from_secs(config.notifications.interval_secs.max(1));

    let (feed, mut receiver) =
        NotificationFeed::start(Arc::new(api), session.user.id.clone(), interval);

    println!("Watching notifications (Ctrl-C to stop)...");
    let colored = stdout_is_tty();
    let mut seen: usize = 0;
    let mut first_snapshot = true;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            snapshot = receiver.recv() => match snapshot {
                Ok(notifications) => {
                    if first_snapshot {
                        for notification in &notifications {
                            println!("{}", format_notification_line(notification, colored));
                        }
                        first_snapshot = false;
                    } else {
                        for notification in notifications.iter().skip(seen) {
                            println!("{}", format_notification_line(notification, colored));
                        }
                    }
                    seen = notifications.len();
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            },
        }
    }

    feed.stop();
    Ok(())
}

/// Delete one notification, addressed by its position in `ls` output.
pub async fn cmd_notifications_rm(index: usize) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;

    let notifications = api.notifications(&session.user.id).await?;
    let notification = notifications.get(index).ok_or_else(|| {
        BrightError::Other(format!(
            "no notification at index {} ({} total)",
            index,
            notifications.len()
        ))
    })?;

    api.delete_notification(&session.user.id, notification).await?;
    print_success("Notification was deleted successfully!");
    Ok(())
}

pub async fn cmd_notifications_clear() -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    api.clear_notifications(&session.user.id).await?;
    print_success("All notifications were deleted successfully!");
    Ok(())
}
