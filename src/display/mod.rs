//! CLI output formatting.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::types::{EventRecord, Notification, PollRecord, Report, User};
use crate::utils::{short_timestamp, truncate_string};

/// Color only when stdout is a terminal.
pub fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Format an event for single-line display.
pub fn format_event_line(event: &EventRecord, colored: bool) -> String {
    let id = format!("{:<10}", truncate_string(&event.id, 10));
    let status = if event.validated {
        "[approved]"
    } else {
        "[pending]"
    };
    let title = format!("{:<22}", truncate_string(&event.title, 22));
    let when = short_timestamp(&event.start_date);
    let attending = event.attendances.len();

    if colored {
        format!(
            "{} {} {} {} {}  {} ({} attending)",
            id.cyan(),
            event.emoji,
            title,
            if event.validated {
                status.green().to_string()
            } else {
                status.yellow().to_string()
            },
            when,
            event.location,
            attending
        )
    } else {
        format!(
            "{} {} {} {} {}  {} ({} attending)",
            id, event.emoji, title, status, when, event.location, attending
        )
    }
}

/// Format a poll for single-line display.
pub fn format_poll_line(poll: &PollRecord, colored: bool) -> String {
    let id = format!("{:<10}", truncate_string(&poll.id, 10));
    let question = format!("{:<40}", truncate_string(&poll.question, 40));
    let votes = format!("{} votes", poll.total_votes());
    let ends = format!("ends {}", short_timestamp(&poll.end_date));

    if colored {
        format!(
            "{} {} {}  {}  {}",
            id.cyan(),
            question,
            votes.magenta(),
            ends.dimmed(),
            poll.location
        )
    } else {
        format!("{} {} {}  {}  {}", id, question, votes, ends, poll.location)
    }
}

/// Format a poll's options with tallies and a proportional bar.
pub fn format_poll_results(poll: &PollRecord, colored: bool) -> String {
    const BAR_WIDTH: usize = 24;
    let total = poll.total_votes().max(1);

    let mut lines = Vec::with_capacity(poll.options.len());
    for option in &poll.options {
        let filled = (option.votes as usize * BAR_WIDTH) / total as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled)
        );
        let pct = option.votes * 100 / total;
        let line = if colored {
            format!(
                "  {:<20} {} {:>3} ({}%)",
                truncate_string(&option.text, 20),
                bar.cyan(),
                option.votes,
                pct
            )
        } else {
            format!(
                "  {:<20} {} {:>3} ({}%)",
                truncate_string(&option.text, 20),
                bar,
                option.votes,
                pct
            )
        };
        lines.push(line);
    }
    lines.join("\n")
}

/// Format a notification line; unread ones get a leading marker.
pub fn format_notification_line(notification: &Notification, colored: bool) -> String {
    let marker = if notification.read { " " } else { "•" };
    let kind = format!("[{}]", notification.kind);
    let when = short_timestamp(&notification.created_at);

    if colored {
        let kind = kind.blue().to_string();
        let when = when.dimmed().to_string();
        if notification.read {
            format!("{marker} {kind} {} {when}", notification.message)
        } else {
            format!(
                "{} {kind} {} {when}",
                marker.yellow(),
                notification.message.bold()
            )
        }
    } else {
        format!("{marker} {kind} {} {when}", notification.message)
    }
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Region")]
    region: String,
}

/// Render the user list as a table.
pub fn users_table(users: &[User]) -> String {
    let rows: Vec<UserRow> = users
        .iter()
        .map(|user| UserRow {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            region: user.location.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Report")]
    text: String,
}

/// Render the moderation report list as a table.
pub fn reports_table(reports: &[Report]) -> String {
    let rows: Vec<ReportRow> = reports
        .iter()
        .map(|report| ReportRow {
            id: report.id.clone(),
            kind: report.report_type.to_string(),
            target: report.target_id.clone(),
            text: truncate_string(&report.report_data, 48),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PollOption, Region};

    fn sample_poll() -> PollRecord {
        PollRecord {
            id: "p1".to_string(),
            question: "Where should we eat?".to_string(),
            description: String::new(),
            location: Region::All,
            options: vec![
                PollOption {
                    text: "Tacos".to_string(),
                    voters_id: vec![],
                    votes: 3,
                },
                PollOption {
                    text: "Pizza".to_string(),
                    voters_id: vec![],
                    votes: 1,
                },
            ],
            created_by: "u1".to_string(),
            created_by_username: "Ann".to_string(),
            created_at: String::new(),
            end_date: "2025-07-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_format_poll_line_plain() {
        let line = format_poll_line(&sample_poll(), false);
        assert!(line.contains("Where should we eat?"));
        assert!(line.contains("4 votes"));
        assert!(line.contains("ends 2025-07-01"));
    }

    #[test]
    fn test_format_poll_results_percentages() {
        let rendered = format_poll_results(&sample_poll(), false);
        assert!(rendered.contains("Tacos"));
        assert!(rendered.contains("(75%)"));
        assert!(rendered.contains("(25%)"));
    }

    #[test]
    fn test_format_notification_line_plain() {
        let notification = Notification {
            kind: "event".to_string(),
            message: "Your event was approved".to_string(),
            created_at: "2025-06-01T09:00:00Z".to_string(),
            read: false,
        };
        let line = format_notification_line(&notification, false);
        assert!(line.starts_with("• [event]"));
        assert!(line.contains("Your event was approved"));
    }
}
