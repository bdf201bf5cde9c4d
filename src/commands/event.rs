use crate::commands::{connect_with_session, finish_form, print_success, require_admin};
use crate::display::{format_event_line, stdout_is_tty};
use crate::draft::form::EventForm;
use crate::draft::{EventDraft, QuestionDraft};
use crate::error::{BrightError, Result};
use crate::types::Region;

/// Field values collected from CLI flags. Everything is optional here;
/// the validator owns the required-field rules, not the argument parser.
#[derive(Debug, Default)]
pub struct EventFieldArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub emoji: Option<String>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub address: Option<String>,
    pub region: Option<Region>,
    /// "brightest" or "self"
    pub paid_by: Option<String>,
    pub organizers: Vec<String>,
    /// Free-text questions for attendees.
    pub questions: Vec<String>,
    /// Multiple-choice questions as `Question|Option|Option`.
    pub choices: Vec<String>,
}

fn parse_paid_by(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "brightest" | "company" => Ok(true),
        "self" => Ok(false),
        _ => Err(BrightError::Other(format!(
            "invalid --paid-by value '{}', expected 'brightest' or 'self'",
            value
        ))),
    }
}

/// Fold flag values into the draft. Unset flags leave fields alone, so
/// update mode only changes what the caller asked for.
fn apply_event_args(draft: &mut EventDraft, args: EventFieldArgs) -> Result<()> {
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.set_description(&description);
    }
    if let Some(emoji) = args.emoji {
        draft.emoji = emoji;
    }
    if let Some(start_date) = args.start_date {
        draft.start_date = start_date;
    }
    if let Some(start_time) = args.start_time {
        draft.start_time = start_time;
    }
    if let Some(end_date) = args.end_date {
        draft.end_date = end_date;
    }
    if let Some(end_time) = args.end_time {
        draft.end_time = end_time;
    }
    if let Some(address) = args.address {
        draft.address = address;
    }
    if let Some(region) = args.region {
        draft.region = Some(region);
    }
    if let Some(paid_by) = args.paid_by {
        draft.paid_by_brightest = Some(parse_paid_by(&paid_by)?);
    }
    for organizer in args.organizers {
        draft.toggle_organizer(&organizer);
    }
    for question in args.questions {
        draft.questions.push(QuestionDraft {
            question,
            multiple_choice: false,
            options: Vec::new(),
        });
    }
    for choice in args.choices {
        let mut parts = choice.split('|').map(str::to_string);
        let question = parts.next().unwrap_or_default();
        draft.questions.push(QuestionDraft {
            question,
            multiple_choice: true,
            options: parts.collect(),
        });
    }
    Ok(())
}

/// Submit a new event request.
pub async fn cmd_event_create(args: EventFieldArgs) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;

    let mut form = EventForm::create();
    apply_event_args(&mut form.draft, args)?;
    form.submit(&api, &session).await;
    finish_form(form.error(), form.success())
}

/// Update an existing event; flags not given keep the server's values.
pub async fn cmd_event_update(id: &str, args: EventFieldArgs) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;

    let record = api.event_detail(id).await?;
    let mut form = EventForm::update(&record);
    apply_event_args(&mut form.draft, args)?;
    form.submit(&api, &session).await;
    finish_form(form.error(), form.success())
}

/// List events; defaults to the caller's own region.
pub async fn cmd_event_ls(region: Option<Region>) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;

    let region = region.unwrap_or(session.user.location);
    let events = api.events(region).await?;

    if events.is_empty() {
        println!("No events found.");
        return Ok(());
    }

    let colored = stdout_is_tty();
    for event in &events {
        println!("{}", format_event_line(event, colored));
    }
    Ok(())
}

pub async fn cmd_event_show(id: &str) -> Result<()> {
    let (_config, api, _session) = connect_with_session().await?;
    let event = api.event_detail(id).await?;

    println!("{} {}", event.emoji, event.title);
    println!();
    println!("{}", event.description);
    println!();
    println!("Starts:   {}", event.start_date);
    if let Some(ref end) = event.end_date {
        println!("Ends:     {}", end);
    }
    println!("Address:  {}", event.address);
    println!("Region:   {}", event.location);
    println!(
        "Paid by:  {}",
        if event.paid_by_brightest {
            "Brightest"
        } else {
            "attendees"
        }
    );
    println!(
        "Status:   {}",
        if event.validated {
            "approved"
        } else {
            "waiting for approval"
        }
    );
    if let Some(ref reason) = event.refusal_reason {
        println!("Refused:  {}", reason);
    }
    println!("Attending: {}", event.attendances.len());
    if !event.organizors.is_empty() {
        println!("Co-organizers: {}", event.organizors.join(", "));
    }
    if !event.form.is_empty() {
        println!();
        println!("Questions for participants:");
        for question in &event.form {
            if question.possible_answers.is_empty() {
                println!("  - {}", question.question);
            } else {
                println!(
                    "  - {} [{}]",
                    question.question,
                    question.possible_answers.join(" / ")
                );
            }
        }
    }
    Ok(())
}

/// Register attendance, answering the event's form in order.
pub async fn cmd_event_attend(id: &str, answers: Vec<String>) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;

    let event = api.event_detail(id).await?;
    if answers.len() != event.form.len() {
        return Err(BrightError::Other(format!(
            "this event asks {} question(s), got {} answer(s); pass one --answer per question",
            event.form.len(),
            answers.len()
        )));
    }

    api.attend_event(id, &answers, &session.user.id).await?;
    print_success("Your registration was successful!");
    Ok(())
}

pub async fn cmd_event_withdraw(id: &str) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    api.withdraw_attendance(id, &session.user.id).await?;
    print_success("Participation has been withdrawn");
    Ok(())
}

pub async fn cmd_event_decline(id: &str) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    api.decline_event(id, &session.user.id).await?;
    print_success("Event successfully declined");
    Ok(())
}

pub async fn cmd_event_approve(id: &str) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    require_admin(&session)?;
    api.approve_event(id, &session.user.id).await?;
    print_success("Event was approved successfully.");
    Ok(())
}

pub async fn cmd_event_deny(id: &str, reason: &str) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    require_admin(&session)?;
    api.deny_event(id, &session.user.id, reason).await?;
    print_success("Event was refused successfully.");
    Ok(())
}

pub async fn cmd_event_rm(id: &str) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    require_admin(&session)?;
    api.delete_event(id).await?;
    print_success("Event was deleted successfully.");
    Ok(())
}
