use crate::commands::{connect_with_session, finish_form, print_success, require_admin};
use crate::display::{format_poll_line, format_poll_results, stdout_is_tty};
use crate::draft::PollDraft;
use crate::draft::form::PollForm;
use crate::error::Result;
use crate::types::Region;

/// Field values collected from CLI flags; the validator owns the
/// required-field rules.
#[derive(Debug, Default)]
pub struct PollFieldArgs {
    pub question: Option<String>,
    pub description: Option<String>,
    pub region: Option<Region>,
    pub options: Vec<String>,
    pub end_date: Option<String>,
}

fn apply_poll_args(draft: &mut PollDraft, args: PollFieldArgs) {
    if let Some(question) = args.question {
        draft.question = question;
    }
    if let Some(description) = args.description {
        draft.set_description(&description);
    }
    if let Some(region) = args.region {
        draft.region = Some(region);
    }
    if !args.options.is_empty() {
        draft.options = args.options;
    }
    if let Some(end_date) = args.end_date {
        draft.end_date = end_date;
    }
}

pub async fn cmd_poll_create(args: PollFieldArgs) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;

    let mut form = PollForm::create();
    apply_poll_args(&mut form.draft, args);
    form.submit(&api, &session).await;
    finish_form(form.error(), form.success())
}

pub async fn cmd_poll_update(id: &str, args: PollFieldArgs) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;

    let record = api.poll_detail(id).await?;
    let mut form = PollForm::update(&record);
    apply_poll_args(&mut form.draft, args);
    form.submit(&api, &session).await;
    finish_form(form.error(), form.success())
}

/// List polls; defaults to the caller's region, `--all` shows every one.
pub async fn cmd_poll_ls(region: Option<Region>, all: bool) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;

    let polls = if all {
        api.polls(None).await?
    } else {
        api.polls(Some(region.unwrap_or(session.user.location))).await?
    };

    if polls.is_empty() {
        println!("No polls found.");
        return Ok(());
    }

    let colored = stdout_is_tty();
    for poll in &polls {
        println!("{}", format_poll_line(poll, colored));
    }
    Ok(())
}

pub async fn cmd_poll_show(id: &str) -> Result<()> {
    let (_config, api, _session) = connect_with_session().await?;
    let poll = api.poll_detail(id).await?;

    println!("{}", poll.question);
    if !poll.description.is_empty() {
        println!();
        println!("{}", poll.description);
    }
    println!();
    println!("Region: {}", poll.location);
    println!("Ends:   {}", poll.end_date);
    if !poll.created_by_username.is_empty() {
        println!("By:     {}", poll.created_by_username);
    }
    println!();
    println!("{}", format_poll_results(&poll, stdout_is_tty()));
    Ok(())
}

/// Cast a vote and show the refreshed tallies.
pub async fn cmd_poll_vote(id: &str, option: &str) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;

    let poll = api.vote(id, option, &session.user.id).await?;
    print_success("Your vote has been submitted successfully!");
    println!();
    println!("{}", format_poll_results(&poll, stdout_is_tty()));
    Ok(())
}

pub async fn cmd_poll_rm(id: &str) -> Result<()> {
    let (_config, api, session) = connect_with_session().await?;
    require_admin(&session)?;
    api.delete_poll(id).await?;
    print_success("Poll was deleted successfully.");
    Ok(())
}
