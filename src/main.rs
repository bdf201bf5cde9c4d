use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;

use bright::commands::{
    EventFieldArgs, PollFieldArgs, cmd_config_get, cmd_config_set, cmd_config_show,
    cmd_event_approve, cmd_event_attend, cmd_event_create, cmd_event_decline, cmd_event_deny,
    cmd_event_ls, cmd_event_rm, cmd_event_show, cmd_event_update, cmd_event_withdraw,
    cmd_notifications_clear, cmd_notifications_ls, cmd_notifications_rm, cmd_notifications_watch,
    cmd_poll_create, cmd_poll_ls, cmd_poll_rm, cmd_poll_show, cmd_poll_update, cmd_poll_vote,
    cmd_report, cmd_report_rm, cmd_reports_ls, cmd_stats, cmd_users_ls, cmd_whoami,
};
use bright::types::{Region, ReportKind};

#[derive(Parser)]
#[command(name = "bright")]
#[command(about = "Brightest events and polls client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse, request, and manage events
    #[command(subcommand, visible_alias = "e")]
    Event(EventCommands),

    /// Browse, create, and vote on polls
    #[command(subcommand, visible_alias = "p")]
    Poll(PollCommands),

    /// Notifications for the current user
    #[command(subcommand, visible_alias = "n")]
    Notifications(NotificationCommands),

    /// File or moderate reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// List all users
    Users,

    /// Show the configured user
    Whoami,

    /// Platform totals (admin)
    Stats,

    /// Get or set configuration values
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args)]
struct EventFields {
    /// Event title (5-20 characters)
    #[arg(short, long)]
    title: Option<String>,

    /// Description (1-200 characters)
    #[arg(short, long)]
    description: Option<String>,

    /// A single emoji for the event
    #[arg(short, long)]
    emoji: Option<String>,

    /// Start date as YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    start_date: Option<String>,

    /// Start time as HH:MM
    #[arg(long, value_name = "TIME")]
    start_time: Option<String>,

    /// Optional end date as YYYY-MM-DD
    #[arg(long, value_name = "DATE")]
    end_date: Option<String>,

    /// End time as HH:MM (required when an end date is set)
    #[arg(long, value_name = "TIME")]
    end_time: Option<String>,

    /// Street address
    #[arg(short, long)]
    address: Option<String>,

    /// Region: all, north, east, west
    #[arg(short, long)]
    region: Option<Region>,

    /// Who pays: brightest or self
    #[arg(long, value_name = "WHO")]
    paid_by: Option<String>,

    /// Co-organizer user id (repeatable)
    #[arg(short = 'o', long = "organizer", value_name = "USER_ID")]
    organizers: Vec<String>,

    /// Free-text question for attendees (repeatable)
    #[arg(short = 'q', long = "question")]
    questions: Vec<String>,

    /// Multiple-choice question as 'Question|Option|Option' (repeatable)
    #[arg(long = "choice", value_name = "Q|OPT|OPT")]
    choices: Vec<String>,
}

impl From<EventFields> for EventFieldArgs {
    fn from(fields: EventFields) -> Self {
        EventFieldArgs {
            title: fields.title,
            description: fields.description,
            emoji: fields.emoji,
            start_date: fields.start_date,
            start_time: fields.start_time,
            end_date: fields.end_date,
            end_time: fields.end_time,
            address: fields.address,
            region: fields.region,
            paid_by: fields.paid_by,
            organizers: fields.organizers,
            questions: fields.questions,
            choices: fields.choices,
        }
    }
}

#[derive(Subcommand)]
enum EventCommands {
    /// List events (defaults to your region)
    Ls {
        #[arg(short, long)]
        region: Option<Region>,
    },

    /// Show one event in full
    Show { id: String },

    /// Request a new event
    #[command(visible_alias = "c")]
    Create {
        #[command(flatten)]
        fields: EventFields,
    },

    /// Update an event; unset flags keep the current values
    Update {
        id: String,
        #[command(flatten)]
        fields: EventFields,
    },

    /// Attend an event, answering its questions in order
    Attend {
        id: String,
        /// Answer to one form question (repeatable, in order)
        #[arg(short, long = "answer")]
        answers: Vec<String>,
    },

    /// Withdraw your attendance
    Withdraw { id: String },

    /// Decline an event invitation
    Decline { id: String },

    /// Approve a pending event request (admin)
    Approve { id: String },

    /// Refuse a pending event request (admin)
    Deny {
        id: String,
        /// Reason shown to the requester
        #[arg(short, long)]
        reason: String,
    },

    /// Delete an event (admin)
    Rm { id: String },
}

#[derive(Args)]
struct PollFields {
    /// Poll question (10-50 characters)
    #[arg(short, long)]
    question: Option<String>,

    /// Optional description (up to 100 characters)
    #[arg(short, long)]
    description: Option<String>,

    /// Region: all, north, east, west
    #[arg(short, long)]
    region: Option<Region>,

    /// Poll option (repeatable, at least two)
    #[arg(short = 'o', long = "option")]
    options: Vec<String>,

    /// Closing date as YYYY-MM-DD, within one year
    #[arg(long, value_name = "DATE")]
    end_date: Option<String>,
}

impl From<PollFields> for PollFieldArgs {
    fn from(fields: PollFields) -> Self {
        PollFieldArgs {
            question: fields.question,
            description: fields.description,
            region: fields.region,
            options: fields.options,
            end_date: fields.end_date,
        }
    }
}

#[derive(Subcommand)]
enum PollCommands {
    /// List polls (defaults to your region)
    Ls {
        #[arg(short, long)]
        region: Option<Region>,
        /// Show polls from every region
        #[arg(long)]
        all: bool,
    },

    /// Show one poll with its results
    Show { id: String },

    /// Create a new poll
    #[command(visible_alias = "c")]
    Create {
        #[command(flatten)]
        fields: PollFields,
    },

    /// Update a poll; unset flags keep the current values
    Update {
        id: String,
        #[command(flatten)]
        fields: PollFields,
    },

    /// Vote for an option by its exact text
    Vote { id: String, option: String },

    /// Delete a poll (admin)
    Rm { id: String },
}

#[derive(Subcommand)]
enum NotificationCommands {
    /// List notifications
    Ls,

    /// Poll for notifications until interrupted
    Watch,

    /// Delete one notification by its position in `ls`
    Rm { index: usize },

    /// Delete all notifications
    Clear,
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Report an event
    Event {
        id: String,
        /// What is wrong
        #[arg(short, long)]
        reason: String,
    },

    /// Report a poll
    Poll {
        id: String,
        /// What is wrong
        #[arg(short, long)]
        reason: String,
    },

    /// List open reports (admin)
    Ls,

    /// Dismiss a report (admin)
    Rm { id: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set a value: server.url, auth.token, auth.user_id,
    /// notifications.interval_secs
    Set { key: String, value: String },

    /// Print a single value
    Get { key: String },

    /// Print the whole configuration
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Event(command) => match command {
            EventCommands::Ls { region } => cmd_event_ls(region).await,
            EventCommands::Show { id } => cmd_event_show(&id).await,
            EventCommands::Create { fields } => cmd_event_create(fields.into()).await,
            EventCommands::Update { id, fields } => cmd_event_update(&id, fields.into()).await,
            EventCommands::Attend { id, answers } => cmd_event_attend(&id, answers).await,
            EventCommands::Withdraw { id } => cmd_event_withdraw(&id).await,
            EventCommands::Decline { id } => cmd_event_decline(&id).await,
            EventCommands::Approve { id } => cmd_event_approve(&id).await,
            EventCommands::Deny { id, reason } => cmd_event_deny(&id, &reason).await,
            EventCommands::Rm { id } => cmd_event_rm(&id).await,
        },

        Commands::Poll(command) => match command {
            PollCommands::Ls { region, all } => cmd_poll_ls(region, all).await,
            PollCommands::Show { id } => cmd_poll_show(&id).await,
            PollCommands::Create { fields } => cmd_poll_create(fields.into()).await,
            PollCommands::Update { id, fields } => cmd_poll_update(&id, fields.into()).await,
            PollCommands::Vote { id, option } => cmd_poll_vote(&id, &option).await,
            PollCommands::Rm { id } => cmd_poll_rm(&id).await,
        },

        Commands::Notifications(command) => match command {
            NotificationCommands::Ls => cmd_notifications_ls().await,
            NotificationCommands::Watch => cmd_notifications_watch().await,
            NotificationCommands::Rm { index } => cmd_notifications_rm(index).await,
            NotificationCommands::Clear => cmd_notifications_clear().await,
        },

        Commands::Report(command) => match command {
            ReportCommands::Event { id, reason } => {
                cmd_report(ReportKind::Event, &id, &reason).await
            }
            ReportCommands::Poll { id, reason } => cmd_report(ReportKind::Poll, &id, &reason).await,
            ReportCommands::Ls => cmd_reports_ls().await,
            ReportCommands::Rm { id } => cmd_report_rm(&id).await,
        },

        Commands::Users => cmd_users_ls().await,
        Commands::Whoami => cmd_whoami().await,
        Commands::Stats => cmd_stats().await,

        Commands::Config(command) => match command {
            ConfigCommands::Set { key, value } => cmd_config_set(&key, &value),
            ConfigCommands::Get { key } => cmd_config_get(&key),
            ConfigCommands::Show => cmd_config_show(),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
