pub mod commands;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use adbook_core::config::{ConfigOverrides, LoadOptions};
use adbook_core::{MediaType, RequestStatus, ReviewerRole};
use clap::{Parser, Subcommand};

use commands::list::ListArgs;
use commands::review::ReviewArgs;
use commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "adbook",
    about = "Advertising booking review CLI",
    long_about = "Inspect and review advertising booking requests through the creative, legal and finance stages.",
    after_help = "Examples:\n  adbook list --status pending_legal\n  adbook approve REQ-001 REQ-002 --role creative\n  adbook reject REQ-003 --reason \"Budget exceeded\"\n  adbook summary"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to an adbook.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "JSON requests file, overriding workflow.requests_file")]
    requests: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List requests, optionally filtered by status, media type or search text")]
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<RequestStatus>,
        #[arg(long, value_parser = parse_media)]
        media: Option<MediaType>,
        #[arg(long, help = "Case-insensitive match on advertiser or request id")]
        search: Option<String>,
    },
    #[command(about = "Show one request with its stage label and review timeline")]
    Show { id: String },
    #[command(about = "Approve requests at their current review stage")]
    Approve {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
        #[arg(long, value_parser = parse_role)]
        role: Option<ReviewerRole>,
        #[arg(long, default_value = "operator")]
        user: String,
    },
    #[command(about = "Reject requests with a shared reason")]
    Reject {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
        #[arg(long)]
        reason: String,
        #[arg(long, value_parser = parse_role)]
        role: Option<ReviewerRole>,
        #[arg(long, default_value = "operator")]
        user: String,
    },
    #[command(about = "Dashboard counts and booking value totals")]
    Summary,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                requests_file: self.requests.clone(),
                ..ConfigOverrides::default()
            },
        }
    }
}

pub fn execute(cli: Cli) -> CommandResult {
    let options = cli.load_options();

    match cli.command {
        Command::List { status, media, search } => {
            commands::list::run(&options, &ListArgs { status, media_type: media, search })
        }
        Command::Show { id } => commands::show::run(&options, &id),
        Command::Approve { ids, role, user } => {
            commands::review::approve(&options, &ReviewArgs { ids, role, user })
        }
        Command::Reject { ids, reason, role, user } => {
            commands::review::reject(&options, &ReviewArgs { ids, role, user }, &reason)
        }
        Command::Summary => commands::summary::run(&options),
        Command::Config => commands::config::run(&options),
    }
}

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(&cli.load_options())?;

    let result = execute(cli);
    tracing::debug!(
        event_name = "cli.command.finished",
        exit_code = result.exit_code,
        "command finished"
    );
    println!("{}", result.output);
    Ok(ExitCode::from(result.exit_code))
}

fn parse_status(value: &str) -> Result<RequestStatus, String> {
    RequestStatus::parse(value).ok_or_else(|| {
        let expected: Vec<&str> = RequestStatus::ALL.iter().map(|status| status.as_str()).collect();
        format!("unknown status `{value}` (expected {})", expected.join("|"))
    })
}

fn parse_media(value: &str) -> Result<MediaType, String> {
    MediaType::parse(value)
        .ok_or_else(|| format!("unknown media type `{value}` (expected TV|Radio|Print|Digital)"))
}

fn parse_role(value: &str) -> Result<ReviewerRole, String> {
    ReviewerRole::parse(value).ok_or_else(|| {
        format!("unknown reviewer role `{value}` (expected creative|legal|finance|super_admin)")
    })
}
