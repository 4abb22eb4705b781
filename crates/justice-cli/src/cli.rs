//! Argument parsing and command dispatch.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use justice_client::config::{DEFAULT_BACKEND_URL, DEFAULT_USER_ID};
use justice_client::resources::DEFAULT_NOTIFICATION_LIMIT;
use reqwest::Url;

use crate::client::{AppContext, CliResult, ConnectionOptions, parse_url};
use crate::commands::media::handle_media;
use crate::commands::notify::{
    handle_count, handle_list, handle_read, handle_read_all, handle_watch,
};
use crate::commands::referral::{
    handle_click, handle_leaderboard, handle_link, handle_register, handle_stats,
};
use crate::telemetry::{self, DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_POLL_INTERVAL_MS: u64 = 30_000;

/// Parses CLI arguments, executes the requested command, and returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
    };
    if let Err(err) = telemetry::init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    let options = ConnectionOptions {
        api_url: cli.api_url.clone(),
        user_id: cli.user_id.clone(),
        token: cli.token.clone(),
        timeout: Duration::from_secs(cli.timeout),
    };

    let result = match AppContext::connect(options) {
        Ok(ctx) => dispatch(&ctx, cli.command, cli.output).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            tracing::debug!(exit_code = err.exit_code(), "command failed");
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

pub(crate) async fn dispatch(ctx: &AppContext, command: Command, output: OutputFormat) -> CliResult<()> {
    match command {
        Command::Notify(notify) => match notify {
            NotifyCommand::Count => handle_count(ctx, output).await,
            NotifyCommand::List(args) => handle_list(ctx, args, output).await,
            NotifyCommand::Read(args) => handle_read(ctx, args, output).await,
            NotifyCommand::ReadAll => handle_read_all(ctx, output).await,
            NotifyCommand::Watch(args) => handle_watch(ctx, args, output).await,
        },
        Command::Referral(referral) => match referral {
            ReferralCommand::Stats => handle_stats(ctx, output).await,
            ReferralCommand::Leaderboard => handle_leaderboard(ctx, output).await,
            ReferralCommand::Click(args) => handle_click(ctx, args, output).await,
            ReferralCommand::Register(args) => handle_register(ctx, args, output).await,
            ReferralCommand::Link(args) => handle_link(ctx, args, output),
        },
        Command::Media => handle_media(ctx, output).await,
    }
}

#[derive(Parser)]
#[command(name = "justice", about = "Command-line companion for the Justice referral backend")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "JUSTICE_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_BACKEND_URL
    )]
    pub(crate) api_url: Url,
    #[arg(long, global = true, env = "JUSTICE_USER_ID", default_value = DEFAULT_USER_ID)]
    pub(crate) user_id: String,
    #[arg(long, global = true, env = "JUSTICE_TOKEN", hide_env_values = true)]
    pub(crate) token: Option<String>,
    #[arg(
        long,
        global = true,
        env = "JUSTICE_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(long, global = true, env = "JUSTICE_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub(crate) log: String,
    #[arg(long, global = true, value_enum)]
    pub(crate) log_format: Option<LogFormat>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Unread notifications for the session user.
    #[command(subcommand)]
    Notify(NotifyCommand),
    /// Referral stats, leaderboard, and link tracking.
    #[command(subcommand)]
    Referral(ReferralCommand),
    /// Resolved logo and welcome video URLs.
    Media,
}

#[derive(Subcommand)]
pub(crate) enum NotifyCommand {
    /// Print the unread count.
    Count,
    /// List the most recent unread notifications.
    List(ListArgs),
    /// Mark one notification as read.
    Read(ReadArgs),
    /// Mark every notification as read.
    ReadAll,
    /// Poll the unread count until interrupted.
    Watch(WatchArgs),
}

#[derive(Args)]
pub(crate) struct ListArgs {
    #[arg(long, default_value_t = DEFAULT_NOTIFICATION_LIMIT)]
    pub(crate) limit: usize,
}

#[derive(Args)]
pub(crate) struct ReadArgs {
    #[arg(help = "Notification identifier")]
    pub(crate) id: String,
}

#[derive(Args)]
pub(crate) struct WatchArgs {
    #[arg(long, env = "JUSTICE_POLL_INTERVAL_MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub(crate) interval_ms: u64,
    #[arg(long, help = "Stop after this many poll cycles")]
    pub(crate) cycles: Option<u64>,
}

#[derive(Subcommand)]
pub(crate) enum ReferralCommand {
    /// Referral stats for the session user.
    Stats,
    /// Global referral leaderboard.
    Leaderboard,
    /// Record a referral link click.
    Click(ReferrerArgs),
    /// Record a registration through a referral link.
    Register(ReferrerArgs),
    /// Print the shareable referral link.
    Link(LinkArgs),
}

#[derive(Args)]
pub(crate) struct ReferrerArgs {
    #[arg(help = "User id of the referrer")]
    pub(crate) referrer: String,
}

#[derive(Args)]
pub(crate) struct LinkArgs {
    #[arg(long, help = "Origin of the public site, e.g. https://example.org")]
    pub(crate) origin: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "justice",
            "notify",
            "list",
            "--limit",
            "5",
            "--api-url",
            "http://api.local:9000",
            "--user-id",
            "7",
            "--output",
            "json",
        ])?;
        assert_eq!(cli.api_url.as_str(), "http://api.local:9000/");
        assert_eq!(cli.user_id, "7");
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Command::Notify(NotifyCommand::List(ListArgs { limit: 5 }))
        ));
        Ok(())
    }

    #[test]
    fn referral_subcommands_parse() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["justice", "referral", "click", "ada"])?;
        assert!(matches!(
            cli.command,
            Command::Referral(ReferralCommand::Click(ReferrerArgs { ref referrer })) if referrer == "ada"
        ));

        let cli = Cli::try_parse_from(["justice", "referral", "link", "--origin", "https://x.org"])?;
        assert!(matches!(
            cli.command,
            Command::Referral(ReferralCommand::Link(LinkArgs { ref origin })) if origin == "https://x.org"
        ));
        Ok(())
    }

    #[test]
    fn rejects_invalid_api_url() {
        let result = Cli::try_parse_from(["justice", "media", "--api-url", "::nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn watch_accepts_a_cycle_limit() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["justice", "notify", "watch", "--cycles", "2"])?;
        let Command::Notify(NotifyCommand::Watch(args)) = cli.command else {
            panic!("expected watch command");
        };
        assert_eq!(args.cycles, Some(2));
        assert!(args.interval_ms > 0);
        Ok(())
    }

    #[test]
    fn user_id_defaults_when_not_given() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from(["justice", "--user-id", "", "notify", "count"])?;
        assert_eq!(cli.user_id, "");

        let cli = Cli::try_parse_from(["justice", "media"])?;
        assert!(!cli.user_id.is_empty());
        Ok(())
    }
}
