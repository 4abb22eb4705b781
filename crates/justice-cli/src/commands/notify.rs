use std::time::Duration;

use anyhow::anyhow;
use justice_api_models::NotificationId;
use justice_client::poller::NotificationPoller;
use justice_client::{PollOutcome, PollerConfig};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::cli::{ListArgs, OutputFormat, ReadArgs, WatchArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{format_count, format_mark, format_notifications, format_outcome};

pub(crate) async fn handle_count(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let count = ctx.client.notification_count().await?;
    println!("{}", format_count(count, output)?);
    Ok(())
}

pub(crate) async fn handle_list(
    ctx: &AppContext,
    args: ListArgs,
    output: OutputFormat,
) -> CliResult<()> {
    if args.limit == 0 {
        return Err(CliError::validation("--limit must be at least 1"));
    }
    let items = ctx.client.notifications(args.limit).await?;
    println!("{}", format_notifications(&items, output)?);
    Ok(())
}

pub(crate) async fn handle_read(
    ctx: &AppContext,
    args: ReadArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let id = args.id.trim();
    if id.is_empty() {
        return Err(CliError::validation("notification id must not be empty"));
    }
    let response = ctx.client.mark_read(&NotificationId::new(id)).await?;
    println!("{}", format_mark(&response, output)?);
    Ok(())
}

pub(crate) async fn handle_read_all(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let response = ctx.client.mark_all_read().await?;
    println!("{}", format_mark(&response, output)?);
    Ok(())
}

pub(crate) async fn handle_watch(
    ctx: &AppContext,
    args: WatchArgs,
    output: OutputFormat,
) -> CliResult<()> {
    if args.interval_ms == 0 {
        return Err(CliError::validation("--interval-ms must be at least 1"));
    }
    if args.cycles == Some(0) {
        return Err(CliError::validation("--cycles must be at least 1"));
    }
    ctx.user_id()?;

    let config = PollerConfig::default().with_interval(Duration::from_millis(args.interval_ms));
    let mut poller = NotificationPoller::new(ctx.client.clone(), config);
    let outcomes = poller
        .start()
        .ok_or_else(|| CliError::failure(anyhow!("notification poller already running")))?;

    let result = watch_outcomes(outcomes, args.cycles, output).await;
    poller.stop().await;
    result
}

async fn watch_outcomes(
    mut outcomes: UnboundedReceiver<PollOutcome>,
    cycles: Option<u64>,
    output: OutputFormat,
) -> CliResult<()> {
    let mut seen = 0_u64;
    loop {
        tokio::select! {
            outcome = outcomes.recv() => {
                let Some(outcome) = outcome else {
                    return Ok(());
                };
                if let Some(line) = format_outcome(&outcome, output)? {
                    println!("{line}");
                }
                seen += 1;
                if cycles.is_some_and(|limit| seen >= limit) {
                    return Ok(());
                }
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(err) = signal {
                    tracing::warn!(error = %err, "failed to listen for interrupt");
                }
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
#[allow(deprecated)] // httpmock 0.8 deprecates `Mock::hits`
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn context(server: &MockServer) -> AppContext {
        AppContext::for_server(&server.base_url(), "7")
    }

    #[tokio::test]
    async fn count_reads_user_scoped_endpoint() -> Result<(), CliError> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/notify/count/7")
                .header("x-user-id", "7");
            then.status(200).json_body(json!({ "count": 2 }));
        });

        handle_count(&context(&server), OutputFormat::Table).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn list_passes_limit() -> Result<(), CliError> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/notify/user/7")
                .query_param("limit", "5");
            then.status(200).json_body(json!({
                "notifications": [
                    { "id": 3, "message": "hello", "created_at": "2024-05-01T12:30:00", "read": false }
                ]
            }));
        });

        handle_list(&context(&server), ListArgs { limit: 5 }, OutputFormat::Json).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn zero_limit_is_rejected_before_any_request() {
        let server = MockServer::start_async().await;
        let err = handle_list(&context(&server), ListArgs { limit: 0 }, OutputFormat::Table)
            .await
            .err()
            .map(|err| err.exit_code());
        assert_eq!(err, Some(2));
    }

    #[tokio::test]
    async fn read_posts_single_id() -> Result<(), CliError> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/notify/read_one/12");
            then.status(200).json_body(json!({ "ok": true, "id": 12 }));
        });

        handle_read(
            &context(&server),
            ReadArgs { id: "12".into() },
            OutputFormat::Table,
        )
        .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn read_all_failure_is_operational() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/notify/read/7");
            then.status(500).body("database unavailable");
        });

        let err = handle_read_all(&context(&server), OutputFormat::Table)
            .await
            .err();
        mock.assert();
        let err = err.map(|err| (err.exit_code(), err.display_message()));
        assert!(matches!(err, Some((3, ref message)) if message.contains("500")));
    }

    #[tokio::test]
    async fn watch_stops_after_requested_cycles() -> Result<(), CliError> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/notify/count/7");
            then.status(200).json_body(json!({ "count": 1 }));
        });

        let args = WatchArgs {
            interval_ms: 10,
            cycles: Some(2),
        };
        tokio::time::timeout(
            Duration::from_secs(5),
            handle_watch(&context(&server), args, OutputFormat::Table),
        )
        .await
        .map_err(|_| CliError::failure(anyhow!("watch did not finish")))??;
        assert!(mock.hits() >= 2);
        Ok(())
    }

    #[tokio::test]
    async fn watch_rejects_zero_interval() {
        let server = MockServer::start_async().await;
        let args = WatchArgs {
            interval_ms: 0,
            cycles: Some(1),
        };
        let err = handle_watch(&context(&server), args, OutputFormat::Table)
            .await
            .err()
            .map(|err| err.exit_code());
        assert_eq!(err, Some(2));
    }

    #[tokio::test]
    async fn watch_rejects_zero_cycles_before_polling() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET).path("/notify/count/7");
            then.status(200).json_body(json!({ "count": 1 }));
        });
        let args = WatchArgs {
            interval_ms: 10,
            cycles: Some(0),
        };
        let err = handle_watch(&context(&server), args, OutputFormat::Table)
            .await
            .err()
            .map(|err| err.exit_code());
        assert_eq!(err, Some(2));
        assert_eq!(mock.hits(), 0);
    }
}
