//! Table and JSON renderers for command output.

use anyhow::anyhow;
use justice_api_models::{
    LeaderboardEntry, MarkReadResponse, Notification, ReferralAck, ReferralStats,
};
use justice_client::PollOutcome;
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const MISSING: &str = "-";

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

pub(crate) fn format_count(count: u64, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&json!({ "count": count })),
        OutputFormat::Table => Ok(format!("unread: {count}")),
    }
}

pub(crate) fn format_notifications(
    items: &[Notification],
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(items),
        OutputFormat::Table if items.is_empty() => Ok("No notifications".to_string()),
        OutputFormat::Table => {
            let mut lines = vec![format!("{:<10} {:<16} MESSAGE", "ID", "CREATED")];
            lines.extend(items.iter().map(|item| {
                format!("{:<10} {:<16} {}", item.id, item.display_time(), item.message)
            }));
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn format_mark(response: &MarkReadResponse, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(response),
        OutputFormat::Table => {
            let mut line = if response.ok { "ok" } else { "not acknowledged" }.to_string();
            if let Some(marked) = response.marked {
                line.push_str(&format!(" (marked {marked})"));
            }
            Ok(line)
        }
    }
}

pub(crate) fn format_stats(stats: &ReferralStats, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(stats),
        OutputFormat::Table => {
            let mut lines = vec![
                format!(
                    "user: {}",
                    stats.username.as_deref().unwrap_or(justice_api_models::ANONYMOUS_USERNAME)
                ),
                format!("referrals: {}", stats.referrals),
                format!("balance: {:.2}", stats.balance),
            ];
            if let Some(link) = &stats.referral_link {
                lines.push(format!("link: {link}"));
            }
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn format_leaderboard(
    entries: &[LeaderboardEntry],
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(entries),
        OutputFormat::Table => {
            let mut lines = vec![format!("{:>4} {:<24} {:>9} {:>10}", "#", "USER", "REFERRALS", "BALANCE")];
            lines.extend(entries.iter().enumerate().map(|(rank, entry)| {
                format!(
                    "{:>4} {:<24} {:>9} {:>10.2}",
                    rank + 1,
                    entry.username,
                    entry.referrals,
                    entry.balance
                )
            }));
            Ok(lines.join("\n"))
        }
    }
}

pub(crate) fn format_ack(ack: &ReferralAck, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(ack),
        OutputFormat::Table => {
            let mut line = if ack.ok { "recorded" } else { "not recorded" }.to_string();
            if let Some(referrals) = ack.referrals {
                line.push_str(&format!(" (referrer now has {referrals})"));
            }
            Ok(line)
        }
    }
}

pub(crate) fn format_link(link: &str, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&json!({ "link": link })),
        OutputFormat::Table => Ok(link.to_string()),
    }
}

pub(crate) fn format_media(
    logo: Option<&str>,
    video: Option<&str>,
    format: OutputFormat,
) -> CliResult<String> {
    match format {
        OutputFormat::Json => to_json(&json!({ "logo_url": logo, "video_url": video })),
        OutputFormat::Table => Ok(format!(
            "logo: {}\nvideo: {}",
            logo.unwrap_or(MISSING),
            video.unwrap_or(MISSING)
        )),
    }
}

/// Render one poll cycle; skipped cycles produce no output.
pub(crate) fn format_outcome(
    outcome: &PollOutcome,
    format: OutputFormat,
) -> CliResult<Option<String>> {
    let PollOutcome::Updated { count, toast } = outcome else {
        return Ok(None);
    };
    let text = match format {
        OutputFormat::Json => to_json(&json!({
            "count": count,
            "toast": toast.as_ref().map(|notice| json!({
                "title": notice.title,
                "message": notice.message,
            })),
        }))?,
        OutputFormat::Table => match toast {
            Some(notice) => format!("unread: {count}  [{}] {}", notice.title, notice.message),
            None => format!("unread: {count}"),
        },
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use justice_api_models::NotificationId;
    use justice_client::ToastNotice;

    fn note(id: i64, message: &str) -> Notification {
        Notification {
            id: NotificationId::new(id.to_string()),
            message: message.to_string(),
            created_at: "2024-05-01T12:30:00".to_string(),
            read: false,
        }
    }

    #[test]
    fn notification_table_lists_each_entry() -> Result<(), CliError> {
        let text = format_notifications(&[note(1, "welcome"), note(2, "bonus")], OutputFormat::Table)?;
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("2024-05-01 12:30"));
        assert!(lines[2].ends_with("bonus"));
        Ok(())
    }

    #[test]
    fn empty_notification_table_uses_placeholder() -> Result<(), CliError> {
        assert_eq!(
            format_notifications(&[], OutputFormat::Table)?,
            "No notifications"
        );
        Ok(())
    }

    #[test]
    fn skipped_poll_renders_nothing() -> Result<(), CliError> {
        assert_eq!(format_outcome(&PollOutcome::Skipped, OutputFormat::Table)?, None);
        Ok(())
    }

    #[test]
    fn growing_count_renders_toast_text() -> Result<(), CliError> {
        let outcome = PollOutcome::Updated {
            count: 3,
            toast: Some(ToastNotice::unread(3)),
        };
        let table = format_outcome(&outcome, OutputFormat::Table)?.unwrap_or_default();
        assert!(table.contains("You have 3 unread notification(s)"));

        let json = format_outcome(&outcome, OutputFormat::Json)?.unwrap_or_default();
        let value: serde_json::Value = serde_json::from_str(&json).map_err(CliError::failure)?;
        assert_eq!(value["count"], 3);
        assert_eq!(value["toast"]["title"], "New notification");
        Ok(())
    }

    #[test]
    fn media_table_marks_missing_assets() -> Result<(), CliError> {
        let text = format_media(Some("http://api/static/logo.png"), None, OutputFormat::Table)?;
        assert_eq!(text, "logo: http://api/static/logo.png\nvideo: -");
        Ok(())
    }

    #[test]
    fn leaderboard_ranks_start_at_one() -> Result<(), CliError> {
        let entries = vec![LeaderboardEntry {
            username: "ada".into(),
            referrals: 4,
            balance: 12.5,
        }];
        let text = format_leaderboard(&entries, OutputFormat::Table)?;
        let row = text.lines().nth(1).unwrap_or_default();
        assert!(row.trim_start().starts_with("1 ada"));
        assert!(row.ends_with("12.50"));
        Ok(())
    }
}
