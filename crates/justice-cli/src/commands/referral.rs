use justice_client::referral_link;
use reqwest::Url;

use crate::cli::{LinkArgs, OutputFormat, ReferrerArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{format_ack, format_leaderboard, format_link, format_stats};

pub(crate) async fn handle_stats(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let stats = ctx.client.referral_stats().await?;
    println!("{}", format_stats(&stats, output)?);
    Ok(())
}

pub(crate) async fn handle_leaderboard(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let entries = ctx.client.leaderboard().await?;
    println!("{}", format_leaderboard(&entries, output)?);
    Ok(())
}

pub(crate) async fn handle_click(
    ctx: &AppContext,
    args: ReferrerArgs,
    output: OutputFormat,
) -> CliResult<()> {
    if ctx.user_id()? == args.referrer.trim() {
        return Err(CliError::validation("users cannot refer themselves"));
    }
    let ack = ctx.client.record_referral_click(&args.referrer).await?;
    println!("{}", format_ack(&ack, output)?);
    Ok(())
}

pub(crate) async fn handle_register(
    ctx: &AppContext,
    args: ReferrerArgs,
    output: OutputFormat,
) -> CliResult<()> {
    if ctx.user_id()? == args.referrer.trim() {
        return Err(CliError::validation("users cannot refer themselves"));
    }
    let ack = ctx.client.record_referral_register(&args.referrer).await?;
    println!("{}", format_ack(&ack, output)?);
    Ok(())
}

pub(crate) fn handle_link(ctx: &AppContext, args: LinkArgs, output: OutputFormat) -> CliResult<()> {
    let origin = args
        .origin
        .parse::<Url>()
        .map_err(|err| CliError::validation(format!("invalid origin '{}': {err}", args.origin)))?;
    let link = referral_link(origin.origin().ascii_serialization().as_str(), ctx.user_id()?);
    println!("{}", format_link(&link, output)?);
    Ok(())
}
