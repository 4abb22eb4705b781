use justice_client::Fetchers;

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliResult};
use crate::output::format_media;

/// Missing or unreachable assets print as absent rather than failing.
pub(crate) async fn handle_media(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let fetchers = Fetchers::new(ctx.client.clone());
    let logo = fetchers.fetch_logo().await;
    let video = fetchers.fetch_video().await;
    println!(
        "{}",
        format_media(logo.as_deref(), video.as_deref(), output)?
    );
    Ok(())
}
