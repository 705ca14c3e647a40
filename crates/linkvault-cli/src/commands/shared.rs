use linkvault_core::shared::SharedPageViewer;

use crate::commands::common::{format_link_lines, settle, CommandContext};
use crate::error::CliError;

pub async fn run_shared(target: &str, as_json: bool, context: &CommandContext) -> Result<(), CliError> {
    let viewer = SharedPageViewer::open(context.api.clone(), target)?;
    let outcome = viewer.load().await;
    settle(outcome, viewer.message())?;

    let links = viewer.links();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&links)?);
    } else if links.is_empty() {
        println!("This share link has no links yet.");
    } else {
        for line in format_link_lines(&links, &[]) {
            println!("{line}");
        }
    }
    Ok(())
}
