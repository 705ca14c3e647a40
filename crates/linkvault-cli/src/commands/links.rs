use linkvault_core::dashboard::Dashboard;
use linkvault_core::dispatch::Outcome;
use linkvault_core::models::NewLink;
use linkvault_core::{Folder, FolderId, Link, LinkId};

use crate::cli::LinkCommands;
use crate::commands::common::{format_link_lines, settle, short_id, CommandContext};
use crate::error::CliError;

pub async fn run_links(command: LinkCommands, context: &CommandContext) -> Result<(), CliError> {
    let dashboard = Dashboard::new(context.api.clone());

    match command {
        LinkCommands::List { folder, json } => {
            let folder = folder.map(|id| id.parse::<FolderId>()).transpose()?;
            let (links, folders) = collect_links(&dashboard, folder).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&links)?);
            } else if links.is_empty() {
                println!("No links found.");
            } else {
                for line in format_link_lines(&links, &folders) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        LinkCommands::Add {
            url,
            title,
            kind,
            description,
            tags,
            folder,
        } => {
            let mut draft = NewLink::new(url, title, kind.into()).with_tags(tags);
            if let Some(description) = description {
                draft = draft.with_description(description);
            }
            if let Some(folder) = folder {
                draft = draft.in_folder(folder.parse()?);
            }

            let outcome = dashboard.add_link(draft).await;
            let link = settle(outcome, dashboard.message())?;
            println!("{}  {}", short_id(link.id.as_str()), link.url);
            Ok(())
        }
        LinkCommands::Delete { id } => {
            let id: LinkId = id.parse()?;
            let outcome = dashboard.delete_link(&id).await;
            settle(outcome, dashboard.message())?;
            Ok(())
        }
    }
}

/// Load links, filtered by `folder`, plus the folders used to label them.
///
/// Only the links load decides the result. Without folders the lines show
/// folder ids instead of names.
pub async fn collect_links(
    dashboard: &Dashboard,
    folder: Option<FolderId>,
) -> Result<(Vec<Link>, Vec<Folder>), CliError> {
    let outcome = dashboard.load_links().await;
    settle(outcome, dashboard.message())?;

    let folders = match dashboard.load_folders().await {
        Outcome::Applied(_) => dashboard.folders(),
        outcome => {
            tracing::warn!(
                error = ?outcome.error(),
                "Folders unavailable; showing folder ids"
            );
            Vec::new()
        }
    };

    dashboard.select_folder(folder);
    Ok((dashboard.visible_links(), folders))
}
