use linkvault_core::dashboard::Dashboard;
use linkvault_core::models::{FolderUpdate, NewFolder};
use linkvault_core::FolderId;

use crate::cli::FolderCommands;
use crate::commands::common::{format_folder_tree, settle, short_id, CommandContext};
use crate::error::CliError;

pub async fn run_folders(
    command: FolderCommands,
    context: &CommandContext,
) -> Result<(), CliError> {
    let dashboard = Dashboard::new(context.api.clone());

    match command {
        FolderCommands::List { json } => {
            let outcome = dashboard.load_folders().await;
            settle(outcome, dashboard.message())?;
            let folders = dashboard.folders();

            if json {
                println!("{}", serde_json::to_string_pretty(&folders)?);
            } else if folders.is_empty() {
                println!("No folders yet.");
            } else {
                for line in format_folder_tree(&folders) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        FolderCommands::Create { name, parent } => {
            let mut folder = NewFolder::new(name);
            if let Some(parent) = parent {
                folder = folder.under(parent.parse()?);
            }
            let outcome = dashboard.create_folder(folder).await;
            let created = settle(outcome, dashboard.message())?;
            println!("{}  {}", short_id(created.id.as_str()), created.name);
            Ok(())
        }
        FolderCommands::Rename { id, name } => {
            let id: FolderId = id.parse()?;
            let outcome = dashboard.update_folder(&id, FolderUpdate::rename(name)).await;
            settle(outcome, dashboard.message())?;
            Ok(())
        }
        FolderCommands::Move { id, parent } => {
            let id: FolderId = id.parse()?;
            let parent = parent.map(|parent| parent.parse::<FolderId>()).transpose()?;

            // The cycle check needs the current tree.
            if parent.is_some() {
                let outcome = dashboard.load_folders().await;
                settle(outcome, dashboard.message())?;
            }
            let outcome = dashboard
                .update_folder(&id, FolderUpdate::move_to(parent))
                .await;
            settle(outcome, dashboard.message())?;
            Ok(())
        }
        FolderCommands::Delete { id } => {
            let id: FolderId = id.parse()?;
            let outcome = dashboard.delete_folder(&id).await;
            settle(outcome, dashboard.message())?;
            Ok(())
        }
    }
}
