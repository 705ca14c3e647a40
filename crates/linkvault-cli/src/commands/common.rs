use std::collections::HashSet;

use linkvault_core::api::ApiClient;
use linkvault_core::collections::FolderCollection;
use linkvault_core::dispatch::Outcome;
use linkvault_core::feedback::TransientMessage;
use linkvault_core::session::{FileTokenStore, SessionStore};
use linkvault_core::{Folder, FolderId, Link};

use crate::config_profiles::{session_token_path, CliProfilesConfig};
use crate::error::CliError;

/// Everything a networked command needs: the resolved profile and a client
/// whose session is backed by that profile's token file.
pub struct CommandContext {
    pub profile_name: String,
    pub api: ApiClient,
}

pub fn open_context(
    global_profile: Option<&str>,
    api_url: Option<String>,
) -> Result<CommandContext, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let client_config = config.client_config(&profile_name, api_url)?;
    let token_path = session_token_path(&profile_name).map_err(CliError::Config)?;
    let session = SessionStore::open(FileTokenStore::new(token_path))?;
    tracing::debug!(profile = %profile_name, api = %client_config.api_base_url, "Opened CLI context");

    let api = ApiClient::new(client_config, session)?;
    Ok(CommandContext { profile_name, api })
}

/// Turn a view outcome into a command result, printing the confirmation
/// message on success. Failures carry the message the view posted.
pub fn settle<T>(outcome: Outcome<T>, message: Option<TransientMessage>) -> Result<T, CliError> {
    match outcome {
        Outcome::Applied(value) => {
            if let Some(message) = message.filter(|message| !message.is_error()) {
                println!("{}", message.text);
            }
            Ok(value)
        }
        Outcome::Failed(error) => {
            tracing::debug!(%error, "Command failed");
            let text = message
                .filter(TransientMessage::is_error)
                .map_or_else(|| error.to_string(), |message| message.text);
            Err(CliError::Action(text))
        }
        Outcome::Busy => Err(CliError::Action(
            "Another request for this action is still running.".to_string(),
        )),
        Outcome::Discarded => Err(CliError::Action("The request was cancelled.".to_string())),
    }
}

pub fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

pub fn preview(text: &str, width: usize) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= width {
        return text;
    }
    let mut truncated = text.chars().take(width.saturating_sub(3)).collect::<String>();
    truncated.push_str("...");
    truncated
}

pub fn format_link_lines(links: &[Link], folders: &[Folder]) -> Vec<String> {
    links
        .iter()
        .map(|link| {
            let id = short_id(link.id.as_str());
            let title = preview(&link.title, 40);
            let kind = link.kind.as_str();
            let mut line = format!("{id:<13}  {title:<40}  {kind:<8}  {}", link.url);

            if let Some(folder) = link.folder_id() {
                let name = folders
                    .iter()
                    .find(|candidate| &candidate.id == folder)
                    .map_or_else(|| folder.to_string(), |candidate| candidate.name.clone());
                line.push_str(&format!("  [{name}]"));
            }
            if !link.tags.is_empty() {
                line.push_str(&format!("  #{}", link.tags.join(" #")));
            }
            line
        })
        .collect()
}

/// Render folders as an indented tree. Folders whose parent is unknown are
/// shown at the top level, and so is any folder left over from a parent cycle.
pub fn format_folder_tree(folders: &[Folder]) -> Vec<String> {
    let mut collection = FolderCollection::new();
    collection.replace_all(folders.to_vec());

    let mut lines = Vec::new();
    let mut visited = HashSet::new();
    let (roots, nested): (Vec<&Folder>, Vec<&Folder>) =
        collection.as_slice().iter().partition(|folder| {
            folder
                .parent
                .as_ref()
                .is_none_or(|parent| collection.get(parent).is_none())
        });
    for folder in roots.into_iter().chain(nested) {
        push_folder_lines(&collection, folder, 0, &mut visited, &mut lines);
    }
    lines
}

fn push_folder_lines<'a>(
    collection: &'a FolderCollection,
    folder: &'a Folder,
    depth: usize,
    visited: &mut HashSet<&'a FolderId>,
    lines: &mut Vec<String>,
) {
    if !visited.insert(&folder.id) {
        return;
    }
    lines.push(format!(
        "{}{}  ({})",
        "  ".repeat(depth),
        folder.name,
        short_id(folder.id.as_str())
    ));
    for child in collection.children(Some(&folder.id)) {
        push_folder_lines(collection, child, depth + 1, visited, lines);
    }
}
