//! Dashboard controller: the signed-in view over links, folders and sharing.
//!
//! Every mutation goes through [`dispatch::execute`], so local collections
//! only change after the backend confirms. State sits behind one lock that is
//! never held across an `.await`; clones of a `Dashboard` share it.

use std::sync::{Arc, Mutex};

use crate::api::ApiClient;
use crate::collections::{FolderCollection, LinkCollection};
use crate::dispatch::{self, lock, Action, ActionTracker, Command, Outcome, Phase, ViewState};
use crate::error::{Error, Result};
use crate::feedback::{StatusBoard, TransientMessage};
use crate::models::{Folder, FolderId, FolderUpdate, Link, LinkId, NewFolder, NewLink};
use crate::scope::ViewScope;
use crate::share::{ShareLink, ShareLinkGenerator};

const LOAD_LINKS: Command = Command {
    action: Action::LoadLinks,
    failure_text: "Failed to fetch links.",
    success_text: None,
};
const LOAD_FOLDERS: Command = Command {
    action: Action::LoadFolders,
    failure_text: "Failed to fetch folders.",
    success_text: None,
};
const ADD_LINK: Command = Command {
    action: Action::AddLink,
    failure_text: "Failed to add link.",
    success_text: Some("Link added successfully!"),
};
const DELETE_LINK: Command = Command {
    action: Action::DeleteLink,
    failure_text: "Failed to delete link.",
    success_text: Some("Link deleted."),
};
const CREATE_FOLDER: Command = Command {
    action: Action::CreateFolder,
    failure_text: "Failed to create folder.",
    success_text: Some("Folder created."),
};
const UPDATE_FOLDER: Command = Command {
    action: Action::UpdateFolder,
    failure_text: "Failed to update folder.",
    success_text: Some("Folder updated."),
};
const DELETE_FOLDER: Command = Command {
    action: Action::DeleteFolder,
    failure_text: "Failed to delete folder.",
    success_text: Some("Folder deleted."),
};
const GENERATE_SHARE: Command = Command {
    action: Action::GenerateShare,
    failure_text: "Failed to generate share link.",
    success_text: Some("Share link generated!"),
};

#[derive(Debug, Default)]
struct DashboardState {
    links: LinkCollection,
    folders: FolderCollection,
    selected_folder: Option<FolderId>,
    draft: NewLink,
    share_link: Option<ShareLink>,
    status: StatusBoard,
    actions: ActionTracker,
}

impl ViewState for DashboardState {
    fn tracker(&mut self) -> &mut ActionTracker {
        &mut self.actions
    }

    fn status(&mut self) -> &mut StatusBoard {
        &mut self.status
    }
}

#[derive(Clone)]
pub struct Dashboard {
    api: ApiClient,
    share: ShareLinkGenerator,
    state: Arc<Mutex<DashboardState>>,
    scope: ViewScope,
}

impl Dashboard {
    pub fn new(api: ApiClient) -> Self {
        Self {
            share: ShareLinkGenerator::new(api.clone()),
            api,
            state: Arc::new(Mutex::new(DashboardState::default())),
            scope: ViewScope::new(),
        }
    }

    /// Close the view. Responses that arrive afterwards are discarded.
    pub fn teardown(&self) {
        self.scope.cancel();
    }

    pub const fn scope(&self) -> &ViewScope {
        &self.scope
    }

    /// Initial fetch: links and folders load concurrently and independently.
    pub async fn load(&self) -> (Outcome<usize>, Outcome<usize>) {
        tokio::join!(self.load_links(), self.load_folders())
    }

    pub async fn load_links(&self) -> Outcome<usize> {
        let request = async { Ok::<_, Error>(self.api.list_links().await?.data) };
        dispatch::execute(&self.state, &self.scope, LOAD_LINKS, request, |state, links| {
            state.links.replace_all(links);
            tracing::debug!(count = state.links.len(), "Links loaded");
            state.links.len()
        })
        .await
    }

    pub async fn load_folders(&self) -> Outcome<usize> {
        let request = async { Ok::<_, Error>(self.api.list_folders().await?.data) };
        dispatch::execute(
            &self.state,
            &self.scope,
            LOAD_FOLDERS,
            request,
            |state, folders| {
                state.folders.replace_all(folders);
                state.folders.len()
            },
        )
        .await
    }

    pub fn draft(&self) -> NewLink {
        lock(&self.state).draft.clone()
    }

    pub fn set_draft(&self, draft: NewLink) {
        lock(&self.state).draft = draft;
    }

    pub fn edit_draft(&self, edit: impl FnOnce(&mut NewLink)) {
        edit(&mut lock(&self.state).draft);
    }

    /// Submit the add-link form.
    ///
    /// The draft is cleared only when the backend confirmed; on failure it is
    /// left as typed so the user can retry.
    pub async fn submit_draft(&self) -> Outcome<Link> {
        let link = match self.draft().validated() {
            Ok(link) => link,
            Err(error) => return dispatch::reject(&self.state, ADD_LINK, error),
        };
        let request = async move {
            let response = self.api.create_link(&link).await?;
            Ok::<_, Error>(response.data)
        };
        dispatch::execute(&self.state, &self.scope, ADD_LINK, request, |state, link: Link| {
            state.links.prepend(link.clone());
            state.draft = NewLink::default();
            link
        })
        .await
    }

    /// Replace the draft with `link` and submit it.
    pub async fn add_link(&self, link: NewLink) -> Outcome<Link> {
        self.set_draft(link);
        self.submit_draft().await
    }

    /// Delete a link. Existence is not checked locally; returns how many local
    /// records were removed after the backend confirmed (0 for unknown ids).
    pub async fn delete_link(&self, id: &LinkId) -> Outcome<usize> {
        let request = async { self.api.delete_link(id).await.map_err(Error::from) };
        dispatch::execute(&self.state, &self.scope, DELETE_LINK, request, |state, _| {
            state.links.remove(id)
        })
        .await
    }

    pub async fn create_folder(&self, folder: NewFolder) -> Outcome<Folder> {
        let folder = match folder.validated() {
            Ok(folder) => folder,
            Err(error) => return dispatch::reject(&self.state, CREATE_FOLDER, error),
        };
        let request = async move {
            let response = self.api.create_folder(&folder).await?;
            Ok::<_, Error>(response.data)
        };
        dispatch::execute(
            &self.state,
            &self.scope,
            CREATE_FOLDER,
            request,
            |state, folder: Folder| {
                state.folders.push(folder.clone());
                folder
            },
        )
        .await
    }

    /// Rename or re-parent a folder.
    ///
    /// Re-parenting under the folder itself or one of its descendants is
    /// rejected locally; the backend stays the final authority.
    pub async fn update_folder(&self, id: &FolderId, update: FolderUpdate) -> Outcome<Folder> {
        let update = match self.precheck_update(id, &update) {
            Ok(update) => update,
            Err(error) => return dispatch::reject(&self.state, UPDATE_FOLDER, error),
        };
        let request = async move {
            let response = self.api.update_folder(id, &update).await?;
            Ok::<_, Error>(response.data)
        };
        dispatch::execute(
            &self.state,
            &self.scope,
            UPDATE_FOLDER,
            request,
            |state, folder: Folder| {
                state.folders.upsert(folder.clone());
                folder
            },
        )
        .await
    }

    /// Delete a folder; resets the filter when it pointed at this folder.
    pub async fn delete_folder(&self, id: &FolderId) -> Outcome<()> {
        let request = async { self.api.delete_folder(id).await.map_err(Error::from) };
        dispatch::execute(&self.state, &self.scope, DELETE_FOLDER, request, |state, _| {
            state.folders.remove(id);
            if state.selected_folder.as_ref() == Some(id) {
                state.selected_folder = None;
            }
        })
        .await
    }

    /// Mint a new share link; it replaces any link held before.
    pub async fn generate_share(&self) -> Outcome<ShareLink> {
        let request = self.share.generate();
        dispatch::execute(
            &self.state,
            &self.scope,
            GENERATE_SHARE,
            request,
            |state, link: ShareLink| {
                state.share_link = Some(link.clone());
                link
            },
        )
        .await
    }

    pub fn select_folder(&self, folder: Option<FolderId>) {
        lock(&self.state).selected_folder = folder;
    }

    pub fn selected_folder(&self) -> Option<FolderId> {
        lock(&self.state).selected_folder.clone()
    }

    /// All links in display order.
    pub fn links(&self) -> Vec<Link> {
        lock(&self.state).links.as_slice().to_vec()
    }

    /// Links matching the selected folder filter.
    pub fn visible_links(&self) -> Vec<Link> {
        let state = lock(&self.state);
        state.links.filtered(state.selected_folder.as_ref())
    }

    pub fn folders(&self) -> Vec<Folder> {
        lock(&self.state).folders.as_slice().to_vec()
    }

    pub fn share_link(&self) -> Option<ShareLink> {
        lock(&self.state).share_link.clone()
    }

    pub fn message(&self) -> Option<TransientMessage> {
        lock(&self.state).status.current().cloned()
    }

    pub fn phase(&self, action: Action) -> Phase {
        lock(&self.state).actions.phase(action)
    }

    /// Whether the controls for `action` should be disabled.
    pub fn is_loading(&self, action: Action) -> bool {
        lock(&self.state).actions.is_loading(action)
    }

    fn precheck_update(&self, id: &FolderId, update: &FolderUpdate) -> Result<FolderUpdate> {
        let update = update.validated()?;
        if let Some(parent) = update.new_parent() {
            if lock(&self.state).folders.would_create_cycle(id, parent) {
                return Err(Error::FolderCycle {
                    folder: id.clone(),
                    parent: parent.clone(),
                });
            }
        }
        Ok(update)
    }
}
