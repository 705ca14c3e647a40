//! Read-only view of someone else's links, opened through a share token.

use std::sync::{Arc, Mutex};

use url::Url;

use crate::api::ApiClient;
use crate::collections::LinkCollection;
use crate::dispatch::{self, lock, Action, ActionTracker, Command, Outcome, Phase, ViewState};
use crate::error::{Error, Result};
use crate::feedback::{StatusBoard, TransientMessage};
use crate::models::Link;
use crate::routes::Route;
use crate::scope::ViewScope;
use crate::share::share_token;
use crate::util::is_http_url;

pub const SHARED_LINK_INVALID: &str = "Invalid or expired share link.";

const LOAD_SHARED: Command = Command {
    action: Action::LoadShared,
    failure_text: SHARED_LINK_INVALID,
    success_text: None,
};

#[derive(Debug, Default)]
struct SharedState {
    links: LinkCollection,
    failed: bool,
    status: StatusBoard,
    actions: ActionTracker,
}

impl ViewState for SharedState {
    fn tracker(&mut self) -> &mut ActionTracker {
        &mut self.actions
    }

    fn status(&mut self) -> &mut StatusBoard {
        &mut self.status
    }
}

#[derive(Clone)]
pub struct SharedPageViewer {
    api: ApiClient,
    token: String,
    state: Arc<Mutex<SharedState>>,
    scope: ViewScope,
}

impl SharedPageViewer {
    pub fn new(api: ApiClient, token: impl Into<String>) -> Result<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(Error::InvalidInput(
                "Share token must not be empty".to_string(),
            ));
        }
        Ok(Self {
            api,
            token,
            state: Arc::new(Mutex::new(SharedState::default())),
            scope: ViewScope::new(),
        })
    }

    /// Open the viewer for a `/shared/:token` route.
    pub fn for_route(api: ApiClient, route: &Route) -> Option<Self> {
        match route {
            Route::Shared { token } => Self::new(api, token.clone()).ok(),
            _ => None,
        }
    }

    /// Accepts a bare token, a `/shared/:token` path or a full share URL.
    pub fn open(api: ApiClient, input: &str) -> Result<Self> {
        let token = resolve_share_input(input)?;
        Self::new(api, token)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Fetch the shared link set. On failure the list is emptied and the
    /// viewer enters its error state; there is no automatic retry.
    pub async fn load(&self) -> Outcome<usize> {
        let request = async {
            let response = self.api.fetch_shared_links(&self.token).await?;
            Ok::<_, Error>(response.data)
        };
        let outcome =
            dispatch::execute(&self.state, &self.scope, LOAD_SHARED, request, |state, links| {
                state.links.replace_all(links);
                state.failed = false;
                state.links.len()
            })
            .await;

        if matches!(outcome, Outcome::Failed(_)) {
            let mut state = lock(&self.state);
            state.links.replace_all(Vec::new());
            state.failed = true;
        }
        outcome
    }

    pub fn teardown(&self) {
        self.scope.cancel();
    }

    pub fn links(&self) -> Vec<Link> {
        lock(&self.state).links.as_slice().to_vec()
    }

    /// Whether the last load failed (invalid or expired token, or no backend).
    pub fn is_error(&self) -> bool {
        lock(&self.state).failed
    }

    pub fn message(&self) -> Option<TransientMessage> {
        lock(&self.state).status.current().cloned()
    }

    pub fn phase(&self) -> Phase {
        lock(&self.state).actions.phase(Action::LoadShared)
    }
}

fn resolve_share_input(input: &str) -> Result<String> {
    let input = input.trim();
    let invalid = || Error::InvalidInput(format!("'{input}' is not a share token or share link"));

    if is_http_url(input) {
        let url = Url::parse(input).map_err(|_| invalid())?;
        return share_token(&url).ok_or_else(invalid);
    }
    if input.starts_with('/') {
        return match Route::parse(input) {
            Some(Route::Shared { token }) => Ok(token),
            _ => Err(invalid()),
        };
    }
    if input.is_empty() || input.contains('/') {
        return Err(invalid());
    }
    Ok(input.to_string())
}
