//! Confirm-then-mutate command execution shared by every view.
//!
//! Each mutation runs in three phases: dispatch the request, await its result,
//! then patch local state only if the backend confirmed. The caller gets an
//! [`Outcome`] to branch on instead of an error to catch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::feedback::{self, StatusBoard, TransientMessage, MESSAGE_TTL};
use crate::scope::ViewScope;

#[derive(Debug)]
pub enum Outcome<T> {
    /// The backend confirmed and local state was patched.
    Applied(T),
    /// Nothing was patched; the reason is also posted as an error message.
    Failed(Error),
    /// The same action is still in flight; no request was issued.
    Busy,
    /// The view was torn down before the response arrived.
    Discarded,
}

impl<T> Outcome<T> {
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            _ => None,
        }
    }

    pub const fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Convert into a `Result`, treating `Busy` and `Discarded` as `None`.
    pub fn into_result(self) -> Result<Option<T>> {
        match self {
            Self::Applied(value) => Ok(Some(value)),
            Self::Failed(error) => Err(error),
            Self::Busy | Self::Discarded => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    LoadLinks,
    LoadFolders,
    AddLink,
    DeleteLink,
    CreateFolder,
    UpdateFolder,
    DeleteFolder,
    GenerateShare,
    LoadShared,
}

/// `Idle → Loading → {Success, Failure} → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy)]
enum Entry {
    Loading,
    Settled { succeeded: bool, at: Instant },
}

/// Per-action phase bookkeeping.
#[derive(Debug, Default)]
pub struct ActionTracker {
    entries: HashMap<Action, Entry>,
}

impl ActionTracker {
    /// Enter `Loading`; refuses when the action is already loading.
    pub fn begin(&mut self, action: Action) -> bool {
        if self.is_loading(action) {
            return false;
        }
        self.entries.insert(action, Entry::Loading);
        true
    }

    pub fn settle(&mut self, action: Action, succeeded: bool) {
        self.entries.insert(
            action,
            Entry::Settled {
                succeeded,
                at: Instant::now(),
            },
        );
    }

    /// Drop an in-flight action without a result; it reads as `Idle` again.
    pub fn abandon(&mut self, action: Action) {
        if self.is_loading(action) {
            self.entries.remove(&action);
        }
    }

    pub fn is_loading(&self, action: Action) -> bool {
        matches!(self.entries.get(&action), Some(Entry::Loading))
    }

    pub fn phase(&self, action: Action) -> Phase {
        self.phase_at(action, Instant::now())
    }

    pub fn phase_at(&self, action: Action, now: Instant) -> Phase {
        match self.entries.get(&action) {
            None => Phase::Idle,
            Some(Entry::Loading) => Phase::Loading,
            Some(Entry::Settled { at, .. }) if now.duration_since(*at) >= MESSAGE_TTL => {
                Phase::Idle
            }
            Some(Entry::Settled {
                succeeded: true, ..
            }) => Phase::Success,
            Some(Entry::Settled {
                succeeded: false, ..
            }) => Phase::Failure,
        }
    }
}

/// State owned by a view that runs commands.
pub(crate) trait ViewState {
    fn tracker(&mut self) -> &mut ActionTracker;
    fn status(&mut self) -> &mut StatusBoard;
}

/// What to report for one action.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Command {
    pub action: Action,
    pub failure_text: &'static str,
    pub success_text: Option<&'static str>,
}

pub(crate) fn lock<S>(state: &Mutex<S>) -> MutexGuard<'_, S> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) async fn execute<S, T, R, Fut, F>(
    state: &Mutex<S>,
    scope: &ViewScope,
    command: Command,
    request: Fut,
    apply: F,
) -> Outcome<R>
where
    S: ViewState,
    Fut: Future<Output = Result<T>>,
    F: FnOnce(&mut S, T) -> R,
{
    if !lock(state).tracker().begin(command.action) {
        tracing::debug!(action = ?command.action, "Action already in flight");
        return Outcome::Busy;
    }

    let result = request.await;

    if scope.is_cancelled() {
        tracing::debug!(action = ?command.action, "View closed before completion");
        lock(state).tracker().abandon(command.action);
        return Outcome::Discarded;
    }

    let mut guard = lock(state);
    match result {
        Ok(value) => {
            let applied = apply(&mut *guard, value);
            guard.tracker().settle(command.action, true);
            if let Some(text) = command.success_text {
                guard.status().post(TransientMessage::success(text));
            }
            Outcome::Applied(applied)
        }
        Err(error) => {
            tracing::warn!(
                action = ?command.action,
                status = error.status(),
                network = error.is_network(),
                "Action failed: {}",
                error
            );
            guard.tracker().settle(command.action, false);
            guard
                .status()
                .post(feedback::failure_message(&error, command.failure_text));
            Outcome::Failed(error)
        }
    }
}

/// Report a failure detected before any request was issued.
pub(crate) fn reject<S: ViewState, R>(
    state: &Mutex<S>,
    command: Command,
    error: Error,
) -> Outcome<R> {
    tracing::debug!(action = ?command.action, "Action rejected: {}", error);
    lock(state)
        .status()
        .post(feedback::failure_message(&error, command.failure_text));
    Outcome::Failed(error)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn begin_refuses_duplicates_until_settled() {
        let mut tracker = ActionTracker::default();
        assert!(tracker.begin(Action::AddLink));
        assert!(!tracker.begin(Action::AddLink));
        assert!(tracker.begin(Action::DeleteLink));

        tracker.settle(Action::AddLink, false);
        assert_eq!(tracker.phase(Action::AddLink), Phase::Failure);
        assert!(tracker.begin(Action::AddLink));
    }

    #[test]
    fn abandon_returns_loading_action_to_idle() {
        let mut tracker = ActionTracker::default();
        tracker.begin(Action::LoadShared);
        tracker.abandon(Action::LoadShared);
        assert_eq!(tracker.phase(Action::LoadShared), Phase::Idle);
        assert!(tracker.begin(Action::LoadShared));

        tracker.settle(Action::LoadShared, true);
        tracker.abandon(Action::LoadShared);
        assert_eq!(tracker.phase(Action::LoadShared), Phase::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn settled_phase_returns_to_idle_with_message_window() {
        let mut tracker = ActionTracker::default();
        assert_eq!(tracker.phase(Action::LoadLinks), Phase::Idle);

        tracker.begin(Action::LoadLinks);
        assert_eq!(tracker.phase(Action::LoadLinks), Phase::Loading);

        tracker.settle(Action::LoadLinks, true);
        assert_eq!(tracker.phase(Action::LoadLinks), Phase::Success);

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(tracker.phase(Action::LoadLinks), Phase::Idle);
    }

    #[test]
    fn outcome_into_result() {
        assert_eq!(Outcome::Applied(3).into_result().unwrap(), Some(3));
        assert_eq!(Outcome::<u8>::Busy.into_result().unwrap(), None);
        assert!(Outcome::<u8>::Failed(Error::InvalidInput("x".to_string()))
            .into_result()
            .is_err());
    }
}
