//! Read-modify-write cycle around the engines.
//!
//! # Responsibility
//! - Load and normalize the stored document for every user action.
//! - Apply exactly one engine operation and persist the whole result.
//! - Emit metadata-only logging for each action.
//!
//! # Invariants
//! - The document is written only when the operation changed state.
//! - Rejected actions (validation failures) never write.
//! - Task text is never logged.

use crate::model::state::AppState;
use crate::model::task::Task;
use crate::repo::state_repo::{RepoError, StateRepository};
use crate::service::collection;
use crate::service::gacha::{Gacha, PullError, PullResult};
use crate::service::progression::{self, AddTaskError, CompletionReport, NewTaskRequest};
use log::{debug, info};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Failure of one user action.
#[derive(Debug)]
pub enum SessionError {
    Repo(RepoError),
    AddTask(AddTaskError),
    Pull(PullError),
}

impl SessionError {
    /// Whether this is a user-facing rejection rather than a storage failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Repo(_))
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::AddTask(err) => write!(f, "{err}"),
            Self::Pull(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::AddTask(err) => Some(err),
            Self::Pull(err) => Some(err),
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<AddTaskError> for SessionError {
    fn from(value: AddTaskError) -> Self {
        Self::AddTask(value)
    }
}

impl From<PullError> for SessionError {
    fn from(value: PullError) -> Self {
        Self::Pull(value)
    }
}

/// One player's game bound to a document store.
pub struct GameSession<R: StateRepository> {
    repo: R,
    gacha: Gacha,
}

impl<R: StateRepository> GameSession<R> {
    pub fn new(repo: R, gacha: Gacha) -> Self {
        Self { repo, gacha }
    }

    pub fn gacha(&self) -> &Gacha {
        &self.gacha
    }

    /// First-run hook: stores the default state unless a save exists.
    ///
    /// Returns whether a new document was written.
    pub fn initialize(&self) -> SessionResult<bool> {
        let created = self
            .repo
            .insert_document_if_absent(&AppState::default().to_document())?;
        info!("event=state_init module=session status=ok created={created}");
        Ok(created)
    }

    /// Loads the current state with defaulting applied.
    pub fn load_state(&self) -> SessionResult<AppState> {
        let document = self.repo.load_document()?;
        Ok(AppState::from_document(document.as_ref()))
    }

    pub fn add_task(&self, request: &NewTaskRequest) -> SessionResult<Task> {
        let task = self
            .transact("task_add", |state| {
                progression::add_task(state, request).cloned()
            })?
            .inspect_err(|err| log_rejection("task_add", err))?;
        info!(
            "event=task_add module=session status=ok reward_xp={} reward_currency={}",
            task.reward_xp, task.reward_currency
        );
        Ok(task)
    }

    /// Completes a task; `None` means the id was unknown or already done.
    pub fn complete_task(&self, task_id: &str) -> SessionResult<Option<CompletionReport>> {
        let report = self.transact("task_complete", |state| {
            progression::complete_task(state, task_id)
        })?;
        match &report {
            Some(report) => info!(
                "event=task_complete module=session status=ok reward_xp={} level_ups={} level={}",
                report.reward_xp,
                report.level_ups.count(),
                report.level_ups.to_level
            ),
            None => debug!("event=task_complete module=session status=noop"),
        }
        Ok(report)
    }

    pub fn delete_task(&self, task_id: &str) -> SessionResult<bool> {
        let removed = self.transact("task_delete", |state| {
            progression::delete_task(state, task_id)
        })?;
        info!("event=task_delete module=session status=ok removed={removed}");
        Ok(removed)
    }

    pub fn edit_task(
        &self,
        task_id: &str,
        new_title: &str,
        new_description: &str,
    ) -> SessionResult<bool> {
        let found = self.transact("task_edit", |state| {
            progression::edit_task(state, task_id, new_title, new_description)
        })?;
        info!("event=task_edit module=session status=ok found={found}");
        Ok(found)
    }

    /// Runs one pull with the caller's random source.
    pub fn pull<G: Rng + ?Sized>(&self, rng: &mut G) -> SessionResult<PullResult> {
        let result = self
            .transact("gacha_pull", |state| self.gacha.pull(state, rng))?
            .inspect_err(|err| log_rejection("gacha_pull", err))?;
        info!(
            "event=gacha_pull module=session status=ok character={} rarity={} duplicate={}",
            result.character.id,
            result.character.rarity,
            result.is_duplicate()
        );
        Ok(result)
    }

    pub fn set_main_character(&self, character_id: &str) -> SessionResult<bool> {
        let updated = self.transact("main_set", |state| {
            collection::set_main_character(state, character_id)
        })?;
        info!("event=main_set module=session status=ok updated={updated}");
        Ok(updated)
    }

    fn transact<T>(
        &self,
        action: &str,
        apply: impl FnOnce(&mut AppState) -> T,
    ) -> SessionResult<T> {
        let mut state = self.load_state()?;
        let before = state.clone();
        let output = apply(&mut state);
        if state != before {
            self.repo.save_document(&state.to_document())?;
            debug!("event=state_save module=session status=ok action={action}");
        }
        Ok(output)
    }
}

fn log_rejection(action: &str, reason: &dyn Display) {
    info!("event={action} module=session status=rejected reason=\"{reason}\"");
}
