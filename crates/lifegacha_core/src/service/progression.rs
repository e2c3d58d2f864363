//! Task list operations and completion rewards.
//!
//! # Responsibility
//! - Create, edit and delete tasks.
//! - Grant task rewards on completion and resolve level-ups.
//!
//! # Invariants
//! - Missing task ids are silent no-ops, never errors.
//! - A task pays out at most once.
//! - `player.current_xp < player.xp_to_next_level` after every call.

use crate::model::player::LevelUps;
use crate::model::state::AppState;
use crate::model::task::{RewardPreset, Task};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTaskError {
    EmptyTitle,
}

impl Display for AddTaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Please enter a task title."),
        }
    }
}

impl Error for AddTaskError {}

/// Input for creating one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRequest {
    pub title: String,
    pub description: String,
    /// Preset key (`small|medium|big`); anything else means `small`.
    pub reward_preset: String,
}

/// What completing a task paid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub task_id: String,
    pub reward_xp: u64,
    pub reward_currency: u64,
    pub level_ups: LevelUps,
}

impl CompletionReport {
    pub fn reward_message(&self) -> String {
        format!(
            "+{} XP, +{} Gems!",
            self.reward_xp, self.reward_currency
        )
    }
}

/// Prepends a new open task.
///
/// # Errors
/// - `AddTaskError::EmptyTitle` when the trimmed title is empty; the state
///   is left untouched.
pub fn add_task<'a>(
    state: &'a mut AppState,
    request: &NewTaskRequest,
) -> Result<&'a Task, AddTaskError> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AddTaskError::EmptyTitle);
    }

    let preset = RewardPreset::from_key(request.reward_preset.as_str());
    let task = Task::new(title, request.description.trim(), preset);
    state.tasks.insert(0, task);
    Ok(&state.tasks[0])
}

/// Completes a task and pays its reward.
///
/// Returns `None` without touching the state when the task is unknown or
/// already completed.
pub fn complete_task(state: &mut AppState, task_id: &str) -> Option<CompletionReport> {
    let task = state.find_task_mut(task_id)?;
    if task.completed {
        return None;
    }

    task.completed = true;
    let reward_xp = task.reward_xp;
    let reward_currency = task.reward_currency;
    let level_ups = state.player.grant(reward_xp, reward_currency);

    Some(CompletionReport {
        task_id: task_id.to_string(),
        reward_xp,
        reward_currency,
        level_ups,
    })
}

/// Removes a task; returns whether anything was removed.
pub fn delete_task(state: &mut AppState, task_id: &str) -> bool {
    let before = state.tasks.len();
    state.tasks.retain(|task| task.id != task_id);
    state.tasks.len() != before
}

/// Edits a task's text.
///
/// The title is only replaced by a non-blank value. The description is
/// always replaced, and may become empty. Returns `false` for unknown ids.
pub fn edit_task(
    state: &mut AppState,
    task_id: &str,
    new_title: &str,
    new_description: &str,
) -> bool {
    let Some(task) = state.find_task_mut(task_id) else {
        return false;
    };

    let title = new_title.trim();
    if !title.is_empty() {
        task.title = title.to_string();
    }
    task.description = new_description.trim().to_string();
    true
}

#[cfg(test)]
mod tests {
    use super::{add_task, complete_task, AddTaskError, NewTaskRequest};
    use crate::model::state::AppState;

    fn request(title: &str, preset: &str) -> NewTaskRequest {
        NewTaskRequest {
            title: title.to_string(),
            description: "  notes  ".to_string(),
            reward_preset: preset.to_string(),
        }
    }

    #[test]
    fn add_task_trims_text_and_applies_preset() {
        let mut state = AppState::default();
        let task = add_task(&mut state, &request("  Read a chapter ", "big")).expect("added");
        assert_eq!(task.title, "Read a chapter");
        assert_eq!(task.description, "notes");
        assert_eq!(task.reward_xp, 80);
        assert_eq!(task.reward_currency, 40);
    }

    #[test]
    fn add_task_rejects_blank_title() {
        let mut state = AppState::default();
        let err = add_task(&mut state, &request(" \t ", "small")).expect_err("blank title");
        assert_eq!(err, AddTaskError::EmptyTitle);
        assert_eq!(err.to_string(), "Please enter a task title.");
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn reward_message_mentions_both_rewards() {
        let mut state = AppState::default();
        let id = add_task(&mut state, &request("walk", "medium"))
            .expect("added")
            .id
            .clone();
        let report = complete_task(&mut state, &id).expect("completed");
        assert_eq!(report.reward_message(), "+40 XP, +20 Gems!");
    }
}
