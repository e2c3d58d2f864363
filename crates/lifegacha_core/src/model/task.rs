//! Task model and reward presets.
//!
//! # Responsibility
//! - Define the persisted task record.
//! - Map reward preset keys to fixed XP/currency amounts.
//!
//! # Invariants
//! - `id` is unique within one `AppState`.
//! - Rewards are fixed at creation time and never recomputed.
//! - `completed` only ever transitions from `false` to `true`.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable task identifier in `task-<uuid>` form.
pub type TaskId = String;

/// User-defined habit task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "rewardXP", default)]
    pub reward_xp: u64,
    #[serde(default)]
    pub reward_currency: u64,
}

impl Task {
    /// Creates an open task with a generated id and the preset's rewards.
    ///
    /// Callers are expected to pass already-trimmed text.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        preset: RewardPreset,
    ) -> Self {
        let reward = preset.reward();
        Self {
            id: generate_task_id(),
            title: title.into(),
            description: description.into(),
            created_at: now_epoch_ms(),
            completed: false,
            reward_xp: reward.xp,
            reward_currency: reward.currency,
        }
    }
}

/// XP and currency granted when a task is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub xp: u64,
    pub currency: u64,
}

/// Named reward tiers offered when creating a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewardPreset {
    #[default]
    Small,
    Medium,
    Big,
}

impl RewardPreset {
    /// Resolves an exact preset key; any other key falls back to `Small`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "medium" => Self::Medium,
            "big" => Self::Big,
            _ => Self::Small,
        }
    }

    pub fn reward(self) -> Reward {
        match self {
            Self::Small => Reward { xp: 20, currency: 10 },
            Self::Medium => Reward { xp: 40, currency: 20 },
            Self::Big => Reward { xp: 80, currency: 40 },
        }
    }
}

fn generate_task_id() -> TaskId {
    format!("task-{}", Uuid::new_v4())
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::{Reward, RewardPreset, Task};

    #[test]
    fn preset_table_matches_fixed_amounts() {
        assert_eq!(RewardPreset::Small.reward(), Reward { xp: 20, currency: 10 });
        assert_eq!(RewardPreset::Medium.reward(), Reward { xp: 40, currency: 20 });
        assert_eq!(RewardPreset::Big.reward(), Reward { xp: 80, currency: 40 });
    }

    #[test]
    fn unknown_preset_key_defaults_to_small() {
        assert_eq!(RewardPreset::from_key("huge"), RewardPreset::Small);
        assert_eq!(RewardPreset::from_key(""), RewardPreset::Small);
        assert_eq!(RewardPreset::from_key(" BIG "), RewardPreset::Small);
        assert_eq!(RewardPreset::from_key(" Medium "), RewardPreset::Small);
        assert_eq!(RewardPreset::from_key("medium"), RewardPreset::Medium);
        assert_eq!(RewardPreset::from_key("big"), RewardPreset::Big);
    }

    #[test]
    fn new_task_ids_are_unique_and_prefixed() {
        let first = Task::new("a", "", RewardPreset::Small);
        let second = Task::new("b", "", RewardPreset::Small);
        assert!(first.id.starts_with("task-"));
        assert_ne!(first.id, second.id);
        assert!(!first.completed);
        assert!(first.created_at > 0);
    }

    #[test]
    fn task_serialization_uses_stored_field_names() {
        let task = Task::new("stretch", "ten minutes", RewardPreset::Medium);
        let json = serde_json::to_value(&task).expect("task serializes");
        assert_eq!(json["rewardXP"], 40);
        assert_eq!(json["rewardCurrency"], 20);
        assert_eq!(json["createdAt"], task.created_at);
        assert_eq!(json["completed"], false);
    }
}
