//! Whole-document application state and its defaulting rules.
//!
//! # Responsibility
//! - Define the single document persisted under the store key.
//! - Repair partial or malformed stored documents into a complete state.
//!
//! # Invariants
//! - `owned_characters` holds no duplicate ids.
//! - `main_character_id`, when set, is a member of `owned_characters`.
//! - Task ids are unique.
//! - `AppState::from_document` never fails and is idempotent.

use super::player::{threshold_for, PlayerState};
use super::task::Task;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Everything the app persists, read and written wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub player: PlayerState,
    /// Newest first.
    pub tasks: Vec<Task>,
    /// Acquisition order; treated as a set.
    pub owned_characters: Vec<String>,
    pub main_character_id: Option<String>,
}

impl AppState {
    /// Builds a complete state from a possibly missing or partial document.
    ///
    /// Malformed parts are replaced by their defaults instead of raising an
    /// error; see the module docs for the invariants this restores.
    pub fn from_document(document: Option<&Value>) -> Self {
        let Some(Value::Object(fields)) = document else {
            return Self::default();
        };

        let player = normalize_player(fields.get("player"));
        let tasks = normalize_tasks(fields.get("tasks"));
        let owned_characters = normalize_owned_characters(fields.get("ownedCharacters"));
        let main_character_id = fields
            .get("mainCharacterId")
            .and_then(Value::as_str)
            .filter(|id| owned_characters.iter().any(|owned| owned == id))
            .map(str::to_string);

        Self {
            player,
            tasks,
            owned_characters,
            main_character_id,
        }
    }

    /// Serializes this state into the stored document shape.
    pub fn to_document(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }

    /// Re-applies defaulting to an in-memory state.
    pub fn normalized(&self) -> Self {
        Self::from_document(Some(&self.to_document()))
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn find_task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }

    pub fn owns(&self, character_id: &str) -> bool {
        self.owned_characters.iter().any(|id| id == character_id)
    }
}

fn normalize_player(value: Option<&Value>) -> PlayerState {
    let defaults = PlayerState::default();
    let Some(Value::Object(fields)) = value else {
        return defaults;
    };

    let read_u64 = |key: &str| fields.get(key).and_then(Value::as_u64);
    let level = read_u64("level")
        .and_then(|level| u32::try_from(level).ok())
        .unwrap_or(defaults.level)
        .max(1);

    let mut player = PlayerState {
        level,
        current_xp: read_u64("currentXP").unwrap_or(defaults.current_xp),
        xp_to_next_level: threshold_for(level),
        currency: read_u64("currency").unwrap_or(defaults.currency),
    };
    // Stored XP past the threshold is folded into levels silently.
    player.resolve_level_ups();
    player
}

fn normalize_tasks(value: Option<&Value>) -> Vec<Task> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| serde_json::from_value::<Task>(item.clone()).ok())
        .filter(|task| !task.id.trim().is_empty())
        .filter(|task| seen.insert(task.id.clone()))
        .collect()
}

fn normalize_owned_characters(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use serde_json::json;

    #[test]
    fn missing_document_yields_default_state() {
        let state = AppState::from_document(None);
        assert_eq!(state, AppState::default());
        assert_eq!(state.player.level, 1);
        assert_eq!(state.player.xp_to_next_level, 100);
    }

    #[test]
    fn to_document_uses_stored_shape() {
        let document = AppState::default().to_document();
        assert_eq!(
            document,
            json!({
                "player": {"level": 1, "currentXP": 0, "xpToNextLevel": 100, "currency": 0},
                "tasks": [],
                "ownedCharacters": [],
                "mainCharacterId": null
            })
        );
    }

    #[test]
    fn partial_player_is_merged_over_defaults() {
        let document = json!({"player": {"currency": 250}});
        let state = AppState::from_document(Some(&document));
        assert_eq!(state.player.currency, 250);
        assert_eq!(state.player.level, 1);
        assert_eq!(state.player.current_xp, 0);
    }

    #[test]
    fn main_character_must_be_owned() {
        let document = json!({"ownedCharacters": ["c1"], "mainCharacterId": "c8"});
        let state = AppState::from_document(Some(&document));
        assert_eq!(state.main_character_id, None);
    }
}
