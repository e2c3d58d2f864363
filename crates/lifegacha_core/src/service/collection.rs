//! Owned characters and the featured main character.

use crate::model::character::{find_character, Character};
use crate::model::state::AppState;

/// Features an owned character; returns `false` for ids not owned.
///
/// Ownership is checked here so no caller can feature an unowned character.
pub fn set_main_character(state: &mut AppState, character_id: &str) -> bool {
    if !state.owns(character_id) {
        return false;
    }
    state.main_character_id = Some(character_id.to_string());
    true
}

/// Resolves owned ids against `catalog` in acquisition order.
///
/// Ids with no catalog entry are skipped.
pub fn owned_characters<'c>(state: &AppState, catalog: &'c [Character]) -> Vec<&'c Character> {
    state
        .owned_characters
        .iter()
        .filter_map(|id| find_character(catalog, id))
        .collect()
}

/// Resolves the featured character, if any.
pub fn main_character<'c>(state: &AppState, catalog: &'c [Character]) -> Option<&'c Character> {
    state
        .main_character_id
        .as_deref()
        .and_then(|id| find_character(catalog, id))
}

#[cfg(test)]
mod tests {
    use super::{main_character, owned_characters, set_main_character};
    use crate::model::character::CHARACTER_CATALOG;
    use crate::model::state::AppState;

    fn state_owning(ids: &[&str]) -> AppState {
        AppState {
            owned_characters: ids.iter().map(|id| id.to_string()).collect(),
            ..AppState::default()
        }
    }

    #[test]
    fn set_main_character_requires_ownership() {
        let mut state = state_owning(&["c1"]);
        assert!(!set_main_character(&mut state, "c8"));
        assert_eq!(state.main_character_id, None);

        assert!(set_main_character(&mut state, "c1"));
        assert_eq!(state.main_character_id.as_deref(), Some("c1"));
    }

    #[test]
    fn owned_characters_skips_unknown_ids() {
        let state = state_owning(&["c4", "ghost", "c1"]);
        let names: Vec<_> = owned_characters(&state, CHARACTER_CATALOG)
            .iter()
            .map(|character| character.name)
            .collect();
        assert_eq!(names, vec!["Bruno", "Aurora"]);
    }

    #[test]
    fn main_character_resolves_from_catalog() {
        let mut state = state_owning(&["c6"]);
        assert!(main_character(&state, CHARACTER_CATALOG).is_none());
        set_main_character(&mut state, "c6");
        let main = main_character(&state, CHARACTER_CATALOG).expect("main set");
        assert_eq!(main.name, "Nyx");
    }
}
