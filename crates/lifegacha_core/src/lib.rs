//! Core game logic for Life Gacha.
//! This crate is the single source of truth for progression and collection
//! invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::character::{
    find_character, Character, Rarity, RarityRate, CHARACTER_CATALOG, RARITY_RATES,
};
pub use model::player::{LevelUp, LevelUps, PlayerState, XP_PER_LEVEL};
pub use model::state::AppState;
pub use model::task::{Reward, RewardPreset, Task, TaskId};
pub use repo::state_repo::{
    RepoError, RepoResult, SqliteStateRepository, StateRepository, STORAGE_KEY,
};
pub use service::collection::{main_character, owned_characters, set_main_character};
pub use service::gacha::{
    resolve_rarity, Gacha, GachaConfigError, PullError, PullOutcome, PullResult,
    DUPLICATE_BONUS, PULL_COST,
};
pub use service::progression::{
    add_task, complete_task, delete_task, edit_task, AddTaskError, CompletionReport,
    NewTaskRequest,
};
pub use service::session::{GameSession, SessionError, SessionResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
