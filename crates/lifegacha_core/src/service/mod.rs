//! Game engines and the session service that drives them.
//!
//! # Responsibility
//! - `progression`, `gacha` and `collection` mutate an explicit `AppState`.
//! - `session` wraps each engine call in one load/apply/persist cycle.

pub mod collection;
pub mod gacha;
pub mod progression;
pub mod session;
