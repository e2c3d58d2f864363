//! Domain model for the task list, player progression and collection.
//!
//! # Responsibility
//! - Define canonical data structures used by the engines.
//! - Keep the persisted document shape in one place.
//!
//! # Invariants
//! - The whole app state is one document, loaded and saved wholesale.
//! - Static catalog data is never persisted, only referenced by id.

pub mod character;
pub mod player;
pub mod state;
pub mod task;
