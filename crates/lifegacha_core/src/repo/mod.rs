//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the wholesale document storage contract.
//! - Keep SQL details out of the engines and the session service.
//!
//! # Invariants
//! - Repositories store documents as given; defaulting happens in the model.

pub mod state_repo;
