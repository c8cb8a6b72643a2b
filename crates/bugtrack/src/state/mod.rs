//! Application State Module
//!
//! The state tree is shared by reference: every node is behind an `Arc`, and
//! a dispatch only allocates new nodes along the path it actually changed.
//! Memoized selectors rely on this to detect change by pointer identity.

mod app;
mod bugs;
mod projects;

pub use app::{AppState, EntitiesState};
pub use bugs::BugsState;
pub use projects::ProjectsState;
