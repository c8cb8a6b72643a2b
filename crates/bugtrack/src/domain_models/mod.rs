//! Domain models
//!
//! Entities as they arrive from the server and as they are kept in state.

mod bug;
mod project;

pub use bug::{Bug, BugAssignment, BugRef, NewBug};
pub use project::{Project, ProjectRef};
