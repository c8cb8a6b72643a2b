use super::{BugsState, ProjectsState};
use std::sync::Arc;

/// Root of the state tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub entities: Arc<EntitiesState>,
}

/// One subtree per domain slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntitiesState {
    pub bugs: Arc<BugsState>,
    pub projects: Arc<ProjectsState>,
}
