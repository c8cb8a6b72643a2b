use crate::actions::Action;
use crate::reducers::{bugs_reducer, projects_reducer};
use crate::state::{AppState, EntitiesState};
use std::sync::Arc;

/// Reducer - pure function that produces new state from current state + action
/// This is the root reducer that orchestrates all sub-reducers
///
/// A node of the tree is rebuilt only if one of its children changed by
/// reference; otherwise the previous `Arc` is returned as is.
pub fn reduce(state: &Arc<AppState>, action: &Action) -> Arc<AppState> {
    let entities = reduce_entities(&state.entities, action);
    if Arc::ptr_eq(&entities, &state.entities) {
        return Arc::clone(state);
    }
    Arc::new(AppState { entities })
}

fn reduce_entities(state: &Arc<EntitiesState>, action: &Action) -> Arc<EntitiesState> {
    let (bugs, projects) = match action {
        Action::Bugs(action) => (
            bugs_reducer::reduce_bugs(&state.bugs, action),
            Arc::clone(&state.projects),
        ),
        Action::Projects(action) => (
            Arc::clone(&state.bugs),
            projects_reducer::reduce_projects(&state.projects, action),
        ),
        // Side-effect and lifecycle actions; no slice reacts to them
        Action::Init | Action::Api(_) | Action::Thunk(_) => return Arc::clone(state),
    };

    if Arc::ptr_eq(&bugs, &state.bugs) && Arc::ptr_eq(&projects, &state.projects) {
        return Arc::clone(state);
    }
    Arc::new(EntitiesState { bugs, projects })
}
