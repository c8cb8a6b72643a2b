//! Derived views over the bugs slice

use super::{ParamSelector, Selector};
use crate::domain_models::Bug;
use crate::state::AppState;
use std::sync::Arc;

type BugList = Arc<Vec<Bug>>;

/// Bugs that are not resolved yet, in list order
///
/// Keyed on the bug list alone, so loading-flag and fetch-time changes, and
/// changes to other slices, keep the cached result.
pub fn unresolved_bugs() -> Selector<AppState, BugList, Vec<Bug>> {
    Selector::new(
        |state: &AppState| Arc::clone(&state.entities.bugs.list),
        |list: &BugList| list.iter().filter(|bug| !bug.resolved).cloned().collect(),
    )
}

/// Bugs assigned to a given user, cached per user id
pub fn bugs_by_user() -> ParamSelector<AppState, u64, BugList, Vec<Bug>> {
    ParamSelector::new(
        |state: &AppState| Arc::clone(&state.entities.bugs.list),
        |list: &BugList, user_id: &u64| {
            list.iter()
                .filter(|bug| bug.user_id == Some(*user_id))
                .cloned()
                .collect()
        },
    )
}

/// The bug selectors an observer needs, each with its own cache
pub struct BugSelectors {
    pub unresolved: Selector<AppState, BugList, Vec<Bug>>,
    pub by_user: ParamSelector<AppState, u64, BugList, Vec<Bug>>,
}

impl BugSelectors {
    pub fn new() -> Self {
        Self {
            unresolved: unresolved_bugs(),
            by_user: bugs_by_user(),
        }
    }
}

impl Default for BugSelectors {
    fn default() -> Self {
        Self::new()
    }
}
