//! Bugs Reducer
//!
//! Handles state updates for the bugs slice. Copy-on-write: an action that
//! changes nothing returns the very same `Arc`, and `list` is only cloned
//! when the list itself changes.

use crate::actions::BugAction;
use crate::domain_models::Bug;
use crate::state::BugsState;
use std::collections::HashSet;
use std::sync::Arc;

/// Reduce the bugs slice
pub fn reduce_bugs(state: &Arc<BugsState>, action: &BugAction) -> Arc<BugsState> {
    match action {
        BugAction::BugsRequested => {
            if state.loading {
                return Arc::clone(state);
            }
            Arc::new(BugsState {
                loading: true,
                ..BugsState::clone(state)
            })
        }

        BugAction::BugsReceived { bugs, fetched_at } => {
            log::info!("Received {} bugs", bugs.len());
            Arc::new(BugsState {
                list: Arc::new(unique_by_id(bugs)),
                loading: false,
                last_fetch: Some(*fetched_at),
            })
        }

        BugAction::BugsRequestFailed(error) => {
            log::error!("Failed to load bugs: {}", error);
            if !state.loading {
                return Arc::clone(state);
            }
            Arc::new(BugsState {
                loading: false,
                ..BugsState::clone(state)
            })
        }

        BugAction::BugAdded(bug) => {
            if state.find(bug.id).is_some() {
                log::warn!("BugAdded: bug {} is already in the list, ignoring", bug.id);
                return Arc::clone(state);
            }
            with_list(state, |list| list.push(bug.clone()))
        }

        BugAction::BugResolved(bug_ref) => {
            update_bug(state, bug_ref.id, "BugResolved", |bug| bug.resolved = true)
        }

        BugAction::BugAssignedToUser(assignment) => {
            update_bug(state, assignment.id, "BugAssignedToUser", |bug| {
                bug.user_id = Some(assignment.user_id)
            })
        }

        BugAction::BugRemoved(bug_ref) => {
            let Some(index) = state.list.iter().position(|b| b.id == bug_ref.id) else {
                log::warn!("BugRemoved: bug {} not found in state", bug_ref.id);
                return Arc::clone(state);
            };
            with_list(state, |list| {
                list.remove(index);
            })
        }
    }
}

/// Keep the first bug for every id; the server list should not repeat ids
fn unique_by_id(bugs: &[Bug]) -> Vec<Bug> {
    let mut seen = HashSet::with_capacity(bugs.len());
    let unique: Vec<Bug> = bugs
        .iter()
        .filter(|bug| seen.insert(bug.id))
        .cloned()
        .collect();
    if unique.len() != bugs.len() {
        log::warn!(
            "BugsReceived: dropped {} bugs with duplicate ids",
            bugs.len() - unique.len()
        );
    }
    unique
}

/// New slice with a modified copy of the list
fn with_list(state: &Arc<BugsState>, f: impl FnOnce(&mut Vec<Bug>)) -> Arc<BugsState> {
    let mut next = BugsState::clone(state);
    f(Arc::make_mut(&mut next.list));
    Arc::new(next)
}

/// Modify the bug with `id`; unknown ids are reported and leave the slice as is
fn update_bug(
    state: &Arc<BugsState>,
    id: u64,
    action_name: &str,
    f: impl FnOnce(&mut Bug),
) -> Arc<BugsState> {
    let Some(index) = state.list.iter().position(|b| b.id == id) else {
        log::warn!("{}: bug {} not found in state", action_name, id);
        return Arc::clone(state);
    };
    with_list(state, |list| f(&mut list[index]))
}
