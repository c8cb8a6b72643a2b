//! Projects Reducer

use crate::actions::ProjectAction;
use crate::state::ProjectsState;
use std::sync::Arc;

pub fn reduce_projects(state: &Arc<ProjectsState>, action: &ProjectAction) -> Arc<ProjectsState> {
    match action {
        ProjectAction::ProjectAdded(project) => {
            if state.list.iter().any(|p| p.id == project.id) {
                log::warn!(
                    "ProjectAdded: project {} is already in the list, ignoring",
                    project.id
                );
                return Arc::clone(state);
            }
            let mut list = Vec::clone(&state.list);
            list.push(project.clone());
            Arc::new(ProjectsState {
                list: Arc::new(list),
            })
        }
        ProjectAction::ProjectRemoved(project_ref) => {
            if !state.list.iter().any(|p| p.id == project_ref.id) {
                log::warn!("ProjectRemoved: project {} not found in state", project_ref.id);
                return Arc::clone(state);
            }
            let list = state
                .list
                .iter()
                .filter(|p| p.id != project_ref.id)
                .cloned()
                .collect();
            Arc::new(ProjectsState {
                list: Arc::new(list),
            })
        }
    }
}
