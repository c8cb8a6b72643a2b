//! Projects slice actions

use super::{Action, ActionPayload, PayloadError};
use crate::domain_models::{Project, ProjectRef};

#[derive(Debug, Clone, PartialEq, strum::EnumDiscriminants)]
#[strum_discriminants(name(ProjectActionType))]
#[strum_discriminants(derive(Hash, strum::Display))]
pub enum ProjectAction {
    ProjectAdded(Project),
    ProjectRemoved(ProjectRef),
}

impl ProjectAction {
    pub fn from_payload(
        kind: ProjectActionType,
        payload: ActionPayload<'_>,
    ) -> Result<Self, PayloadError> {
        Ok(match kind {
            ProjectActionType::ProjectAdded => ProjectAction::ProjectAdded(payload.decode(kind)?),
            ProjectActionType::ProjectRemoved => {
                ProjectAction::ProjectRemoved(payload.decode(kind)?)
            }
        })
    }
}

pub fn project_added(project: Project) -> Action {
    ProjectAction::ProjectAdded(project).into()
}

pub fn project_removed(id: u64) -> Action {
    ProjectAction::ProjectRemoved(ProjectRef { id }).into()
}
