use crate::domain_models::Project;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsState {
    pub list: Arc<Vec<Project>>,
}
