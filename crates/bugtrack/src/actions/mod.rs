//! Actions module
//!
//! Every state transition is described by an [`Action`]. Actions are tagged
//! by slice, so each reducer only ever sees the closed set of actions it
//! handles and the compiler checks that the handling is exhaustive.
//!
//! API call descriptors name follow-up actions by [`ActionType`] instead of
//! carrying the actions themselves, because the payload only exists once the
//! network call completes. [`ActionType::build`] turns a type plus a
//! lifecycle payload into the concrete action.

pub mod api;
pub mod bugs;
pub mod projects;
pub mod thunk;

pub use api::{ApiAction, ApiCall};
pub use bugs::{BugAction, BugActionType};
pub use projects::{ProjectAction, ProjectActionType};
pub use thunk::Thunk;

use bugtrack_client::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Root action enum - tagged by slice
#[derive(Debug, Clone)]
pub enum Action {
    /// Dispatched once when the store is created; no slice handles it
    Init,
    /// Generic API call lifecycle, interpreted by the API middleware
    Api(ApiAction),
    /// Bugs slice actions
    Bugs(BugAction),
    /// Projects slice actions
    Projects(ProjectAction),
    /// Deferred work run by the thunk middleware instead of a reducer
    Thunk(Thunk),
}

impl Action {
    /// Short name for logs and errors, e.g. `bugs/BugAdded`
    pub fn name(&self) -> String {
        match self {
            Action::Init => "init".to_string(),
            Action::Api(action) => format!("api/{}", action.kind()),
            Action::Bugs(action) => ActionType::Bugs(action.into()).to_string(),
            Action::Projects(action) => ActionType::Projects(action.into()).to_string(),
            Action::Thunk(thunk) => format!("thunk/{}", thunk.name()),
        }
    }
}

impl From<BugAction> for Action {
    fn from(action: BugAction) -> Self {
        Action::Bugs(action)
    }
}

impl From<ProjectAction> for Action {
    fn from(action: ProjectAction) -> Self {
        Action::Projects(action)
    }
}

impl From<ApiAction> for Action {
    fn from(action: ApiAction) -> Self {
        Action::Api(action)
    }
}

impl From<Thunk> for Action {
    fn from(thunk: Thunk) -> Self {
        Action::Thunk(thunk)
    }
}

/// Identifies a slice action without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Bugs(BugActionType),
    Projects(ProjectActionType),
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionType::Bugs(kind) => write!(f, "bugs/{}", kind),
            ActionType::Projects(kind) => write!(f, "projects/{}", kind),
        }
    }
}

impl From<BugActionType> for ActionType {
    fn from(kind: BugActionType) -> Self {
        ActionType::Bugs(kind)
    }
}

impl From<ProjectActionType> for ActionType {
    fn from(kind: ProjectActionType) -> Self {
        ActionType::Projects(kind)
    }
}

impl ActionType {
    /// Build the concrete action for this type from a lifecycle payload
    pub fn build(self, payload: ActionPayload<'_>) -> Result<Action, PayloadError> {
        match self {
            ActionType::Bugs(kind) => BugAction::from_payload(kind, payload).map(Action::Bugs),
            ActionType::Projects(kind) => {
                ProjectAction::from_payload(kind, payload).map(Action::Projects)
            }
        }
    }
}

/// What the API middleware has at hand when it synthesizes an action
#[derive(Debug, Clone, Copy)]
pub enum ActionPayload<'a> {
    /// Start of a call: nothing yet
    None,
    /// Successful call: the response body
    Body(&'a Value),
    /// Failed call: the transport error
    Error(&'a ApiError),
}

impl ActionPayload<'_> {
    /// Deserialize the response body into `T`
    pub(crate) fn decode<T: DeserializeOwned>(
        &self,
        action: impl Into<ActionType>,
    ) -> Result<T, PayloadError> {
        let action = action.into();
        match self {
            ActionPayload::Body(body) => T::deserialize(*body)
                .map_err(|source| PayloadError::Malformed { action, source }),
            _ => Err(PayloadError::MissingBody { action }),
        }
    }

    pub(crate) fn error(&self, action: impl Into<ActionType>) -> Result<ApiError, PayloadError> {
        match self {
            ActionPayload::Error(error) => Ok((*error).clone()),
            _ => Err(PayloadError::MissingError {
                action: action.into(),
            }),
        }
    }
}

/// A lifecycle payload could not be turned into the requested action
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("{action} needs a response body")]
    MissingBody { action: ActionType },

    #[error("{action} needs an error payload")]
    MissingError { action: ActionType },

    #[error("{action} payload is malformed: {source}")]
    Malformed {
        action: ActionType,
        #[source]
        source: serde_json::Error,
    },
}
