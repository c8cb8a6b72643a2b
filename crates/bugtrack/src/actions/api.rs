//! Generic API call actions
//!
//! Any slice can request a network call by dispatching
//! [`ApiAction::CallBegan`] with an [`ApiCall`]. The API middleware performs
//! the call and reports back through the generic success/failure actions and
//! the slice-specific action types named in the descriptor.

use super::ActionType;
use bugtrack_client::{ApiError, ApiRequest};
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum ApiAction {
    /// A call was requested
    CallBegan(ApiCall),
    /// Some call succeeded (response body)
    CallSuccess(Value),
    /// Some call failed
    CallFailed(ApiError),
}

impl ApiAction {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiAction::CallBegan(_) => "CallBegan",
            ApiAction::CallSuccess(_) => "CallSuccess",
            ApiAction::CallFailed(_) => "CallFailed",
        }
    }
}

/// API call descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub request: ApiRequest,
    /// Dispatched before the call is forwarded
    pub on_start: Option<ActionType>,
    /// Dispatched with the response body after the generic success
    pub on_success: Option<ActionType>,
    /// Dispatched with the error after the generic failure
    pub on_error: Option<ActionType>,
}

impl ApiCall {
    pub fn new(request: ApiRequest) -> Self {
        Self {
            request,
            on_start: None,
            on_success: None,
            on_error: None,
        }
    }

    pub fn on_start(mut self, action: impl Into<ActionType>) -> Self {
        self.on_start = Some(action.into());
        self
    }

    pub fn on_success(mut self, action: impl Into<ActionType>) -> Self {
        self.on_success = Some(action.into());
        self
    }

    pub fn on_error(mut self, action: impl Into<ActionType>) -> Self {
        self.on_error = Some(action.into());
        self
    }
}

impl From<ApiCall> for super::Action {
    fn from(call: ApiCall) -> Self {
        super::Action::Api(ApiAction::CallBegan(call))
    }
}
