//! ApiMiddleware - performs the network call described by [`ApiAction::CallBegan`]
//!
//! For one call the actions are dispatched in this order:
//!
//! ```text
//! on_start → CallBegan (forwarded) → request … → CallSuccess → on_success
//!                                              ↘ CallFailed  → on_error
//! ```
//!
//! No lock is held while the request is in flight; other dispatches run in
//! between and see their own state.

use super::{BoxFuture, Middleware, Next};
use crate::actions::{Action, ActionPayload, ActionType, ApiAction, ApiCall};
use crate::store::{StoreApi, StoreError};
use bugtrack_client::{ApiError, Transport};
use std::sync::Arc;

/// Middleware executing API call descriptors against a [`Transport`]
pub struct ApiMiddleware {
    transport: Arc<dyn Transport>,
}

impl ApiMiddleware {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn perform(
        &self,
        api: &StoreApi,
        call: ApiCall,
        next: Next<'_>,
    ) -> Result<(), StoreError> {
        if let Some(on_start) = call.on_start {
            if let Some(action) = build(on_start, ActionPayload::None) {
                api.dispatch(action).await?;
            }
        }

        let request = call.request.clone();
        let on_success = call.on_success;
        let on_error = call.on_error;
        next.run(ApiAction::CallBegan(call).into()).await?;

        log::debug!("{} {}", request.method, request.url);
        let result = self.transport.request(&request).await.and_then(|body| {
            // The typed success action is built up front so that a body of
            // the wrong shape is reported as a failed call
            let action = match on_success {
                Some(kind) => Some(
                    kind.build(ActionPayload::Body(&body))
                        .map_err(|e| ApiError::decode(e.to_string()))?,
                ),
                None => None,
            };
            Ok((body, action))
        });

        match result {
            Ok((body, action)) => {
                api.dispatch(ApiAction::CallSuccess(body).into()).await?;
                if let Some(action) = action {
                    api.dispatch(action).await?;
                }
            }
            Err(error) => {
                log::error!("{} {} failed: {}", request.method, request.url, error);
                let follow_up = on_error.and_then(|kind| build(kind, ActionPayload::Error(&error)));
                api.dispatch(ApiAction::CallFailed(error).into()).await?;
                if let Some(action) = follow_up {
                    api.dispatch(action).await?;
                }
            }
        }
        Ok(())
    }
}

/// Build a lifecycle action; a descriptor naming an action that cannot take
/// this payload is reported and skipped
fn build(kind: ActionType, payload: ActionPayload<'_>) -> Option<Action> {
    match kind.build(payload) {
        Ok(action) => Some(action),
        Err(e) => {
            log::warn!("Skipping {}: {}", kind, e);
            None
        }
    }
}

impl Middleware for ApiMiddleware {
    fn handle<'a>(
        &'a self,
        api: &'a StoreApi,
        action: Action,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            match action {
                Action::Api(ApiAction::CallBegan(call)) => self.perform(api, call, next).await,
                other => next.run(other).await,
            }
        })
    }
}
