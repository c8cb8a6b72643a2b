//! ThunkMiddleware - runs deferred work dispatched as [`Action::Thunk`]

use super::{BoxFuture, Middleware, Next};
use crate::actions::Action;
use crate::store::{StoreApi, StoreError};

/// Runs thunks with the store API and keeps them away from the reducers
pub struct ThunkMiddleware;

impl ThunkMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThunkMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for ThunkMiddleware {
    fn handle<'a>(
        &'a self,
        api: &'a StoreApi,
        action: Action,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            match action {
                Action::Thunk(thunk) => {
                    log::debug!("Running thunk {}", thunk.name());
                    thunk.run(api.clone()).await
                }
                other => next.run(other).await,
            }
        })
    }
}
