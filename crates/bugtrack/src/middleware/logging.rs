//! LoggingMiddleware - logs all actions for debugging

use super::{BoxFuture, Middleware, Next};
use crate::actions::Action;
use crate::store::{StoreApi, StoreError};

/// LoggingMiddleware - logs all actions that pass through the system
///
/// Registered first, so it sees every dispatch including nested ones.
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LoggingMiddleware {
    fn handle<'a>(
        &'a self,
        api: &'a StoreApi,
        action: Action,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            log::debug!("Action [depth {}]: {:?}", api.depth(), action);
            // Always continue to next middleware
            next.run(action).await
        })
    }
}
