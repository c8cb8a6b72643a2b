//! Middleware system
//!
//! Middleware sits between action dispatch and reducer execution, allowing
//! side effects, async operations, logging, and other cross-cutting concerns
//! to be handled in a composable way.
//!
//! ## Design
//!
//! ```text
//! dispatch → mw[0] → mw[1] → … → mw[n-1] → reducer → listeners
//!              ▲        │
//!              └────────┘ StoreApi::dispatch re-enters from the top
//! ```
//!
//! Each middleware receives the action by value and a [`Next`] handle for
//! the rest of the chain. It can:
//! - forward the action (possibly transformed) with `next.run(action)`
//! - drop it by never calling `next`
//! - await async work before or after forwarding
//! - dispatch further actions through the [`StoreApi`]
//!
//! ## Example
//!
//! ```rust,ignore
//! struct LoggingMiddleware;
//!
//! impl Middleware for LoggingMiddleware {
//!     fn handle<'a>(
//!         &'a self,
//!         _api: &'a StoreApi,
//!         action: Action,
//!         next: Next<'a>,
//!     ) -> BoxFuture<'a, Result<(), StoreError>> {
//!         Box::pin(async move {
//!             log::debug!("Action: {:?}", action);
//!             next.run(action).await
//!         })
//!     }
//! }
//! ```

pub mod api_middleware;
pub mod logging;
pub mod thunk_middleware;

pub use api_middleware::ApiMiddleware;
pub use logging::LoggingMiddleware;
pub use thunk_middleware::ThunkMiddleware;

use crate::actions::Action;
use crate::store::{StoreApi, StoreError};
use std::future::Future;
use std::pin::Pin;

/// BoxFuture type alias for async middleware handlers
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Middleware trait - intercepts actions before they reach the reducer
pub trait Middleware: Send + Sync {
    /// Handle an action
    ///
    /// - `api`: dispatch (re-enters the chain from the top) and state access
    /// - `action`: the action being dispatched
    /// - `next`: the rest of the chain; not calling it drops the action
    fn handle<'a>(
        &'a self,
        api: &'a StoreApi,
        action: Action,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), StoreError>>;
}

/// The remainder of the middleware chain, ending in the store's reducer
pub struct Next<'a> {
    api: &'a StoreApi,
    index: usize,
}

impl<'a> Next<'a> {
    pub(crate) fn new(api: &'a StoreApi, index: usize) -> Self {
        Self { api, index }
    }

    /// Forward `action` to the next middleware, or to the reducer at the end
    pub fn run(self, action: Action) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            match self.api.store().middleware_at(self.index) {
                Some(middleware) => {
                    let next = Next::new(self.api, self.index + 1);
                    middleware.handle(self.api, action, next).await
                }
                None => {
                    self.api.store().reduce_and_notify(&action);
                    Ok(())
                }
            }
        })
    }
}
