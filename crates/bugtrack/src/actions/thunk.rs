//! Thunk actions
//!
//! A thunk is dispatched like any other action but carries a function
//! instead of data. The thunk middleware calls it with the [`StoreApi`], so
//! it can read state before deciding what (if anything) to dispatch.

use crate::middleware::BoxFuture;
use crate::store::{StoreApi, StoreError};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

type ThunkFn = dyn Fn(StoreApi) -> BoxFuture<'static, Result<(), StoreError>> + Send + Sync;

/// Deferred work dispatched as an action
#[derive(Clone)]
pub struct Thunk {
    name: &'static str,
    run: Arc<ThunkFn>,
}

impl Thunk {
    pub fn new<F, Fut>(name: &'static str, f: F) -> Self
    where
        F: Fn(StoreApi) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StoreError>> + Send + 'static,
    {
        Self {
            name,
            run: Arc::new(move |api| Box::pin(f(api))),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(&self, api: StoreApi) -> BoxFuture<'static, Result<(), StoreError>> {
        (self.run)(api)
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Thunk").field(&self.name).finish()
    }
}
