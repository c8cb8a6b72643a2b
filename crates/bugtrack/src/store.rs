use crate::actions::Action;
use crate::middleware::{
    ApiMiddleware, BoxFuture, LoggingMiddleware, Middleware, Next, ThunkMiddleware,
};
use crate::reducer::reduce;
use crate::state::AppState;
use bugtrack_client::Transport;
use bugtrack_config::Settings;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use thiserror::Error;

type Listener = Arc<dyn Fn() + Send + Sync>;

/// Errors surfaced by `dispatch`
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dispatch depth {depth} exceeds limit {limit} while dispatching {action}")]
    DispatchDepthExceeded {
        depth: usize,
        limit: usize,
        action: String,
    },
}

struct StoreInner {
    state: RwLock<Arc<AppState>>,
    middleware: RwLock<Vec<Arc<dyn Middleware>>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    settings: Settings,
}

/// Store - holds application state and manages the Redux loop
///
/// Cloning is cheap and every clone refers to the same state tree,
/// middleware chain and listener registry.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// Create a store with default slices, populated by dispatching [`Action::Init`]
    pub fn new(settings: Settings) -> Self {
        Self::with_state(settings, AppState::default())
    }

    /// Create a store from a preloaded state tree
    pub fn with_state(settings: Settings, initial_state: AppState) -> Self {
        let initial = Arc::new(initial_state);
        let state = reduce(&initial, &Action::Init);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(state),
                middleware: RwLock::new(Vec::new()),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
                settings,
            }),
        }
    }

    /// Add middleware to the end of the chain
    pub fn add_middleware<M: Middleware + 'static>(&self, middleware: M) {
        self.inner
            .middleware
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(middleware));
    }

    /// Get the current state
    pub fn state(&self) -> Arc<AppState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    /// Register a listener, called with no arguments after every reduced action
    ///
    /// Registering the same closure twice registers it twice.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        Subscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Dispatch an action through the middleware chain
    ///
    /// The returned future owns everything it needs, so it can be awaited in
    /// place or handed to `tokio::spawn`.
    pub fn dispatch(&self, action: Action) -> BoxFuture<'static, Result<(), StoreError>> {
        let api = StoreApi {
            store: self.clone(),
            depth: 0,
        };
        Box::pin(async move { api.enter(action).await })
    }

    pub(crate) fn middleware_at(&self, index: usize) -> Option<Arc<dyn Middleware>> {
        self.inner
            .middleware
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .cloned()
    }

    /// Run the root reducer, then notify every listener registered at this point
    ///
    /// No lock is held while listeners run, so they are free to read state
    /// or (un)subscribe.
    pub(crate) fn reduce_and_notify(&self, action: &Action) {
        {
            let mut state = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let next = reduce(&state, action);
            *state = next;
        }

        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

/// What middleware and thunks see of the store
///
/// `dispatch` re-enters the chain from the top, one level deeper than the
/// dispatch that produced this handle.
#[derive(Clone)]
pub struct StoreApi {
    store: Store,
    depth: usize,
}

impl StoreApi {
    pub fn state(&self) -> Arc<AppState> {
        self.store.state()
    }

    pub fn settings(&self) -> &Settings {
        self.store.settings()
    }

    /// Nesting level of the dispatch this handle belongs to (0 = top level)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn dispatch(&self, action: Action) -> BoxFuture<'static, Result<(), StoreError>> {
        let api = StoreApi {
            store: self.store.clone(),
            depth: self.depth + 1,
        };
        Box::pin(async move { api.enter(action).await })
    }

    pub(crate) fn store(&self) -> &Store {
        &self.store
    }

    async fn enter(&self, action: Action) -> Result<(), StoreError> {
        let limit = self.store.settings().max_dispatch_depth;
        if self.depth > limit {
            log::error!(
                "Dropping {}: dispatch depth {} exceeds limit {}",
                action.name(),
                self.depth,
                limit
            );
            return Err(StoreError::DispatchDepthExceeded {
                depth: self.depth,
                limit,
                action: action.name(),
            });
        }
        Next::new(self, 0).run(action).await
    }
}

/// Registration handle returned by [`Store::subscribe`]
#[must_use = "without the handle the listener can never be removed"]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
}

impl Subscription {
    /// Remove exactly this registration
    ///
    /// Takes effect from the next notification round: when called from a
    /// listener, the listeners of the current dispatch were already taken and
    /// all of them still run once. Returns `false` if the store is gone.
    pub fn unsubscribe(self) -> bool {
        let Some(inner) = self.store.upgrade() else {
            return false;
        };
        let mut listeners = inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match listeners.iter().position(|(id, _)| *id == self.id) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Build a store with the standard chain: logging, thunks, API calls
pub fn configure_store(settings: Settings, transport: Arc<dyn Transport>) -> Store {
    let store = Store::new(settings);
    store.add_middleware(LoggingMiddleware::new());
    store.add_middleware(ThunkMiddleware::new());
    store.add_middleware(ApiMiddleware::new(transport));
    log::info!("Store configured");
    store
}
