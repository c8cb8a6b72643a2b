//! Flux-style state container for a bug tracker
//!
//! ```text
//! dispatch(action) → middleware chain → root reducer → new state → listeners
//!                     │ logging
//!                     │ thunks      (load_bugs: staleness check)
//!                     │ API calls   (on_start / on_success / on_error)
//! ```
//!
//! The state tree is immutable and shared through `Arc`s; selectors memoize
//! on pointer identity of their inputs.
//!
//! ```rust,ignore
//! let store = configure_store(Settings::load(), Arc::new(transport));
//! store.dispatch(bugs::load_bugs()).await?;
//! let open = unresolved_bugs().select(&store.state());
//! ```

pub mod actions;
pub mod domain_models;
pub mod logger;
pub mod middleware;
pub mod reducer;
pub mod reducers;
pub mod selectors;
pub mod state;
pub mod store;

pub use actions::{Action, ActionType, BugAction, BugActionType, ProjectAction, Thunk};
pub use domain_models::{Bug, NewBug, Project};
pub use middleware::{BoxFuture, Middleware, Next};
pub use selectors::{bugs_by_user, unresolved_bugs, BugSelectors, ParamSelector, Selector};
pub use state::{AppState, BugsState, EntitiesState, ProjectsState};
pub use store::{configure_store, Store, StoreApi, StoreError, Subscription};

pub use bugtrack_client as client;
pub use bugtrack_config::Settings;
