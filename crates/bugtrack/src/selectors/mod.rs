//! Memoized selectors
//!
//! A selector splits a derived view into an input function, which extracts
//! one or more `Arc` references from the state, and a result function over
//! those inputs. The result function only runs when an input differs by
//! reference from the previous call; otherwise the cached `Arc` is returned.
//!
//! This relies on reducers keeping untouched subtrees shared (see
//! [`crate::reducer`]).

pub mod bugs;

pub use bugs::{bugs_by_user, unresolved_bugs, BugSelectors};

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Selector inputs compare by identity, never by value
pub trait SelectorInput: Clone {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> SelectorInput for Arc<T> {
    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<A: SelectorInput, B: SelectorInput> SelectorInput for (A, B) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1)
    }
}

impl<A: SelectorInput, B: SelectorInput, C: SelectorInput> SelectorInput for (A, B, C) {
    fn same(&self, other: &Self) -> bool {
        self.0.same(&other.0) && self.1.same(&other.1) && self.2.same(&other.2)
    }
}

type InputFn<S, I> = Box<dyn Fn(&S) -> I + Send + Sync>;

/// Selector with a single-entry cache
pub struct Selector<S, I, R> {
    input: InputFn<S, I>,
    result: Box<dyn Fn(&I) -> R + Send + Sync>,
    cache: Mutex<Option<(I, Arc<R>)>>,
    recomputations: AtomicUsize,
}

impl<S, I: SelectorInput, R> Selector<S, I, R> {
    pub fn new(
        input: impl Fn(&S) -> I + Send + Sync + 'static,
        result: impl Fn(&I) -> R + Send + Sync + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            result: Box::new(result),
            cache: Mutex::new(None),
            recomputations: AtomicUsize::new(0),
        }
    }

    pub fn select(&self, state: &S) -> Arc<R> {
        let input = (self.input)(state);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_input, value)) = cache.as_ref() {
            if cached_input.same(&input) {
                return Arc::clone(value);
            }
        }

        let value = Arc::new((self.result)(&input));
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        *cache = Some((input, Arc::clone(&value)));
        value
    }

    /// How many times the result function has run
    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }
}

/// Parameterized selector, one single-entry cache per parameter value
///
/// Entries are never evicted, so the map grows with the number of distinct
/// parameters seen. Call [`ParamSelector::clear`] when that matters.
pub struct ParamSelector<S, P, I, R> {
    input: InputFn<S, I>,
    result: Box<dyn Fn(&I, &P) -> R + Send + Sync>,
    caches: Mutex<HashMap<P, (I, Arc<R>)>>,
    recomputations: AtomicUsize,
}

impl<S, P: Eq + Hash + Clone, I: SelectorInput, R> ParamSelector<S, P, I, R> {
    pub fn new(
        input: impl Fn(&S) -> I + Send + Sync + 'static,
        result: impl Fn(&I, &P) -> R + Send + Sync + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            result: Box::new(result),
            caches: Mutex::new(HashMap::new()),
            recomputations: AtomicUsize::new(0),
        }
    }

    pub fn select(&self, state: &S, param: &P) -> Arc<R> {
        let input = (self.input)(state);
        let mut caches = self.caches.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_input, value)) = caches.get(param) {
            if cached_input.same(&input) {
                return Arc::clone(value);
            }
        }

        let value = Arc::new((self.result)(&input, param));
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        caches.insert(param.clone(), (input, Arc::clone(&value)));
        value
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations.load(Ordering::Relaxed)
    }

    /// Number of parameter values with a cached result
    pub fn cached_params(&self) -> usize {
        self.caches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear(&self) {
        self.caches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
