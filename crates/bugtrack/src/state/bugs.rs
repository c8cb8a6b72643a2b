use crate::domain_models::Bug;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// State of the bugs slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BugsState {
    /// Bugs in arrival order; ids are unique
    pub list: Arc<Vec<Bug>>,
    /// True between a list request and its success or failure
    pub loading: bool,
    /// When the full list was last received from the server
    pub last_fetch: Option<DateTime<Utc>>,
}

impl BugsState {
    pub fn find(&self, id: u64) -> Option<&Bug> {
        self.list.iter().find(|bug| bug.id == id)
    }

    /// Was the list fetched less than `window` before `now`?
    ///
    /// A `last_fetch` in the future (clock skew) counts as fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        match self.last_fetch {
            Some(last_fetch) => match now.signed_duration_since(last_fetch).to_std() {
                Ok(elapsed) => elapsed < window,
                Err(_) => true,
            },
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MINUTES: Duration = Duration::from_secs(600);

    fn fetched(ago: chrono::Duration, now: DateTime<Utc>) -> BugsState {
        BugsState {
            last_fetch: Some(now - ago),
            ..BugsState::default()
        }
    }

    #[test]
    fn test_never_fetched_is_stale() {
        assert!(!BugsState::default().is_fresh(Utc::now(), TEN_MINUTES));
    }

    #[test]
    fn test_freshness_window() {
        let now = Utc::now();
        assert!(fetched(chrono::Duration::minutes(9), now).is_fresh(now, TEN_MINUTES));
        assert!(!fetched(chrono::Duration::minutes(10), now).is_fresh(now, TEN_MINUTES));
        assert!(!fetched(chrono::Duration::minutes(11), now).is_fresh(now, TEN_MINUTES));
    }

    #[test]
    fn test_future_fetch_counts_as_fresh() {
        let now = Utc::now();
        assert!(fetched(chrono::Duration::minutes(-1), now).is_fresh(now, TEN_MINUTES));
    }

    #[test]
    fn test_maximal_window_never_expires() {
        let now = Utc::now();
        let window = Duration::from_secs(u64::MAX);
        assert!(fetched(chrono::Duration::days(365 * 100), now).is_fresh(now, window));
    }

    #[test]
    fn test_find() {
        let state = BugsState {
            list: Arc::new(vec![Bug::new(1, "a"), Bug::new(2, "b")]),
            ..BugsState::default()
        };
        assert_eq!(state.find(2).map(|b| b.description.as_str()), Some("b"));
        assert!(state.find(3).is_none());
    }
}
