//! Bugs slice actions and action creators

use super::{Action, ActionPayload, ApiCall, PayloadError, Thunk};
use crate::domain_models::{Bug, BugAssignment, BugRef, NewBug};
use bugtrack_client::{ApiError, ApiRequest};
use chrono::{DateTime, Utc};
use serde_json::json;

/// Collection path of bugs, relative to the API base address
pub const BUGS_URL: &str = "/bugs";

/// Actions for the bugs slice
#[derive(Debug, Clone, PartialEq, strum::EnumDiscriminants)]
#[strum_discriminants(name(BugActionType))]
#[strum_discriminants(derive(Hash, strum::Display, strum::EnumIter))]
pub enum BugAction {
    // List loading
    /// A list load started
    BugsRequested,
    /// The full list arrived (replaces the local list)
    BugsReceived {
        bugs: Vec<Bug>,
        fetched_at: DateTime<Utc>,
    },
    /// The list load failed
    BugsRequestFailed(ApiError),

    // Single bug changes confirmed by the server
    BugAdded(Bug),
    BugResolved(BugRef),
    BugAssignedToUser(BugAssignment),

    /// Drop a bug from the local list
    BugRemoved(BugRef),
}

impl BugAction {
    /// Build a bugs action from an API lifecycle payload
    pub fn from_payload(
        kind: BugActionType,
        payload: ActionPayload<'_>,
    ) -> Result<Self, PayloadError> {
        Ok(match kind {
            BugActionType::BugsRequested => BugAction::BugsRequested,
            BugActionType::BugsReceived => BugAction::BugsReceived {
                bugs: payload.decode(kind)?,
                fetched_at: Utc::now(),
            },
            BugActionType::BugsRequestFailed => BugAction::BugsRequestFailed(payload.error(kind)?),
            BugActionType::BugAdded => BugAction::BugAdded(payload.decode(kind)?),
            BugActionType::BugResolved => BugAction::BugResolved(payload.decode(kind)?),
            BugActionType::BugAssignedToUser => {
                BugAction::BugAssignedToUser(payload.decode(kind)?)
            }
            BugActionType::BugRemoved => BugAction::BugRemoved(payload.decode(kind)?),
        })
    }
}

// Action creators

/// Save a new bug; it is added to the list once the server confirms it
pub fn add_bug(bug: NewBug) -> Action {
    ApiCall::new(ApiRequest::post(
        BUGS_URL,
        json!({ "description": bug.description }),
    ))
    .on_success(BugActionType::BugAdded)
    .into()
}

/// Mark a bug resolved on the server, then locally
pub fn resolve_bug(id: u64) -> Action {
    ApiCall::new(ApiRequest::patch(
        format!("{}/{}", BUGS_URL, id),
        json!({ "resolved": true }),
    ))
    .on_success(BugActionType::BugResolved)
    .into()
}

/// Assign a bug to a user on the server, then locally
pub fn assign_bug_to_user(id: u64, user_id: u64) -> Action {
    ApiCall::new(ApiRequest::patch(
        format!("{}/{}", BUGS_URL, id),
        json!({ "userId": user_id }),
    ))
    .on_success(BugActionType::BugAssignedToUser)
    .into()
}

/// Remove a bug from the local list
pub fn bug_removed(id: u64) -> Action {
    BugAction::BugRemoved(BugRef { id }).into()
}

/// Load the bug list unless the cached one is still fresh
///
/// Freshness is judged against `last_fetch` and the configured staleness
/// window. A fresh cache makes this a no-op; nothing is dispatched.
pub fn load_bugs() -> Action {
    Thunk::new("load_bugs", |api| async move {
        let bugs = api.state().entities.bugs.clone();
        let window = api.settings().stale_after();
        if bugs.is_fresh(Utc::now(), window) {
            log::debug!(
                "load_bugs: list fetched at {:?} is still fresh, skipping",
                bugs.last_fetch
            );
            return Ok(());
        }

        let call = ApiCall::new(ApiRequest::get(BUGS_URL))
            .on_start(BugActionType::BugsRequested)
            .on_success(BugActionType::BugsReceived)
            .on_error(BugActionType::BugsRequestFailed);
        api.dispatch(call.into()).await
    })
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ApiAction;
    use bugtrack_client::HttpMethod;
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn api_call(action: Action) -> ApiCall {
        match action {
            Action::Api(ApiAction::CallBegan(call)) => call,
            other => panic!("expected an API call, got {:?}", other),
        }
    }

    #[test]
    fn test_add_bug_posts_and_adds_on_success() {
        let call = api_call(add_bug(NewBug::new("a")));
        assert_eq!(call.request.method, HttpMethod::Post);
        assert_eq!(call.request.url, "/bugs");
        assert_eq!(call.request.data, Some(json!({ "description": "a" })));
        assert_eq!(call.on_success, Some(BugActionType::BugAdded.into()));
        assert_eq!(call.on_start, None);
        assert_eq!(call.on_error, None);
    }

    #[test]
    fn test_resolve_bug_patches_resolved() {
        let call = api_call(resolve_bug(1));
        assert_eq!(call.request.method, HttpMethod::Patch);
        assert_eq!(call.request.url, "/bugs/1");
        assert_eq!(call.request.data, Some(json!({ "resolved": true })));
        assert_eq!(call.on_success, Some(BugActionType::BugResolved.into()));
    }

    #[test]
    fn test_assign_bug_patches_user_id() {
        let call = api_call(assign_bug_to_user(3, 42));
        assert_eq!(call.request.url, "/bugs/3");
        assert_eq!(call.request.data, Some(json!({ "userId": 42 })));
        assert_eq!(
            call.on_success,
            Some(BugActionType::BugAssignedToUser.into())
        );
    }

    #[test]
    fn test_bug_removed_is_plain_action() {
        assert!(matches!(
            bug_removed(5),
            Action::Bugs(BugAction::BugRemoved(BugRef { id: 5 }))
        ));
    }

    #[test]
    fn test_load_bugs_is_thunk() {
        assert!(matches!(load_bugs(), Action::Thunk(t) if t.name() == "load_bugs"));
    }

    #[test]
    fn test_from_payload_received_stamps_fetch_time() {
        let before = Utc::now();
        let body = json!([{ "id": 1 }, { "id": 2 }]);
        let action =
            BugAction::from_payload(BugActionType::BugsReceived, ActionPayload::Body(&body))
                .unwrap();
        match action {
            BugAction::BugsReceived { bugs, fetched_at } => {
                assert_eq!(bugs.len(), 2);
                assert!(fetched_at >= before);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_from_payload_request_failed_needs_error() {
        let error = ApiError::from_status_code(500);
        let action = BugAction::from_payload(
            BugActionType::BugsRequestFailed,
            ActionPayload::Error(&error),
        )
        .unwrap();
        assert_eq!(action, BugAction::BugsRequestFailed(error));

        assert!(matches!(
            BugAction::from_payload(BugActionType::BugsRequestFailed, ActionPayload::None),
            Err(PayloadError::MissingError { .. })
        ));
    }

    #[test]
    fn test_every_type_maps_back_to_itself() {
        let bug = json!({ "id": 1, "userId": 2 });
        let list = json!([]);
        let error = ApiError::network("down");
        for kind in BugActionType::iter() {
            let payload = match kind {
                BugActionType::BugsRequested => ActionPayload::None,
                BugActionType::BugsReceived => ActionPayload::Body(&list),
                BugActionType::BugsRequestFailed => ActionPayload::Error(&error),
                _ => ActionPayload::Body(&bug),
            };
            let action = BugAction::from_payload(kind, payload).unwrap();
            assert_eq!(BugActionType::from(&action), kind);
        }
    }
}
