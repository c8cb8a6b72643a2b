//! End-to-end tests for the bugs slice: action creators, API middleware and
//! reducers wired together the way the binary wires them.

use bugtrack::actions::bugs::{
    add_bug, assign_bug_to_user, load_bugs, resolve_bug,
};
use bugtrack::client::{json, HttpMethod, MockReply, MockTransport};
use bugtrack::{
    configure_store, unresolved_bugs, Action, BoxFuture, Bug, BugAction, BugsState, Middleware,
    NewBug, Next, Settings, Store, StoreApi, StoreError,
};
use chrono::{Duration, Utc};
use std::sync::{Arc, Mutex};

fn setup() -> (Store, MockTransport) {
    let transport = MockTransport::new();
    let store = configure_store(Settings::default(), Arc::new(transport.clone()));
    (store, transport)
}

fn bugs_slice(store: &Store) -> BugsState {
    BugsState::clone(&store.state().entities.bugs)
}

/// Records every action that reaches the end of the chain
struct ActionLog(Arc<Mutex<Vec<String>>>);

impl Middleware for ActionLog {
    fn handle<'a>(
        &'a self,
        _api: &'a StoreApi,
        action: Action,
        next: Next<'a>,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        Box::pin(async move {
            self.0.lock().unwrap().push(action.name());
            next.run(action).await
        })
    }
}

#[tokio::test]
async fn test_add_bug_saved_to_server_is_added() {
    let (store, transport) = setup();
    transport.reply(
        HttpMethod::Post,
        "/bugs",
        200,
        json!({ "description": "a", "id": 1 }),
    );

    store.dispatch(add_bug(NewBug::new("a"))).await.unwrap();

    assert_eq!(*bugs_slice(&store).list, vec![Bug::new(1, "a")]);
}

#[tokio::test]
async fn test_add_bug_not_saved_is_not_added() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Post, "/bugs", 500, json!({}));

    store.dispatch(add_bug(NewBug::new("a"))).await.unwrap();

    assert!(bugs_slice(&store).list.is_empty());
}

#[tokio::test]
async fn test_resolve_saved_to_server_marks_resolved() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Post, "/bugs", 200, json!({ "id": 1 }));
    transport.reply(
        HttpMethod::Patch,
        "/bugs/1",
        200,
        json!({ "id": 1, "resolved": true }),
    );

    store.dispatch(add_bug(NewBug::new(""))).await.unwrap();
    store.dispatch(resolve_bug(1)).await.unwrap();

    assert!(bugs_slice(&store).list[0].resolved);
}

#[tokio::test]
async fn test_resolve_not_saved_leaves_bug_unresolved() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Post, "/bugs", 200, json!({ "id": 1 }));
    transport.reply(HttpMethod::Patch, "/bugs/1", 500, json!({}));

    store.dispatch(add_bug(NewBug::new(""))).await.unwrap();
    store.dispatch(resolve_bug(1)).await.unwrap();

    assert!(!bugs_slice(&store).list[0].resolved);
}

#[tokio::test]
async fn test_assign_saved_to_server_sets_user() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Post, "/bugs", 200, json!({ "id": 1 }));
    transport.reply(
        HttpMethod::Patch,
        "/bugs/1",
        200,
        json!({ "id": 1, "userId": 42 }),
    );

    store.dispatch(add_bug(NewBug::new(""))).await.unwrap();
    store.dispatch(assign_bug_to_user(1, 42)).await.unwrap();

    assert_eq!(bugs_slice(&store).list[0].user_id, Some(42));
    let patch = &transport.history()[1];
    assert_eq!(patch.url, "/bugs/1");
    assert_eq!(patch.data, Some(json!({ "userId": 42 })));
}

#[tokio::test]
async fn test_unresolved_selector_over_loaded_list() {
    let (store, transport) = setup();
    transport.reply(
        HttpMethod::Get,
        "/bugs",
        200,
        json!([{ "id": 1, "resolved": true }, { "id": 2 }, { "id": 3 }]),
    );

    store.dispatch(load_bugs()).await.unwrap();

    let unresolved = unresolved_bugs().select(&store.state());
    let ids: Vec<u64> = unresolved.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn test_load_bugs_puts_list_in_store() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Get, "/bugs", 200, json!([{ "id": 1 }]));

    store.dispatch(load_bugs()).await.unwrap();

    let bugs = bugs_slice(&store);
    assert_eq!(bugs.list.len(), 1);
    assert!(bugs.last_fetch.is_some());
}

#[tokio::test]
async fn test_cached_bugs_are_not_fetched_again() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Get, "/bugs", 200, json!([{ "id": 1 }]));

    store.dispatch(load_bugs()).await.unwrap();
    store.dispatch(load_bugs()).await.unwrap();

    assert_eq!(transport.count(HttpMethod::Get), 1);
}

#[tokio::test]
async fn test_stale_bugs_are_fetched_again() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Get, "/bugs", 200, json!([{ "id": 1 }]));

    // a list received eleven minutes ago is past the ten minute window
    store
        .dispatch(
            BugAction::BugsReceived {
                bugs: vec![],
                fetched_at: Utc::now() - Duration::minutes(11),
            }
            .into(),
        )
        .await
        .unwrap();
    store.dispatch(load_bugs()).await.unwrap();
    store.dispatch(load_bugs()).await.unwrap();

    assert_eq!(transport.count(HttpMethod::Get), 1);
    assert_eq!(bugs_slice(&store).list.len(), 1);
}

#[tokio::test]
async fn test_loading_is_true_while_fetching() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Get, "/bugs", 200, json!([{ "id": 1 }]));
    let gate = transport.hold();

    let pending = tokio::spawn(store.dispatch(load_bugs()));
    transport.wait_for_requests(1).await;

    assert!(bugs_slice(&store).loading);

    gate.release();
    pending.await.unwrap().unwrap();
    assert!(!bugs_slice(&store).loading);
}

#[tokio::test]
async fn test_loading_is_false_after_server_error() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Get, "/bugs", 500, json!({}));

    store.dispatch(load_bugs()).await.unwrap();

    let bugs = bugs_slice(&store);
    assert!(!bugs.loading);
    assert_eq!(bugs.last_fetch, None);
}

#[tokio::test]
async fn test_loading_is_false_after_network_error() {
    let (store, transport) = setup();
    transport.on(
        HttpMethod::Get,
        "/bugs",
        MockReply::NetworkError("connection refused".into()),
    );

    store.dispatch(load_bugs()).await.unwrap();

    assert!(!bugs_slice(&store).loading);
}

#[tokio::test]
async fn test_failed_load_is_retried() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Get, "/bugs", 500, json!({}));

    store.dispatch(load_bugs()).await.unwrap();
    transport.reply(HttpMethod::Get, "/bugs", 200, json!([{ "id": 1 }]));
    store.dispatch(load_bugs()).await.unwrap();

    assert_eq!(transport.count(HttpMethod::Get), 2);
    assert_eq!(bugs_slice(&store).list.len(), 1);
}

#[tokio::test]
async fn test_load_dispatches_lifecycle_in_order() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Get, "/bugs", 200, json!([]));
    let seen = Arc::new(Mutex::new(Vec::new()));
    store.add_middleware(ActionLog(Arc::clone(&seen)));

    store.dispatch(load_bugs()).await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "bugs/BugsRequested",
            "api/CallBegan",
            "api/CallSuccess",
            "bugs/BugsReceived"
        ]
    );
}

#[tokio::test]
async fn test_fresh_cache_dispatches_nothing() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Get, "/bugs", 200, json!([]));
    store.dispatch(load_bugs()).await.unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    store.add_middleware(ActionLog(Arc::clone(&seen)));
    let before = store.state();
    store.dispatch(load_bugs()).await.unwrap();

    assert!(seen.lock().unwrap().is_empty());
    assert!(Arc::ptr_eq(&before, &store.state()));
}

#[tokio::test]
async fn test_concurrent_loads_are_not_deduplicated() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Get, "/bugs", 200, json!([{ "id": 1 }]));
    let gate = transport.hold();

    let first = tokio::spawn(store.dispatch(load_bugs()));
    let second = tokio::spawn(store.dispatch(load_bugs()));
    transport.wait_for_requests(2).await;
    gate.release();
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    assert_eq!(transport.count(HttpMethod::Get), 2);
    assert_eq!(bugs_slice(&store).list.len(), 1);
}

#[tokio::test]
async fn test_listener_notified_for_each_reduced_action() {
    let (store, transport) = setup();
    transport.reply(HttpMethod::Get, "/bugs", 200, json!([]));
    let notified = Arc::new(Mutex::new(0));
    let subscription = {
        let notified = Arc::clone(&notified);
        store.subscribe(move || *notified.lock().unwrap() += 1)
    };

    store.dispatch(load_bugs()).await.unwrap();

    // BugsRequested, CallBegan, CallSuccess, BugsReceived
    assert_eq!(*notified.lock().unwrap(), 4);
    assert!(subscription.unsubscribe());
}
