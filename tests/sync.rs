use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use contacts_web::api::errors::{ApiError, ApiResult};
use contacts_web::api::{ContactListQuery, ContactReader, SearchResult, SortField, SortOrder};
use contacts_web::domain::contact::{Address, Contact};
use contacts_web::domain::types::ContactId;
use contacts_web::sync::{ListSync, PagerSortEvent, SyncOutcome, SyncRegistry};

fn contact(name: &str) -> Contact {
    Contact {
        id: ContactId::new(name).unwrap(),
        first_name: name.to_string(),
        last_name: "Test".to_string(),
        email: format!("{name}@example.com"),
        phone: "555".to_string(),
        address: Address::default(),
        app: "contacts-app".to_string(),
        created_by: None,
        created_at: None,
        modified_by: None,
        modified_at: None,
    }
}

/// In-memory remote that records every search request and answers with a
/// contact named after the search text. Delays and canned pages are keyed
/// by search text so tests can stage races and empty pages. Clones share
/// state so a test keeps a handle to the instance the controller owns.
#[derive(Default, Clone)]
struct FakeApi {
    calls: Arc<Mutex<Vec<ContactListQuery>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    pages: Arc<Mutex<HashMap<(String, usize), SearchResult>>>,
    failures: Arc<Mutex<HashSet<String>>>,
}

impl FakeApi {
    fn delay(&self, text: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(text.to_string(), delay);
    }

    fn page(&self, text: &str, page: usize, result: SearchResult) {
        self.pages
            .lock()
            .unwrap()
            .insert((text.to_string(), page), result);
    }

    fn fail(&self, text: &str) {
        self.failures.lock().unwrap().insert(text.to_string());
    }

    fn calls(&self) -> Vec<ContactListQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContactReader for FakeApi {
    async fn search_contacts(&self, query: ContactListQuery) -> ApiResult<SearchResult> {
        let text = query.q.clone().unwrap_or_default();
        self.calls.lock().unwrap().push(query.clone());

        let delay = self.delays.lock().unwrap().get(&text).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failures.lock().unwrap().contains(&text) {
            return Err(ApiError::Status {
                status: 502,
                message: "upstream down".to_string(),
            });
        }
        let canned = self.pages.lock().unwrap().get(&(text.clone(), query.page)).cloned();
        if let Some(result) = canned {
            return Ok(result);
        }

        let name = if text.is_empty() { "all" } else { text.as_str() };
        Ok(SearchResult::new(
            vec![contact(name)],
            1,
            query.page,
            query.per_page,
        ))
    }

    async fn get_contact_by_id(&self, _id: &ContactId) -> ApiResult<Option<Contact>> {
        Ok(None)
    }
}

#[tokio::test(start_paused = true)]
async fn rapid_keystrokes_issue_one_request_for_the_final_text() {
    let api = FakeApi::default();
    let sync = Arc::new(ListSync::new(api.clone()));

    let mut handles = Vec::new();
    for text in ["a", "ab", "abc"] {
        let sync = sync.clone();
        handles.push(tokio::spawn(async move { sync.search_input(text).await }));
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap().unwrap());
    }
    assert_eq!(
        outcomes,
        vec![
            SyncOutcome::Superseded,
            SyncOutcome::Superseded,
            SyncOutcome::Applied
        ]
    );

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].q.as_deref(), Some("abc"));
    assert_eq!(sync.view().contacts[0].first_name, "abc");
}

#[tokio::test(start_paused = true)]
async fn settled_duplicate_text_is_suppressed() {
    let api = FakeApi::default();
    let sync = Arc::new(ListSync::new(api.clone()));

    assert_eq!(
        sync.search_input("ada").await.unwrap(),
        SyncOutcome::Applied
    );
    assert_eq!(
        sync.search_input(" ada ").await.unwrap(),
        SyncOutcome::Duplicate
    );
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn clearing_the_search_reissues_the_unfiltered_query() {
    let api = FakeApi::default();
    let sync = Arc::new(ListSync::new(api.clone()));

    sync.search_input("ada").await.unwrap();
    assert_eq!(sync.search_input("").await.unwrap(), SyncOutcome::Applied);

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1].q.is_none());
}

#[tokio::test(start_paused = true)]
async fn stale_response_never_overwrites_a_newer_one() {
    let api = FakeApi::default();
    api.delay("slow", Duration::from_millis(500));
    api.delay("fast", Duration::from_millis(10));
    let sync = Arc::new(ListSync::new(api.clone()));

    let first = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.mount(ContactListQuery::new().search("slow")).await })
    };
    tokio::task::yield_now().await;
    let second = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.mount(ContactListQuery::new().search("fast")).await })
    };

    assert_eq!(second.await.unwrap().unwrap(), SyncOutcome::Applied);
    assert_eq!(first.await.unwrap().unwrap(), SyncOutcome::Discarded);
    assert_eq!(sync.view().contacts[0].first_name, "fast");
}

#[tokio::test(start_paused = true)]
async fn new_search_resets_the_page_and_keeps_the_sort() {
    let api = FakeApi::default();
    let sync = Arc::new(ListSync::new(api.clone()));

    let query = ContactListQuery::new()
        .paginate(3, 10)
        .sort(SortField::Email, SortOrder::Desc);
    sync.mount(query).await.unwrap();
    sync.search_input("ada").await.unwrap();

    let query = sync.query();
    assert_eq!(query.page, 1);
    assert_eq!(query.sort_by, SortField::Email);
    assert_eq!(query.order, SortOrder::Desc);
    assert_eq!(query.q.as_deref(), Some("ada"));
}

#[tokio::test(start_paused = true)]
async fn pager_event_keeps_the_active_search_text() {
    let api = FakeApi::default();
    let sync = Arc::new(ListSync::new(api.clone()));

    sync.mount(ContactListQuery::new().search("ada")).await.unwrap();
    sync.pager_sort(PagerSortEvent {
        first: 10,
        rows: 10,
        sort_field: Some("email".to_string()),
        sort_order: Some(-1),
    })
    .await
    .unwrap();

    let query = sync.query();
    assert_eq!(query.q.as_deref(), Some("ada"));
    assert_eq!(query.page, 2);
    assert_eq!(query.sort_by, SortField::Email);
    assert_eq!(query.order, SortOrder::Desc);
}

#[tokio::test(start_paused = true)]
async fn failed_request_keeps_the_previous_view() {
    let api = FakeApi::default();
    api.fail("boom");
    let sync = Arc::new(ListSync::new(api.clone()));

    sync.mount(ContactListQuery::new().search("good")).await.unwrap();
    let err = sync
        .mount(ContactListQuery::new().search("boom"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 502, .. }));

    assert_eq!(sync.view().contacts[0].first_name, "good");
    assert!(!sync.is_loading());
}

#[tokio::test(start_paused = true)]
async fn delete_refresh_rewinds_when_the_page_empties() {
    let api = FakeApi::default();
    api.page("", 2, SearchResult::new(vec![], 10, 2, 10));
    api.page("", 1, SearchResult::new(vec![contact("ada")], 10, 1, 10));
    let sync = Arc::new(ListSync::new(api.clone()));

    sync.mount(ContactListQuery::new().paginate(2, 10)).await.unwrap();
    let outcome = sync.refresh_after_delete().await.unwrap();

    assert_eq!(outcome, SyncOutcome::Applied);
    assert_eq!(sync.query().page, 1);
    assert_eq!(sync.view().contacts.len(), 1);
    // Mount, refresh at page 2, rewind at page 1.
    assert_eq!(api.calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn delete_refresh_stays_on_a_populated_page() {
    let api = FakeApi::default();
    let sync = Arc::new(ListSync::new(api.clone()));

    sync.mount(ContactListQuery::new()).await.unwrap();
    sync.refresh_after_delete().await.unwrap();

    let calls = api.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|q| q.page == 1));
}

#[tokio::test(start_paused = true)]
async fn loading_flag_tracks_requests_in_flight() {
    let api = FakeApi::default();
    api.delay("slow", Duration::from_millis(200));
    let sync = Arc::new(ListSync::new(api.clone()));

    let pending = {
        let sync = sync.clone();
        tokio::spawn(async move { sync.mount(ContactListQuery::new().search("slow")).await })
    };
    tokio::task::yield_now().await;
    assert!(sync.is_loading());

    pending.await.unwrap().unwrap();
    assert!(!sync.is_loading());
}

#[tokio::test(start_paused = true)]
async fn registry_reuses_controllers_per_key() {
    let registry = SyncRegistry::new();
    let first = registry.get_or_create("u1", || ListSync::new(FakeApi::default()));
    let second = registry.get_or_create("u1", || ListSync::new(FakeApi::default()));
    assert!(Arc::ptr_eq(&first, &second));

    registry.remove("u1");
    let third = registry.get_or_create("u1", || ListSync::new(FakeApi::default()));
    assert!(!Arc::ptr_eq(&first, &third));
}

#[tokio::test(start_paused = true)]
async fn index_page_mount_reflects_the_requested_view() {
    use contacts_web::dto::main::IndexQuery;
    use contacts_web::services::main::load_index_page;

    let api = FakeApi::default();
    let sync = ListSync::new(api.clone());

    let data = load_index_page(
        &sync,
        IndexQuery {
            q: Some("  ada  ".to_string()),
            page: Some(2),
            sort_by: Some("email".to_string()),
            order: Some("desc".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(data.search_query.as_deref(), Some("ada"));
    assert_eq!(data.total, 1);
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].q.as_deref(), Some("ada"));
    assert_eq!(calls[0].page, 2);
    assert_eq!(calls[0].sort_by, SortField::Email);
    assert_eq!(calls[0].order, SortOrder::Desc);
}

#[tokio::test(start_paused = true)]
async fn search_event_answers_only_when_the_view_changed() {
    use contacts_web::services::api::search_event;

    let api = FakeApi::default();
    let sync = ListSync::new(api.clone());

    let applied = search_event(&sync, "ada").await.unwrap();
    assert_eq!(applied.unwrap().contacts[0].first_name, "ada");

    let duplicate = search_event(&sync, "ada").await.unwrap();
    assert!(duplicate.is_none());
}

#[tokio::test(start_paused = true)]
async fn table_event_returns_the_updated_view() {
    use contacts_web::dto::api::TableParams;
    use contacts_web::services::api::table_event;

    let api = FakeApi::default();
    let sync = ListSync::new(api.clone());

    let response = table_event(
        &sync,
        TableParams {
            first: 10,
            rows: 10,
            sort_field: Some("phone".to_string()),
            sort_order: Some(1),
        },
    )
    .await
    .unwrap();

    assert_eq!(response.page, 2);
    assert!(!response.loading);
    assert_eq!(api.calls()[0].sort_by, SortField::Phone);
}
