//! List synchronization controller for the contact table.
//!
//! Three input sources feed the table: the synthetic mount event when the
//! page loads, pager/sort events from the table widget, and raw search
//! keystrokes. All of them funnel into one request stream with
//! at-most-one-result-applied semantics: every outgoing request carries a
//! sequence number and a response is applied only while its number is still
//! the highest issued. Without that rule a slow response for an early
//! keystroke would overwrite the result of a later, faster one.
//!
//! Search keystrokes are additionally debounced: a request is issued only
//! once the input has been quiescent for [`SEARCH_DEBOUNCE`], and only when
//! the settled text differs from the previously issued text.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::api::errors::ApiResult;
use crate::api::{ContactListQuery, ContactReader, SearchResult, SortField, SortOrder};

/// Quiescence interval for search-as-you-type input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Pager/sort event emitted by the table widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerSortEvent {
    /// Offset of the first visible row.
    pub first: usize,
    /// Rows per page.
    pub rows: usize,
    /// Wire name of the sort column; `None` keeps the default column.
    pub sort_field: Option<String>,
    /// +1 ascending, -1 descending; `None` defaults to ascending.
    pub sort_order: Option<i8>,
}

impl PagerSortEvent {
    /// 1-based page derived from the row offset.
    pub fn page(&self) -> usize {
        self.first / self.rows.max(1) + 1
    }
}

/// How an event was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The response replaced the displayed contacts and counters.
    Applied,
    /// The response arrived after a newer request and was ignored.
    Discarded,
    /// A newer keystroke arrived inside the debounce window; no request
    /// was issued.
    Superseded,
    /// The settled text equals the previously issued text; no request was
    /// issued.
    Duplicate,
}

struct SyncState {
    query: ContactListQuery,
    view: SearchResult,
    /// Bumped on every keystroke; a debounce sleep only survives if its
    /// generation is still current afterwards.
    typed_seq: u64,
    /// Sequence number of the most recently issued request.
    issued_seq: u64,
    /// Sequence number of the last applied response.
    applied_seq: u64,
    /// Search text carried by the last issued request (empty for none).
    last_issued_text: Option<String>,
    in_flight: usize,
}

/// Owns the current [`ContactListQuery`] and the last applied
/// [`SearchResult`] for one user's contact table. All mutation goes
/// through the event methods below.
pub struct ListSync<A> {
    api: A,
    state: Mutex<SyncState>,
}

impl<A> ListSync<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(SyncState {
                query: ContactListQuery::default(),
                view: SearchResult::empty(),
                typed_seq: 0,
                issued_seq: 0,
                applied_seq: 0,
                last_issued_text: None,
                in_flight: 0,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SyncState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Last applied result page.
    pub fn view(&self) -> SearchResult {
        self.state().view.clone()
    }

    /// Current view state as last mutated by user interaction.
    pub fn query(&self) -> ContactListQuery {
        self.state().query.clone()
    }

    /// True while at least one request has been issued and not settled.
    pub fn is_loading(&self) -> bool {
        self.state().in_flight > 0
    }
}

impl<A: ContactReader> ListSync<A> {
    /// Issues `query` and applies the response unless a newer request was
    /// issued while it was in flight. Failures leave the previous view in
    /// place.
    async fn issue(&self, query: ContactListQuery) -> ApiResult<SyncOutcome> {
        let seq = {
            let mut state = self.state();
            state.query = query.clone();
            state.last_issued_text = Some(query.q.clone().unwrap_or_default());
            state.issued_seq += 1;
            state.in_flight += 1;
            state.issued_seq
        };

        let result = self.api.search_contacts(query).await;

        let mut state = self.state();
        state.in_flight -= 1;
        match result {
            Ok(view) => {
                if seq > state.applied_seq {
                    state.applied_seq = seq;
                    state.view = view;
                    Ok(SyncOutcome::Applied)
                } else {
                    Ok(SyncOutcome::Discarded)
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Synthetic first event: loads the given view state directly, without
    /// debouncing.
    pub async fn mount(&self, query: ContactListQuery) -> ApiResult<SyncOutcome> {
        self.issue(query).await
    }

    /// Page or sort change. Keeps the current search text.
    pub async fn pager_sort(&self, event: PagerSortEvent) -> ApiResult<SyncOutcome> {
        let query = {
            let state = self.state();
            let mut query = state.query.clone();
            query.page = event.page();
            query.per_page = event.rows.max(1);
            query.sort_by = event
                .sort_field
                .as_deref()
                .map(SortField::parse)
                .unwrap_or_default();
            query.order = SortOrder::from_code(event.sort_order);
            query
        };
        self.issue(query).await
    }

    /// Raw keystroke from the search input. Debounced, duplicate-suppressed,
    /// and page-resetting: a new filter invalidates the old page position
    /// while the sort is preserved.
    pub async fn search_input(&self, text: &str) -> ApiResult<SyncOutcome> {
        let text = text.trim().to_string();
        let generation = {
            let mut state = self.state();
            state.typed_seq += 1;
            state.typed_seq
        };

        tokio::time::sleep(SEARCH_DEBOUNCE).await;

        let query = {
            let state = self.state();
            if state.typed_seq != generation {
                return Ok(SyncOutcome::Superseded);
            }
            if state.last_issued_text.as_deref() == Some(text.as_str()) {
                return Ok(SyncOutcome::Duplicate);
            }
            let mut query = state.query.clone();
            query.page = 1;
            query.q = (!text.is_empty()).then_some(text);
            query
        };
        self.issue(query).await
    }

    /// Refresh after a contact was deleted: re-request the current query,
    /// and if the page fell beyond the new page count, request page 1.
    pub async fn refresh_after_delete(&self) -> ApiResult<SyncOutcome> {
        let query = self.query();
        let outcome = self.issue(query).await?;

        let rewind = {
            let state = self.state();
            state.view.contacts.is_empty() && state.query.page > 1
        };
        if rewind {
            let mut query = self.query();
            query.page = 1;
            return self.issue(query).await;
        }
        Ok(outcome)
    }
}

/// Per-user registry of list controllers, keyed by account id. Controllers
/// live for the duration of the session and are dropped on logout.
pub struct SyncRegistry<A> {
    inner: Mutex<HashMap<String, Arc<ListSync<A>>>>,
}

impl<A> SyncRegistry<A> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the controller for `key`, creating it with `make` on first
    /// use.
    pub fn get_or_create(&self, key: &str, make: impl FnOnce() -> ListSync<A>) -> Arc<ListSync<A>> {
        let mut map = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.entry(key.to_string())
            .or_insert_with(|| Arc::new(make()))
            .clone()
    }

    /// Drops the controller for `key`, if any.
    pub fn remove(&self, key: &str) {
        let mut map = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map.remove(key);
    }
}

impl<A> Default for SyncRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}
