use serde::{Deserialize, Serialize};

use crate::api::SearchResult;
use crate::domain::contact::Contact;
use crate::sync::PagerSortEvent;

/// Pager/sort event parameters sent by the table widget.
#[derive(Debug, Deserialize)]
pub struct TableParams {
    /// Offset of the first visible row.
    pub first: usize,
    /// Rows per page.
    pub rows: usize,
    pub sort_field: Option<String>,
    /// +1 ascending, -1 descending.
    pub sort_order: Option<i8>,
}

impl From<TableParams> for PagerSortEvent {
    fn from(params: TableParams) -> Self {
        PagerSortEvent {
            first: params.first,
            rows: params.rows,
            sort_field: params.sort_field,
            sort_order: params.sort_order,
        }
    }
}

/// Keystroke event parameters sent by the search input.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// JSON payload consumed by the table widget.
#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub contacts: Vec<Contact>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub loading: bool,
}

impl TableResponse {
    pub fn from_view(view: SearchResult, loading: bool) -> Self {
        Self {
            contacts: view.contacts,
            total: view.total,
            page: view.page,
            limit: view.limit,
            total_pages: view.total_pages,
            loading,
        }
    }
}
