use serde::Deserialize;

use crate::domain::contact::Contact;
use crate::pagination::Paginated;

/// Query parameters accepted by the contacts list page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Optional search string entered by the user.
    pub q: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
    /// Wire name of the sort column.
    pub sort_by: Option<String>,
    /// Sort direction, `asc` or `desc`.
    pub order: Option<String>,
}

/// Data required to render the contacts list template.
pub struct IndexPageData {
    /// Paginated page of contacts to show in the table.
    pub contacts: Paginated<Contact>,
    /// Total number of matching contacts.
    pub total: usize,
    /// Search query echoed back to the template when present.
    pub search_query: Option<String>,
}
