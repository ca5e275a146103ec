//! Access layer for the remote Contacts API.
//!
//! The rest of the application talks to the remote service through the
//! traits below so that services and the list controller can be tested
//! against mocks. [`http::HttpApi`] is the production implementation.

use async_trait::async_trait;
use serde::Serialize;

use crate::api::errors::ApiResult;
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::types::ContactId;
use crate::domain::user::{NewUser, User};

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Page size requested when the user has not chosen one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Column the contact table is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortField {
    FirstName,
    LastName,
    Email,
    Phone,
    App,
}

impl SortField {
    /// Field name used on the wire and by the table widget.
    pub fn as_wire(self) -> &'static str {
        match self {
            SortField::FirstName => "firstName",
            SortField::LastName => "lastName",
            SortField::Email => "email",
            SortField::Phone => "phone",
            SortField::App => "app",
        }
    }

    /// Parses a table-widget field name, falling back to the default sort
    /// column for unknown input.
    pub fn parse(value: &str) -> Self {
        match value {
            "firstName" => SortField::FirstName,
            "email" => SortField::Email,
            "phone" => SortField::Phone,
            "app" => SortField::App,
            _ => SortField::LastName,
        }
    }
}

impl Default for SortField {
    fn default() -> Self {
        SortField::LastName
    }
}

/// Sort direction for the contact table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_wire(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Maps the table widget order code (+1 ascending, -1 descending).
    /// Absent or unknown codes default to ascending.
    pub fn from_code(code: Option<i8>) -> Self {
        match code {
            Some(code) if code < 0 => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    /// Parses a wire direction string, defaulting to ascending.
    pub fn parse(value: &str) -> Self {
        match value {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// View state of the contact table: free-text query, 1-based page, page
/// size, and sort. Created with defaults and mutated only by user
/// interaction; the server never writes it back.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactListQuery {
    pub q: Option<String>,
    pub page: usize,
    pub per_page: usize,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl Default for ContactListQuery {
    fn default() -> Self {
        Self {
            q: None,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
            sort_by: SortField::default(),
            order: SortOrder::default(),
        }
    }
}

impl ContactListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, q: impl Into<String>) -> Self {
        let q = q.into().trim().to_string();
        self.q = (!q.is_empty()).then_some(q);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.max(1);
        self
    }

    pub fn sort(mut self, sort_by: SortField, order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.order = order;
        self
    }
}

/// One page of contacts together with the pagination counters derived
/// from the response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub contacts: Vec<Contact>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

impl SearchResult {
    /// Builds a result page, deriving `total_pages = ceil(total / limit)`.
    /// The wire value for the page count is ignored; this derivation is the
    /// single source of truth.
    pub fn new(contacts: Vec<Contact>, total: usize, page: usize, limit: usize) -> Self {
        let total_pages = if limit > 0 { total.div_ceil(limit) } else { 0 };
        Self {
            contacts,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Empty view shown before the first request settles.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 1, DEFAULT_PAGE_SIZE)
    }
}

#[async_trait]
pub trait ContactReader {
    async fn search_contacts(&self, query: ContactListQuery) -> ApiResult<SearchResult>;
    async fn get_contact_by_id(&self, id: &ContactId) -> ApiResult<Option<Contact>>;
}

#[async_trait]
pub trait ContactWriter {
    async fn create_contact(&self, new_contact: &NewContact) -> ApiResult<Contact>;
    async fn update_contact(&self, id: &ContactId, updates: &UpdateContact) -> ApiResult<Contact>;
    async fn delete_contact(&self, id: &ContactId) -> ApiResult<String>;
}

/// Session established by a successful remote login.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub user: User,
}

#[async_trait]
pub trait AuthApi {
    /// Logs in with form-encoded credentials and resolves the account
    /// behind the fresh token.
    async fn login(&self, username: &str, password: &str) -> ApiResult<AuthSession>;
    async fn register(&self, new_user: &NewUser) -> ApiResult<User>;
    async fn current_user(&self) -> ApiResult<User>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceil_of_total_over_limit() {
        assert_eq!(SearchResult::new(vec![], 23, 1, 10).total_pages, 3);
        assert_eq!(SearchResult::new(vec![], 30, 1, 10).total_pages, 3);
        assert_eq!(SearchResult::new(vec![], 1, 1, 10).total_pages, 1);
        assert_eq!(SearchResult::new(vec![], 0, 1, 10).total_pages, 0);
        assert_eq!(SearchResult::new(vec![], 10, 1, 0).total_pages, 0);
    }

    #[test]
    fn query_defaults_match_initial_view() {
        let query = ContactListQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, DEFAULT_PAGE_SIZE);
        assert_eq!(query.sort_by, SortField::LastName);
        assert_eq!(query.order, SortOrder::Asc);
        assert!(query.q.is_none());
    }

    #[test]
    fn search_builder_drops_blank_text() {
        assert!(ContactListQuery::new().search("   ").q.is_none());
        assert_eq!(
            ContactListQuery::new().search(" ada ").q.as_deref(),
            Some("ada")
        );
    }

    #[test]
    fn sort_order_code_mapping() {
        assert_eq!(SortOrder::from_code(Some(1)), SortOrder::Asc);
        assert_eq!(SortOrder::from_code(Some(-1)), SortOrder::Desc);
        assert_eq!(SortOrder::from_code(None), SortOrder::Asc);
    }
}
