//! `reqwest` implementation of the Contacts API traits.
//!
//! Wire payloads use the remote service's camelCase field names and are
//! mapped to the snake_case domain types at this boundary. The remote
//! identifier arrives as `_id` on search/read responses and as `id` on
//! create responses; both spellings are accepted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::errors::{ApiError, ApiResult};
use crate::api::{AuthApi, AuthSession, ContactListQuery, ContactReader, ContactWriter, SearchResult};
use crate::domain::contact::{Address, Contact, NewContact, UpdateContact};
use crate::domain::types::ContactId;
use crate::domain::user::{NewUser, User};

/// HTTP client for the remote Contacts API.
///
/// Cheap to clone and to rebuild per request: the inner [`reqwest::Client`]
/// is shared, only the base URL and bearer token are owned.
#[derive(Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl HttpApi {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer: None,
        }
    }

    /// Returns a copy of this client that authenticates with the token.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Maps non-success statuses onto the error taxonomy; 401 clears the
    /// session upstream, 404 becomes [`ApiError::NotFound`].
    async fn check(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ContactReader for HttpApi {
    async fn search_contacts(&self, query: ContactListQuery) -> ApiResult<SearchResult> {
        let mut params = vec![
            ("page", query.page.to_string()),
            ("limit", query.per_page.to_string()),
            ("sort_by", query.sort_by.as_wire().to_string()),
            ("order", query.order.as_wire().to_string()),
        ];
        if let Some(q) = &query.q {
            params.push(("q", q.clone()));
        }

        let response = self
            .authorized(self.http.get(self.url("/contacts/search")).query(&params))
            .send()
            .await?;
        let wire: WireSearchResponse = Self::check(response).await?.json().await?;
        wire.into_domain()
    }

    async fn get_contact_by_id(&self, id: &ContactId) -> ApiResult<Option<Contact>> {
        let response = self
            .authorized(self.http.get(self.url(&format!("/contacts/{id}"))))
            .send()
            .await?;
        match Self::check(response).await {
            Ok(response) => {
                let wire: WireContact = response.json().await?;
                Ok(Some(wire.into_domain()?))
            }
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl ContactWriter for HttpApi {
    async fn create_contact(&self, new_contact: &NewContact) -> ApiResult<Contact> {
        let response = self
            .authorized(
                self.http
                    .post(self.url("/contacts/"))
                    .json(&WireContactPayload::from(new_contact)),
            )
            .send()
            .await?;
        let wire: WireContact = Self::check(response).await?.json().await?;
        wire.into_domain()
    }

    async fn update_contact(&self, id: &ContactId, updates: &UpdateContact) -> ApiResult<Contact> {
        let response = self
            .authorized(
                self.http
                    .put(self.url(&format!("/contacts/{id}")))
                    .json(&WireContactPayload::from(updates)),
            )
            .send()
            .await?;
        let wire: WireContact = Self::check(response).await?.json().await?;
        wire.into_domain()
    }

    async fn delete_contact(&self, id: &ContactId) -> ApiResult<String> {
        let response = self
            .authorized(self.http.delete(self.url(&format!("/contacts/{id}"))))
            .send()
            .await?;
        let wire: WireMessage = Self::check(response).await?.json().await?;
        Ok(wire.message)
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> ApiResult<AuthSession> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        let token: WireToken = Self::check(response).await?.json().await?;

        let response = self
            .http
            .get(self.url("/auth/me"))
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        let user: WireUser = Self::check(response).await?.json().await?;

        Ok(AuthSession {
            access_token: token.access_token,
            user: user.into_domain(),
        })
    }

    async fn register(&self, new_user: &NewUser) -> ApiResult<User> {
        let response = self
            .http
            .post(self.url("/auth/register"))
            .json(&WireNewUser::from(new_user))
            .send()
            .await?;
        let user: WireUser = Self::check(response).await?.json().await?;
        Ok(user.into_domain())
    }

    async fn current_user(&self) -> ApiResult<User> {
        let response = self.authorized(self.http.get(self.url("/auth/me"))).send().await?;
        let user: WireUser = Self::check(response).await?.json().await?;
        Ok(user.into_domain())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireContact {
    #[serde(rename = "_id", alias = "id")]
    id: Option<String>,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    #[serde(default)]
    address: Address,
    app: String,
    created_by: Option<String>,
    #[serde(rename = "createdDt")]
    created_at: Option<DateTime<Utc>>,
    modified_by: Option<String>,
    #[serde(rename = "modifiedDt")]
    modified_at: Option<DateTime<Utc>>,
}

impl WireContact {
    fn into_domain(self) -> ApiResult<Contact> {
        let id = self
            .id
            .ok_or_else(|| ApiError::Decode("contact record without an id".to_string()))?;
        let id = ContactId::new(id)
            .map_err(|err| ApiError::Decode(format!("invalid contact id: {err}")))?;
        Ok(Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            app: self.app,
            created_by: self.created_by,
            created_at: self.created_at,
            modified_by: self.modified_by,
            modified_at: self.modified_at,
        })
    }
}

#[derive(Deserialize)]
struct WireSearchResponse {
    contacts: Vec<WireContact>,
    total: usize,
    page: usize,
    limit: usize,
}

impl WireSearchResponse {
    fn into_domain(self) -> ApiResult<SearchResult> {
        let contacts = self
            .contacts
            .into_iter()
            .map(WireContact::into_domain)
            .collect::<ApiResult<Vec<_>>>()?;
        // total_pages is derived locally; the wire value is not trusted.
        Ok(SearchResult::new(contacts, self.total, self.page, self.limit))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireContactPayload<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    address: &'a Address,
    app: &'a str,
}

impl<'a> From<&'a NewContact> for WireContactPayload<'a> {
    fn from(payload: &'a NewContact) -> Self {
        Self {
            first_name: &payload.first_name,
            last_name: &payload.last_name,
            email: &payload.email,
            phone: &payload.phone,
            address: &payload.address,
            app: &payload.app,
        }
    }
}

impl<'a> From<&'a UpdateContact> for WireContactPayload<'a> {
    fn from(payload: &'a UpdateContact) -> Self {
        Self {
            first_name: &payload.first_name,
            last_name: &payload.last_name,
            email: &payload.email,
            phone: &payload.phone,
            address: &payload.address,
            app: &payload.app,
        }
    }
}

#[derive(Deserialize)]
struct WireMessage {
    message: String,
}

#[derive(Deserialize)]
struct WireToken {
    access_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUser {
    #[serde(alias = "_id")]
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    #[serde(rename = "createdDt")]
    created_at: Option<DateTime<Utc>>,
}

impl WireUser {
    fn into_domain(self) -> User {
        User {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireNewUser<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
}

impl<'a> From<&'a NewUser> for WireNewUser<'a> {
    fn from(payload: &'a NewUser) -> Self {
        Self {
            email: &payload.email,
            password: &payload.password,
            first_name: &payload.first_name,
            last_name: &payload.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_contact_accepts_underscore_id() {
        let contact: WireContact = serde_json::from_str(
            r#"{
                "_id": "68af3c2e",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "+1 555 0100",
                "address": {"street": "1 Main St", "city": "Boston", "state": "MA", "zip": "02110"},
                "app": "contacts-app",
                "createdBy": "admin",
                "createdDt": "2026-01-02T03:04:05Z"
            }"#,
        )
        .unwrap();
        let contact = contact.into_domain().unwrap();
        assert_eq!(contact.id.as_str(), "68af3c2e");
        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.address.city, "Boston");
        assert_eq!(contact.created_by.as_deref(), Some("admin"));
    }

    #[test]
    fn wire_contact_accepts_plain_id_from_create() {
        let contact: WireContact = serde_json::from_str(
            r#"{
                "id": "abc123",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "555",
                "app": "contacts-app"
            }"#,
        )
        .unwrap();
        assert_eq!(contact.into_domain().unwrap().id.as_str(), "abc123");
    }

    #[test]
    fn wire_contact_without_id_is_a_decode_error() {
        let contact: WireContact = serde_json::from_str(
            r#"{
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "phone": "555",
                "app": "contacts-app"
            }"#,
        )
        .unwrap();
        assert!(matches!(contact.into_domain(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn search_response_derives_total_pages() {
        let wire: WireSearchResponse = serde_json::from_str(
            r#"{"contacts": [], "total": 23, "page": 1, "limit": 10, "totalPages": 99}"#,
        )
        .unwrap();
        let result = wire.into_domain().unwrap();
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn payload_serializes_camel_case() {
        let payload = NewContact::new(
            "Ada".into(),
            "Lovelace".into(),
            "ada@example.com".into(),
            "555".into(),
            Address::default(),
            "contacts-app".into(),
        );
        let value = serde_json::to_value(WireContactPayload::from(&payload)).unwrap();
        assert!(value.get("firstName").is_some());
        assert!(value.get("first_name").is_none());
        assert!(value.get("id").is_none());
    }
}
