//! Mock API implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::api::errors::ApiResult;
use crate::api::{AuthApi, AuthSession, ContactListQuery, ContactReader, ContactWriter, SearchResult};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::types::ContactId;
use crate::domain::user::{NewUser, User};

mock! {
    pub Api {}

    #[async_trait]
    impl ContactReader for Api {
        async fn search_contacts(&self, query: ContactListQuery) -> ApiResult<SearchResult>;
        async fn get_contact_by_id(&self, id: &ContactId) -> ApiResult<Option<Contact>>;
    }

    #[async_trait]
    impl ContactWriter for Api {
        async fn create_contact(&self, new_contact: &NewContact) -> ApiResult<Contact>;
        async fn update_contact(&self, id: &ContactId, updates: &UpdateContact) -> ApiResult<Contact>;
        async fn delete_contact(&self, id: &ContactId) -> ApiResult<String>;
    }

    #[async_trait]
    impl AuthApi for Api {
        async fn login(&self, username: &str, password: &str) -> ApiResult<AuthSession>;
        async fn register(&self, new_user: &NewUser) -> ApiResult<User>;
        async fn current_user(&self) -> ApiResult<User>;
    }
}
