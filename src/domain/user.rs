use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record returned by the remote `/auth/me` endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Display name shown in the layout header.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Registration payload sent to the remote `/auth/register` endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}
