use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::ContactId;

/// Postal address embedded in every contact record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// A contact as returned by the remote API.
///
/// Audit fields are assigned by the server and never written by this
/// application.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    /// Application tag the record belongs to.
    pub app: String,
    pub created_by: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Payload for creating a contact; the identifier does not exist yet.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub app: String,
}

impl NewContact {
    #[must_use]
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        address: Address,
        app: String,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
            address: Address {
                street: address.street.trim().to_string(),
                city: address.city.trim().to_string(),
                state: address.state.trim().to_string(),
                zip: address.zip.trim().to_string(),
            },
            app: app.trim().to_string(),
        }
    }
}

/// Payload for updating an existing contact.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub app: String,
}

impl From<NewContact> for UpdateContact {
    fn from(payload: NewContact) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            app: payload.app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contact_trims_fields() {
        let payload = NewContact::new(
            " Ada ".into(),
            " Lovelace ".into(),
            " ada@example.com ".into(),
            " 555 ".into(),
            Address {
                street: " 1 Main St ".into(),
                city: " Boston ".into(),
                state: " MA ".into(),
                zip: " 02110 ".into(),
            },
            " contacts-app ".into(),
        );
        assert_eq!(payload.first_name, "Ada");
        assert_eq!(payload.address.street, "1 Main St");
    }
}
