use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::{Address, NewContact, UpdateContact};
use crate::domain::types::ContactId;

/// Form data for creating or updating a contact.
///
/// Every field is required by presence only; email and phone formats are
/// owned by the remote service and deliberately not validated here.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    /// Identifier of the contact being edited; empty when creating.
    #[serde(default)]
    pub id: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub street: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub zip: String,
    #[validate(length(min = 1))]
    pub app: String,
}

impl ContactForm {
    /// Identifier of the contact being edited, when present.
    pub fn contact_id(&self) -> Option<ContactId> {
        ContactId::new(self.id.as_str()).ok()
    }

    pub fn to_new_contact(&self) -> NewContact {
        NewContact::new(
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.phone.clone(),
            Address {
                street: self.street.clone(),
                city: self.city.clone(),
                state: self.state.clone(),
                zip: self.zip.clone(),
            },
            self.app.clone(),
        )
    }

    pub fn to_update_contact(&self) -> UpdateContact {
        self.to_new_contact().into()
    }
}
