use validator::Validate;

use crate::api::{ContactReader, ContactWriter};
use crate::domain::contact::Contact;
use crate::domain::types::ContactId;
use crate::forms::contact::ContactForm;
use crate::services::{ServiceError, ServiceResult};

/// Whether a submitted form created a new contact or updated an existing
/// one; the routes pick the flash text from this.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(Contact),
    Updated(Contact),
}

/// Loads the contact shown by the edit form.
pub async fn load_contact<A>(api: &A, id: &str) -> ServiceResult<Contact>
where
    A: ContactReader + ?Sized,
{
    let id = ContactId::new(id).map_err(|_| ServiceError::NotFound)?;
    match api.get_contact_by_id(&id).await? {
        Some(contact) => Ok(contact),
        None => Err(ServiceError::NotFound),
    }
}

/// Validates the contact form and issues a create or an update depending
/// on whether the form carries an identifier. Validation failures return
/// before anything is sent to the remote.
pub async fn save_contact<A>(api: &A, form: &ContactForm) -> ServiceResult<SaveOutcome>
where
    A: ContactWriter + ?Sized,
{
    if form.validate().is_err() {
        return Err(ServiceError::Form(
            "Please fill in all required fields".to_string(),
        ));
    }

    match form.contact_id() {
        Some(id) => {
            let updates = form.to_update_contact();
            let contact = api.update_contact(&id, &updates).await.map_err(|err| {
                log::error!("Failed to update contact {id}: {err}");
                ServiceError::from(err)
            })?;
            Ok(SaveOutcome::Updated(contact))
        }
        None => {
            let new_contact = form.to_new_contact();
            let contact = api.create_contact(&new_contact).await.map_err(|err| {
                log::error!("Failed to create contact: {err}");
                ServiceError::from(err)
            })?;
            Ok(SaveOutcome::Created(contact))
        }
    }
}

/// Deletes a contact, returning the remote's confirmation message.
pub async fn delete_contact<A>(api: &A, id: &str) -> ServiceResult<String>
where
    A: ContactWriter + ?Sized,
{
    let id = ContactId::new(id).map_err(|_| ServiceError::NotFound)?;
    api.delete_contact(&id).await.map_err(|err| {
        log::error!("Failed to delete contact {id}: {err}");
        ServiceError::from(err)
    })
}
