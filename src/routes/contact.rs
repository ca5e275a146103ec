use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::http::HttpApi;
use crate::dto::contact::{APPS, DEFAULT_APP, STATES};
use crate::forms::contact::ContactForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, current_theme, redirect, render_template, user_api};
use crate::services::ServiceError;
use crate::services::api as api_service;
use crate::services::contact::{self as contact_service, SaveOutcome};
use crate::sync::{ListSync, SyncRegistry};

fn form_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    theme: &str,
) -> tera::Context {
    let mut context = base_context(flash_messages, Some(user), "contacts", theme);
    context.insert("states", STATES);
    context.insert("apps", APPS);
    context.insert("default_app", DEFAULT_APP);
    context
}

#[get("/contact/new")]
pub async fn new_contact(
    user: AuthenticatedUser,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let theme = current_theme(&session);
    let context = form_context(&flash_messages, &user, &theme);
    render_template(&tera, "contact/form.html", &context)
}

#[get("/contact/{contact_id}")]
pub async fn show_contact(
    contact_id: web::Path<String>,
    user: AuthenticatedUser,
    http: web::Data<reqwest::Client>,
    server_config: web::Data<ServerConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let api = user_api(&http, &server_config, &user);

    let contact = match contact_service::load_contact(&api, &contact_id).await {
        Ok(contact) => contact,
        Err(ServiceError::Unauthorized) => {
            return HttpResponse::Unauthorized().finish();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Contact not found.").send();
            return redirect("/");
        }
        Err(err) => {
            log::error!("Failed to load contact: {err}");
            FlashMessage::error("Failed to load contact").send();
            return redirect("/");
        }
    };

    let theme = current_theme(&session);
    let mut context = form_context(&flash_messages, &user, &theme);
    context.insert("contact", &contact);
    render_template(&tera, "contact/form.html", &context)
}

#[post("/contact/save")]
pub async fn save_contact(
    user: AuthenticatedUser,
    http: web::Data<reqwest::Client>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<ContactForm>,
) -> impl Responder {
    let api = user_api(&http, &server_config, &user);

    // Where to send the user back for corrections.
    let form_url = match form.contact_id() {
        Some(id) => format!("/contact/{id}"),
        None => "/contact/new".to_string(),
    };

    match contact_service::save_contact(&api, &form).await {
        Ok(SaveOutcome::Created(_)) => {
            FlashMessage::success("Contact created successfully").send();
            redirect("/")
        }
        Ok(SaveOutcome::Updated(_)) => {
            FlashMessage::success("Contact updated successfully").send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::warning(message).send();
            redirect(&form_url)
        }
        Err(err) => {
            log::error!("Failed to save contact: {err}");
            let message = if form.contact_id().is_some() {
                "Failed to update contact"
            } else {
                "Failed to create contact"
            };
            FlashMessage::error(message).send();
            redirect(&form_url)
        }
    }
}

#[post("/contact/{contact_id}/delete")]
pub async fn delete_contact(
    contact_id: web::Path<String>,
    user: AuthenticatedUser,
    registry: web::Data<SyncRegistry<HttpApi>>,
    http: web::Data<reqwest::Client>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let api = user_api(&http, &server_config, &user);

    match contact_service::delete_contact(&api, &contact_id).await {
        Ok(_) => {
            FlashMessage::success("Contact deleted successfully").send();
            // One refresh at the current query parameters; the controller
            // rewinds to page 1 if the page fell out of range.
            let sync = registry.get_or_create(&user.id, || {
                ListSync::new(user_api(&http, &server_config, &user))
            });
            if let Err(err) = api_service::refresh_after_delete(&sync).await {
                log::error!("Failed to refresh contacts after delete: {err}");
            }
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to delete contact: {err}");
            FlashMessage::error("Failed to delete contact").send();
            redirect("/")
        }
    }
}
