//! HTTP route handlers and shared template helpers.

use actix_session::Session;
use actix_web::http::header;
use actix_web::HttpResponse;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::api::http::HttpApi;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;

pub mod api;
pub mod auth;
pub mod contact;
pub mod main;

/// Session key holding the light/dark preference.
pub const THEME_SESSION_KEY: &str = "theme";

/// Maps a flash level onto the alert style used by the templates.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// 303 redirect to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Renders `template` or logs and answers 500 when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render {template}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Theme preference stored in the cookie session, defaulting to light.
pub fn current_theme(session: &Session) -> String {
    session
        .get::<String>(THEME_SESSION_KEY)
        .ok()
        .flatten()
        .unwrap_or_else(|| "light".to_string())
}

/// Context shared by every page: pending alerts, the signed-in user (when
/// any), the active navigation entry, and the theme.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
    theme: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("theme", theme);
    if let Some(user) = user {
        context.insert("current_user", user);
    }
    context
}

/// API client acting on behalf of the signed-in user.
pub(crate) fn user_api(
    http: &reqwest::Client,
    config: &ServerConfig,
    user: &AuthenticatedUser,
) -> HttpApi {
    HttpApi::new(http.clone(), &config.api_base_url).with_bearer(&user.token)
}
