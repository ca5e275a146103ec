use actix_session::Session;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::api::http::HttpApi;
use crate::domain::contact::Contact;
use crate::dto::main::IndexQuery;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::models::config::ServerConfig;
use crate::routes::{
    THEME_SESSION_KEY, base_context, current_theme, redirect, render_template, user_api,
};
use crate::services::ServiceError;
use crate::services::main as main_service;
use crate::sync::{ListSync, SyncRegistry};

#[get("/")]
pub async fn show_index(
    params: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    registry: web::Data<SyncRegistry<HttpApi>>,
    http: web::Data<reqwest::Client>,
    server_config: web::Data<ServerConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let sync = registry.get_or_create(&user.id, || {
        ListSync::new(user_api(&http, &server_config, &user))
    });

    let theme = current_theme(&session);
    let mut context = base_context(&flash_messages, Some(&user), "contacts", &theme);

    match main_service::load_index_page(&sync, params.into_inner()).await {
        Ok(data) => {
            context.insert("contacts", &data.contacts);
            context.insert("total", &data.total);
            if let Some(q) = &data.search_query {
                context.insert("search_query", q);
            }
        }
        Err(ServiceError::Unauthorized) => {
            return HttpResponse::Unauthorized().finish();
        }
        Err(err) => {
            log::error!("Failed to load index page: {err}");
            // Keep the page usable: render the chrome with an inline alert
            // and an empty table instead of failing the whole request.
            let mut alerts = context
                .get("alerts")
                .and_then(|v| v.as_array().cloned())
                .unwrap_or_default();
            alerts.push(serde_json::json!(["Failed to load contacts", "danger"]));
            context.insert("alerts", &alerts);
            context.insert("contacts", &Paginated::<Contact>::new(Vec::new(), 1, 0));
            context.insert("total", &0);
        }
    }

    render_template(&tera, "main/index.html", &context)
}

#[post("/theme")]
pub async fn toggle_theme(req: HttpRequest, session: Session) -> impl Responder {
    let next = match current_theme(&session).as_str() {
        "dark" => "light",
        _ => "dark",
    };
    if let Err(err) = session.insert(THEME_SESSION_KEY, next) {
        log::error!("Failed to store theme preference: {err}");
    }

    let back = req
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("/");
    redirect(back)
}
