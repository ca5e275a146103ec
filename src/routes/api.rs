use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::api::http::HttpApi;
use crate::dto::api::{SearchParams, TableParams};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::user_api;
use crate::services::ServiceError;
use crate::services::api as api_service;
use crate::sync::{ListSync, SyncRegistry};

/// Pager/sort event from the table widget.
#[get("/v1/contacts")]
pub async fn api_v1_contacts(
    params: web::Query<TableParams>,
    user: AuthenticatedUser,
    registry: web::Data<SyncRegistry<HttpApi>>,
    http: web::Data<reqwest::Client>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let sync = registry.get_or_create(&user.id, || {
        ListSync::new(user_api(&http, &server_config, &user))
    });

    match api_service::table_event(&sync, params.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => HttpResponse::BadGateway().json(json!({ "error": err.to_string() })),
    }
}

/// Search keystroke. Answers 204 when the event did not change the view,
/// so the widget keeps showing its current page.
#[get("/v1/contacts/search")]
pub async fn api_v1_contacts_search(
    params: web::Query<SearchParams>,
    user: AuthenticatedUser,
    registry: web::Data<SyncRegistry<HttpApi>>,
    http: web::Data<reqwest::Client>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let sync = registry.get_or_create(&user.id, || {
        ListSync::new(user_api(&http, &server_config, &user))
    });

    match api_service::search_event(&sync, &params.q).await {
        Ok(Some(response)) => HttpResponse::Ok().json(response),
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => HttpResponse::BadGateway().json(json!({ "error": err.to_string() })),
    }
}
