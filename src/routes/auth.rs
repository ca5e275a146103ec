use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::api::http::HttpApi;
use crate::forms::auth::{SignInForm, SignUpForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, current_theme, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth as auth_service;
use crate::sync::SyncRegistry;

#[get("/auth/signin")]
pub async fn show_signin(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let theme = current_theme(&session);
    let context = base_context(&flash_messages, None, "signin", &theme);
    render_template(&tera, "auth/signin.html", &context)
}

#[post("/auth/signin")]
pub async fn signin(
    req: HttpRequest,
    http: web::Data<reqwest::Client>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<SignInForm>,
) -> impl Responder {
    let api = HttpApi::new(http.get_ref().clone(), &server_config.api_base_url);

    let session = match auth_service::sign_in(&api, &form).await {
        Ok(session) => session,
        Err(ServiceError::Form(message)) => {
            FlashMessage::warning(message).send();
            return redirect("/auth/signin");
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Login failed. Please check your credentials.").send();
            return redirect("/auth/signin");
        }
        Err(err) => {
            log::error!("Login failed: {err}");
            FlashMessage::error("Login failed. Please try again later.").send();
            return redirect("/auth/signin");
        }
    };

    let user = AuthenticatedUser::new(
        session.user.id.clone(),
        session.user.email.clone(),
        session.user.full_name(),
        session.access_token.clone(),
    );
    let jwt = match user.to_jwt(&server_config.secret) {
        Ok(jwt) => jwt,
        Err(err) => {
            log::error!("Failed to sign session token: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };
    if let Err(err) = Identity::login(&req.extensions(), jwt) {
        log::error!("Failed to establish identity: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    redirect("/")
}

#[get("/auth/signup")]
pub async fn show_signup(
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let theme = current_theme(&session);
    let context = base_context(&flash_messages, None, "signup", &theme);
    render_template(&tera, "auth/signup.html", &context)
}

#[post("/auth/signup")]
pub async fn signup(
    http: web::Data<reqwest::Client>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<SignUpForm>,
) -> impl Responder {
    let api = HttpApi::new(http.get_ref().clone(), &server_config.api_base_url);

    match auth_service::sign_up(&api, &form).await {
        Ok(_) => {
            FlashMessage::success("Account created. Please sign in.").send();
            redirect("/auth/signin")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::warning(message).send();
            redirect("/auth/signup")
        }
        Err(err) => {
            log::error!("Registration failed: {err}");
            FlashMessage::error("Registration failed. Please try again.").send();
            redirect("/auth/signup")
        }
    }
}

#[post("/logout")]
pub async fn logout(
    user: AuthenticatedUser,
    identity: Identity,
    registry: web::Data<SyncRegistry<HttpApi>>,
) -> impl Responder {
    registry.remove(&user.id);
    identity.logout();
    redirect("/auth/signin")
}
