//! HTTP middleware for the front-end routes.

use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::{StatusCode, header};
use actix_web::{Error, HttpResponse};

/// Turns 401 responses into a redirect to the sign-in page so that
/// protected pages degrade to the login flow instead of a bare error.
pub struct RedirectUnauthorized;

impl<S, B> Transform<S, ServiceRequest> for RedirectUnauthorized
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RedirectUnauthorizedMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RedirectUnauthorizedMiddleware { service }))
    }
}

pub struct RedirectUnauthorizedMiddleware<S> {
    service: S,
}

fn signin_redirect<B>() -> HttpResponse<EitherBody<B>> {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/auth/signin"))
        .finish()
        .map_into_right_body()
}

impl<S, B> Service<ServiceRequest> for RedirectUnauthorizedMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let (http_req, payload) = req.into_parts();
        let fut = self
            .service
            .call(ServiceRequest::from_parts(http_req.clone(), payload));
        Box::pin(async move {
            match fut.await {
                Ok(response) if response.status() == StatusCode::UNAUTHORIZED => {
                    let (req, _) = response.into_parts();
                    Ok(ServiceResponse::new(req, signin_redirect()))
                }
                Ok(response) => Ok(response.map_into_left_body()),
                // Failed extractors (e.g. a missing or expired session)
                // surface as errors rather than responses.
                Err(err) if err.as_response_error().status_code() == StatusCode::UNAUTHORIZED => {
                    Ok(ServiceResponse::new(http_req, signin_redirect()))
                }
                Err(err) => Err(err),
            }
        })
    }
}
