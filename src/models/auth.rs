//! Session model: a signed JWT stored in the identity cookie, carrying the
//! remote bearer token together with the display claims of the account.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Session lifetime before the user has to sign in again.
const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Remote account identifier.
    sub: String,
    email: String,
    name: String,
    /// Bearer token for the remote Contacts API.
    token: String,
    exp: usize,
}

/// The signed-in user, extracted from the identity cookie on every
/// protected route. Extraction failure yields 401, which the
/// [`crate::middleware::RedirectUnauthorized`] middleware turns into a
/// redirect to the sign-in page.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Bearer token presented to the remote Contacts API.
    #[serde(skip_serializing)]
    pub token: String,
}

impl AuthenticatedUser {
    pub fn new(id: String, email: String, name: String, token: String) -> Self {
        Self {
            id,
            email,
            name,
            token,
        }
    }

    /// Serializes the session into a signed JWT for the identity cookie.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let expiration = Utc::now() + Duration::hours(SESSION_TTL_HOURS);
        let claims = Claims {
            sub: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            token: self.token.clone(),
            exp: expiration.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Restores the session from the identity cookie JWT. Expired or
    /// tampered tokens fail and the caller treats the session as absent.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(Self {
            id: data.claims.sub,
            email: data.claims.email,
            name: data.claims.name,
            token: data.claims.token,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => identity,
            Err(_) => return ready(Err(ErrorUnauthorized("not signed in"))),
        };
        let jwt = match identity.id() {
            Ok(jwt) => jwt,
            Err(_) => return ready(Err(ErrorUnauthorized("not signed in"))),
        };
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            return ready(Err(ErrorInternalServerError("server config missing")));
        };
        match AuthenticatedUser::from_jwt(&jwt, &config.secret) {
            Ok(user) => ready(Ok(user)),
            Err(err) => {
                log::debug!("Rejecting session token: {err}");
                ready(Err(ErrorUnauthorized("session expired")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_round_trip_preserves_claims() {
        let user = AuthenticatedUser::new(
            "u1".into(),
            "ada@example.com".into(),
            "Ada Lovelace".into(),
            "remote-bearer".into(),
        );
        let jwt = user.to_jwt("secret0123456789").unwrap();
        let restored = AuthenticatedUser::from_jwt(&jwt, "secret0123456789").unwrap();
        assert_eq!(restored, user);
    }

    #[test]
    fn jwt_rejects_wrong_secret() {
        let user = AuthenticatedUser::new("u1".into(), "e".into(), "n".into(), "t".into());
        let jwt = user.to_jwt("secret-a").unwrap();
        assert!(AuthenticatedUser::from_jwt(&jwt, "secret-b").is_err());
    }
}
