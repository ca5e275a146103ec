use validator::Validate;

use crate::api::{AuthApi, AuthSession};
use crate::domain::user::{NewUser, User};
use crate::forms::auth::{SignInForm, SignUpForm};
use crate::services::{ServiceError, ServiceResult};

/// Validates the sign-in form and exchanges the credentials for a remote
/// session (bearer token plus the resolved account).
pub async fn sign_in<A>(api: &A, form: &SignInForm) -> ServiceResult<AuthSession>
where
    A: AuthApi + ?Sized,
{
    if form.validate().is_err() {
        return Err(ServiceError::Form(
            "Please enter email and password".to_string(),
        ));
    }

    api.login(form.username.trim(), &form.password)
        .await
        .map_err(|err| {
            log::error!("Login failed: {err}");
            ServiceError::from(err)
        })
}

/// Validates the sign-up form and registers the account with the remote.
pub async fn sign_up<A>(api: &A, form: &SignUpForm) -> ServiceResult<User>
where
    A: AuthApi + ?Sized,
{
    if form.validate().is_err() {
        return Err(ServiceError::Form(
            "Please fill in all required fields".to_string(),
        ));
    }

    let new_user = NewUser::from(form);
    api.register(&new_user).await.map_err(|err| {
        log::error!("Registration failed: {err}");
        ServiceError::from(err)
    })
}
