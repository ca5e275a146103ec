use serde::Deserialize;
use validator::Validate;

use crate::domain::user::NewUser;

#[derive(Debug, Deserialize, Validate)]
/// Credentials submitted by the sign-in form.
pub struct SignInForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Account details submitted by the sign-up form.
pub struct SignUpForm {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
}

impl From<&SignUpForm> for NewUser {
    fn from(form: &SignUpForm) -> Self {
        NewUser {
            email: form.email.trim().to_string(),
            password: form.password.clone(),
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
        }
    }
}
