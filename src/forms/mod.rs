//! Form definitions backing the front-end routes.

pub mod auth;
pub mod contact;
