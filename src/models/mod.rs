//! Application models shared across routes.

pub mod auth;
pub mod config;
