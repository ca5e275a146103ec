//! Domain aggregates exposed by the contacts front-end.

pub mod contact;
pub mod types;
pub mod user;
