//! DTO modules that bridge services with templates and the JSON table API.

pub mod api;
pub mod contact;
pub mod main;
