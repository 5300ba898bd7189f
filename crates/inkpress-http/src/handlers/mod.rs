//! Request handlers, one module per feature area.

pub mod admin;
pub mod auth;
pub mod comments;
pub mod pages;
pub mod posts;
pub mod profile;
pub mod reactions;
