//! Core domain types for the inkpress blogging platform.
//!
//! Everything here is framework-free: row structs, the authorization
//! policy, slug derivation, form validation primitives, and the
//! environment-driven application configuration.

pub mod config;
pub mod model;
pub mod policy;
pub mod slug;
pub mod validate;

pub use config::{AppConfig, ConfigError};
pub use model::{
    About, Category, CollaborateRequest, Comment, Favorite, Post, PostStatus, Profile, User,
};
pub use policy::{can_modify, Actor};
