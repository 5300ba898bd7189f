//! SQLite persistence layer for inkpress.
//!
//! One repository module per aggregate; every function takes the pool
//! explicitly and returns [`StoreResult`]. Multi-row writes that must be
//! atomic (registration, account updates, post + category joins) run in
//! a transaction.

pub mod comments;
pub mod db;
pub mod error;
pub mod pages;
pub mod posts;
pub mod reactions;
pub mod users;

pub use db::{connect, connect_in_memory};
pub use error::{StoreError, StoreResult};
