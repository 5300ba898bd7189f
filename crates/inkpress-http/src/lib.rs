//! HTTP surface for inkpress.
//!
//! Handlers are deliberately thin: they resolve the explicit actor,
//! validate the form, apply the authorization policy, and delegate to
//! the store. All error mapping lives in [`error::ApiError`].

pub mod error;
pub mod extract;
pub mod forms;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
