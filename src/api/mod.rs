//! Web front end: HTML pages plus a JSON mirror of the prediction flow.
//!
//! The router is composable; `app_router()` returns a `Router` that can be
//! mounted on any axum server, and `start_server()` runs it in the
//! background.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::app_router;
pub use server::{start_server, FrontendServer, ServerSession};
pub use types::AppContext;
