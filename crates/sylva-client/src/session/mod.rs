//! Session lifecycle: auth calls, persistence and request contexts.

mod api;
mod manager;

pub use api::AuthApi;
pub use manager::{RefreshOutcome, SessionManager};
