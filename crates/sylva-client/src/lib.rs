//! # Sylva Client
//!
//! Concrete implementations of the ports defined in `sylva-core`, plus the
//! API clients built on them.
//!
//! ## Feature Flags
//!
//! - `http` (default) - reqwest-backed [`transport::ReqwestTransport`]
//!   (`--no-default-features` builds without it; bring your own `HttpTransport`)

pub mod content;
pub mod debounce;
pub mod envelope;
pub mod garden;
pub mod plant_bible;
pub mod session;
pub mod store;
pub mod transport;

#[cfg(test)]
mod testing;

pub use content::{ArticleQuery, ContentClient};
pub use debounce::{Debouncer, SearchDebouncer};
pub use garden::GardenClient;
pub use plant_bible::{PlantBibleClient, SpeciesQuery};
pub use session::{AuthApi, RefreshOutcome, SessionManager};
pub use store::{FileSessionStore, InMemorySessionStore};

#[cfg(feature = "http")]
pub use transport::ReqwestTransport;
