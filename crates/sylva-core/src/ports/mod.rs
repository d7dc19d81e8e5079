//! Ports - trait definitions for external dependencies.
//! The client crate provides the implementations.

mod session_store;
mod transport;

pub use session_store::{SessionStore, StoreError, keys};
pub use transport::{ApiRequest, FilePart, HttpTransport, Method, RawResponse, RequestBody, RequestContext, path_segment};
