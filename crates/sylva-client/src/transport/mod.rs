//! HTTP transport implementations.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::ReqwestTransport;
