//! # Sylva Core
//!
//! The domain layer: session types, route access rules, listing query state,
//! form validation and the ports the client layer implements.
//! This crate performs no I/O.

pub mod access;
pub mod domain;
pub mod error;
pub mod listing;
pub mod ports;
pub mod validation;

pub use access::{AccessDecision, AccessPolicy, Requirement, RouteRule};
pub use error::{ApiError, ValidationErrors};
