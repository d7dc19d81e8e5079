//! Route access control.
//!
//! Decides, per request, whether a page is served, or the visitor is sent to
//! the login page or back home. Pure functions of the path and the session
//! cookies; nothing is remembered between requests.

mod matcher;
mod policy;

pub use matcher::{is_gated_path, matches_prefix};
pub use policy::{AccessDecision, AccessPolicy, Requirement, RouteRule};
