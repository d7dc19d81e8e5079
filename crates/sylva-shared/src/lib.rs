//! # Sylva Shared
//!
//! Wire types shared by the gateway, the API clients and the backend:
//! the `{ data, meta }` envelope, RFC 7807 error bodies and request/response DTOs.

pub mod content;
pub mod dto;
pub mod garden;
pub mod plants;
pub mod response;

pub use dto::{Role, UserProfile};
pub use response::{Envelope, ErrorResponse, Meta, PaginationMeta};
