//! Domain entities - the session and the user it belongs to.

mod session;

pub use session::{CookieSession, Session};
pub use sylva_shared::dto::{Role, UserProfile};
