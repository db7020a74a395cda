//! Authentication and session management

pub mod gate;
pub mod models;
pub mod password;
pub mod session;

pub use gate::{session_token, SESSION_COOKIE};
pub use models::{Role, SessionUser};
pub use password::{hash_password, verify_password};
pub use session::{Session, SessionManager};
