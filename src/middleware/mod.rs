pub mod admin_session;

pub use admin_session::{admin_session_middleware, AdminSession};
