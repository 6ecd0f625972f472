use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::session::SessionStore;

/// Observer authentication. Observers see raw documents but are never
/// recorded as members and never attributed any action.
#[derive(Clone)]
pub struct AdminService {
    sessions: SessionStore,
    password_hash: Option<String>,
}

impl AdminService {
    /// `password_hash` is the bcrypt hash from the environment; `None`
    /// disables the observer surface entirely.
    pub fn new(sessions: SessionStore, password_hash: Option<String>) -> Self {
        Self {
            sessions,
            password_hash,
        }
    }

    pub fn login(&self, password: &str) -> Result<(Uuid, DateTime<Utc>)> {
        let Some(hash) = &self.password_hash else {
            return Err(AppError::Forbidden(
                "Observer access is not configured".to_string(),
            ));
        };

        let matches = bcrypt::verify(password, hash)
            .map_err(|e| AppError::Internal(format!("configured password hash is invalid: {}", e)))?;
        if !matches {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(self.sessions.issue())
    }

    pub fn logout(&self, token: &Uuid) {
        self.sessions.revoke(token);
    }
}
