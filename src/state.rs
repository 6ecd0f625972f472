use crate::admin::{AdminService, SessionStore};
use crate::db::DbPool;
use crate::group::{GroupRepository, GroupService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub session_store: SessionStore,
    pub group_repository: GroupRepository,
    pub group_service: GroupService,
    pub admin_service: AdminService,
}

#[derive(Clone)]
pub struct Config {
    pub admin_password_hash: Option<String>,
    pub session_ttl_minutes: i64,
    pub retention_days: i64,
    pub sweep_schedule: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            admin_password_hash: std::env::var("ADMIN_PASSWORD_HASH").ok(),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("SESSION_TTL_MINUTES must be a number"),
            retention_days: std::env::var("RETENTION_DAYS")
                .unwrap_or_else(|_| "730".to_string())
                .parse()
                .expect("RETENTION_DAYS must be a number"),
            sweep_schedule: std::env::var("SWEEP_SCHEDULE")
                .unwrap_or_else(|_| "0 0 3 * * *".to_string()),
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }
}
