/// Environment-driven application configuration
///
/// The GLM API key is read server-side only; when it is absent the service
/// runs in mock mode and serves demonstration content.
use crate::error::{AppError, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_MODEL: &str = "glm-4-flash";
const DEFAULT_ADDR: &str = "127.0.0.1:3001";
const DEFAULT_DB: &str = "meeting-planner.db";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub db_path: PathBuf,
    pub api_key: String,
    pub model: String,
}

impl AppConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = get("MEETING_PLANNER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("invalid MEETING_PLANNER_ADDR {addr}: {e}")))?;

        Ok(Self {
            bind_addr,
            db_path: PathBuf::from(
                get("MEETING_PLANNER_DB").unwrap_or_else(|| DEFAULT_DB.to_string()),
            ),
            api_key: get("GLM_API_KEY").unwrap_or_default(),
            model: get("GLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }
}
