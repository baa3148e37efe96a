//! Configuration module for the Hunger Relief backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;

/// Frontend origins allowed to call the API with credentials when
/// `HR_CORS_ORIGINS` is not set.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://hunger-relief0.web.app",
    "https://hunger-relief0.firebaseapp.com",
];

/// Default token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign session tokens (required)
    pub secret_key: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Production deployments get `Secure` + `SameSite=None` cookies
    pub production: bool,
    /// CORS allow-list; empty means permissive
    pub cors_origins: Vec<String>,
    /// Session token lifetime in seconds
    pub token_ttl_secs: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let secret_key = env::var("HR_SECRET_KEY").ok().filter(|s| !s.is_empty());

        let db_path = env::var("HR_DB_PATH")
            .unwrap_or_else(|_| "./data/hunger-relief.sqlite".to_string())
            .into();

        let mut bind_addr: SocketAddr = env::var("HR_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse()
            .expect("Invalid HR_BIND_ADDR format");

        // Hosting platforms hand out the port separately
        if let Ok(port) = env::var("PORT") {
            bind_addr.set_port(port.parse().expect("Invalid PORT value"));
        }

        let log_level = env::var("HR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let production = env::var("HR_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let cors_origins = match env::var("HR_CORS_ORIGINS") {
            Ok(list) => parse_origins(&list).expect("Invalid HR_CORS_ORIGINS value"),
            Err(_) => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let token_ttl_secs = env::var("HR_TOKEN_TTL_SECS")
            .map(|v| parse_ttl(&v).expect("Invalid HR_TOKEN_TTL_SECS value"))
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Self {
            secret_key,
            db_path,
            bind_addr,
            log_level,
            production,
            cors_origins,
            token_ttl_secs,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
///
/// Any malformed entry rejects the whole list.
fn parse_origins(list: &str) -> Result<Vec<String>, String> {
    list.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(|origin| {
            let has_scheme = origin.starts_with("http://") || origin.starts_with("https://");
            if !has_scheme || HeaderValue::from_str(origin).is_err() {
                return Err(format!("not an http(s) origin: {:?}", origin));
            }
            Ok(origin.to_string())
        })
        .collect()
}

/// Token lifetime must be positive, or every token is born expired.
fn parse_ttl(value: &str) -> Result<i64, String> {
    match value.trim().parse::<i64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        Ok(secs) => Err(format!("must be positive, got {}", secs)),
        Err(e) => Err(e.to_string()),
    }
}
