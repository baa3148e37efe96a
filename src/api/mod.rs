//! REST API module.
//!
//! Handlers return bare JSON bodies; failures go out through [`AppError`]'s envelope.

mod auth;
mod food_requests;
mod foods;

pub use auth::*;
pub use food_requests::*;
pub use foods::*;

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Response type for every handler.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Body returned by the session endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
}

/// `?email=` filter for the per-user listings.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: Option<String>,
}

impl EmailQuery {
    /// The filter value, or a bad request when it is absent or blank.
    pub fn require(&self) -> Result<&str, AppError> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::BadRequest("email query parameter is required".to_string()))
    }
}

/// Reject path ids the store could never have assigned.
pub fn parse_id(id: &str) -> Result<String, AppError> {
    uuid::Uuid::parse_str(id)
        .map(|u| u.to_string())
        .map_err(|_| AppError::BadRequest(format!("Invalid id: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = uuid::Uuid::new_v4().to_string();
        assert_eq!(parse_id(&id).unwrap(), id);
        assert_eq!(parse_id(&id.to_uppercase()).unwrap(), id);
        assert!(matches!(parse_id("42"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_email_query_require() {
        let present = EmailQuery {
            email: Some(" a@x.com ".to_string()),
        };
        assert_eq!(present.require().unwrap(), "a@x.com");

        let blank = EmailQuery {
            email: Some("".to_string()),
        };
        assert!(matches!(blank.require(), Err(AppError::BadRequest(_))));

        let absent = EmailQuery { email: None };
        assert!(matches!(absent.require(), Err(AppError::BadRequest(_))));
    }
}
