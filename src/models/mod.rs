//! Data models for the Hunger Relief backend.
//!
//! Field names follow the JSON the frontend already sends, so they stay snake_case.

mod food;
mod food_request;
mod results;

pub use food::*;
pub use food_request::*;
pub use results::*;

use serde::{Deserialize, Deserializer};

use crate::errors::AppError;

/// Deserialize a string with surrounding whitespace removed, so stored
/// values match the trimmed `?email=` filters exactly.
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

/// Loose email check: something on both sides of a single `@`.
pub(crate) fn is_email(s: &str) -> bool {
    match s.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
