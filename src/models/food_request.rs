//! Food request model.
//!
//! A request carries a denormalized copy of the listing it claims. Nothing
//! keeps the copy in sync when the listing changes.

use chrono::Utc;
use serde::{Deserialize, Serialize, Serializer};

use super::{is_email, require_non_empty, trimmed};
use crate::errors::AppError;

/// A recipient's claim against a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donar_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donar_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    pub user_email: String,
    pub request_date: String,
    #[serde(serialize_with = "serialize_amount")]
    pub donation_money: f64,
    pub status: String,
}

/// The fields a requester sees when listing their own requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodRequestSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub donar_name: Option<String>,
    pub donar_email: Option<String>,
    pub pickup_location: Option<String>,
    pub expired_date: Option<String>,
    pub request_date: String,
    #[serde(serialize_with = "serialize_amount")]
    pub donation_money: f64,
    pub status: String,
}

/// Whole amounts go out as integers, the way clients send them.
fn serialize_amount<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if amount.fract() == 0.0 && amount.abs() < 9.0e15 {
        serializer.serialize_i64(*amount as i64)
    } else {
        serializer.serialize_f64(*amount)
    }
}

/// Request body for submitting a food request.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodRequestInput {
    #[serde(default)]
    pub food_id: Option<String>,
    #[serde(default)]
    pub food_name: Option<String>,
    #[serde(default)]
    pub food_image: Option<String>,
    #[serde(default)]
    pub donar_name: Option<String>,
    #[serde(default)]
    pub donar_email: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub expired_date: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(deserialize_with = "trimmed")]
    pub user_email: String,
    #[serde(default)]
    pub request_date: Option<String>,
    #[serde(default)]
    pub donation_money: f64,
    #[serde(default = "default_request_status")]
    pub status: String,
}

fn default_request_status() -> String {
    "pending".to_string()
}

impl FoodRequestInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if !is_email(&self.user_email) {
            return Err(AppError::Validation(
                "user_email must be a valid email address".to_string(),
            ));
        }
        if !self.donation_money.is_finite() || self.donation_money < 0.0 {
            return Err(AppError::Validation(
                "donation_money must be a non-negative number".to_string(),
            ));
        }
        require_non_empty(&self.status, "status")
    }

    /// Build the stored request under the given id, stamping the request
    /// date when the client left it out.
    pub fn into_request(self, id: String) -> FoodRequest {
        FoodRequest {
            id,
            food_id: self.food_id,
            food_name: self.food_name,
            food_image: self.food_image,
            donar_name: self.donar_name,
            donar_email: self.donar_email,
            pickup_location: self.pickup_location,
            expired_date: self.expired_date,
            additional_notes: self.additional_notes,
            user_email: self.user_email,
            request_date: self
                .request_date
                .unwrap_or_else(|| Utc::now().to_rfc3339()),
            donation_money: self.donation_money,
            status: self.status,
        }
    }
}

/// Request body for `PATCH /api/v1/food-request/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

impl StatusUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty(&self.status, "status")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let input: FoodRequestInput = serde_json::from_value(json!({
            "user_email": "r@x.com",
            "donar_email": "d@x.com"
        }))
        .unwrap();
        assert!(input.validate().is_ok());

        let request = input.into_request("req-1".to_string());
        assert_eq!(request.status, "pending");
        assert_eq!(request.donation_money, 0.0);
        assert!(chrono::DateTime::parse_from_rfc3339(&request.request_date).is_ok());
    }

    #[test]
    fn test_keeps_client_request_date() {
        let input: FoodRequestInput = serde_json::from_value(json!({
            "user_email": "r@x.com",
            "request_date": "2024-01-02"
        }))
        .unwrap();
        assert_eq!(input.into_request("x".into()).request_date, "2024-01-02");
    }

    #[test]
    fn test_validation_failures() {
        let bad_email: FoodRequestInput =
            serde_json::from_value(json!({ "user_email": "nope" })).unwrap();
        assert!(matches!(bad_email.validate(), Err(AppError::Validation(_))));

        let negative: FoodRequestInput = serde_json::from_value(json!({
            "user_email": "r@x.com",
            "donation_money": -1.5
        }))
        .unwrap();
        assert!(matches!(negative.validate(), Err(AppError::Validation(_))));

        let blank = StatusUpdate {
            status: " ".to_string(),
        };
        assert!(matches!(blank.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_donation_amount_wire_format() {
        let whole: FoodRequestInput = serde_json::from_value(json!({
            "user_email": "r@x.com",
            "donation_money": 12
        }))
        .unwrap();
        let value = serde_json::to_value(whole.into_request("a".into())).unwrap();
        assert_eq!(value["donation_money"], json!(12));
        assert!(value["donation_money"].is_i64());

        let fractional: FoodRequestInput = serde_json::from_value(json!({
            "user_email": "r@x.com",
            "donation_money": 12.5
        }))
        .unwrap();
        let value = serde_json::to_value(fractional.into_request("b".into())).unwrap();
        assert_eq!(value["donation_money"], json!(12.5));
    }

    #[test]
    fn test_user_email_is_trimmed() {
        let input: FoodRequestInput =
            serde_json::from_value(json!({ "user_email": "  r@x.com " })).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.into_request("c".into()).user_email, "r@x.com");
    }
}
