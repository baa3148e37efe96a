//! Food listing model.

use serde::{Deserialize, Serialize};

use super::{is_email, require_non_empty, trimmed};
use crate::errors::AppError;

/// A donor-submitted food listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Food {
    #[serde(rename = "_id")]
    pub id: String,
    pub food_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_image: Option<String>,
    pub food_quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donar_name: Option<String>,
    pub donator_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donator_image: Option<String>,
    pub food_status: String,
}

impl Food {
    /// Whether replacing this listing with `input` would change nothing.
    pub fn same_as(&self, input: &FoodInput) -> bool {
        self.food_name == input.food_name
            && self.food_image == input.food_image
            && self.food_quantity == input.food_quantity
            && self.pickup_location == input.pickup_location
            && self.expired_date == input.expired_date
            && self.additional_notes == input.additional_notes
            && self.donar_name == input.donar_name
            && self.donator_email == input.donator_email
            && self.donator_image == input.donator_image
            && self.food_status == input.food_status
    }
}

/// Request body for creating or replacing a listing.
///
/// Fields outside this set are dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodInput {
    pub food_name: String,
    #[serde(default)]
    pub food_image: Option<String>,
    pub food_quantity: i64,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub expired_date: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub donar_name: Option<String>,
    #[serde(deserialize_with = "trimmed")]
    pub donator_email: String,
    #[serde(default)]
    pub donator_image: Option<String>,
    #[serde(default = "default_food_status")]
    pub food_status: String,
}

fn default_food_status() -> String {
    "available".to_string()
}

impl FoodInput {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty(&self.food_name, "food_name")?;
        if !is_email(&self.donator_email) {
            return Err(AppError::Validation(
                "donator_email must be a valid email address".to_string(),
            ));
        }
        if self.food_quantity < 0 {
            return Err(AppError::Validation(
                "food_quantity must not be negative".to_string(),
            ));
        }
        require_non_empty(&self.food_status, "food_status")
    }

    /// Build the stored listing under the given id.
    pub fn into_food(self, id: String) -> Food {
        Food {
            id,
            food_name: self.food_name,
            food_image: self.food_image,
            food_quantity: self.food_quantity,
            pickup_location: self.pickup_location,
            expired_date: self.expired_date,
            additional_notes: self.additional_notes,
            donar_name: self.donar_name,
            donator_email: self.donator_email,
            donator_image: self.donator_image,
            food_status: self.food_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> FoodInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_and_unknown_fields() {
        let food = input(json!({
            "food_name": "Rice",
            "food_quantity": 5,
            "donator_email": "a@x.com",
            "is_admin": true
        }));
        assert_eq!(food.food_status, "available");
        assert!(food.food_image.is_none());
        assert!(food.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let blank_name = input(json!({
            "food_name": "  ",
            "food_quantity": 1,
            "donator_email": "a@x.com"
        }));
        assert!(matches!(blank_name.validate(), Err(AppError::Validation(_))));

        let bad_email = input(json!({
            "food_name": "Rice",
            "food_quantity": 1,
            "donator_email": "nobody"
        }));
        assert!(matches!(bad_email.validate(), Err(AppError::Validation(_))));

        let negative = input(json!({
            "food_name": "Rice",
            "food_quantity": -2,
            "donator_email": "a@x.com"
        }));
        assert!(matches!(negative.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_serializes_id_as_underscore_id() {
        let food = input(json!({
            "food_name": "Bread",
            "food_quantity": 3,
            "donator_email": "b@x.com"
        }))
        .into_food("abc".to_string());

        let value = serde_json::to_value(&food).unwrap();
        assert_eq!(value["_id"], "abc");
        assert!(value.get("id").is_none());
        assert!(value.get("food_image").is_none());
    }

    #[test]
    fn test_same_as() {
        let raw = json!({
            "food_name": "Soup",
            "food_quantity": 2,
            "donator_email": "c@x.com",
            "pickup_location": "Hall B"
        });
        let food = input(raw.clone()).into_food("id-1".to_string());
        assert!(food.same_as(&input(raw)));

        let changed = input(json!({
            "food_name": "Soup",
            "food_quantity": 3,
            "donator_email": "c@x.com",
            "pickup_location": "Hall B"
        }));
        assert!(!food.same_as(&changed));
    }
}
