//! Database repository for CRUD operations.
//!
//! Every operation touches a single table; nothing spans both collections.

use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    DeleteResult, Food, FoodInput, FoodRequest, FoodRequestInput, FoodRequestSummary,
    UpdateResult,
};

const FOOD_COLUMNS: &str = "id, food_name, food_image, food_quantity, pickup_location, expired_date, additional_notes, donar_name, donator_email, donator_image, food_status";

const REQUEST_COLUMNS: &str = "id, food_id, food_name, food_image, donar_name, donar_email, pickup_location, expired_date, additional_notes, user_email, request_date, donation_money, status";

const REQUEST_SUMMARY_COLUMNS: &str = "id, donar_name, donar_email, pickup_location, expired_date, request_date, donation_money, status";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial query to confirm the store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ==================== FOOD OPERATIONS ====================

    /// List all listings in insertion order.
    pub async fn list_foods(&self) -> Result<Vec<Food>, AppError> {
        let rows = sqlx::query(&format!("SELECT {FOOD_COLUMNS} FROM foods ORDER BY rowid"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(food_from_row).collect())
    }

    /// Get a listing by ID.
    pub async fn get_food(&self, id: &str) -> Result<Option<Food>, AppError> {
        let row = sqlx::query(&format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(food_from_row))
    }

    /// List listings whose donor email matches exactly.
    pub async fn list_foods_by_donor(&self, email: &str) -> Result<Vec<Food>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {FOOD_COLUMNS} FROM foods WHERE donator_email = ? ORDER BY rowid"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(food_from_row).collect())
    }

    /// Create a new listing.
    pub async fn create_food(&self, input: FoodInput) -> Result<Food, AppError> {
        let food = input.into_food(uuid::Uuid::new_v4().to_string());

        sqlx::query(&format!(
            "INSERT INTO foods ({FOOD_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&food.id)
        .bind(&food.food_name)
        .bind(&food.food_image)
        .bind(food.food_quantity)
        .bind(&food.pickup_location)
        .bind(&food.expired_date)
        .bind(&food.additional_notes)
        .bind(&food.donar_name)
        .bind(&food.donator_email)
        .bind(&food.donator_image)
        .bind(&food.food_status)
        .execute(&self.pool)
        .await?;

        Ok(food)
    }

    /// Overwrite every field of a listing.
    pub async fn replace_food(&self, id: &str, input: &FoodInput) -> Result<UpdateResult, AppError> {
        let existing = self
            .get_food(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Food {} not found", id)))?;

        if existing.same_as(input) {
            return Ok(UpdateResult::unchanged());
        }

        let result = sqlx::query(
            "UPDATE foods SET food_name = ?, food_image = ?, food_quantity = ?, pickup_location = ?, expired_date = ?, additional_notes = ?, donar_name = ?, donator_email = ?, donator_image = ?, food_status = ? WHERE id = ?"
        )
        .bind(&input.food_name)
        .bind(&input.food_image)
        .bind(input.food_quantity)
        .bind(&input.pickup_location)
        .bind(&input.expired_date)
        .bind(&input.additional_notes)
        .bind(&input.donar_name)
        .bind(&input.donator_email)
        .bind(&input.donator_image)
        .bind(&input.food_status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // Deleted between the read and the write
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Food {} not found", id)));
        }

        Ok(UpdateResult::modified())
    }

    /// Delete a listing.
    pub async fn delete_food(&self, id: &str) -> Result<DeleteResult, AppError> {
        let result = sqlx::query("DELETE FROM foods WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Food {} not found", id)));
        }

        Ok(DeleteResult::new(result.rows_affected()))
    }

    // ==================== FOOD REQUEST OPERATIONS ====================

    /// Get a request by ID.
    pub async fn get_request(&self, id: &str) -> Result<Option<FoodRequest>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {REQUEST_COLUMNS} FROM food_requests WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(request_from_row))
    }

    /// List a requester's requests, projected to the summary fields.
    pub async fn list_requests_by_requester(
        &self,
        email: &str,
    ) -> Result<Vec<FoodRequestSummary>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {REQUEST_SUMMARY_COLUMNS} FROM food_requests WHERE user_email = ? ORDER BY rowid"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(request_summary_from_row).collect())
    }

    /// Create a new request.
    pub async fn create_request(&self, input: FoodRequestInput) -> Result<FoodRequest, AppError> {
        let request = input.into_request(uuid::Uuid::new_v4().to_string());

        sqlx::query(&format!(
            "INSERT INTO food_requests ({REQUEST_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&request.id)
        .bind(&request.food_id)
        .bind(&request.food_name)
        .bind(&request.food_image)
        .bind(&request.donar_name)
        .bind(&request.donar_email)
        .bind(&request.pickup_location)
        .bind(&request.expired_date)
        .bind(&request.additional_notes)
        .bind(&request.user_email)
        .bind(&request.request_date)
        .bind(request.donation_money)
        .bind(&request.status)
        .execute(&self.pool)
        .await?;

        Ok(request)
    }

    /// Overwrite a request's status. Any transition is accepted.
    pub async fn update_request_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<UpdateResult, AppError> {
        let result = sqlx::query("UPDATE food_requests SET status = ? WHERE id = ? AND status <> ?")
            .bind(status)
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            return Ok(UpdateResult::modified());
        }

        // Either missing or already in that status
        match self.get_request(id).await? {
            Some(_) => Ok(UpdateResult::unchanged()),
            None => Err(AppError::NotFound(format!("Food request {} not found", id))),
        }
    }

    /// Delete a request.
    pub async fn delete_request(&self, id: &str) -> Result<DeleteResult, AppError> {
        let result = sqlx::query("DELETE FROM food_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Food request {} not found", id)));
        }

        Ok(DeleteResult::new(result.rows_affected()))
    }
}

// Helper functions for row conversion

fn food_from_row(row: &sqlx::sqlite::SqliteRow) -> Food {
    Food {
        id: row.get("id"),
        food_name: row.get("food_name"),
        food_image: row.get("food_image"),
        food_quantity: row.get("food_quantity"),
        pickup_location: row.get("pickup_location"),
        expired_date: row.get("expired_date"),
        additional_notes: row.get("additional_notes"),
        donar_name: row.get("donar_name"),
        donator_email: row.get("donator_email"),
        donator_image: row.get("donator_image"),
        food_status: row.get("food_status"),
    }
}

fn request_from_row(row: &sqlx::sqlite::SqliteRow) -> FoodRequest {
    FoodRequest {
        id: row.get("id"),
        food_id: row.get("food_id"),
        food_name: row.get("food_name"),
        food_image: row.get("food_image"),
        donar_name: row.get("donar_name"),
        donar_email: row.get("donar_email"),
        pickup_location: row.get("pickup_location"),
        expired_date: row.get("expired_date"),
        additional_notes: row.get("additional_notes"),
        user_email: row.get("user_email"),
        request_date: row.get("request_date"),
        donation_money: row.get("donation_money"),
        status: row.get("status"),
    }
}

fn request_summary_from_row(row: &sqlx::sqlite::SqliteRow) -> FoodRequestSummary {
    FoodRequestSummary {
        id: row.get("id"),
        donar_name: row.get("donar_name"),
        donar_email: row.get("donar_email"),
        pickup_location: row.get("pickup_location"),
        expired_date: row.get("expired_date"),
        request_date: row.get("request_date"),
        donation_money: row.get("donation_money"),
        status: row.get("status"),
    }
}
