//! Food listing endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

use super::{parse_id, ApiResult, EmailQuery};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{DeleteResult, Food, FoodInput, InsertResult, UpdateResult};
use crate::AppState;

/// GET /api/v1/foods - List every listing.
pub async fn list_foods(State(state): State<AppState>) -> ApiResult<Vec<Food>> {
    Ok(Json(state.repo.list_foods().await?))
}

/// GET /api/v1/food/{id} - Get a single listing.
pub async fn get_food(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Food> {
    let id = parse_id(&id)?;

    state
        .repo
        .get_food(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Food {} not found", id)))
}

/// POST /api/v1/food - Create a listing.
pub async fn create_food(
    State(state): State<AppState>,
    payload: Result<Json<FoodInput>, JsonRejection>,
) -> ApiResult<InsertResult> {
    let Json(input) = payload?;
    input.validate()?;

    let food = state.repo.create_food(input).await?;
    tracing::info!(id = %food.id, donor = %food.donator_email, "Created food listing");

    Ok(Json(InsertResult::new(food.id)))
}

/// GET /api/v1/food?email= - List a donor's listings.
pub async fn list_foods_by_donor(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Vec<Food>> {
    let email = query.require()?;
    tracing::debug!(requested_by = %user.email, donor = email, "Listing foods by donor");

    Ok(Json(state.repo.list_foods_by_donor(email).await?))
}

/// PUT /api/v1/food/{id} - Replace every field of a listing.
pub async fn replace_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<FoodInput>, JsonRejection>,
) -> ApiResult<UpdateResult> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    input.validate()?;

    let result = state.repo.replace_food(&id, &input).await?;
    tracing::info!(id = %id, modified = result.modified_count, "Replaced food listing");

    Ok(Json(result))
}

/// DELETE /api/v1/food/{id} - Delete a listing.
pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteResult> {
    let id = parse_id(&id)?;

    let result = state.repo.delete_food(&id).await?;
    tracing::info!(id = %id, "Deleted food listing");

    Ok(Json(result))
}
