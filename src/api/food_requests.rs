//! Food request endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};

use super::{parse_id, ApiResult, EmailQuery};
use crate::auth::AuthUser;
use crate::models::{
    DeleteResult, FoodRequestInput, FoodRequestSummary, InsertResult, StatusUpdate, UpdateResult,
};
use crate::AppState;

/// POST /api/v1/food-request - Submit a request.
pub async fn create_food_request(
    State(state): State<AppState>,
    payload: Result<Json<FoodRequestInput>, JsonRejection>,
) -> ApiResult<InsertResult> {
    let Json(input) = payload?;
    input.validate()?;

    let request = state.repo.create_request(input).await?;
    tracing::info!(id = %request.id, requester = %request.user_email, "Created food request");

    Ok(Json(InsertResult::new(request.id)))
}

/// GET /api/v1/food-request?email= - List a requester's requests.
pub async fn list_food_requests_by_requester(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Vec<FoodRequestSummary>> {
    let email = query.require()?;
    tracing::debug!(requested_by = %user.email, requester = email, "Listing food requests");

    Ok(Json(state.repo.list_requests_by_requester(email).await?))
}

/// PATCH /api/v1/food-request/{id} - Overwrite a request's status.
pub async fn update_food_request_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusUpdate>, JsonRejection>,
) -> ApiResult<UpdateResult> {
    let id = parse_id(&id)?;
    let Json(update) = payload?;
    update.validate()?;

    let result = state.repo.update_request_status(&id, &update.status).await?;
    tracing::info!(id = %id, status = %update.status, "Updated food request status");

    Ok(Json(result))
}

/// DELETE /api/v1/food-request/{id} - Delete a request.
pub async fn delete_food_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<DeleteResult> {
    let id = parse_id(&id)?;

    let result = state.repo.delete_request(&id).await?;
    tracing::info!(id = %id, "Deleted food request");

    Ok(Json(result))
}
