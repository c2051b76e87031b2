use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::ingredient::{
        CreateIngredientRequest, IngredientListQuery, RenameIngredientRequest, ReorderRequest,
    },
    AppState,
};

/// GET /ingredients?q=...: reloads from the store, then filters for display.
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(params): Query<IngredientListQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let query = params.q.unwrap_or_default();
    let mut inventory = state.inventory.lock().await;
    inventory
        .load()
        .await
        .map_err(AppError::into_response_parts)?;

    Ok(Json(json!({
        "items": inventory.filtered(&query),
        "reorder_enabled": inventory.reorder_allowed(&query),
    })))
}

/// POST /ingredients: a blank name is accepted and ignored (204).
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(body): Json<CreateIngredientRequest>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let added = state
        .inventory
        .lock()
        .await
        .add(&body.name)
        .await
        .map_err(AppError::into_response_parts)?;

    Ok(match added {
        Some(item) => (StatusCode::CREATED, Json(json!(item))).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// PATCH /ingredients/{id}
pub async fn rename_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<RenameIngredientRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut inventory = state.inventory.lock().await;
    inventory
        .rename(id, &body.name)
        .await
        .map(|item| Json(json!(item)))
        .map_err(AppError::into_response_parts)
}

/// POST /ingredients/{id}/toggle
pub async fn toggle_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut inventory = state.inventory.lock().await;
    inventory
        .toggle_availability(id)
        .await
        .map(|item| Json(json!(item)))
        .map_err(AppError::into_response_parts)
}

/// DELETE /ingredients/{id}
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut inventory = state.inventory.lock().await;
    inventory
        .remove(id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(AppError::into_response_parts)
}

/// POST /ingredients/reorder: refused while the caller's filter hides items.
pub async fn reorder_ingredients(
    State(state): State<AppState>,
    Json(body): Json<ReorderRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut inventory = state.inventory.lock().await;
    if let Some(query) = body.q.as_deref() {
        if !inventory.reorder_allowed(query) {
            return Err(AppError::ReorderBlocked.into_response_parts());
        }
    }

    inventory
        .reorder(body.from, body.to)
        .await
        .map_err(AppError::into_response_parts)?;

    Ok(Json(json!({ "items": inventory.items() })))
}
