use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::menu::{EditMealRequest, MenuSnapshot, WeeklyMenu},
    services::{
        menu_editor::MenuState,
        menu_render::{list_view, print_document, table_view},
    },
    AppState,
};

fn menu_body(snapshot: &MenuSnapshot, menu: &WeeklyMenu) -> Value {
    json!({
        "snapshot": snapshot,
        "list": list_view(menu),
        "table": table_view(menu),
    })
}

/// GET /menus/latest
pub async fn get_latest(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut editor = state.menu.lock().await;
    let current = editor
        .load_latest()
        .await
        .map_err(AppError::into_response_parts)?;

    match current {
        MenuState::Empty => Ok(Json(json!({ "snapshot": null }))),
        MenuState::Ready { snapshot, menu } => Ok(Json(menu_body(snapshot, menu))),
        MenuState::Malformed { snapshot, error } => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": error.to_string(), "snapshot_id": snapshot.id })),
        )),
    }
}

/// GET /menus/latest/print: landscape table for the browser print dialog.
pub async fn print_latest(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, Json<Value>)> {
    let mut editor = state.menu.lock().await;
    editor
        .load_latest()
        .await
        .map_err(AppError::into_response_parts)?;
    let (_, menu) = editor.current().map_err(AppError::into_response_parts)?;
    Ok(Html(print_document(menu)))
}

/// POST /menus/generate
pub async fn generate_menu(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let generator = state
        .generator
        .clone()
        .ok_or_else(|| AppError::GenerationDisabled.into_response_parts())?;

    let snapshot = generator
        .generate()
        .await
        .map_err(AppError::into_response_parts)?;
    state.menu.lock().await.show(snapshot.clone());

    Ok((StatusCode::CREATED, Json(json!(snapshot))))
}

/// PUT /menus/{id}/meals: replace one cell and persist the whole week.
pub async fn edit_meal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<EditMealRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut editor = state.menu.lock().await;
    editor
        .save_edit(id, body.day, body.slot, &body.text)
        .await
        .map_err(AppError::into_response_parts)?;

    let (snapshot, menu) = editor.current().map_err(AppError::into_response_parts)?;
    Ok(Json(menu_body(snapshot, menu)))
}
