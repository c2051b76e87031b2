use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub available: bool,
    /// Persisted display position. Not unique; ties fall back to `created_at`.
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller on insert; `id` and `created_at` come from the store.
#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub available: bool,
    pub order: i32,
}

/// Partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct IngredientPatch {
    pub name: Option<String>,
    pub available: Option<bool>,
    pub order: Option<i32>,
}

impl IngredientPatch {
    pub fn order(order: i32) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    pub fn available(available: bool) -> Self {
        Self {
            available: Some(available),
            ..Self::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Body for POST /ingredients.
#[derive(Debug, Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
}

/// Body for PATCH /ingredients/{id}.
#[derive(Debug, Deserialize)]
pub struct RenameIngredientRequest {
    pub name: String,
}

/// Body for POST /ingredients/reorder.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub from: usize,
    pub to: usize,
    /// Filter active in the caller's view, if any.
    #[serde(default)]
    pub q: Option<String>,
}

/// Query params for GET /ingredients.
#[derive(Debug, Deserialize)]
pub struct IngredientListQuery {
    #[serde(default)]
    pub q: Option<String>,
}
