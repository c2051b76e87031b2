use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    ingredient::{Ingredient, IngredientPatch, NewIngredient},
    menu::MenuSnapshot,
};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A single-row operation matched zero rows.
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

/// Typed CRUD access to the two record kinds the application persists.
///
/// The store is the source of truth; implementations keep no cache of their own.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All ingredients ordered by `order`, then `created_at`, then `id`.
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, StoreError>;

    async fn insert_ingredient(&self, new: &NewIngredient) -> Result<Ingredient, StoreError>;

    /// Applies the non-empty fields of `patch` and returns the stored row.
    async fn update_ingredient(
        &self,
        id: i64,
        patch: &IngredientPatch,
    ) -> Result<Ingredient, StoreError>;

    async fn delete_ingredient(&self, id: i64) -> Result<(), StoreError>;

    /// Most recent snapshot by `created_at`, or `None` when the table is empty.
    async fn latest_menu(&self) -> Result<Option<MenuSnapshot>, StoreError>;

    async fn insert_menu(&self, content: &str) -> Result<MenuSnapshot, StoreError>;

    async fn update_menu(&self, id: i64, content: &str) -> Result<MenuSnapshot, StoreError>;

    /// Cheap connectivity probe used by the health check.
    async fn ping(&self) -> Result<(), StoreError>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn RecordStore) {}
};
