use async_trait::async_trait;
use sqlx::PgPool;

use super::store::{RecordStore, StoreError};
use crate::models::{
    ingredient::{Ingredient, IngredientPatch, NewIngredient},
    menu::MenuSnapshot,
};

/// PostgreSQL-backed record store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, StoreError> {
        let items = sqlx::query_as::<_, Ingredient>(
            r#"SELECT id, name, available, "order", created_at
               FROM ingredients
               ORDER BY "order", created_at, id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn insert_ingredient(&self, new: &NewIngredient) -> Result<Ingredient, StoreError> {
        let item = sqlx::query_as::<_, Ingredient>(
            r#"INSERT INTO ingredients (name, available, "order")
               VALUES ($1, $2, $3)
               RETURNING id, name, available, "order", created_at"#,
        )
        .bind(&new.name)
        .bind(new.available)
        .bind(new.order)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    async fn update_ingredient(
        &self,
        id: i64,
        patch: &IngredientPatch,
    ) -> Result<Ingredient, StoreError> {
        let item = sqlx::query_as::<_, Ingredient>(
            r#"UPDATE ingredients
               SET name      = COALESCE($1, name),
                   available = COALESCE($2, available),
                   "order"   = COALESCE($3, "order")
               WHERE id = $4
               RETURNING id, name, available, "order", created_at"#,
        )
        .bind(&patch.name)
        .bind(patch.available)
        .bind(patch.order)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    async fn delete_ingredient(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn latest_menu(&self) -> Result<Option<MenuSnapshot>, StoreError> {
        let menu = sqlx::query_as::<_, MenuSnapshot>(
            "SELECT id, content, created_at
             FROM menu_snapshots
             ORDER BY created_at DESC, id DESC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(menu)
    }

    async fn insert_menu(&self, content: &str) -> Result<MenuSnapshot, StoreError> {
        let menu = sqlx::query_as::<_, MenuSnapshot>(
            "INSERT INTO menu_snapshots (content)
             VALUES ($1)
             RETURNING id, content, created_at",
        )
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(menu)
    }

    async fn update_menu(&self, id: i64, content: &str) -> Result<MenuSnapshot, StoreError> {
        let menu = sqlx::query_as::<_, MenuSnapshot>(
            "UPDATE menu_snapshots
             SET content = $1
             WHERE id = $2
             RETURNING id, content, created_at",
        )
        .bind(content)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(menu)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
