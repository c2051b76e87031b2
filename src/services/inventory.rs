use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::{
    db::RecordStore,
    error::AppError,
    models::ingredient::{Ingredient, IngredientPatch, NewIngredient},
    services::metrics,
};

/// Ordered ingredient list mirrored from the store.
///
/// The list is pulled from the store on first use, so a failed startup load
/// never leaves writes working from an empty copy. New ingredients are
/// appended: they get `max(order) + 1` and cost a single insert. Reorders are committed locally before they are persisted; if any
/// order update fails the local list is thrown away and reloaded.
pub struct Inventory {
    store: Arc<dyn RecordStore>,
    items: Vec<Ingredient>,
    loaded: bool,
}

impl Inventory {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            items: Vec::new(),
            loaded: false,
        }
    }

    pub fn items(&self) -> &[Ingredient] {
        &self.items
    }

    /// Replaces local state wholesale with the store's ordered list.
    pub async fn load(&mut self) -> Result<&[Ingredient], AppError> {
        self.items = self.store.list_ingredients().await?;
        self.loaded = true;
        Ok(&self.items)
    }

    async fn ensure_loaded(&mut self) -> Result<(), AppError> {
        if !self.loaded {
            self.load().await?;
        }
        Ok(())
    }

    /// Blank names are ignored without touching the store.
    pub async fn add(&mut self, name: &str) -> Result<Option<Ingredient>, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        self.ensure_loaded().await?;

        let order = self
            .items
            .iter()
            .map(|i| i.order)
            .max()
            .map_or(0, |max| max + 1);
        let item = self
            .store
            .insert_ingredient(&NewIngredient {
                name: name.to_string(),
                available: true,
                order,
            })
            .await?;

        metrics::record_ingredient_mutation("add");
        info!("Added ingredient {} ({}) at order {}", item.id, item.name, item.order);
        self.items.push(item.clone());
        Ok(Some(item))
    }

    /// Flips availability and replaces the local row with the store's echo.
    pub async fn toggle_availability(&mut self, id: i64) -> Result<Ingredient, AppError> {
        self.ensure_loaded().await?;
        let index = self.position(id)?;
        let patch = IngredientPatch::available(!self.items[index].available);
        let updated = self.store.update_ingredient(id, &patch).await?;

        metrics::record_ingredient_mutation("toggle");
        self.replace(updated.clone());
        Ok(updated)
    }

    pub async fn rename(&mut self, id: i64, name: &str) -> Result<Ingredient, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidRequest(
                "ingredient name must not be blank".into(),
            ));
        }
        self.ensure_loaded().await?;
        self.position(id)?;
        let updated = self
            .store
            .update_ingredient(id, &IngredientPatch::name(name))
            .await?;

        metrics::record_ingredient_mutation("rename");
        self.replace(updated.clone());
        Ok(updated)
    }

    /// Deletes the row; the remaining items keep their persisted `order`.
    pub async fn remove(&mut self, id: i64) -> Result<(), AppError> {
        self.store.delete_ingredient(id).await?;
        metrics::record_ingredient_mutation("remove");
        self.items.retain(|i| i.id != id);
        Ok(())
    }

    /// Moves the item at `from` to `to` and persists every item's new index.
    ///
    /// The moved list is committed locally before any order update is sent.
    /// All updates are issued together; on any failure the local list is
    /// reloaded from the store and the failure is returned.
    pub async fn reorder(&mut self, from: usize, to: usize) -> Result<(), AppError> {
        self.ensure_loaded().await?;
        let len = self.items.len();
        if from >= len || to >= len {
            return Err(AppError::InvalidRequest(format!(
                "reorder indices {from} -> {to} out of range for {len} items"
            )));
        }
        if self.items[from].id == self.items[to].id {
            return Ok(());
        }

        let moved = self.items.remove(from);
        self.items.insert(to, moved);

        let updates = self.items.iter().enumerate().map(|(index, item)| {
            let patch = IngredientPatch::order(index as i32);
            let store = Arc::clone(&self.store);
            let id = item.id;
            async move { store.update_ingredient(id, &patch).await }
        });
        let results = join_all(updates).await;

        let failure = results.into_iter().find_map(Result::err);
        let Some(err) = failure else {
            metrics::record_ingredient_mutation("reorder");
            return Ok(());
        };

        warn!("Reorder {} -> {} failed to persist ({}), reloading from store", from, to, err);
        metrics::REORDER_RECONCILIATIONS_COUNTER.inc();
        self.load().await?;
        Err(err.into())
    }

    /// Case-insensitive substring match on the name. Does not touch the list.
    pub fn filtered(&self, query: &str) -> Vec<&Ingredient> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|i| needle.is_empty() || i.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Drag reordering only makes sense against the full list.
    pub fn reorder_allowed(&self, query: &str) -> bool {
        self.filtered(query).len() == self.items.len()
    }

    fn position(&self, id: i64) -> Result<usize, AppError> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or(AppError::NotFound("ingredient"))
    }

    fn replace(&mut self, updated: Ingredient) {
        if let Some(slot) = self.items.iter_mut().find(|i| i.id == updated.id) {
            *slot = updated;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::db::MemoryStore;

    fn ingredient(id: i64, name: &str, order: i32) -> Ingredient {
        Ingredient {
            id,
            name: name.to_string(),
            available: true,
            order,
            created_at: Utc::now(),
        }
    }

    async fn loaded(names: &[&str]) -> Inventory {
        let items = names
            .iter()
            .enumerate()
            .map(|(i, n)| ingredient(i as i64 + 1, n, i as i32))
            .collect();
        let mut inventory = Inventory::new(Arc::new(MemoryStore::with_ingredients(items)));
        inventory.load().await.unwrap();
        inventory
    }

    fn names(items: &[&Ingredient]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[tokio::test]
    async fn test_filter_is_case_insensitive() {
        let inventory = loaded(&["Tomatoes", "Potatoes", "Onions"]).await;
        assert_eq!(names(&inventory.filtered("tom")), vec!["Tomatoes"]);
        assert_eq!(names(&inventory.filtered("TOM")), vec!["Tomatoes"]);
        assert_eq!(inventory.filtered("").len(), 3);
        assert_eq!(inventory.items().len(), 3);
    }

    #[tokio::test]
    async fn test_reorder_allowed_only_without_narrowing_filter() {
        let inventory = loaded(&["Tomatoes", "Potatoes", "Onions"]).await;
        assert!(inventory.reorder_allowed(""));
        assert!(inventory.reorder_allowed("  "));
        assert!(inventory.reorder_allowed("o"));
        assert!(!inventory.reorder_allowed("tom"));
    }

    #[tokio::test]
    async fn test_reorder_rejects_out_of_range() {
        let mut inventory = loaded(&["A", "B"]).await;
        let err = inventory.reorder(0, 2).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
}
