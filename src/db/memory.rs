use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::store::{RecordStore, StoreError};
use crate::models::{
    ingredient::{Ingredient, IngredientPatch, NewIngredient},
    menu::MenuSnapshot,
};

#[derive(Default)]
struct Tables {
    ingredients: Vec<Ingredient>,
    menus: Vec<MenuSnapshot>,
    next_ingredient_id: i64,
    next_menu_id: i64,
}

/// Process-local record store.
///
/// Used when no `DATABASE_URL` is configured and by the test suite. The
/// `fail_*` switches make every matching write fail with
/// [`StoreError::Unavailable`] so callers' recovery paths can be exercised;
/// [`MemoryStore::fail_ingredient_updates_after`] lets a batch half land.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_ingredient_updates: AtomicBool,
    ingredient_update_budget: Mutex<Option<usize>>,
    fail_menu_writes: AtomicBool,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds rows as-is, bypassing the call counter.
    pub fn with_ingredients(items: Vec<Ingredient>) -> Self {
        let store = Self::default();
        {
            let mut tables = store.lock();
            tables.next_ingredient_id = items.iter().map(|i| i.id).max().unwrap_or(0);
            tables.ingredients = items;
        }
        store
    }

    pub fn fail_ingredient_updates(&self, fail: bool) {
        self.fail_ingredient_updates.store(fail, Ordering::SeqCst);
    }

    /// Accepts the next `n` ingredient updates, then rejects every later one.
    pub fn fail_ingredient_updates_after(&self, n: usize) {
        *self.budget() = Some(n);
    }

    pub fn fail_menu_writes(&self, fail: bool) {
        self.fail_menu_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of trait calls served so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn menu_count(&self) -> usize {
        self.lock().menus.len()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn budget(&self) -> MutexGuard<'_, Option<usize>> {
        self.ingredient_update_budget
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn spend_update(&self) -> Result<(), StoreError> {
        match self.budget().as_mut() {
            Some(0) => Err(StoreError::Unavailable(
                "ingredient update budget exhausted".into(),
            )),
            Some(left) => {
                *left -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, what: &str) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("{what} rejected")));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, StoreError> {
        self.record_call();
        let mut items = self.lock().ingredients.clone();
        items.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(items)
    }

    async fn insert_ingredient(&self, new: &NewIngredient) -> Result<Ingredient, StoreError> {
        self.record_call();
        let mut tables = self.lock();
        tables.next_ingredient_id += 1;
        let item = Ingredient {
            id: tables.next_ingredient_id,
            name: new.name.clone(),
            available: new.available,
            order: new.order,
            created_at: Utc::now(),
        };
        tables.ingredients.push(item.clone());
        Ok(item)
    }

    async fn update_ingredient(
        &self,
        id: i64,
        patch: &IngredientPatch,
    ) -> Result<Ingredient, StoreError> {
        self.record_call();
        Self::check(&self.fail_ingredient_updates, "ingredient update")?;
        self.spend_update()?;
        let mut tables = self.lock();
        let item = tables
            .ingredients
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(name) = &patch.name {
            item.name = name.clone();
        }
        if let Some(available) = patch.available {
            item.available = available;
        }
        if let Some(order) = patch.order {
            item.order = order;
        }
        Ok(item.clone())
    }

    async fn delete_ingredient(&self, id: i64) -> Result<(), StoreError> {
        self.record_call();
        self.lock().ingredients.retain(|i| i.id != id);
        Ok(())
    }

    async fn latest_menu(&self) -> Result<Option<MenuSnapshot>, StoreError> {
        self.record_call();
        let tables = self.lock();
        let latest = tables
            .menus
            .iter()
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            .cloned();
        Ok(latest)
    }

    async fn insert_menu(&self, content: &str) -> Result<MenuSnapshot, StoreError> {
        self.record_call();
        Self::check(&self.fail_menu_writes, "menu insert")?;
        let mut tables = self.lock();
        tables.next_menu_id += 1;
        let menu = MenuSnapshot {
            id: tables.next_menu_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        tables.menus.push(menu.clone());
        Ok(menu)
    }

    async fn update_menu(&self, id: i64, content: &str) -> Result<MenuSnapshot, StoreError> {
        self.record_call();
        Self::check(&self.fail_menu_writes, "menu update")?;
        let mut tables = self.lock();
        let menu = tables
            .menus
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound)?;
        menu.content = content.to_string();
        Ok(menu.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
