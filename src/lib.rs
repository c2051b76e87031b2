pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use tokio::sync::Mutex;

use db::RecordStore;
use error::AppError;
use services::{inventory::Inventory, menu_editor::MenuEditor, menu_generation::MenuGenerator};

/// Application state shared across all handlers.
///
/// The inventory and the menu editor are stateful; the mutexes serialize
/// the UI-triggered operations on them.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub inventory: Arc<Mutex<Inventory>>,
    pub menu: Arc<Mutex<MenuEditor>>,
    pub generator: Option<Arc<MenuGenerator>>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, generator: Option<Arc<MenuGenerator>>) -> Self {
        Self {
            inventory: Arc::new(Mutex::new(Inventory::new(Arc::clone(&store)))),
            menu: Arc::new(Mutex::new(MenuEditor::new(Arc::clone(&store)))),
            store,
            generator,
        }
    }

    /// Mirrors the ingredient list and the latest menu from the store.
    pub async fn load(&self) -> Result<(), AppError> {
        self.inventory.lock().await.load().await?;
        self.menu.lock().await.load_latest().await?;
        Ok(())
    }
}
