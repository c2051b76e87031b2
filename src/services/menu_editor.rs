use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    db::RecordStore,
    error::AppError,
    models::menu::{Day, MealSlot, MenuSnapshot, WeeklyMenu},
    services::{
        menu_codec::{self, MalformedMenu},
        metrics,
    },
};

/// What the menu view currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuState {
    /// No snapshot has been generated yet.
    Empty,
    Ready {
        snapshot: MenuSnapshot,
        menu: WeeklyMenu,
    },
    /// Terminal until another snapshot is loaded or generated.
    Malformed {
        snapshot: MenuSnapshot,
        error: MalformedMenu,
    },
}

impl MenuState {
    fn from_snapshot(snapshot: MenuSnapshot) -> Self {
        match menu_codec::parse(&snapshot.content) {
            Ok(menu) => MenuState::Ready { snapshot, menu },
            Err(error) => {
                warn!("Menu snapshot {} is malformed: {}", snapshot.id, error.reason);
                MenuState::Malformed { snapshot, error }
            }
        }
    }
}

/// Holds the latest snapshot and applies single-cell edits to it.
pub struct MenuEditor {
    store: Arc<dyn RecordStore>,
    state: MenuState,
}

impl MenuEditor {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            state: MenuState::Empty,
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub async fn load_latest(&mut self) -> Result<&MenuState, AppError> {
        self.state = match self.store.latest_menu().await? {
            Some(snapshot) => MenuState::from_snapshot(snapshot),
            None => MenuState::Empty,
        };
        Ok(&self.state)
    }

    /// Switches the view to a snapshot obtained elsewhere, e.g. a fresh generation.
    pub fn show(&mut self, snapshot: MenuSnapshot) -> &MenuState {
        self.state = MenuState::from_snapshot(snapshot);
        &self.state
    }

    /// The decoded week, or the reason it cannot be shown.
    pub fn current(&self) -> Result<(&MenuSnapshot, &WeeklyMenu), AppError> {
        match &self.state {
            MenuState::Ready { snapshot, menu } => Ok((snapshot, menu)),
            MenuState::Malformed { error, .. } => Err(AppError::MalformedMenu(error.clone())),
            MenuState::Empty => Err(AppError::NotFound("menu")),
        }
    }

    /// Replaces one meal and writes the whole week back to the same snapshot.
    ///
    /// The edit is applied locally first. If the write fails the error is
    /// returned and the local edit stays in place until the next load.
    pub async fn save_edit(
        &mut self,
        snapshot_id: i64,
        day: Day,
        slot: MealSlot,
        text: &str,
    ) -> Result<&WeeklyMenu, AppError> {
        if self.current_id() != Some(snapshot_id) {
            self.load_latest().await?;
        }
        if self.current_id() != Some(snapshot_id) {
            return Err(AppError::NotFound("menu snapshot"));
        }

        let (snapshot, menu) = self.current()?;
        let snapshot = snapshot.clone();
        let edited = menu_codec::apply_edit(menu, day, slot, text);
        let content = menu_codec::serialize(&edited);
        self.state = MenuState::Ready {
            snapshot,
            menu: edited.clone(),
        };

        match self.store.update_menu(snapshot_id, &content).await {
            Ok(saved) => {
                metrics::record_menu_edit("ok");
                info!("Updated {}.{} in menu snapshot {}", day.key(), slot.key(), saved.id);
                self.state = MenuState::Ready {
                    snapshot: saved,
                    menu: edited,
                };
            }
            Err(e) => {
                metrics::record_menu_edit("error");
                warn!("Failed to save edit to menu snapshot {}: {}", snapshot_id, e);
                return Err(e.into());
            }
        }

        let (_, menu) = self.current()?;
        Ok(menu)
    }

    fn current_id(&self) -> Option<i64> {
        match &self.state {
            MenuState::Ready { snapshot, .. } | MenuState::Malformed { snapshot, .. } => {
                Some(snapshot.id)
            }
            MenuState::Empty => None,
        }
    }
}
