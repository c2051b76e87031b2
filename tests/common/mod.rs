//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use kitchen_api::{
    db::MemoryStore,
    models::{
        ingredient::Ingredient,
        menu::{Day, MealSlot, WeeklyMenu},
    },
    services::{
        completion::{ChatCompletionRequest, CompletionError, CompletionService},
        menu_codec,
        menu_generation::{GenerationSettings, MenuGenerator},
    },
};

/// Rows with ids 1.., orders 0.. and strictly increasing creation times.
pub fn ingredients(rows: &[(&str, bool)]) -> Vec<Ingredient> {
    let base = Utc::now() - Duration::hours(1);
    rows.iter()
        .enumerate()
        .map(|(i, (name, available))| Ingredient {
            id: i as i64 + 1,
            name: name.to_string(),
            available: *available,
            order: i as i32,
            created_at: base + Duration::seconds(i as i64),
        })
        .collect()
}

pub fn store_with(names: &[&str]) -> Arc<MemoryStore> {
    let rows: Vec<(&str, bool)> = names.iter().map(|n| (*n, true)).collect();
    Arc::new(MemoryStore::with_ingredients(ingredients(&rows)))
}

pub fn names(items: &[Ingredient]) -> Vec<String> {
    items.iter().map(|i| i.name.clone()).collect()
}

/// A full week where every cell reads "<day> <slot>".
pub fn week() -> WeeklyMenu {
    let mut menu = WeeklyMenu::default();
    for day in Day::ALL {
        for slot in MealSlot::ALL {
            menu.day_mut(day)
                .set_meal(slot, format!("{} {}", day.key(), slot.key()));
        }
    }
    menu
}

pub fn week_json() -> String {
    menu_codec::serialize(&week())
}

pub enum Script {
    Reply(Option<String>),
    Fail,
}

/// Completion double that replays one scripted answer and records requests.
pub struct ScriptedCompletion {
    script: Script,
    pub requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn reply(text: &str) -> Arc<Self> {
        Self::new(Script::Reply(Some(text.to_string())))
    }

    pub fn last_request(&self) -> ChatCompletionRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl CompletionService for ScriptedCompletion {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Option<String>, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail => Err(CompletionError::Api {
                status: reqwest::StatusCode::TOO_MANY_REQUESTS,
                body: "rate limited".into(),
            }),
        }
    }
}

pub fn generator(store: Arc<MemoryStore>, completion: Arc<ScriptedCompletion>) -> MenuGenerator {
    MenuGenerator::new(
        store,
        completion,
        GenerationSettings {
            model: "gpt-4o".into(),
            temperature: 0.7,
        },
    )
}
