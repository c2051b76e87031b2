use std::sync::Arc;

use tracing::{debug, error, info};

use crate::{
    config::Config,
    db::RecordStore,
    error::AppError,
    models::{
        ingredient::Ingredient,
        menu::{Day, MealSlot, MenuSnapshot, WeeklyMenu},
    },
    services::{
        completion::{ChatCompletionRequest, ChatMessage, CompletionService, OpenAiClient},
        menu_codec, metrics,
    },
};

const ROLE_AND_TASK: &str = "[Роль]
Ти експерт з нутріціології і здорового харчування.

[Задача]
Тобі треба буде робити меню на тиждень базуючись на доступних продуктах, які будуть додаватися до запиту.
Меню має бути поживним. Меню має складатися з: Сніданок, перекус, обід, перекус, вечеря.
Меню має бути написано на кожен день тижня починаючи з понеділка.
Меню має формуватися з урахуванням пониження холестерину в організмі.

All answers should be in Ukrainian.
All answers should be in JSON format.
[приклад відповіді]
";

/// Worked example, one row per day in [`Day::ALL`] order, columns in [`MealSlot::ALL`] order.
const SAMPLE_WEEK: [[&str; 5]; 7] = [
    [
        "Вівсянка з лляним насінням, горіхами та ягодами",
        "Груша + жменя мигдалю",
        "Гречка з тушкованими овочами + запечена куряча грудка",
        "Грецький йогурт + насіння чіа",
        "Салат із авокадо, шпинату, квасолі + цільнозерновий хліб",
    ],
    [
        "Омлет із білків із зеленню + житній хліб з авокадо",
        "Яблуко + волоські горіхи",
        "Червона сочевиця з овочами + запечена риба",
        "Морква та селера з хумусом",
        "Грильований лосось + кіноа + салат із броколі",
    ],
    [
        "Гречані млинці з натуральним йогуртом та ягодами",
        "Фундук + 1 банан",
        "Овочевий суп + запечене куряче філе з булгуром",
        "Гарбузове насіння + зелений чай",
        "Соте з кабачків, помідорів та нуту + цільнозерновий хліб",
    ],
    [
        "Цільнозерновий тост із арахісовою пастою + банан",
        "Яблуко + мигдаль",
        "Салат із кіноа, руколи, граната та авокадо + запечена риба",
        "Натуральний йогурт із насінням льону",
        "Овочеве рагу з сочевицею",
    ],
    [
        "Вівсянка з насінням чіа та горіхами",
        "Апельсин + волоські горіхи",
        "Грильована курка + салат із капусти, моркви та яблука",
        "Овочевий смузі (селера, огірок, шпинат, лимон)",
        "Риба, запечена з овочами + кіноа",
    ],
    [
        "Омлет із овочами та зеленню + житній тост",
        "Гарбузове насіння + натуральний йогурт",
        "Овочевий борщ без м'яса + цільнозерновий хліб",
        "Фрукти + жменя мигдалю",
        "Запечені баклажани з нутом і томатним соусом",
    ],
    [
        "Цільнозерновий хліб із авокадо та лососем",
        "Грушевий смузі з мигдальним молоком",
        "Гречка + тушковані гриби + зелений салат",
        "Фрукти та жменя горіхів",
        "Печена риба з брюссельською капустою",
    ],
];

pub fn sample_menu() -> WeeklyMenu {
    let mut menu = WeeklyMenu::default();
    for (day, meals) in Day::ALL.iter().zip(SAMPLE_WEEK.iter()) {
        for (slot, text) in MealSlot::ALL.iter().zip(meals.iter()) {
            menu.day_mut(*day).set_meal(*slot, *text);
        }
    }
    menu
}

/// Fixed system instruction, ending with the example week in codec format.
pub fn system_instruction() -> String {
    format!("{ROLE_AND_TASK}{}", menu_codec::serialize_pretty(&sample_menu()))
}

/// Names of the available ingredients, in list order, joined with ", ".
pub fn available_list(items: &[Ingredient]) -> String {
    items
        .iter()
        .filter(|i| i.available)
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn user_prompt(items: &[Ingredient]) -> String {
    format!(
        "Створіть меню на тиждень використовуючи ці продукти: {}.",
        available_list(items)
    )
}

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.openai_model.clone(),
            temperature: config.openai_temperature,
        }
    }
}

/// Builds the prompt from the available ingredients, asks the completion
/// service for a week and stores the raw answer as a new snapshot.
///
/// The answer is not decoded here; a malformed week surfaces when it is rendered.
pub struct MenuGenerator {
    store: Arc<dyn RecordStore>,
    completion: Arc<dyn CompletionService>,
    settings: GenerationSettings,
}

impl MenuGenerator {
    pub fn new(
        store: Arc<dyn RecordStore>,
        completion: Arc<dyn CompletionService>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            store,
            completion,
            settings,
        }
    }

    /// Returns None if no completion API key is configured.
    pub fn from_config(config: &Config, store: Arc<dyn RecordStore>) -> Option<Self> {
        let api_key = config.openai_api_key.as_deref()?;
        let completion = OpenAiClient::new(config.openai_base_url.as_str(), api_key);
        Some(Self::new(
            store,
            Arc::new(completion),
            GenerationSettings::from_config(config),
        ))
    }

    pub fn build_request(&self, items: &[Ingredient]) -> ChatCompletionRequest {
        build_request(&self.settings, items)
    }

    pub async fn generate(&self) -> Result<MenuSnapshot, AppError> {
        let items = self.store.list_ingredients().await?;
        let request = self.build_request(&items);
        debug!(
            "Requesting menu from {} ({} available ingredients)",
            self.settings.model,
            items.iter().filter(|i| i.available).count()
        );

        let content = match self.completion.complete(&request).await {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => {
                metrics::record_generation("empty");
                error!("Completion service returned no menu content");
                return Err(AppError::GenerationFailed(
                    "empty completion response".into(),
                ));
            }
            Err(e) => {
                metrics::record_generation("completion_error");
                error!("Completion request failed: {}", e);
                return Err(AppError::GenerationFailed(e.to_string()));
            }
        };
        debug!("Got menu content: {}", content);

        let snapshot = self.store.insert_menu(&content).await.map_err(|e| {
            metrics::record_generation("store_error");
            error!("Failed to store generated menu: {}", e);
            AppError::GenerationFailed(format!("could not store menu: {e}"))
        })?;

        metrics::record_generation("ok");
        info!("Stored generated menu snapshot {}", snapshot.id);
        Ok(snapshot)
    }
}

/// Request for the given ingredient list; usable without a live completion client.
pub fn build_request(settings: &GenerationSettings, items: &[Ingredient]) -> ChatCompletionRequest {
    ChatCompletionRequest::json(
        settings.model.clone(),
        vec![
            ChatMessage::system(system_instruction()),
            ChatMessage::user(user_prompt(items)),
        ],
        settings.temperature,
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn ingredient(name: &str, available: bool) -> Ingredient {
        Ingredient {
            id: 1,
            name: name.to_string(),
            available,
            order: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_lists_only_available() {
        let items = vec![
            ingredient("Eggs", true),
            ingredient("Milk", false),
            ingredient("Rice", true),
        ];
        let prompt = user_prompt(&items);
        assert!(prompt.contains("Eggs, Rice."));
        assert!(!prompt.contains("Milk"));
    }

    #[test]
    fn test_example_in_instruction_is_a_valid_week() {
        let instruction = system_instruction();
        let start = instruction.find('{').unwrap();
        let example = &instruction[start..];
        assert_eq!(menu_codec::parse(example).unwrap(), sample_menu());
    }

    #[test]
    fn test_sample_menu_fills_every_cell() {
        let menu = sample_menu();
        for day in Day::ALL {
            for slot in MealSlot::ALL {
                assert!(!menu.meal(day, slot).is_empty());
            }
        }
        assert_eq!(
            menu.meal(Day::Sunday, MealSlot::Dinner),
            "Печена риба з брюссельською капустою"
        );
    }

    #[test]
    fn test_request_carries_settings() {
        let settings = GenerationSettings {
            model: "gpt-4o".into(),
            temperature: 0.7,
        };
        let request = build_request(&settings, &[ingredient("Eggs", true)]);
        assert_eq!(request.model, "gpt-4o");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert!(request.messages[1].content.contains("Eggs"));
    }
}
