use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::menu::{Day, DayMenu, MealSlot, WeeklyMenu};

/// The stored text does not decode to a complete 7 x 5 week.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed menu: {reason}")]
pub struct MalformedMenu {
    pub reason: String,
}

impl MalformedMenu {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Decodes menu text into a [`WeeklyMenu`].
///
/// Every day and every meal slot must be present and hold a string. Unknown
/// keys are ignored, so a model that adds commentary fields still decodes.
pub fn parse(text: &str) -> Result<WeeklyMenu, MalformedMenu> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| MalformedMenu::new(format!("invalid JSON: {e}")))?;
    let root = value
        .as_object()
        .ok_or_else(|| MalformedMenu::new("expected a JSON object"))?;

    let mut menu = WeeklyMenu::default();
    for day in Day::ALL {
        let entry = root
            .get(day.key())
            .ok_or_else(|| MalformedMenu::new(format!("missing day `{}`", day.key())))?
            .as_object()
            .ok_or_else(|| MalformedMenu::new(format!("day `{}` is not an object", day.key())))?;

        let mut meals = DayMenu::default();
        for slot in MealSlot::ALL {
            let text = match entry.get(slot.key()) {
                Some(Value::String(s)) => s,
                Some(_) => {
                    return Err(MalformedMenu::new(format!(
                        "meal `{}.{}` is not a string",
                        day.key(),
                        slot.key()
                    )))
                }
                None => {
                    return Err(MalformedMenu::new(format!(
                        "missing meal `{}.{}`",
                        day.key(),
                        slot.key()
                    )))
                }
            };
            meals.set_meal(slot, text.as_str());
        }
        *menu.day_mut(day) = meals;
    }
    Ok(menu)
}

/// The week as a JSON object, days and slots in canonical order.
pub fn to_value(menu: &WeeklyMenu) -> Value {
    let days: Map<String, Value> = Day::ALL
        .into_iter()
        .map(|day| {
            let meals: Map<String, Value> = MealSlot::ALL
                .into_iter()
                .map(|slot| (slot.key().to_string(), Value::from(menu.meal(day, slot))))
                .collect();
            (day.key().to_string(), Value::Object(meals))
        })
        .collect();
    Value::Object(days)
}

/// Compact encoding with days and slots in canonical order.
pub fn serialize(menu: &WeeklyMenu) -> String {
    to_value(menu).to_string()
}

/// Indented variant, used for the worked example in the generation prompt.
pub fn serialize_pretty(menu: &WeeklyMenu) -> String {
    format!("{:#}", to_value(menu))
}

/// Returns a copy of `menu` with one cell replaced. The input is left untouched.
pub fn apply_edit(menu: &WeeklyMenu, day: Day, slot: MealSlot, text: &str) -> WeeklyMenu {
    let mut edited = menu.clone();
    edited.day_mut(day).set_meal(slot, text);
    edited
}
