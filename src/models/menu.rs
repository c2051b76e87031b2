use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One persisted weekly menu. `content` holds the serialized [`WeeklyMenu`]
/// exactly as produced by the completion service or by the last edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MenuSnapshot {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Display order. Monday first.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Понеділок",
            Day::Tuesday => "Вівторок",
            Day::Wednesday => "Середа",
            Day::Thursday => "Четвер",
            Day::Friday => "П'ятниця",
            Day::Saturday => "Субота",
            Day::Sunday => "Неділя",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Snack1,
    Lunch,
    Snack2,
    Dinner,
}

impl MealSlot {
    /// Display order within a day.
    pub const ALL: [MealSlot; 5] = [
        MealSlot::Breakfast,
        MealSlot::Snack1,
        MealSlot::Lunch,
        MealSlot::Snack2,
        MealSlot::Dinner,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Snack1 => "snack1",
            MealSlot::Lunch => "lunch",
            MealSlot::Snack2 => "snack2",
            MealSlot::Dinner => "dinner",
        }
    }

    /// Both snacks share the same label on purpose; the key tells them apart.
    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Сніданок",
            MealSlot::Snack1 | MealSlot::Snack2 => "Перекус",
            MealSlot::Lunch => "Обід",
            MealSlot::Dinner => "Вечеря",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The five meals of a single day, stored in [`MealSlot::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayMenu {
    meals: [String; 5],
}

impl DayMenu {
    pub fn new(meals: [String; 5]) -> Self {
        Self { meals }
    }

    pub fn meal(&self, slot: MealSlot) -> &str {
        &self.meals[slot.index()]
    }

    pub fn set_meal(&mut self, slot: MealSlot, text: impl Into<String>) {
        self.meals[slot.index()] = text.into();
    }
}

/// A fixed 7 x 5 grid of free-form meal descriptions.
///
/// The shape is enforced by the type: there is no way to build a week with a
/// missing day or slot. Decoding from text lives in `services::menu_codec`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyMenu {
    days: [DayMenu; 7],
}

impl WeeklyMenu {
    pub fn new(days: [DayMenu; 7]) -> Self {
        Self { days }
    }

    pub fn day(&self, day: Day) -> &DayMenu {
        &self.days[day.index()]
    }

    pub fn day_mut(&mut self, day: Day) -> &mut DayMenu {
        &mut self.days[day.index()]
    }

    pub fn meal(&self, day: Day, slot: MealSlot) -> &str {
        self.day(day).meal(slot)
    }
}

/// Body for PUT /menus/{id}/meals.
#[derive(Debug, Deserialize)]
pub struct EditMealRequest {
    pub day: Day,
    pub slot: MealSlot,
    pub text: String,
}
