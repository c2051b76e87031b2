use lazy_static::lazy_static;
use prometheus::{register_counter, register_counter_vec, Counter, CounterVec};

lazy_static! {
    pub static ref MENU_GENERATIONS_COUNTER: CounterVec = register_counter_vec!(
        "kitchen_menu_generations_total",
        "Menu generation attempts by outcome",
        &["outcome"]
    ).unwrap();

    pub static ref MENU_EDITS_COUNTER: CounterVec = register_counter_vec!(
        "kitchen_menu_edits_total",
        "Single-cell menu edits by outcome",
        &["outcome"]
    ).unwrap();

    pub static ref INGREDIENT_MUTATIONS_COUNTER: CounterVec = register_counter_vec!(
        "kitchen_ingredient_mutations_total",
        "Persisted ingredient changes by action",
        &["action"]
    ).unwrap();

    pub static ref REORDER_RECONCILIATIONS_COUNTER: Counter = register_counter!(
        "kitchen_reorder_reconciliations_total",
        "Reorders whose persistence failed and forced a reload from the store"
    ).unwrap();
}

pub fn record_generation(outcome: &str) {
    MENU_GENERATIONS_COUNTER.with_label_values(&[outcome]).inc();
}

pub fn record_menu_edit(outcome: &str) {
    MENU_EDITS_COUNTER.with_label_values(&[outcome]).inc();
}

pub fn record_ingredient_mutation(action: &str) {
    INGREDIENT_MUTATIONS_COUNTER.with_label_values(&[action]).inc();
}

/// Registers every series up front so a scrape lists them before their first event.
pub fn register() {
    lazy_static::initialize(&MENU_GENERATIONS_COUNTER);
    lazy_static::initialize(&MENU_EDITS_COUNTER);
    lazy_static::initialize(&INGREDIENT_MUTATIONS_COUNTER);
    lazy_static::initialize(&REORDER_RECONCILIATIONS_COUNTER);
}
