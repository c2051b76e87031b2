//! Ordering engine behaviour against the in-memory store.

mod common;

use std::sync::Arc;

use kitchen_api::{db::RecordStore, error::AppError, services::inventory::Inventory};

use common::{names, store_with};

#[tokio::test]
async fn test_load_orders_by_persisted_order() {
    let store = store_with(&["Tomatoes", "Potatoes", "Onions"]);
    store
        .update_ingredient(1, &kitchen_api::models::ingredient::IngredientPatch::order(5))
        .await
        .unwrap();

    let mut inventory = Inventory::new(store.clone());
    let items = inventory.load().await.unwrap();
    assert_eq!(names(items), vec!["Potatoes", "Onions", "Tomatoes"]);
}

#[tokio::test]
async fn test_add_blank_name_makes_no_store_call() {
    let store = store_with(&["Eggs"]);
    let mut inventory = Inventory::new(store.clone());
    inventory.load().await.unwrap();
    let calls = store.calls();

    assert!(inventory.add("").await.unwrap().is_none());
    assert!(inventory.add("   ").await.unwrap().is_none());

    assert_eq!(store.calls(), calls);
    assert_eq!(names(inventory.items()), vec!["Eggs"]);
}

#[tokio::test]
async fn test_add_appends_after_highest_order() {
    let store = store_with(&["Eggs", "Milk"]);
    let mut inventory = Inventory::new(store.clone());
    inventory.load().await.unwrap();

    let added = inventory.add("  Rice ").await.unwrap().unwrap();
    assert_eq!(added.name, "Rice");
    assert_eq!(added.order, 2);
    assert!(added.available);

    inventory.load().await.unwrap();
    assert_eq!(names(inventory.items()), vec!["Eggs", "Milk", "Rice"]);
}

#[tokio::test]
async fn test_add_to_empty_list_starts_at_zero() {
    let store = store_with(&[]);
    let mut inventory = Inventory::new(store);
    inventory.load().await.unwrap();

    let added = inventory.add("Flour").await.unwrap().unwrap();
    assert_eq!(added.order, 0);
}

#[tokio::test]
async fn test_toggle_uses_store_echo() {
    let store = store_with(&["Eggs", "Milk"]);
    let mut inventory = Inventory::new(store.clone());
    inventory.load().await.unwrap();

    let toggled = inventory.toggle_availability(2).await.unwrap();
    assert!(!toggled.available);
    assert!(!inventory.items()[1].available);

    let persisted = store.list_ingredients().await.unwrap();
    assert!(!persisted[1].available);
    assert!(persisted[0].available);
}

#[tokio::test]
async fn test_toggle_unknown_id_is_not_found() {
    let store = store_with(&["Eggs"]);
    let mut inventory = Inventory::new(store);
    inventory.load().await.unwrap();

    let err = inventory.toggle_availability(99).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_rename_trims_and_rejects_blank() {
    let store = store_with(&["Eggs"]);
    let mut inventory = Inventory::new(store);
    inventory.load().await.unwrap();

    let renamed = inventory.rename(1, " Duck eggs ").await.unwrap();
    assert_eq!(renamed.name, "Duck eggs");
    assert_eq!(inventory.items()[0].name, "Duck eggs");

    let err = inventory.rename(1, "  ").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_remove_keeps_remaining_orders() {
    let store = store_with(&["A", "B", "C"]);
    let mut inventory = Inventory::new(store.clone());
    inventory.load().await.unwrap();

    inventory.remove(2).await.unwrap();
    assert_eq!(names(inventory.items()), vec!["A", "C"]);

    let orders: Vec<i32> = store
        .list_ingredients()
        .await
        .unwrap()
        .iter()
        .map(|i| i.order)
        .collect();
    assert_eq!(orders, vec![0, 2]);
}

#[tokio::test]
async fn test_reorder_persists_new_indices() {
    let store = store_with(&["A", "B", "C", "D"]);
    let mut inventory = Inventory::new(store.clone());
    inventory.load().await.unwrap();

    inventory.reorder(3, 1).await.unwrap();
    assert_eq!(names(inventory.items()), vec!["A", "D", "B", "C"]);

    let mut fresh = Inventory::new(store.clone());
    let reloaded = fresh.load().await.unwrap();
    assert_eq!(names(reloaded), vec!["A", "D", "B", "C"]);
    let orders: Vec<i32> = reloaded.iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_reorder_onto_itself_is_noop() {
    let store = store_with(&["A", "B"]);
    let mut inventory = Inventory::new(store.clone());
    inventory.load().await.unwrap();
    let calls = store.calls();

    inventory.reorder(1, 1).await.unwrap();
    assert_eq!(store.calls(), calls);
    assert_eq!(names(inventory.items()), vec!["A", "B"]);
}

#[tokio::test]
async fn test_failed_reorder_reloads_persisted_order() {
    let store = store_with(&["A", "B", "C"]);
    let mut inventory = Inventory::new(store.clone());
    inventory.load().await.unwrap();

    store.fail_ingredient_updates(true);
    let err = inventory.reorder(0, 2).await.unwrap_err();
    assert!(matches!(err, AppError::Store(_)));

    // Local state was reconciled, not left in the optimistic order.
    assert_eq!(names(inventory.items()), vec!["A", "B", "C"]);

    store.fail_ingredient_updates(false);
    let mut fresh = Inventory::new(store.clone() as Arc<dyn RecordStore>);
    assert_eq!(names(fresh.load().await.unwrap()), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_filter_does_not_mutate_sequence() {
    let store = store_with(&["Tomatoes", "Potatoes", "Onions"]);
    let mut inventory = Inventory::new(store);
    inventory.load().await.unwrap();

    let visible: Vec<&str> = inventory
        .filtered("TOM")
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(visible, vec!["Tomatoes"]);
    assert!(!inventory.reorder_allowed("tom"));
    assert_eq!(names(inventory.items()), vec!["Tomatoes", "Potatoes", "Onions"]);
}

#[tokio::test]
async fn test_add_before_load_appends_after_persisted_rows() {
    let store = store_with(&["A", "B", "C"]);
    let mut inventory = Inventory::new(store.clone());

    let added = inventory.add("D").await.unwrap().unwrap();
    assert_eq!(added.order, 3);
    assert_eq!(names(inventory.items()), vec!["A", "B", "C", "D"]);

    let persisted = store.list_ingredients().await.unwrap();
    let persisted: Vec<&str> = persisted.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(persisted, vec!["A", "B", "C", "D"]);
}

#[tokio::test]
async fn test_mutations_before_load_see_persisted_rows() {
    let store = store_with(&["Eggs", "Milk"]);

    let mut inventory = Inventory::new(store.clone());
    let toggled = inventory.toggle_availability(1).await.unwrap();
    assert!(!toggled.available);

    let mut inventory = Inventory::new(store.clone());
    let renamed = inventory.rename(2, "Oat milk").await.unwrap();
    assert_eq!(renamed.name, "Oat milk");

    let mut inventory = Inventory::new(store.clone());
    inventory.reorder(1, 0).await.unwrap();
    assert_eq!(names(inventory.items()), vec!["Oat milk", "Eggs"]);
}

#[tokio::test]
async fn test_partially_persisted_reorder_reloads_store_state() {
    let store = store_with(&["A", "B", "C", "D"]);
    let mut inventory = Inventory::new(store.clone());
    inventory.load().await.unwrap();

    // Local order becomes B C D A; only B -> 0 and C -> 1 are written.
    store.fail_ingredient_updates_after(2);
    let err = inventory.reorder(0, 3).await.unwrap_err();
    assert!(matches!(err, AppError::Store(_)));

    // A and B now share order 0 and fall back to creation time.
    assert_eq!(names(inventory.items()), vec!["A", "B", "C", "D"]);
    let orders: Vec<i32> = inventory.items().iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![0, 0, 1, 3]);
}
