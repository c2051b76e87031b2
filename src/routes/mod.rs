pub mod health;
pub mod ingredients;
pub mod menu;
pub mod metrics;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        // Inventory
        .route(
            "/ingredients",
            get(ingredients::list_ingredients).post(ingredients::create_ingredient),
        )
        .route("/ingredients/reorder", post(ingredients::reorder_ingredients))
        .route(
            "/ingredients/{id}",
            patch(ingredients::rename_ingredient).delete(ingredients::delete_ingredient),
        )
        .route("/ingredients/{id}/toggle", post(ingredients::toggle_ingredient))
        // Weekly menu
        .route("/menus/latest", get(menu::get_latest))
        .route("/menus/latest/print", get(menu::print_latest))
        .route("/menus/generate", post(menu::generate_menu))
        .route("/menus/{id}/meals", put(menu::edit_meal))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
