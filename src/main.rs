use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kitchen_api::{
    config::Config, db, routes, services::menu_generation::MenuGenerator, services::metrics,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    metrics::register();

    let store = db::open_store(&config).await?;

    let generator = MenuGenerator::from_config(&config, Arc::clone(&store)).map(Arc::new);
    if generator.is_some() {
        info!("Menu generation enabled (model {})", config.openai_model);
    } else {
        info!("OPENAI_API_KEY not set, menu generation disabled");
    }

    let state = AppState::new(store, generator);
    if let Err(e) = state.load().await {
        warn!("Initial load from store failed: {}", e);
    }

    // Allow the app base URL, plus any localhost origin for development.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") || o == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_origin(cors_origin);

    let app = routes::router(state).layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    info!("kitchen API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
