/// Generate a weekly menu from the currently available ingredients.
/// Meant for scheduled runs (e.g. every Sunday evening via cron).
///
/// Usage: generate-menu [--dry-run]
///   --dry-run : print the completion request instead of sending it

use std::sync::Arc;

use clap::Parser;

use kitchen_api::{
    config::Config,
    db,
    services::{
        menu_codec,
        menu_generation::{build_request, GenerationSettings, MenuGenerator},
    },
};

#[derive(Parser)]
#[command(name = "generate-menu", about = "Generate and store a weekly menu")]
struct Args {
    /// Print the completion request without calling the service or writing a snapshot
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let store = db::open_store(&config).await?;

    if args.dry_run {
        let items = store.list_ingredients().await?;
        let request = build_request(&GenerationSettings::from_config(&config), &items);
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let generator = MenuGenerator::from_config(&config, Arc::clone(&store))
        .ok_or_else(|| anyhow::anyhow!("Missing required env var: OPENAI_API_KEY"))?;

    tracing::info!("Starting menu generation...");
    let snapshot = generator.generate().await?;

    match menu_codec::parse(&snapshot.content) {
        Ok(_) => tracing::info!("Stored menu snapshot {}", snapshot.id),
        Err(e) => tracing::warn!(
            "Stored menu snapshot {} but it will not render: {}",
            snapshot.id,
            e
        ),
    }

    Ok(())
}
