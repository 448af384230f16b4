//! NimbleForge Engine - Main entry point.
//!
//! Loads the catalogs and the character store, then reports what is there.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nimbleforge_engine::infrastructure::config::AppConfig;
use nimbleforge_engine::App;

fn main() -> anyhow::Result<()> {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let _ = dotenvy::from_filename(filename);
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nimbleforge_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting NimbleForge Engine");

    let config = AppConfig::from_env()?;
    let app = App::from_config(config)?;

    println!("Catalogs");
    println!("  Classes:");
    for class in app.catalogs.classes().all() {
        println!(
            "    {} (hp {}, {})",
            class.name(),
            class.hit_points(),
            class.hit_dice()
        );
    }
    println!("  Ancestries:");
    for ancestry in app.catalogs.ancestries().all() {
        println!("    {} ({})", ancestry.name(), ancestry.size().as_str());
    }
    println!("  Backgrounds:");
    for background in app.catalogs.backgrounds().all() {
        println!("    {}", background.name());
    }

    let characters = app.use_cases.roster.list()?;
    println!("Saved characters: {}", characters.len());
    for record in &characters {
        let character = &record.character;
        println!(
            "  {} - {} {} {} (created {})",
            character.name(),
            character.ancestry().name(),
            character.background().name(),
            character.class().name(),
            record.created_at.to_rfc3339()
        );
    }

    match app.store.load_draft()? {
        Some(snapshot) => println!(
            "Character in progress: step {} (saved {})",
            snapshot.current_step,
            snapshot.last_saved.to_rfc3339()
        ),
        None => println!("No character in progress"),
    }

    Ok(())
}
