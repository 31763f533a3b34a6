use std::sync::Arc;

use anyhow::{anyhow, Result};

use bearmode::{api::ApiClient, dashboard::Dashboard, settings, settings::SettingsStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("bearmode starting up...");

    let settings_path = settings::default_settings_path()?;
    if let Some(dir) = settings_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let settings = SettingsStore::new(settings_path)?;

    let profile_id = std::env::args()
        .nth(1)
        .or_else(|| settings.profile_id())
        .ok_or_else(|| anyhow!("no profile selected: pass a profile id or store one in settings"))?;

    let client = ApiClient::new(settings.api().base_url);
    let dashboard = Dashboard::new(Arc::new(client));
    let stats = dashboard.refresh(&profile_id).await?;

    println!(
        "Completions: {} total, {} this week",
        stats.total_completions, stats.completions_this_week
    );
    println!("Favorite exercise: {}", stats.favorite_exercise);

    println!("\nLast 7 days:");
    for daily in &stats.daily_counts {
        println!("  {}  {}", daily.day, daily.count);
    }

    println!("\nTop exercises:");
    for entry in &stats.top_exercises {
        println!("  {:>3}x  {}", entry.count, entry.name);
    }

    println!("\nTop plans:");
    for entry in &stats.top_plans {
        println!("  {:>3}x  {}", entry.count, entry.name);
    }

    println!("\nBy body category:");
    for entry in &stats.category_distribution {
        println!("  {:>3}x  {}", entry.count, entry.name);
    }

    Ok(())
}
