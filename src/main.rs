use std::sync::Arc;

use anyhow::{Context, Result};
use outfitcast_core::Config;
use outfitcast_outfit::{OutfitRecommendation, UserPreferences};
use outfitcast_services::{LocalAuthenticator, Services};
use outfitcast_store::{FileStorage, StationSettings, Stores, WeatherState};
use outfitcast_weather::{OpenMeteoProvider, StaticStationDirectory};
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> Result<()> {
    outfitcast_core::init()?;

    let (config, _) = Config::load_validated()?;
    tracing::info!("Config directory: {}", config.config_dir.display());

    let storage = FileStorage::new(&config.storage.data_dir)?;
    let stores = Stores::open(Arc::new(storage), config.notifications.lifetime());

    let provider =
        OpenMeteoProvider::new(&config.weather).context("Failed to create weather provider")?;
    let services = Services::new(
        &config,
        &stores,
        Arc::new(provider),
        Arc::new(StaticStationDirectory::reference()),
        Arc::new(LocalAuthenticator),
    );

    // `outfitcast <home> <work>` saves stations before starting
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [home, work] = args.as_slice() {
        let preferences: UserPreferences = stores.settings.preferences();
        services
            .settings
            .save(StationSettings::new(home.as_str(), work.as_str()), preferences)
            .context("Failed to save stations")?;
    }

    let stations = stores.settings.stations();
    if !stations.any_set() {
        tracing::warn!("No stations configured. Run `outfitcast <home> <work>` to set them.");
    }

    tokio::spawn(log_recommendations(stores.weather.subscribe()));

    services.scheduler.start();
    tracing::info!(home = %stations.home, work = %stations.work, "Outfitcast running, press Ctrl-C to exit");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    services.scheduler.stop();
    tracing::info!("Outfitcast shut down");
    Ok(())
}

async fn log_recommendations(mut changes: tokio::sync::broadcast::Receiver<WeatherState>) {
    let mut last: Vec<OutfitRecommendation> = Vec::new();

    loop {
        let state = match changes.recv().await {
            Ok(state) => state,
            Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => break,
        };

        if state.recommendations == last || state.recommendations.is_empty() {
            continue;
        }

        for rec in &state.recommendations {
            tracing::info!(
                category = rec.category.as_str(),
                reason = rec.reason.as_deref().unwrap_or(""),
                "{} {}",
                rec.icon,
                rec.item
            );
        }
        for suggestion in &state.style_suggestions {
            tracing::info!("Tip: {}", suggestion);
        }
        last = state.recommendations;
    }
}
