mod config;
mod error;
mod handlers;
mod models;
mod services;
mod web; // Pages, JSON routes and the axum router

use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;

use config::AppConfig;
use services::{GeminiService, HttpClassifier, NutritionAdvisor, TextGenerator};
use web::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::init();

    // Load environment variables
    dotenv().ok();

    log::info!("🚀 Starting Bovine Breed Web...");

    let config = AppConfig::from_env()?;

    let classifier = Arc::new(HttpClassifier::new(config.classifier_url.clone()));
    log::info!("✅ Classifier client pointed at {}", config.classifier_url);

    let gemini: Arc<dyn TextGenerator> = Arc::new(GeminiService::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
    ));
    let advisor = Arc::new(NutritionAdvisor::new(gemini));
    log::info!("✅ Gemini service initialized with model: {}", config.gemini_model);

    let app = create_router(
        AppState::new(classifier, advisor),
        &config.static_dir,
        config.max_upload_bytes,
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!("🌐 Web server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("🛑 Shutting down...");
        })
        .await?;

    Ok(())
}
