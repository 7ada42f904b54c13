pub mod handlers;
pub mod types;

use crate::{Result, assets::ImageStore, config::Config, generator::ContentGenerator};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    let generator = ContentGenerator::new(&config.llm);
    let images = ImageStore::new(&config.assets.image_dir);

    info!("Serving level images from {}", images.root().display());

    let app_state = AppState {
        generator: Arc::new(generator),
        images: Arc::new(images),
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/scenario/:level", get(handlers::get_scenario))
        .route("/evaluate", post(handlers::evaluate))
        .route("/selected_level", post(handlers::selected_level))
        .route("/lessons/:level", get(handlers::lessons))
        .route("/generate_lesson/:topic", get(handlers::generate_lesson))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
