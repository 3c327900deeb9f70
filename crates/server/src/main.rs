use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;

use config::Config;
use mensura_ocr::{CapturePipeline, OcrBackend};
use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();

    let db = mensura_storage::create_db(&config.database_path).await?;
    tracing::info!(db = %config.database_path.display(), "measurement store ready");

    let pipeline = Arc::new(CapturePipeline::new(build_recognizer(&config)));

    let app = routes::router(Arc::new(AppState { db, pipeline }))
        .layer(CorsLayer::permissive())
        .layer(axum::extract::DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(feature = "tesseract")]
fn build_recognizer(config: &Config) -> Box<dyn OcrBackend> {
    use mensura_ocr::recognizer::tesseract_backend::TesseractRecognizer;
    Box::new(TesseractRecognizer::new(None, &config.ocr_language))
}

#[cfg(not(feature = "tesseract"))]
fn build_recognizer(_config: &Config) -> Box<dyn OcrBackend> {
    // The server still runs without an engine; every capture comes back
    // as "no pairs found".
    tracing::warn!("built without the `tesseract` feature; OCR returns empty text");
    Box::new(mensura_ocr::MockRecognizer::new(""))
}
