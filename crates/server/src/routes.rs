use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::json;

use mensura_core::Measurement;
use mensura_ocr::{
    CapturePipeline, Classified, OcrBackend, ReadValue, RejectReason, Rejection,
};
use mensura_storage::{DbPool, InsertOutcome};

use crate::error::ApiError;

pub struct AppState {
    pub db: DbPool,
    pub pipeline: Arc<CapturePipeline<Box<dyn OcrBackend>>>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ocr", post(capture))
        .route("/data", get(data))
        .route("/analysis-data", get(analysis_data))
        .route("/clear-data", post(clear_data))
        .with_state(state)
}

// ── POST /ocr ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CaptureRequest {
    #[serde(default)]
    image: String,
}

#[derive(Debug, Serialize)]
struct CaptureResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    inserted: Vec<Measurement>,
    skipped: Vec<Rejection>,
}

async fn capture(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CaptureRequest>,
) -> Result<Json<CaptureResponse>, ApiError> {
    if req.image.is_empty() {
        return Err(ApiError::MissingImage);
    }
    let data = decode_base64_image(&req.image)?;

    // Decode + OCR is CPU-bound; keep it off the async workers.
    let pipeline = state.pipeline.clone();
    let result = tokio::task::spawn_blocking(move || pipeline.process_bytes(&data)).await??;

    if result.results.is_empty() {
        return Ok(Json(CaptureResponse {
            success: false,
            error: Some("no pairs found".to_string()),
            inserted: vec![],
            skipped: vec![],
        }));
    }

    let mut inserted = Vec::new();
    let mut skipped = Vec::new();
    for classified in result.results {
        match classified {
            Classified::Accepted(m) => {
                match mensura_storage::insert_measurement(&state.db, &m).await? {
                    InsertOutcome::Inserted => inserted.push(m),
                    // Exact collisions are expected, not erroneous; report
                    // them next to the classification rejections.
                    InsertOutcome::Duplicate => skipped.push(Rejection {
                        value: ReadValue::Number(m.value),
                        unit: m.unit.to_string(),
                        reason: RejectReason::DuplicateValue,
                    }),
                }
            }
            Classified::Rejected(r) => skipped.push(r),
        }
    }

    tracing::info!(
        inserted = inserted.len(),
        skipped = skipped.len(),
        "capture classified"
    );

    Ok(Json(CaptureResponse {
        success: true,
        error: None,
        inserted,
        skipped,
    }))
}

/// Decode a base64 payload the way browsers send it: an optional
/// `data:image/...;base64,` prefix, `+` flattened to space by URL encoding,
/// and padding often missing.
fn decode_base64_image(b64: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let b64 = match b64.split_once(',') {
        Some((prefix, rest)) if prefix.starts_with("data:image") => rest,
        _ => b64,
    };
    // Replace before trimming — a payload's '+' may sit at either edge.
    let replaced = b64.replace(' ', "+");
    let mut b64 = replaced.trim().to_string();
    let pad = b64.len() % 4;
    if pad != 0 {
        b64.push_str(&"=".repeat(4 - pad));
    }
    base64::engine::general_purpose::STANDARD.decode(b64)
}

// ── GET /data ─────────────────────────────────────────────────────────────────

async fn data(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Measurement>>, ApiError> {
    Ok(Json(mensura_storage::get_all_measurements(&state.db).await?))
}

// ── GET /analysis-data ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnalysisResponse {
    success: bool,
    data: BTreeMap<String, Vec<f64>>,
}

async fn analysis_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let data = mensura_storage::get_measurements_by_unit(&state.db).await?;
    Ok(Json(AnalysisResponse {
        success: true,
        data,
    }))
}

// ── POST /clear-data ──────────────────────────────────────────────────────────

async fn clear_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let removed = mensura_storage::clear_measurements(&state.db).await?;
    tracing::info!(removed, "measurement store cleared");
    Ok(Json(json!({ "success": true, "message": "All data cleared." })))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
