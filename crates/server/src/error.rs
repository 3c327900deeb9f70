use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use mensura_ocr::PipelineError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing image")]
    MissingImage,
    #[error("bad base64: {0}")]
    BadBase64(#[from] base64::DecodeError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Storage(#[from] mensura_storage::StorageError),
    #[error("OCR task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            // The client sent something we couldn't even decode.
            ApiError::MissingImage
            | ApiError::BadBase64(_)
            | ApiError::Pipeline(PipelineError::Preprocess(_)) => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(PipelineError::Ocr(_))
            | ApiError::Storage(_)
            | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        (
            status,
            Json(json!({ "success": false, "error": self.to_string() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(ApiError::MissingImage.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_errors_map_to_500() {
        let err = ApiError::Storage(mensura_storage::StorageError::CorruptUnit("zz".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
