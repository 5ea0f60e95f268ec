//! Request handling helpers
//!
//! Transport-agnostic translation between JSON request bodies and analysis
//! calls. An HTTP server (or the CLI's `--stdin` mode) only has to move the
//! status and body produced here onto the wire.

use crate::analysis::Analyzer;
use crate::{AnalysisError, ErrorCode};
use serde::{Deserialize, Serialize};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Body of an analyze request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

/// Body returned when an analysis fails
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: ErrorCode,
    pub message: String,
}

impl From<&AnalysisError> for ErrorResponse {
    fn from(err: &AnalysisError) -> Self {
        Self {
            error_code: err.code(),
            message: err.message(),
        }
    }
}

/// Body returned by the liveness check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub alive: bool,
}

/// Status code and JSON body of a handled request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => {
                tracing::error!("Failed to encode response: {}", e);
                Self::error(STATUS_INTERNAL_ERROR, "response encoding failed")
            }
        }
    }

    fn error(status: u16, reason: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": reason }).to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Decodes an analyze request
///
/// Malformed JSON and a missing or empty `url` are rejected with a
/// bad-request response. Surrounding whitespace is stripped from `url`.
pub fn parse_request(body: &str) -> Result<AnalyzeRequest, ApiResponse> {
    let mut request: AnalyzeRequest = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Error decoding request: {}", e);
        ApiResponse::error(STATUS_BAD_REQUEST, &e.to_string())
    })?;

    request.url = request.url.trim().to_string();
    if request.url.is_empty() {
        tracing::error!("Analyze URL cannot be empty");
        return Err(ApiResponse::error(STATUS_BAD_REQUEST, "Empty URL"));
    }

    Ok(request)
}

/// Handles one analyze request body end to end
pub async fn handle_analyze(analyzer: &Analyzer, body: &str) -> ApiResponse {
    let request = match parse_request(body) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match analyzer.analyze(&request.url).await {
        Ok(result) => ApiResponse::json(STATUS_OK, &result),
        Err(err) => {
            tracing::error!("{}", err);
            ApiResponse::json(STATUS_INTERNAL_ERROR, &ErrorResponse::from(&err))
        }
    }
}

/// Answers the liveness check
pub fn handle_health() -> ApiResponse {
    ApiResponse::json(STATUS_OK, &HealthResponse { alive: true })
}
