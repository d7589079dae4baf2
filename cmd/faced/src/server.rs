//! HTTP server for the face recognition service.
//!
//! Endpoints:
//! - `GET /` - Index page describing the API
//! - `GET /health` - Service status and gallery size
//! - `POST /register` - Register a face encoding under an identity
//! - `POST /recognize` - Classify every face in an uploaded image
//! - `POST /encode` - Extract the first face encoding from an image

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use faceid_extract::{ExtractError, FaceExtractor};
use faceid_gallery::{Gallery, GalleryError, MatchResult};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Uploads larger than this are rejected before decoding.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Shared state across request handlers.
#[derive(Clone)]
pub struct AppState {
    pub gallery: Arc<Gallery>,
    pub extractor: Arc<dyn FaceExtractor>,
    pub tolerance: f32,
}

/// Start the HTTP service.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/register", post(register))
        .route("/recognize", post(recognize))
        .route("/encode", post(encode))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = parse_addr(addr)?;
    info!("server started at http://{}", addr);
    info!("  - GET  /health     Service status and gallery size");
    info!("  - POST /register   Register a face encoding");
    info!("  - POST /recognize  Classify faces in an uploaded image");
    info!("  - POST /encode     Extract a face encoding from an image");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse address string to SocketAddr.
fn parse_addr(addr: &str) -> Result<SocketAddr> {
    let addr = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    Ok(addr.parse()?)
}

/// Request failure reported to the client as a JSON `detail` body.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

impl From<GalleryError> for ApiError {
    fn from(e: GalleryError) -> Self {
        Self::bad_request(e.to_string())
    }
}

impl From<ExtractError> for ApiError {
    fn from(e: ExtractError) -> Self {
        let status = match e {
            ExtractError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            ExtractError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            detail: e.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    student_id: String,
    encoding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct MatchEntry {
    student_id: String,
    confidence: f32,
}

#[derive(Debug, Serialize)]
struct RecognizeResponse {
    matches: Vec<MatchEntry>,
}

#[derive(Debug, Serialize)]
struct EncodeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding: Option<Vec<f32>>,
    found: bool,
}

async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "Face Recognition API",
        "registered_faces": state.gallery.len(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.gallery.register(&req.student_id, &req.encoding)?;
    info!(
        "registered face for {} ({} total)",
        req.student_id,
        state.gallery.len()
    );
    Ok(Json(
        serde_json::json!({ "message": "Face registered successfully" }),
    ))
}

async fn recognize(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RecognizeResponse>, ApiError> {
    let image = read_file_field(multipart).await?;
    let encodings = state.extractor.extract(&image)?;
    let results = state.gallery.recognize(&encodings, state.tolerance)?;
    Ok(Json(RecognizeResponse {
        matches: to_match_entries(&results),
    }))
}

async fn encode(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EncodeResponse>, ApiError> {
    let image = read_file_field(multipart).await?;
    let mut encodings = state.extractor.extract(&image)?;
    if encodings.is_empty() {
        return Ok(Json(EncodeResponse {
            encoding: None,
            found: false,
        }));
    }
    Ok(Json(EncodeResponse {
        encoding: Some(encodings.remove(0)),
        found: true,
    }))
}

/// Pulls the uploaded image out of the `file` multipart field.
async fn read_file_field(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(ApiError::bad_request("missing multipart field: file"))
}

fn to_match_entries(results: &[MatchResult]) -> Vec<MatchEntry> {
    results
        .iter()
        .map(|r| MatchEntry {
            student_id: r.label().to_string(),
            confidence: r.confidence(),
        })
        .collect()
}

/// Index page shown at the root path.
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Face Recognition API</title>
    <style>
        body { font-family: -apple-system, sans-serif; margin: 2rem auto; max-width: 42rem; color: #24292f; }
        code { background: rgba(0,0,0,0.06); padding: 0.2rem 0.4rem; border-radius: 4px; }
        li { margin: 0.4rem 0; }
    </style>
</head>
<body>
    <h1>Face Recognition API</h1>
    <p>In-memory face gallery with nearest-match classification.</p>
    <ul>
        <li><code>GET /health</code> - service status and gallery size</li>
        <li><code>POST /register</code> - register a face encoding (JSON: student_id, encoding)</li>
        <li><code>POST /recognize</code> - classify all faces in an uploaded image (multipart: file)</li>
        <li><code>POST /encode</code> - extract the first face encoding from an image (multipart: file)</li>
    </ul>
</body>
</html>
"#;
