//! Minimal HTTP surface for the detection pipeline.
//!
//! Exposes the collaborator contract described by the detection spec:
//! `POST /analyze` accepts a multipart `file` field containing CSV and
//! returns the JSON analysis report; `GET /health` is a liveness probe.
//! This binary is demonstration tooling, not part of the crate's public
//! API — the pipeline itself takes an already-parsed record slice.

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use muling_ring_detector::{analyze_batch, DetectionError, RawRecord};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind listener");
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("server error");
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn analyze(mut multipart: Multipart) -> impl IntoResponse {
    let mut csv_bytes: Option<Vec<u8>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(format!("malformed multipart body: {e}")),
        };

        let is_file_field = field.name() == Some("file");
        if is_file_field {
            match field.bytes().await {
                Ok(bytes) => csv_bytes = Some(bytes.to_vec()),
                Err(e) => return bad_request(format!("failed to read uploaded file: {e}")),
            }
        }
    }

    let Some(csv_bytes) = csv_bytes else {
        return bad_request("missing multipart field \"file\"".to_string());
    };

    let raw_records = match parse_csv(&csv_bytes) {
        Ok(records) => records,
        Err(e) => return bad_request(e),
    };

    match analyze_batch(&raw_records) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(DetectionError::MalformedInput(msg)) => bad_request(msg),
        Err(DetectionError::ResourceExhausted(msg)) => bad_request(msg),
        Err(DetectionError::InvariantViolation(msg)) => {
            tracing::error!(error = %msg, "internal invariant violated during analysis");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody { detail: "internal error".to_string() }),
            )
                .into_response()
        }
    }
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<RawRecord>, String> {
    let mut reader = csv::Reader::from_reader(bytes);
    reader
        .deserialize::<RawRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("malformed CSV: {e}"))
}

fn bad_request(detail: String) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { detail })).into_response()
}
