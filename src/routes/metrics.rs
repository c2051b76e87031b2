use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};
use prometheus::{Encoder, TextEncoder};
use tracing::error;

/// GET /metrics: kitchen counters in the Prometheus text format.
pub async fn metrics_handler() -> Result<impl IntoResponse, StatusCode> {
    let encoder = TextEncoder::new();
    let mut body = Vec::new();
    encoder.encode(&prometheus::gather(), &mut body).map_err(|e| {
        error!("Failed to encode metrics: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let body = String::from_utf8(body).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_string())], body))
}
