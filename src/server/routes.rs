use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use super::AppState;
use crate::output::render_html;
use crate::pipeline::Topic;

/// Shown to API and UI clients when a run fails; the cause goes to the log
pub const APOLOGY: &str =
    "I'm sorry, I couldn't process your request right now!! Internal Server Error";

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    /// Report markdown as generated
    pub report: String,
    /// The same report rendered to HTML
    pub html: String,
    pub sections: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "termsai".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/report
pub async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Response {
    let topic = match Topic::parse(&request.topic) {
        Ok(topic) => topic,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "warning": e.to_string() })))
                .into_response();
        }
    };

    info!("Report requested for '{}'", topic);
    match state.pipeline.run(&topic).await {
        Ok(report) => Json(ReportResponse {
            sections: report.sections.len(),
            html: render_html(&report.text),
            report: report.text,
        })
        .into_response(),
        Err(e) => {
            error!("Error generating report for '{}': {}", topic, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": APOLOGY })),
            )
                .into_response()
        }
    }
}
