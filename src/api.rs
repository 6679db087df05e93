//! HTTP surface: the interactive page, the JSON API and health.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::warn;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::charts::SentimentCounts;
use crate::config::Config;
use crate::pipeline;
use crate::rank::TopComments;
use crate::report::{render_page, Notice, NoticeLevel, PageView, Report};
use crate::sentiment::{LexiconScorer, ScoredComment};

/// Read-only state shared by all requests.
pub struct AppState {
    pub config: Config,
    pub http: reqwest::Client,
    pub scorer: LexiconScorer,
}

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// YouTube watch URL, e.g. `https://www.youtube.com/watch?v=dQw4w9WgXcQ`
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(analyze, health),
    components(
        schemas(
            AnalyzeRequest,
            ErrorResponse,
            HealthResponse,
            Report,
            Notice,
            NoticeLevel,
            SentimentCounts,
            TopComments,
            ScoredComment
        )
    ),
    tags(
        (name = "sentiment", description = "Comment sentiment analysis")
    )
)]
pub struct ApiDoc;

/// Interactive page. Without `?url=` only the input is shown; with it the
/// pipeline runs once and the results are rendered under the input.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    let input = query.url.unwrap_or_default();
    if input.trim().is_empty() {
        return Html(render_page(&PageView::Empty));
    }

    match pipeline::analyze(&state.http, &state.config, &state.scorer, &input).await {
        Ok(report) => Html(render_page(&PageView::Report {
            input: &input,
            report: &report,
        })),
        Err(e) => {
            let message = format!("{:#}", e);
            warn!("❌ [UI] Analysis failed for {:?}: {}", input, message);
            Html(render_page(&PageView::Error {
                input: &input,
                message: &message,
            }))
        }
    }
}

/// Analyze the comments of a video
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis report; check fetch_failure for partial results", body = Report),
        (status = 400, description = "Unusable URL", body = ErrorResponse)
    ),
    tag = "sentiment"
)]
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<Report>, (StatusCode, Json<ErrorResponse>)> {
    pipeline::analyze(&state.http, &state.config, &state.scorer, &req.url)
        .await
        .map(Json)
        .map_err(|e| {
            warn!("❌ [API] Analysis failed for {:?}: {:#}", req.url, e);
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("{:#}", e),
                }),
            )
        })
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "sentiment"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(index))
        .route("/api/analyze", post(analyze).layer(CorsLayer::permissive()))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
