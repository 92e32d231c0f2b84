//! REST API for the Fintro assistant
//!
//! Stateless JSON wrapper around the intent resolver and the
//! recommendation engine. Every request carries its own profile inputs.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::AdvisorError;
use crate::models::{Instrument, UserProfileInput};
use crate::recommendation::RecommendationEngine;
use crate::resolver::IntentResolver;
use crate::returns::{performance_series, Period};

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub risk_tolerance: u8,
    pub investment_amount: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PerformanceRequest {
    pub risk_tolerance: u8,
    pub investment_amount: u32,
    pub period: String,
}

/// =============================
/// Response Models
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RecommendationView {
    profile: String,
    description: &'static str,
    share_of_students: &'static str,
    experience: &'static str,
    recommendations: Vec<Instrument>,
}

#[derive(Debug, Serialize)]
struct SeriesPoint {
    name: String,
    value: f64,
}

type ApiResult = (StatusCode, Json<ApiResponse>);

fn error_response(e: AdvisorError) -> ApiResult {
    let status = match &e {
        AdvisorError::InvalidInput(_) | AdvisorError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub resolver: Arc<IntentResolver>,
    pub engine: Arc<RecommendationEngine>,
}

/// =============================
/// Handlers
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult {
    if req.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Empty message".into())),
        );
    }

    let answer = state.resolver.resolve(&req.message);
    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({ "answer": answer }))),
    )
}

async fn recommendations_handler(
    State(state): State<ApiState>,
    Json(req): Json<RecommendationRequest>,
) -> ApiResult {
    info!(
        risk_tolerance = req.risk_tolerance,
        investment_amount = req.investment_amount,
        "Received recommendation request"
    );

    let input = UserProfileInput {
        risk_tolerance: req.risk_tolerance,
        investment_amount: req.investment_amount,
    };

    match state.engine.recommend(input) {
        Ok(rec) => {
            let view = RecommendationView {
                profile: rec.profile.to_string(),
                description: rec.profile.description(),
                share_of_students: rec.profile.share_of_students(),
                experience: rec.profile.experience_years(),
                recommendations: rec.ranked,
            };
            (StatusCode::OK, Json(ApiResponse::success(view)))
        }
        Err(e) => error_response(e),
    }
}

async fn performance_handler(
    State(state): State<ApiState>,
    Json(req): Json<PerformanceRequest>,
) -> ApiResult {
    let period = match req.period.parse::<Period>() {
        Ok(period) => period,
        Err(e) => return error_response(e),
    };

    let input = UserProfileInput {
        risk_tolerance: req.risk_tolerance,
        investment_amount: req.investment_amount,
    };

    match state.engine.recommend(input) {
        Ok(rec) => {
            let series: Vec<SeriesPoint> = performance_series(&rec.ranked, period)
                .into_iter()
                .map(|(name, value)| SeriesPoint { name, value })
                .collect();

            (
                StatusCode::OK,
                Json(ApiResponse::success(serde_json::json!({
                    "period": period,
                    "series": series,
                }))),
            )
        }
        Err(e) => error_response(e),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(resolver: Arc<IntentResolver>, engine: Arc<RecommendationEngine>) -> Router {
    let state = ApiState { resolver, engine };

    Router::new()
        .route("/health", axum::routing::get(health))
        .route("/api/chat", post(chat_handler))
        .route("/api/recommendations", post(recommendations_handler))
        .route("/api/performance", post(performance_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    resolver: Arc<IntentResolver>,
    engine: Arc<RecommendationEngine>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(resolver, engine);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::FALLBACK_ANSWER;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn router() -> Router {
        create_router(
            Arc::new(IntentResolver::default()),
            Arc::new(RecommendationEngine::default()),
        )
    }

    async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, ApiResponse) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_chat() {
        let (status, body) = post_json("/api/chat", serde_json::json!({"message": "hello"})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert_eq!(body.data.unwrap()["answer"], FALLBACK_ANSWER);

        let (status, body) = post_json("/api/chat", serde_json::json!({"message": "  "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
    }

    #[tokio::test]
    async fn test_recommendations() {
        let (status, body) = post_json(
            "/api/recommendations",
            serde_json::json!({"risk_tolerance": 9, "investment_amount": 4000}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let data = body.data.unwrap();
        assert_eq!(data["profile"], "Experienced Aggressive");
        assert_eq!(data["experience"], "3+ yrs");
        assert_eq!(data["recommendations"].as_array().unwrap().len(), 3);
        assert_eq!(data["recommendations"][0]["ticker"], "IETF");
    }

    #[tokio::test]
    async fn test_recommendations_invalid_input() {
        let (status, body) = post_json(
            "/api/recommendations",
            serde_json::json!({"risk_tolerance": 11, "investment_amount": 4000}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.unwrap().contains("risk tolerance"));
    }

    #[tokio::test]
    async fn test_performance() {
        let (status, body) = post_json(
            "/api/performance",
            serde_json::json!({"risk_tolerance": 3, "investment_amount": 1000, "period": "5Y"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let data = body.data.unwrap();
        assert_eq!(data["period"], "5Y");
        assert_eq!(data["series"][0]["name"], "Alpha ETF");
        assert_eq!(data["series"][0]["value"], 48.2);

        let (status, _) = post_json(
            "/api/performance",
            serde_json::json!({"risk_tolerance": 3, "investment_amount": 1000, "period": "2Y"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
