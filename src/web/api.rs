use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::AppState;
use crate::handlers::nutrition::filter_suggestions;
use crate::models::breeds::BOVINE_BREEDS;

pub const BREED_REQUIRED: &str = "Breed is required.";
pub const GENERATION_FAILED: &str = "Failed to get recommendations.";

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(json!({ "error": message })))
}

/// Proxies a breed to the generative model and returns its advice as JSON.
pub async fn nutritional_recommendations(
    State(state): State<Arc<AppState>>,
    body: String,
) -> impl IntoResponse {
    let payload: serde_json::Value = match serde_json::from_str(&body) {
        Ok(serde_json::Value::Null) => {
            log::error!("❌ Recommendation request body is null");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED);
        }
        Ok(p) => p,
        Err(e) => {
            log::error!("❌ Failed to parse recommendation request: {}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED);
        }
    };

    let breed = match payload.get("breed").and_then(|b| b.as_str()) {
        Some(breed) if !breed.is_empty() => breed.to_string(),
        _ => {
            log::warn!("⚠️ Recommendation request without breed");
            return error_response(StatusCode::BAD_REQUEST, BREED_REQUIRED);
        }
    };

    match state.advisor.recommendations(&breed).await {
        Ok(recommendations) => (StatusCode::OK, Json(json!({ "recommendations": recommendations }))),
        Err(e) => {
            log::error!("❌ API error for breed {}: {}", breed, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED)
        }
    }
}

#[derive(Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    q: String,
}

pub async fn breed_suggestions(Query(query): Query<SuggestionQuery>) -> Json<serde_json::Value> {
    let suggestions = filter_suggestions(&query.q, BOVINE_BREEDS);
    Json(json!({ "suggestions": suggestions }))
}
