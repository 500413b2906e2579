use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::RankingSettings;
use crate::core::{RankError, Recommender};
use crate::models::{
    ErrorResponse, HealthResponse, MatchReferencesRequest, MatchReferencesResponse,
    RecommendationRequest, RecommendationResponse, ReferenceMatch,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when the reference data failed to load
    pub engine: Option<Arc<Recommender>>,
    pub ranking: RankingSettings,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/references/match", web::post().to(match_references));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let engine_loaded = state.engine.is_some();
    let status = if engine_loaded { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine_loaded,
        timestamp: chrono::Utc::now(),
    })
}

/// Ranked recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "queryVector": [0.01, ...],
///   "occasions": ["Weddings"],
///   "budget": "moderate",
///   "topN": 10,
///   "threshold": 0.4,
///   "includeScores": false
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {}", errors);
        return validation_failed(errors);
    }

    let Some(engine) = state.engine.clone() else {
        return engine_unavailable();
    };

    let query = req.to_query(state.ranking.default_top_n, state.ranking.recommend_threshold);

    tracing::info!(
        "Recommending {} items (occasions: {}, budget: {})",
        query.top_n,
        query.occasions.len(),
        query.budget
    );

    // Ranking is CPU-bound; keep it off the async workers
    let result = web::block(move || {
        let response = engine
            .recommend(&query)
            .map(|result| RecommendationResponse::new(&query, &result));
        response
    })
    .await;

    match result {
        Ok(Ok(response)) => HttpResponse::Ok().json(response),
        Ok(Err(e)) => rank_failed(e),
        Err(e) => {
            tracing::error!("Ranking task failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Ranking failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Reference matching endpoint
///
/// POST /api/v1/references/match
///
/// Request body:
/// ```json
/// {
///   "queryVector": [0.01, ...],
///   "topK": 3
/// }
/// ```
async fn match_references(
    state: web::Data<AppState>,
    req: web::Json<MatchReferencesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let Some(engine) = state.engine.as_ref() else {
        return engine_unavailable();
    };

    match engine.match_references(&req.query_vector, req.top_k, state.ranking.match_threshold) {
        Ok(matched) => {
            let matches: Vec<ReferenceMatch> = matched.iter().map(ReferenceMatch::from).collect();
            tracing::debug!("Matched {} references", matches.len());

            HttpResponse::Ok().json(MatchReferencesResponse {
                status: "success".to_string(),
                total_matches: matches.len(),
                matches,
            })
        }
        Err(e) => rank_failed(e),
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn rank_failed(e: RankError) -> HttpResponse {
    tracing::info!("Rejected ranking request: {}", e);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Invalid request".to_string(),
        message: e.to_string(),
        status_code: 400,
    })
}

fn engine_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "Engine unavailable".to_string(),
        message: "Reference data is not loaded".to_string(),
        status_code: 503,
    })
}
