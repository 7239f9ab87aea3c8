use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{ErrorResponse, HealthResponse, RecommendationsRequest, RecommendationsResponse};
use crate::services::RecommendationPlanner;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<RecommendationPlanner>,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "lat": 11.0168,
///   "lon": 76.9558,
///   "mood": "Calm",
///   "budget": 500,
///   "energy": 10,
///   "types": ["Eat", "See"],
///   "subtypes": ["Vegan"]
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendationsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendations request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let location = req.location();
    let preferences = req.preferences();

    tracing::info!(
        "Recommending {:?} (subtypes {:?}) for mood={}, budget={}, energy={}",
        preferences.place_types,
        preferences.subtypes,
        preferences.mood,
        preferences.budget,
        preferences.energy
    );

    // Catalog reads hit the filesystem
    let planner = state.planner.clone();
    let outcome = web::block(move || planner.plan(location, &preferences)).await;

    let places = match outcome {
        Ok(Ok(places)) => places,
        Ok(Err(e)) => {
            tracing::error!("Failed to build recommendations: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to build recommendations".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
        Err(e) => {
            tracing::error!("Recommendation worker failed: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Internal error".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::info!("Returning {} places", places.len());

    HttpResponse::Ok().json(RecommendationsResponse {
        total_results: places.len(),
        places,
    })
}
