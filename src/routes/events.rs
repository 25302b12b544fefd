use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::SearchSettings;
use crate::core::{SearchEngine, SearchError};
use crate::models::{ErrorResponse, HealthResponse, SearchEventsRequest, SearchEventsResponse};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: SearchEngine,
    pub search: SearchSettings,
}

/// Configure all event routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/events/search", web::post().to(search_events));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match state.engine.store().health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Event store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search events endpoint
///
/// POST /api/v1/events/search
///
/// Request body (every field optional):
/// ```json
/// {
///   "partySize": 2,
///   "maxCost": 20.0,
///   "categories": ["music"],
///   "maxDistanceKm": 10.0,
///   "userLocation": { "latitude": 51.5, "longitude": -0.12 },
///   "sort": "byDistance",
///   "descending": false,
///   "limit": 20,
///   "offset": 0
/// }
/// ```
async fn search_events(
    state: web::Data<AppState>,
    req: web::Json<SearchEventsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let criteria = req.criteria();
    let limit = state.search.effective_limit(req.limit);

    tracing::info!(
        "Searching events: sort={:?}, descending={}, limit={}, offset={}",
        criteria.sort,
        criteria.descending,
        limit,
        req.offset
    );

    let result = match state.engine.search(&criteria).await {
        Ok(result) => result,
        Err(e) => return error_response(&e),
    };

    let total_results = result.events.len();
    let (events, next_offset) = paginate(result.events, req.offset, limit);

    tracing::info!(
        "Returning {} events (of {} matching, {} candidates)",
        events.len(),
        total_results,
        result.total_candidates
    );

    HttpResponse::Ok().json(SearchEventsResponse {
        events,
        total_results,
        skipped_records: result.skipped_records,
        next_offset,
    })
}

fn error_response(err: &SearchError) -> HttpResponse {
    match err {
        SearchError::InvalidCriteria(message) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid criteria".to_string(),
            message: message.clone(),
            status_code: 400,
        }),
        SearchError::Store(e) => {
            tracing::error!("Failed to fetch events: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Event store unavailable".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Cut one page out of an ordered list
///
/// Returns the page and the offset of the next page, if any.
pub fn paginate<T>(mut items: Vec<T>, offset: usize, limit: usize) -> (Vec<T>, Option<usize>) {
    let total = items.len();
    if offset >= total {
        return (Vec::new(), None);
    }

    let end = offset.saturating_add(limit.max(1)).min(total);
    let page: Vec<T> = items.drain(offset..end).collect();

    (page, (end < total).then_some(end))
}
