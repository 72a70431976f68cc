use actix_web::{web, HttpResponse, Responder};
use rand::seq::SliceRandom;
use std::sync::Arc;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::{interpret, is_surprise_query, AdjacencyDrawer, MoodResolver, VenueMatcher};
use crate::models::{
    DrawnVenue, ErrorResponse, HealthResponse, MatchVenuesRequest, MatchVenuesResponse,
    QueryFilters, RecommendRequest, RecommendResponse, ResolveMoodRequest, ResolveMoodResponse,
};
use crate::services::VenueCatalog;
use crate::taxonomy::Taxonomy;

/// Opening lines for fate draws.
const SURPRISE_OPENINGS: &[&str] = &[
    "Then let's see what the cards say...",
    "The deck knows what you need, even if you don't.",
    "Fate deals you these three...",
    "Close your eyes. Point. Here's where your finger lands.",
    "When you don't know, the city knows for you.",
];

/// Shown when nothing in the query resolved to a mood.
const NO_MATCH_MESSAGES: &[&str] = &[
    "I'm not sure I found that door. Tell me more, or shall I draw for you?",
    "That word is new to me. Shall I draw a card instead, or tell me what you're seeking?",
    "I couldn't quite catch that. What kind of evening calls to you?",
];

/// Shown when a mood resolved but with too little confidence to act on.
const LOW_CONFIDENCE_MESSAGES: &[&str] = &[
    "I hear a whisper of that, but I'm not certain. What kind of night are you dreaming of?",
    "I sense something there... but tell me more. What feeling are you chasing?",
];

const EMPTY_QUERY_MESSAGE: &str = "I'm listening... but I heard only silence.";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub taxonomy: Arc<Taxonomy>,
    pub catalog: Arc<VenueCatalog>,
    pub resolver: MoodResolver,
    pub matcher: VenueMatcher,
    pub drawer: AdjacencyDrawer,
    pub matching: MatchingSettings,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/mood/resolve", web::post().to(resolve_mood))
        .route("/venues/match", web::post().to(match_venues))
        .route("/recommend", web::post().to(recommend))
        .route("/venues/surprise", web::post().to(surprise));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.catalog.is_empty() {
        "degraded"
    } else {
        "healthy"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        venue_count: state.catalog.len(),
        mood_count: state.taxonomy.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Resolve a query into a mood with confidence
///
/// POST /api/v1/mood/resolve
async fn resolve_mood(
    state: web::Data<AppState>,
    req: web::Json<ResolveMoodRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let candidates = state.resolver.resolve(&req.query);
    let top = candidates.first();

    tracing::info!(
        "Resolved '{}' -> {:?} ({} candidates)",
        req.query,
        top.map(|m| m.mood.as_str()),
        candidates.len()
    );

    HttpResponse::Ok().json(ResolveMoodResponse {
        mood: top.map(|m| m.mood.clone()),
        confidence: top.map(|m| m.confidence).unwrap_or(0.0),
        candidates,
    })
}

/// Match venues against explicit filters
///
/// POST /api/v1/venues/match
async fn match_venues(
    state: web::Data<AppState>,
    req: web::Json<MatchVenuesRequest>,
) -> impl Responder {
    let filters = QueryFilters {
        mood: req.mood.clone(),
        confidence: if req.mood.is_some() { 1.0 } else { 0.0 },
        location: req.location.clone(),
        budget: req.budget,
        group: req.group,
        genre: req.genre.clone(),
    };

    let venues = state.matcher.match_venues(&filters, state.catalog.venues());

    tracing::info!(
        "Matched {} venues for filters {:?}",
        venues.len(),
        filters
    );

    HttpResponse::Ok().json(MatchVenuesResponse {
        venue_count: venues.len(),
        venues,
    })
}

/// Full pipeline: interpret -> resolve -> draw with adjacency
///
/// POST /api/v1/recommend
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let session_id = req
        .session_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let query = req.query.trim();

    if query.is_empty() {
        return HttpResponse::Ok().json(clarification_response(
            session_id,
            QueryFilters::default(),
            "empty",
            EMPTY_QUERY_MESSAGE.to_string(),
        ));
    }

    // Fate path first: "i don't know" should never hit the resolver.
    if is_surprise_query(query) {
        tracing::info!("Surprise query detected: '{}'", query);
        return HttpResponse::Ok().json(surprise_response(&state, session_id));
    }

    let mut filters = interpret(query);
    let resolution = state.resolver.resolve_top(query);
    filters.mood = resolution.mood;
    filters.confidence = resolution.confidence;

    tracing::info!(
        "Interpreted '{}': mood={:?} confidence={:.2} location={:?}",
        query,
        filters.mood,
        filters.confidence,
        filters.location
    );

    if filters.mood.is_none() || filters.confidence < state.matching.low_confidence {
        // Maybe they typed a venue name rather than a mood.
        let rescued = state.drawer.text_matches(query, state.catalog.venues());
        if !rescued.is_empty() {
            tracing::info!("Text search rescued {} venues for '{}'", rescued.len(), query);
            let venue_count = rescued.len();
            return HttpResponse::Ok().json(RecommendResponse {
                cards: rescued,
                mood: filters.mood.clone(),
                confidence: 0.5,
                venue_count,
                filters,
                is_surprise: false,
                needs_clarification: false,
                clarification_type: None,
                message: None,
                opening_line: None,
                session_id,
            });
        }

        let (kind, messages): (&str, &[&str]) = if filters.mood.is_none() {
            ("no_match", NO_MATCH_MESSAGES)
        } else {
            ("low_confidence", LOW_CONFIDENCE_MESSAGES)
        };
        let message = messages
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(EMPTY_QUERY_MESSAGE)
            .to_string();
        return HttpResponse::Ok().json(clarification_response(
            session_id, filters, kind, message,
        ));
    }

    if filters.confidence < state.matching.moderate_confidence {
        tracing::warn!(
            "Moderate confidence ({:.2}) for '{}', proceeding with caution",
            filters.confidence,
            query
        );
    }

    let cards = state
        .drawer
        .draw_with_adjacency(&filters, Some(query), state.catalog.venues());

    tracing::info!("Drew {} venues (with adjacency) for '{}'", cards.len(), query);

    let venue_count = cards.len();
    let mood = filters.mood.clone();
    let confidence = filters.confidence;

    HttpResponse::Ok().json(RecommendResponse {
        cards,
        mood,
        confidence,
        venue_count,
        filters,
        is_surprise: false,
        needs_clarification: false,
        clarification_type: None,
        message: None,
        opening_line: None,
        session_id,
    })
}

/// Fate draw with no filters
///
/// POST /api/v1/venues/surprise
async fn surprise(state: web::Data<AppState>) -> impl Responder {
    let session_id = uuid::Uuid::new_v4().to_string();
    HttpResponse::Ok().json(surprise_response(&state, session_id))
}

fn surprise_response(state: &AppState, session_id: String) -> RecommendResponse {
    let cards = state.drawer.draw_surprise(state.catalog.venues());
    let first_arcana = cards.first().map(|c| c.venue.arcana.clone());
    let opening_line = SURPRISE_OPENINGS
        .choose(&mut rand::thread_rng())
        .map(|s| s.to_string());

    let venue_count = cards.len();
    RecommendResponse {
        cards,
        mood: first_arcana,
        confidence: 1.0,
        venue_count,
        filters: QueryFilters::default(),
        is_surprise: true,
        needs_clarification: false,
        clarification_type: None,
        message: None,
        opening_line,
        session_id,
    }
}

fn clarification_response(
    session_id: String,
    filters: QueryFilters,
    kind: &str,
    message: String,
) -> RecommendResponse {
    let mood = filters.mood.clone();
    let confidence = filters.confidence;
    let cards: Vec<DrawnVenue> = Vec::new();
    RecommendResponse {
        cards,
        mood,
        confidence,
        venue_count: 0,
        filters,
        is_surprise: false,
        needs_clarification: true,
        clarification_type: Some(kind.to_string()),
        message: Some(message),
        opening_line: None,
        session_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clarification_response_shape() {
        let response = clarification_response(
            "session".to_string(),
            QueryFilters::default(),
            "no_match",
            "Tell me more.".to_string(),
        );
        assert!(response.needs_clarification);
        assert_eq!(response.clarification_type.as_deref(), Some("no_match"));
        assert_eq!(response.venue_count, 0);
        assert!(response.cards.is_empty());
    }
}
