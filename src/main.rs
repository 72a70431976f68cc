use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::info;

use lark_match::config::Settings;
use lark_match::core::{AdjacencyDrawer, MoodResolver, VenueMatcher};
use lark_match::routes;
use lark_match::routes::recommend::AppState;
use lark_match::services::VenueCatalog;
use lark_match::taxonomy::Taxonomy;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap_or_default())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Lark Match service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Load the mood taxonomy (immutable for the process lifetime)
    let taxonomy = Arc::new(
        Taxonomy::from_path(&settings.data.mood_index_path).unwrap_or_else(|e| {
            tracing::error!(
                "Failed to load mood index from {}: {}",
                settings.data.mood_index_path, e
            );
            panic!("Taxonomy error: {}", e);
        }),
    );

    info!(
        "Mood taxonomy loaded: {} categories, {} synonyms",
        taxonomy.len(),
        taxonomy.synonym_index().len()
    );

    // Load the venue catalog
    let catalog = Arc::new(
        VenueCatalog::load(&settings.data.venues_path).unwrap_or_else(|e| {
            tracing::error!(
                "Failed to load venues from {}: {}",
                settings.data.venues_path, e
            );
            panic!("Catalog error: {}", e);
        }),
    );

    if catalog.is_empty() {
        tracing::error!("Venue catalog is empty; every draw will come back empty");
    }

    // Wire the matching pipeline
    let resolver = MoodResolver::with_threshold(
        Arc::clone(&taxonomy),
        settings.matching.fuzzy_threshold,
    );
    let matcher = VenueMatcher::with_max_results(
        Arc::clone(&taxonomy),
        settings.matching.max_results,
    );
    let drawer = AdjacencyDrawer::new(Arc::clone(&taxonomy));

    info!("Matcher initialized (max results: {})", settings.matching.max_results);

    // Build application state
    let app_state = AppState {
        taxonomy,
        catalog,
        resolver,
        matcher,
        drawer,
        matching: settings.matching.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
