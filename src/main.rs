mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::core::{Geocoder, Matcher, NullGeocoder};
use crate::routes::matches::AppState;
use crate::services::{CorpusStore, CrmClient, StaticGeocoder};

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
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Hey Trial matching service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the corpus store and warm it up
    let corpus = Arc::new(CorpusStore::new(
        settings.corpus.path.clone(),
        settings.corpus.ttl_secs,
    ));

    match corpus.load().await {
        Ok(records) => info!("Corpus warmed up ({} trials)", records.len()),
        Err(e) => warn!("Corpus not available at startup, will retry per request: {}", e),
    }

    // Initialize CRM delivery (optional - matching works without it)
    let crm = match (&settings.crm.endpoint, &settings.crm.api_key) {
        (Some(endpoint), Some(api_key)) => {
            info!("CRM delivery enabled ({})", endpoint);
            Some(Arc::new(CrmClient::new(endpoint.clone(), api_key.clone())))
        }
        _ => {
            info!("CRM delivery disabled (no endpoint configured)");
            None
        }
    };

    // Initialize the geocoder collaborator
    let geocoder: Arc<dyn Geocoder> = match &settings.geocoder.table_path {
        Some(path) => match StaticGeocoder::from_file(std::path::Path::new(path)) {
            Ok(table) => {
                info!("Geocoder table loaded ({} places)", table.len());
                Arc::new(table)
            }
            Err(e) => {
                warn!("Failed to load geocoder table, running without one: {}", e);
                Arc::new(NullGeocoder)
            }
        },
        None => Arc::new(NullGeocoder),
    };

    // Initialize matcher with configured tuning
    let tuning = settings.tuning();
    let matcher = Matcher::new(tuning).with_geocoder(geocoder);

    info!(
        "Matcher initialized (near: {} km, regional: {} km)",
        settings.matching.near_km, settings.matching.regional_km
    );

    // Build application state
    let app_state = AppState {
        corpus,
        crm,
        matcher,
        default_limit: settings.matching.default_limit,
        max_limit: settings.matching.max_limit,
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
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
