use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Matcher;
use crate::models::{
    ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    SubmitParticipantRequest, SubmitParticipantResponse,
};
use crate::services::{CorpusStore, CrmClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<CorpusStore>,
    pub crm: Option<Arc<CrmClient>>,
    pub matcher: Matcher,
    pub default_limit: usize,
    pub max_limit: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/participants", web::post().to(submit_participant));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (status, trials) = match state.corpus.load().await {
        Ok(records) => ("healthy", records.len()),
        Err(e) => {
            tracing::warn!("Health check could not load corpus: {}", e);
            ("degraded", 0)
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        trials,
        timestamp: chrono::Utc::now(),
    })
}

/// Match a participant profile against the trial corpus
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "profile": { "age": 8, "city": "Dallas", "conditionTags": ["adhd"] },
///   "limit": 10
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit);

    tracing::info!("Finding matches (age: {}, limit: {})", req.profile.age, limit);

    let corpus = match state.corpus.load().await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Failed to load trial corpus: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load trial corpus".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let outcome = state.matcher.match_trials(&req.profile, &corpus, limit);

    tracing::info!(
        "Returning {} matches in {} buckets (from {} candidates)",
        outcome.total_matches(),
        outcome.groups.len(),
        outcome.total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        total_matches: outcome.total_matches(),
        total_candidates: outcome.total_candidates,
        groups: outcome.groups,
    })
}

/// Hand a finalized profile to the CRM sink
///
/// POST /api/v1/participants
///
/// Delivery is detached and best-effort: a CRM outage never blocks the
/// caller, and the profile is forwarded exactly as received.
async fn submit_participant(
    state: web::Data<AppState>,
    req: web::Json<SubmitParticipantRequest>,
) -> impl Responder {
    let submission_id = uuid::Uuid::new_v4().to_string();

    match &state.crm {
        Some(crm) => {
            let crm = crm.clone();
            let profile = req.profile.clone();
            let id = submission_id.clone();
            tokio::spawn(async move {
                if let Err(e) = crm.push_profile(&profile).await {
                    tracing::warn!("CRM delivery failed for submission {}: {}", id, e);
                } else {
                    tracing::debug!("CRM delivery succeeded for submission {}", id);
                }
            });
        }
        None => {
            tracing::info!("CRM delivery disabled; submission {} accepted locally", submission_id);
        }
    }

    HttpResponse::Accepted().json(SubmitParticipantResponse {
        accepted: true,
        submission_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            trials: 42,
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
        assert_eq!(response.trials, 42);
    }
}
