use actix_web::{web, HttpResponse, Responder};

use super::AppState;
use crate::error::ApiError;
use crate::models::{round_score, AskMeta, AskRequest, AskResponse, HealthResponse, MatchedFaq};

/// Configure chat and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/ask", web::post().to(ask));
}

/// Health check endpoint
///
/// GET /api/v1/health
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        detail: None,
    };

    match state.store.health_check().await {
        Ok(()) => HttpResponse::Ok().json(response),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            response.status = "error".to_string();
            response.detail = Some(e.to_string());
            HttpResponse::InternalServerError().json(response)
        }
    }
}

/// Answer a chat question
///
/// POST /api/v1/ask
///
/// Request body:
/// ```json
/// { "message": "string" }
/// ```
///
/// The body is read leniently: a missing, null or unparseable message gets
/// the "please type a question" reply rather than an error.
async fn ask(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse, ApiError> {
    let req: AskRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        tracing::debug!("Unreadable ask body, treating as empty: {}", e);
        AskRequest::default()
    });

    let message = req.trimmed_message();
    if message.is_empty() {
        return Ok(HttpResponse::Ok().json(AskResponse {
            reply: state.replies.empty.clone(),
            meta: AskMeta { matched: None, score: 0.0 },
        }));
    }

    let candidates = state.cache.candidates(state.store.as_ref()).await?;
    let result = state.matcher.find_best(message, candidates.iter());
    let score = round_score(result.score, state.replies.score_precision);

    let response = match result.matched {
        Some(faq) => {
            tracing::info!("Matched FAQ {} with score {}", faq.id, score);
            AskResponse {
                reply: faq.answer.clone(),
                meta: AskMeta {
                    matched: Some(MatchedFaq {
                        id: faq.id,
                        question: faq.question.clone(),
                    }),
                    score,
                },
            }
        }
        None => {
            tracing::info!(
                "No FAQ accepted (best score {} of {} candidates)",
                score,
                candidates.len()
            );
            AskResponse {
                reply: state.replies.fallback.clone(),
                meta: AskMeta { matched: None, score },
            }
        }
    };

    Ok(HttpResponse::Ok().json(response))
}
