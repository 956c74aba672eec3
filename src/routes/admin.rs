use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest, HttpResponse};
use std::future::{ready, Ready};
use validator::Validate;

use super::AppState;
use crate::error::ApiError;
use crate::models::{FaqRequest, LoginRequest, LoginResponse};
use crate::services::{auth::verify_password, AdminClaims};

const FAQ_FIELDS_REQUIRED: &str = "Question and answer are required.";

/// Configure admin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/admin/login", web::post().to(login))
        .service(
            web::resource("/admin/faqs")
                .route(web::get().to(list_faqs))
                .route(web::post().to(create_faq)),
        )
        .service(
            web::resource("/admin/faqs/{id}")
                .route(web::get().to(get_faq))
                .route(web::put().to(update_faq))
                .route(web::delete().to(delete_faq)),
        );
}

/// Admin routes take `AdminClaims` as their first argument, so an
/// unauthenticated request is rejected before its body is read.
impl FromRequest for AdminClaims {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AdminClaims, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("application state not configured".to_string()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    state.auth.verify_token(token).map_err(|e| {
        tracing::debug!("Rejected admin token: {}", e);
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })
}

/// Admin login
///
/// POST /api/v1/admin/login
///
/// Request body:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> Result<HttpResponse, ApiError> {
    if req.validate().is_err() {
        return Err(ApiError::InvalidCredentials);
    }

    let req = req.into_inner();
    let username = req.username.trim().to_string();
    let password = req.password.trim().to_string();

    let Some(admin) = state.store.find_admin(&username).await? else {
        tracing::info!("Login attempt for unknown admin {}", username);
        return Err(ApiError::InvalidCredentials);
    };

    // argon2 verification is CPU-bound; keep it off the worker thread
    let password_hash = admin.password_hash.clone();
    let verified = web::block(move || verify_password(&password, &password_hash)).await?;
    if !verified {
        tracing::info!("Failed login for admin {}", username);
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.auth.issue_token(&admin)?;
    tracing::info!("Admin {} logged in", admin.username);

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.token_ttl_secs(),
    }))
}

/// List all FAQ entries, newest first
///
/// GET /api/v1/admin/faqs
async fn list_faqs(_admin: AdminClaims, state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let mut faqs = state.store.list_faqs().await?;
    faqs.reverse();
    Ok(HttpResponse::Ok().json(faqs))
}

/// Fetch a single FAQ entry
///
/// GET /api/v1/admin/faqs/{id}
async fn get_faq(
    _admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let faq = state
        .store
        .get_faq(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("faq {}", id)))?;

    Ok(HttpResponse::Ok().json(faq))
}

/// Create a FAQ entry
///
/// POST /api/v1/admin/faqs
///
/// Request body:
/// ```json
/// { "question": "string", "answer": "string" }
/// ```
async fn create_faq(
    admin: AdminClaims,
    state: web::Data<AppState>,
    req: web::Json<FaqRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.validate().is_err() {
        return Err(ApiError::Validation(FAQ_FIELDS_REQUIRED.to_string()));
    }

    let (question, answer) = req.trimmed();
    let faq = state.store.create_faq(question, answer).await?;
    state.cache.invalidate().await;

    tracing::info!("FAQ {} created by {}", faq.id, admin.sub);

    Ok(HttpResponse::Created().json(faq))
}

/// Replace a FAQ entry
///
/// PUT /api/v1/admin/faqs/{id}
async fn update_faq(
    admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<FaqRequest>,
) -> Result<HttpResponse, ApiError> {
    if req.validate().is_err() {
        return Err(ApiError::Validation(FAQ_FIELDS_REQUIRED.to_string()));
    }

    let id = path.into_inner();
    let (question, answer) = req.trimmed();
    let faq = state.store.update_faq(id, question, answer).await?;
    state.cache.invalidate().await;

    tracing::info!("FAQ {} updated by {}", id, admin.sub);

    Ok(HttpResponse::Ok().json(faq))
}

/// Delete a FAQ entry
///
/// DELETE /api/v1/admin/faqs/{id}
async fn delete_faq(
    admin: AdminClaims,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    state.store.delete_faq(id).await?;
    state.cache.invalidate().await;

    tracing::info!("FAQ {} deleted by {}", id, admin.sub);

    Ok(HttpResponse::NoContent().finish())
}
