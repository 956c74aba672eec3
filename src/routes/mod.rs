// Route exports
pub mod admin;
pub mod chat;

use actix_web::web;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::core::Matcher;
use crate::services::{AuthService, FaqCache, FaqStore};

/// Reply texts and score formatting for the chat endpoint
#[derive(Debug, Clone)]
pub struct Replies {
    pub fallback: String,
    pub empty: String,
    pub score_precision: u32,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FaqStore>,
    pub cache: FaqCache,
    pub matcher: Matcher,
    pub auth: AuthService,
    pub replies: Replies,
}

impl AppState {
    pub fn new(store: Arc<dyn FaqStore>, settings: &Settings) -> Self {
        Self {
            store,
            cache: FaqCache::new(Duration::from_secs(settings.cache.ttl_secs)),
            matcher: settings.matching.matcher(),
            auth: AuthService::from_settings(&settings.auth),
            replies: Replies {
                fallback: settings.matching.fallback_reply.clone(),
                empty: settings.matching.empty_reply.clone(),
                score_precision: settings.matching.score_precision,
            },
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(chat::configure)
            .configure(admin::configure),
    );
}
