// Integration tests for the FAQBot HTTP API

use actix_web::{http::StatusCode, test, web, App};
use faqbot::config::{
    AuthSettings, CacheSettings, DatabaseSettings, LoggingSettings, MatchingSettings, ServerSettings, Settings,
};
use faqbot::error::handle_json_payload_error;
use faqbot::routes::{configure_routes, AppState};
use faqbot::services::{bootstrap, FaqStore, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;

const FALLBACK: &str =
    "Sorry, I couldn't find an exact answer. Please contact an admin or try rephrasing your question.";

fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            workers: Some(1),
        },
        database: DatabaseSettings {
            url: "memory".to_string(),
            max_connections: None,
            min_connections: None,
            acquire_timeout_secs: None,
            idle_timeout_secs: None,
        },
        matching: MatchingSettings::default(),
        auth: AuthSettings {
            jwt_secret: "integration-secret".to_string(),
            token_ttl_secs: 3600,
            default_admin_username: "admin".to_string(),
            default_admin_password: "admin123".to_string(),
        },
        cache: CacheSettings::default(),
        logging: LoggingSettings::default(),
    }
}

/// Memory store with the default admin and the three sample FAQs
async fn seeded_state() -> AppState {
    let settings = test_settings();
    let store = Arc::new(MemoryStore::new());
    bootstrap(store.as_ref(), &settings.auth).await.unwrap();
    AppState::new(store as Arc<dyn FaqStore>, &settings)
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! ask {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/ask")
            .set_json($body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        body
    }};
}

macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/admin/login")
            .set_json(json!({"username": "admin", "password": "admin123"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        format!("Bearer {}", body["token"].as_str().unwrap())
    }};
}

#[actix_web::test]
async fn test_ask_exact_question() {
    let app = init_app!(seeded_state().await);

    let body = ask!(app, json!({"message": "What is OSPOLY"}));

    assert!(body["reply"].as_str().unwrap().starts_with("Osun State Polytechnic"));
    assert_eq!(body["meta"]["matched"]["id"], 1);
    assert_eq!(body["meta"]["matched"]["question"], "What is OSPOLY?");
    assert_eq!(body["meta"]["score"].as_f64(), Some(1.0));
}

#[actix_web::test]
async fn test_ask_partial_overlap_rounds_score() {
    let app = init_app!(seeded_state().await);

    let body = ask!(app, json!({"message": "admission requirements jamb"}));

    assert_eq!(body["meta"]["matched"]["id"], 3);
    assert_eq!(body["meta"]["score"].as_f64(), Some(0.56));

    let body = ask!(app, json!({"message": "how do I pay fees"}));

    assert_eq!(body["meta"]["matched"]["id"], 2);
    assert_eq!(body["meta"]["score"].as_f64(), Some(0.373));
}

#[actix_web::test]
async fn test_ask_without_overlap_falls_back() {
    let app = init_app!(seeded_state().await);

    let body = ask!(app, json!({"message": "pay school fees"}));

    assert_eq!(body["reply"], FALLBACK);
    assert!(body["meta"]["matched"].is_null());
    assert_eq!(body["meta"]["score"].as_f64(), Some(0.0));
}

#[actix_web::test]
async fn test_ask_empty_message() {
    let app = init_app!(seeded_state().await);

    for payload in [json!({"message": "   "}), json!({}), json!({"message": null})] {
        let body = ask!(app, payload);
        assert_eq!(body["reply"], "Please type a question.");
        assert!(body["meta"]["matched"].is_null());
        assert_eq!(body["meta"]["score"].as_f64(), Some(0.0));
    }
}

#[actix_web::test]
async fn test_ask_unparseable_body_is_treated_as_empty() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/ask")
        .insert_header(("content-type", "application/json"))
        .set_payload("not json")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["reply"], "Please type a question.");
}

#[actix_web::test]
async fn test_ask_with_no_faqs() {
    let state = AppState::new(Arc::new(MemoryStore::new()), &test_settings());
    let app = init_app!(state);

    let body = ask!(app, json!({"message": "What is OSPOLY"}));

    assert_eq!(body["reply"], FALLBACK);
    assert!(body["meta"]["matched"].is_null());
    assert_eq!(body["meta"]["score"].as_f64(), Some(0.0));
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert!(body.get("detail").is_none());
}

#[actix_web::test]
async fn test_admin_routes_require_token() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::get().uri("/api/v1/admin/faqs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::delete()
        .uri("/api/v1/admin/faqs/1")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "unauthorized");
    assert_eq!(body["status_code"], 401);
}

#[actix_web::test]
async fn test_login_rejects_wrong_password() {
    let app = init_app!(seeded_state().await);

    for (username, password) in [("admin", "wrong"), ("nobody", "admin123")] {
        let req = test::TestRequest::post()
            .uri("/api/v1/admin/login")
            .set_json(json!({"username": username, "password": password}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[actix_web::test]
async fn test_login_issues_bearer_token() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/login")
        .set_json(json!({"username": "admin", "password": "admin123"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn test_created_faq_is_answered_immediately() {
    let app = init_app!(seeded_state().await);
    let token = login!(app);

    // prime the candidate cache
    let body = ask!(app, json!({"message": "When does the semester start"}));
    assert!(body["meta"]["matched"].is_null());

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/faqs")
        .insert_header(("Authorization", token.as_str()))
        .set_json(json!({"question": "  When does the semester start? ", "answer": "In September."}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["id"], 4);
    assert_eq!(created["question"], "When does the semester start?");

    let body = ask!(app, json!({"message": "When does the semester start"}));
    assert_eq!(body["reply"], "In September.");
    assert_eq!(body["meta"]["matched"]["id"], 4);
}

#[actix_web::test]
async fn test_create_requires_question_and_answer() {
    let app = init_app!(seeded_state().await);
    let token = login!(app);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/faqs")
        .insert_header(("Authorization", token.as_str()))
        .set_json(json!({"question": "Where is the library?", "answer": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Question and answer are required.");
}

#[actix_web::test]
async fn test_update_and_delete_faq() {
    let app = init_app!(seeded_state().await);
    let token = login!(app);

    let req = test::TestRequest::put()
        .uri("/api/v1/admin/faqs/2")
        .insert_header(("Authorization", token.as_str()))
        .set_json(json!({"question": "How do I reach the registrar?", "answer": "Email the registry."}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["question"], "How do I reach the registrar?");

    let body = ask!(app, json!({"message": "how do i reach the registrar"}));
    assert_eq!(body["reply"], "Email the registry.");

    let req = test::TestRequest::delete()
        .uri("/api/v1/admin/faqs/1")
        .insert_header(("Authorization", token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // only "what" still overlaps, with the admission question: 0.6/3 + 0.4/5
    let body = ask!(app, json!({"message": "What is OSPOLY"}));
    assert_eq!(body["meta"]["matched"]["id"], 3);
    assert_eq!(body["meta"]["score"].as_f64(), Some(0.28));

    let req = test::TestRequest::delete()
        .uri("/api/v1/admin/faqs/1")
        .insert_header(("Authorization", token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_missing_faq() {
    let app = init_app!(seeded_state().await);
    let token = login!(app);

    let req = test::TestRequest::put()
        .uri("/api/v1/admin/faqs/99")
        .insert_header(("Authorization", token.as_str()))
        .set_json(json!({"question": "Q?", "answer": "A."}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_faqs_newest_first() {
    let app = init_app!(seeded_state().await);
    let token = login!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/faqs")
        .insert_header(("Authorization", token.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[actix_web::test]
async fn test_malformed_admin_json_uses_error_shape() {
    let app = init_app!(seeded_state().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_get_single_faq() {
    let app = init_app!(seeded_state().await);
    let token = login!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/faqs/2")
        .insert_header(("Authorization", token.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["question"], "How can I contact the registrar?");

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/faqs/99")
        .insert_header(("Authorization", token.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/v1/admin/faqs/2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
