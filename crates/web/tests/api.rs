//! Router-level tests for requests that are answered before any database
//! access: authentication, body/query validation and role checks.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use storage::models::UserRole;
use uuid::Uuid;
use web::auth::jwt::TokenType;

use common::{offline_app, send, send_raw, token_for};

mod authentication {
    use super::*;

    #[tokio::test]
    async fn protected_route_requires_a_token() {
        let app = offline_app();

        let res = send(&app, Method::GET, "/api/schools/", None, None).await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = offline_app();

        let res = send(&app, Method::GET, "/api/events/", Some("not-a-jwt"), None).await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn refresh_token_cannot_authenticate_requests() {
        let app = offline_app();
        let refresh = token_for(UserRole::Admin, TokenType::Refresh);

        let res = send(&app, Method::GET, "/api/profile/", Some(&refresh), None).await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn access_token_cannot_be_used_to_refresh() {
        let app = offline_app();
        let access = token_for(UserRole::Viewer, TokenType::Access);

        let res = send(
            &app,
            Method::POST,
            "/api/token/refresh/",
            None,
            Some(json!({ "refresh": access })),
        )
        .await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn notifications_require_a_token() {
        let app = offline_app();
        let uri = format!("/api/notifications/{}/read/", Uuid::new_v4());

        let res = send(&app, Method::POST, &uri, None, None).await;

        assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    }
}

mod validation {
    use super::*;

    #[tokio::test]
    async fn register_rejects_short_password() {
        let app = offline_app();

        let res = send(
            &app,
            Method::POST,
            "/api/register/",
            None,
            Some(json!({ "username": "alice", "password": "short" })),
        )
        .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        let details = res.body["details"].as_array().unwrap();
        assert!(details.iter().any(|d| d.as_str().unwrap().starts_with("password:")));
    }

    #[tokio::test]
    async fn register_rejects_unknown_role() {
        let app = offline_app();

        let res = send(
            &app,
            Method::POST,
            "/api/register/",
            None,
            Some(json!({ "username": "alice", "password": "long enough", "role": "owner" })),
        )
        .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let app = offline_app();

        let res = send(
            &app,
            Method::POST,
            "/api/login/",
            None,
            Some(json!({ "username": "", "password": "" })),
        )
        .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["details"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn malformed_json_gets_structured_error() {
        let app = offline_app();
        let token = token_for(UserRole::Coach, TokenType::Access);

        let res = send_raw(&app, Method::POST, "/api/events/", &token, "{ not json").await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn event_cannot_end_before_it_starts() {
        let app = offline_app();
        let token = token_for(UserRole::Coach, TokenType::Access);

        let res = send(
            &app,
            Method::POST,
            "/api/events/",
            Some(&token),
            Some(json!({
                "name": "Regional Finals",
                "description": "",
                "event_date": "2024-05-01",
                "start_time": "17:00:00",
                "end_time": "09:00:00",
                "location": "Central Stadium"
            })),
        )
        .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn event_status_outside_closed_set_is_rejected() {
        let app = offline_app();
        let token = token_for(UserRole::Viewer, TokenType::Access);

        let res = send(&app, Method::GET, "/api/events/?status=archived", Some(&token), None).await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn page_size_is_capped() {
        let app = offline_app();
        let token = token_for(UserRole::Viewer, TokenType::Access);

        let res = send(&app, Method::GET, "/api/schools/?page_size=500", Some(&token), None).await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn results_batch_must_not_be_empty() {
        let app = offline_app();
        let token = token_for(UserRole::Coach, TokenType::Access);
        let uri = format!("/api/events/{}/results/", Uuid::new_v4());

        let res = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "results": [] }))).await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn result_position_must_be_positive() {
        let app = offline_app();
        let token = token_for(UserRole::Coach, TokenType::Access);
        let uri = format!("/api/events/{}/results/", Uuid::new_v4());

        let res = send(
            &app,
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "results": [{ "participant_id": Uuid::new_v4(), "position": 0 }] })),
        )
        .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        let details = res.body["details"].as_array().unwrap();
        assert!(
            details
                .iter()
                .any(|d| d.as_str().unwrap().starts_with("results[0].position"))
        );
    }

    #[tokio::test]
    async fn participant_gender_outside_closed_set_is_rejected() {
        let app = offline_app();
        let token = token_for(UserRole::Coach, TokenType::Access);

        let res = send(
            &app,
            Method::POST,
            "/api/participants/",
            Some(&token),
            Some(json!({
                "first_name": "Jane",
                "last_name": "Doe",
                "gender": "n/a",
                "date_of_birth": "2008-03-14",
                "school_id": Uuid::new_v4()
            })),
        )
        .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_id_gets_structured_error() {
        let app = offline_app();
        let token = token_for(UserRole::Viewer, TokenType::Access);

        let res = send(&app, Method::GET, "/api/schools/not-a-uuid/", Some(&token), None).await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(res.body["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_notification_id_gets_structured_error() {
        let app = offline_app();
        let token = token_for(UserRole::Viewer, TokenType::Access);

        let res = send(
            &app,
            Method::POST,
            "/api/notifications/42/read/",
            Some(&token),
            None,
        )
        .await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod authorization {
    use super::*;

    #[tokio::test]
    async fn only_admins_send_notifications() {
        let app = offline_app();
        let token = token_for(UserRole::Coach, TokenType::Access);

        let res = send(
            &app,
            Method::POST,
            "/api/notifications/",
            Some(&token),
            Some(json!({
                "user_id": Uuid::new_v4(),
                "title": "Heads up",
                "message": "Schedule changed"
            })),
        )
        .await;

        assert_eq!(res.status, StatusCode::FORBIDDEN);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");
    }
}

#[tokio::test]
async fn openapi_document_lists_result_routes() {
    let app = offline_app();

    let res = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["paths"]["/api/events/{id}/results/"].is_object());
    assert!(res.body["paths"]["/api/notifications/{id}/read/"].is_object());
}
