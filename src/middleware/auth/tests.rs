use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use chrono::{Duration, Utc};
use tower::ServiceExt;

use crate::services::auth::{Role, authentication::tests::InMemoryMembers};
use crate::state::AppState;
use crate::test_support::{bearer, test_app};

fn app() -> (Router, AppState) {
    test_app(
        InMemoryMembers::default()
            .with(1, "hgd@band.io", "pass1234", &["USER"])
            .with(2, "admin@band.io", "admin1234", &["ADMIN", "USER"]),
    )
}

fn request(method: Method, uri: &str, auth: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(res: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public_and_carries_standard_headers() {
    let (app, _) = app();

    let res = app
        .oneshot(request(Method::GET, "/health", None, None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-frame-options"], "SAMEORIGIN");
    assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn protected_route_without_token_is_401() {
    let (app, _) = app();

    let res = app
        .oneshot(request(Method::GET, "/bands", None, None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");
    let body = json_body(res).await;
    assert_eq!(body["status"], 401);
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn head_on_protected_routes_needs_a_token() {
    let (app, _) = app();

    for uri in [
        "/bands",
        "/bands?page=0",
        "/users/not-a-number",
        "/comments?ownerId=0",
        "/mentions?memberId=0",
    ] {
        let res = app
            .clone()
            .oneshot(request(Method::HEAD, uri, None, None))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}

#[tokio::test]
async fn protected_route_with_garbage_token_is_401() {
    let (app, _) = app();

    let res = app
        .oneshot(request(Method::GET, "/bands", Some("Bearer not.a.jwt"), None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_with_expired_token_is_401() {
    let (app, state) = app();
    let token = state
        .tokenizer
        .access_token_at(1, "hgd@band.io", &[Role::User], Utc::now() - Duration::hours(2))
        .unwrap();

    let res = app
        .oneshot(request(
            Method::GET,
            "/comments?ownerId=1",
            Some(&format!("Bearer {token}")),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_is_not_accepted_as_bearer() {
    let (app, state) = app();
    let refresh = state.tokenizer.generate_refresh_token("hgd@band.io").unwrap();

    let res = app
        .oneshot(request(
            Method::DELETE,
            "/mentions/1",
            Some(&format!("Bearer {refresh}")),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_without_user_role_is_403() {
    let (app, state) = app();
    let auth = bearer(&state, 1, "hgd@band.io", &[]);

    let res = app
        .oneshot(request(Method::GET, "/bands", Some(&auth), None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(res).await["message"], "Forbidden");
}

#[tokio::test]
async fn valid_token_reaches_the_handler() {
    let (app, state) = app();
    let auth = bearer(&state, 1, "hgd@band.io", &[Role::User]);

    // the handler rejects the body before touching the database
    let res = app
        .oneshot(request(
            Method::POST,
            "/bands",
            Some(&auth),
            Some(serde_json::json!({
                "school": "Hanbit",
                "schoolCode": "MIDDLE",
                "grade": 5,
                "banNumber": 3,
                "username": "hgd",
                "joinPass": "1234"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["fieldErrors"][0]["field"], "grade");
}

#[tokio::test]
async fn paging_is_validated() {
    let (app, state) = app();
    let auth = bearer(&state, 1, "hgd@band.io", &[Role::User]);

    let res = app
        .oneshot(request(Method::GET, "/bands?page=0&size=500", Some(&auth), None))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["fieldErrors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn members_cannot_patch_each_other() {
    let (app, state) = app();
    let auth = bearer(&state, 1, "hgd@band.io", &[Role::User]);

    let res = app
        .oneshot(request(
            Method::PATCH,
            "/users/2",
            Some(&auth),
            Some(serde_json::json!({ "name": "Mallory" })),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn public_route_ignores_bad_token() {
    let (app, _) = app();

    let res = app
        .clone()
        .oneshot(request(Method::GET, "/health", Some("Bearer broken"), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(request(Method::POST, "/users/logout", Some("Bearer broken"), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn sign_up_validation_errors_list_fields() {
    let (app, _) = app();

    let res = app
        .oneshot(request(
            Method::POST,
            "/users",
            None,
            Some(serde_json::json!({
                "email": "nope",
                "password": "pass1234",
                "name": "Hong"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["fieldErrors"][0]["field"], "email");
}

#[tokio::test]
async fn malformed_json_is_400_with_error_body() {
    let (app, _) = app();

    let res = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"username\":"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["status"], 400);
}

#[tokio::test]
async fn login_sets_both_token_headers() {
    let (app, state) = app();

    let res = app
        .oneshot(request(
            Method::POST,
            "/auth/login",
            None,
            Some(serde_json::json!({ "username": "hgd@band.io", "password": "pass1234" })),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let access = res.headers()[header::AUTHORIZATION].to_str().unwrap();
    let access = access.strip_prefix("Bearer ").unwrap();
    assert_eq!(state.tokenizer.verify_access_token(access).unwrap().member_id, 1);

    let refresh = res.headers()["refresh"].to_str().unwrap();
    assert_eq!(state.tokenizer.verify_refresh_token(refresh).unwrap().sub, "hgd@band.io");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (app, _) = app();

    for (username, password) in [("hgd@band.io", "wrong"), ("ghost@band.io", "pass1234")] {
        let res = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/auth/login",
                None,
                Some(serde_json::json!({ "username": username, "password": password })),
            ))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(res).await["message"], "Unauthorized");
    }
}

#[tokio::test]
async fn refresh_reissues_access_token() {
    let (app, state) = app();
    let refresh = state.tokenizer.generate_refresh_token("admin@band.io").unwrap();

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/auth/refresh")
                .header("refresh", refresh)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let access = res.headers()[header::AUTHORIZATION].to_str().unwrap();
    let claims = state
        .tokenizer
        .verify_access_token(access.strip_prefix("Bearer ").unwrap())
        .unwrap();
    assert_eq!(claims.member_id, 2);
    assert_eq!(claims.roles, vec!["ADMIN".to_string(), "USER".to_string()]);

    let res = app
        .oneshot(request(Method::POST, "/auth/refresh", None, None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cors_preflight_is_answered_before_auth() {
    let (app, _) = app();

    let res = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/bands")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
