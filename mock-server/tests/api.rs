use axum::http::{self, Request, StatusCode};
use axum::routing::RouterIntoService;
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::{Service, ServiceExt};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

/// Register a user and return a bearer token, driving `app` in place.
async fn login(app: &mut RouterIntoService<String>) -> String {
    let resp = ServiceExt::ready(app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/auth/register",
            None,
            r#"{"username":"alice","email":"alice@example.com","password":"secret"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/auth/token",
            None,
            r#"{"username":"alice","password":"secret"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    body["data"]["access_token"].as_str().unwrap().to_string()
}

fn service() -> RouterIntoService<String> {
    app().into_service()
}

// --- auth ---

#[tokio::test]
async fn register_wraps_user_in_success_envelope() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            None,
            r#"{"username":"bob","email":"bob@example.com","password":"pw"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["username"], "bob");
    assert_eq!(body["message"], "User registered");
}

#[tokio::test]
async fn duplicate_username_returns_409_detail() {
    let mut app = service();
    login(&mut app).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/auth/register",
            None,
            r#"{"username":"alice","email":"other@example.com","password":"pw"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "Username already registered");
}

#[tokio::test]
async fn bad_credentials_return_401_detail() {
    let mut app = service();
    login(&mut app).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/auth/token",
            None,
            r#"{"username":"alice","password":"wrong"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "Invalid credentials");
}

#[tokio::test]
async fn me_without_token_is_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "Not authenticated");
}

#[tokio::test]
async fn me_returns_current_user() {
    let mut app = service();
    let token = login(&mut app).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("GET", "/auth/me", Some(&token), ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
}

// --- auth gate ---

#[tokio::test]
async fn resource_routes_require_bearer_token() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/accounts")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "Not authenticated");
}

// --- accounts ---

#[tokio::test]
async fn account_crud_lifecycle() {
    let mut app = service();
    let token = login(&mut app).await;

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/accounts",
            Some(&token),
            r#"{"name":"Cash","initial_balance":150.5}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["name"], "Cash");
    assert_eq!(body["data"]["initial_balance"], "150.50");
    let id = body["data"]["id"].as_i64().unwrap();

    // list
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("GET", "/accounts", Some(&token), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["id"], id);

    // update
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/accounts/{id}"),
            Some(&token),
            r#"{"name":"Wallet"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["name"], "Wallet");
    assert_eq!(body["data"]["initial_balance"], "150.50"); // unchanged

    // delete — success envelope with null data
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "DELETE",
            &format!("/accounts/{id}"),
            Some(&token),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert!(body["data"].is_null());

    // get after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "GET",
            &format!("/accounts/{id}"),
            Some(&token),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "Account not found");
}

#[tokio::test]
async fn listing_is_paginated() {
    let mut app = service();
    let token = login(&mut app).await;

    for name in ["food", "travel", "rent"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request(
                "POST",
                "/tags",
                Some(&token),
                &format!(r#"{{"name":"{name}"}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("GET", "/tags?page=2&size=2", Some(&token), ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["pages"], 2);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["items"][0]["name"], "rent");
}

// --- budgets ---

#[tokio::test]
async fn budget_status_requires_period() {
    let mut app = service();
    let token = login(&mut app).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("GET", "/budgets/status", Some(&token), ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "year and month are required");
}

#[tokio::test]
async fn budget_status_computes_spending() {
    let mut app = service();
    let token = login(&mut app).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/categories",
            Some(&token),
            r#"{"name":"Groceries","description":"food"}"#,
        ))
        .await
        .unwrap();
    let category_id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/accounts",
            Some(&token),
            r#"{"name":"Cash","initial_balance":0}"#,
        ))
        .await
        .unwrap();
    let account_id = body_json(resp).await["data"]["id"].as_i64().unwrap();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/budgets",
            Some(&token),
            &format!(r#"{{"category_id":{category_id},"year":2025,"month":6,"amount":100}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/expenses",
            Some(&token),
            &format!(
                r#"{{"amount":85,"date":"2025-06-10","description":"weekly shop","category_id":{category_id},"account_id":{account_id}}}"#
            ),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "GET",
            "/budgets/status?year=2025&month=6",
            Some(&token),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["summary"]["total_budget"], "100.00");
    assert_eq!(body["data"]["summary"]["total_spent"], "85.00");
    assert_eq!(body["data"]["summary"]["percent"], 85.0);
    assert_eq!(body["data"]["categories"][0]["status"], "warning");

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "GET",
            "/budgets/overview?year=2025&month=6",
            Some(&token),
            "",
        ))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"]["summary"]["remaining"], "15.00");
    assert_eq!(body["data"]["period"]["year"], 2025);
    assert_eq!(body["data"]["period"]["month"], 6);
}

// --- expenses ---

#[tokio::test]
async fn expense_create_rejects_unknown_category() {
    let mut app = service();
    let token = login(&mut app).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/expenses",
            Some(&token),
            r#"{"amount":10,"date":"2025-06-01","description":"x","category_id":999,"account_id":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["detail"], "Category not found");
}
