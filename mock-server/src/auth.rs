//! Registration, token issuance, and the bearer-token gate.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::envelope::{created, fail, ok, ApiResult, Reply};
use crate::store::{SharedDb, UserRecord};

#[derive(Deserialize)]
pub struct RegisterIn {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn register(State(db): State<SharedDb>, Json(input): Json<RegisterIn>) -> ApiResult {
    let mut db = db.write().await;
    if db.users.iter().any(|u| u.username == input.username) {
        return Err(fail(StatusCode::CONFLICT, "Username already registered"));
    }
    let id = db.next_id();
    let user = UserRecord {
        id,
        username: input.username,
        email: input.email,
        password: input.password,
        created_at: Utc::now(),
    };
    let out = user.out();
    db.users.push(user);
    Ok(created(out, Some("User registered")))
}

#[derive(Deserialize)]
pub struct TokenIn {
    pub username: String,
    pub password: String,
}

pub async fn token(State(db): State<SharedDb>, Json(input): Json<TokenIn>) -> ApiResult {
    let mut db = db.write().await;
    let user_id = db
        .users
        .iter()
        .find(|u| u.username == input.username && u.password == input.password)
        .map(|u| u.id);
    let Some(user_id) = user_id else {
        return Err(fail(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    };
    let token = format!("tok-{user_id}-{}", db.sessions.len() + 1);
    db.sessions.insert(token.clone(), user_id);
    Ok(ok(
        json!({
            "access_token": token,
            "token_type": "bearer",
            "expires_in": 3600,
        }),
        None,
    ))
}

pub async fn me(State(db): State<SharedDb>, headers: HeaderMap) -> ApiResult {
    let db = db.read().await;
    let user = bearer(&headers)
        .and_then(|token| db.sessions.get(token))
        .and_then(|user_id| db.users.iter().find(|u| u.id == *user_id));
    match user {
        Some(user) => Ok(ok(user.out(), None)),
        None => Err(fail(StatusCode::UNAUTHORIZED, "Not authenticated")),
    }
}

/// Middleware guarding every resource route: the request must carry a
/// bearer token issued by `token`.
pub async fn require_auth(
    State(db): State<SharedDb>,
    request: Request,
    next: Next,
) -> Result<Response, Reply> {
    let authenticated = match bearer(request.headers()) {
        Some(token) => db.read().await.sessions.contains_key(token),
        None => false,
    };
    if authenticated {
        Ok(next.run(request).await)
    } else {
        Err(fail(StatusCode::UNAUTHORIZED, "Not authenticated"))
    }
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
