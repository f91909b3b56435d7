//! In-memory mock of the expense-tracking API.
//!
//! Mirrors the real backend's surface closely enough for client tests:
//! `{status, data, message}` success envelopes, `{detail}` error bodies,
//! bearer-token auth, paginated listings, and the computed budget /
//! summary / recurring endpoints.

pub mod accounts;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod envelope;
pub mod expenses;
pub mod params;
pub mod recurring;
pub mod store;
pub mod tags;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

use store::{Db, SharedDb};

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(Db::default()));

    // Static segments (status, overview, summary, upcoming, generate) must
    // be routed alongside the `{id}` captures; axum prefers the static
    // match.
    let protected = Router::new()
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/{id}",
            get(accounts::get_one)
                .put(accounts::update)
                .delete(accounts::remove),
        )
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::get_one)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route("/tags", get(tags::list).post(tags::create))
        .route(
            "/tags/{id}",
            get(tags::get_one).put(tags::update).delete(tags::remove),
        )
        .route("/budgets", get(budgets::list).post(budgets::create))
        .route("/budgets/status", get(budgets::status))
        .route("/budgets/overview", get(budgets::overview))
        .route(
            "/budgets/{id}",
            get(budgets::get_one)
                .put(budgets::update)
                .delete(budgets::remove),
        )
        .route("/expenses", get(expenses::list).post(expenses::create))
        .route("/expenses/summary", get(expenses::summary))
        .route(
            "/expenses/{id}",
            get(expenses::get_one)
                .put(expenses::update)
                .delete(expenses::remove),
        )
        .route("/recurring", get(recurring::list).post(recurring::create))
        .route("/recurring/upcoming", get(recurring::upcoming))
        .route("/recurring/generate", post(recurring::generate))
        .route(
            "/recurring/{id}",
            get(recurring::get_one)
                .put(recurring::update)
                .delete(recurring::remove),
        )
        .layer(middleware::from_fn_with_state(db.clone(), auth::require_auth));

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/token", post(auth::token))
        .route("/auth/me", get(auth::me))
        .merge(protected)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
