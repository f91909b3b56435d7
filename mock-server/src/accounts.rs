use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::envelope::{created, deleted, fail, ok, paginate, ApiResult};
use crate::params::ListParams;
use crate::store::{AccountRecord, SharedDb};

#[derive(Deserialize)]
pub struct CreateIn {
    pub name: String,
    pub initial_balance: f64,
}

#[derive(Deserialize)]
pub struct UpdateIn {
    pub name: Option<String>,
    pub initial_balance: Option<f64>,
}

pub async fn list(State(db): State<SharedDb>, Query(params): Query<ListParams>) -> ApiResult {
    let db = db.read().await;
    let items: Vec<Value> = db.accounts.iter().map(AccountRecord::out).collect();
    Ok(ok(paginate(&items, params.page(), params.size()), None))
}

pub async fn create(State(db): State<SharedDb>, Json(input): Json<CreateIn>) -> ApiResult {
    let mut db = db.write().await;
    let id = db.next_id();
    let now = Utc::now();
    let record = AccountRecord {
        id,
        name: input.name,
        initial_balance: input.initial_balance,
        created_at: now,
        updated_at: now,
    };
    let out = record.out();
    db.accounts.push(record);
    Ok(created(out, Some("Account created")))
}

pub async fn get_one(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let db = db.read().await;
    db.accounts
        .iter()
        .find(|a| a.id == id)
        .map(|a| ok(a.out(), None))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Account not found"))
}

pub async fn update(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateIn>,
) -> ApiResult {
    let mut db = db.write().await;
    let record = db
        .accounts
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Account not found"))?;
    if let Some(name) = input.name {
        record.name = name;
    }
    if let Some(balance) = input.initial_balance {
        record.initial_balance = balance;
    }
    record.updated_at = Utc::now();
    Ok(ok(record.out(), Some("Account updated")))
}

pub async fn remove(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let mut db = db.write().await;
    let before = db.accounts.len();
    db.accounts.retain(|a| a.id != id);
    if db.accounts.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Account not found"));
    }
    Ok(deleted("Account deleted"))
}
