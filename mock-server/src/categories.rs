use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::envelope::{created, deleted, fail, ok, paginate, ApiResult};
use crate::params::ListParams;
use crate::store::{CategoryRecord, SharedDb};

#[derive(Deserialize)]
pub struct CreateIn {
    pub name: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateIn {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn list(State(db): State<SharedDb>, Query(params): Query<ListParams>) -> ApiResult {
    let db = db.read().await;
    let mut records: Vec<&CategoryRecord> = db.categories.iter().collect();
    if params.sort.as_deref() == Some("name") {
        records.sort_by(|a, b| a.name.cmp(&b.name));
    }
    if params.descending() {
        records.reverse();
    }
    let items: Vec<Value> = records.iter().map(|c| c.out()).collect();
    Ok(ok(paginate(&items, params.page(), params.size()), None))
}

pub async fn create(State(db): State<SharedDb>, Json(input): Json<CreateIn>) -> ApiResult {
    let mut db = db.write().await;
    let id = db.next_id();
    let now = Utc::now();
    let record = CategoryRecord {
        id,
        name: input.name,
        description: input.description,
        created_at: now,
        updated_at: now,
    };
    let out = record.out();
    db.categories.push(record);
    Ok(created(out, Some("Category created")))
}

pub async fn get_one(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let db = db.read().await;
    db.categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| ok(c.out(), None))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Category not found"))
}

pub async fn update(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateIn>,
) -> ApiResult {
    let mut db = db.write().await;
    let record = db
        .categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Category not found"))?;
    if let Some(name) = input.name {
        record.name = name;
    }
    if let Some(description) = input.description {
        record.description = description;
    }
    record.updated_at = Utc::now();
    Ok(ok(record.out(), Some("Category updated")))
}

pub async fn remove(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let mut db = db.write().await;
    let before = db.categories.len();
    db.categories.retain(|c| c.id != id);
    if db.categories.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Category not found"));
    }
    Ok(deleted("Category deleted"))
}
