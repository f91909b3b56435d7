use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::envelope::{created, deleted, fail, ok, paginate, ApiResult};
use crate::params::ListParams;
use crate::store::{SharedDb, TagRecord};

#[derive(Deserialize)]
pub struct CreateIn {
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdateIn {
    pub name: String,
}

pub async fn list(State(db): State<SharedDb>, Query(params): Query<ListParams>) -> ApiResult {
    let db = db.read().await;
    let items: Vec<Value> = db.tags.iter().map(TagRecord::out).collect();
    Ok(ok(paginate(&items, params.page(), params.size()), None))
}

pub async fn create(State(db): State<SharedDb>, Json(input): Json<CreateIn>) -> ApiResult {
    let mut db = db.write().await;
    let id = db.next_id();
    let now = Utc::now();
    let record = TagRecord {
        id,
        name: input.name,
        created_at: now,
        updated_at: now,
    };
    let out = record.out();
    db.tags.push(record);
    Ok(created(out, Some("Tag created")))
}

pub async fn get_one(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let db = db.read().await;
    db.tags
        .iter()
        .find(|t| t.id == id)
        .map(|t| ok(t.out(), None))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Tag not found"))
}

pub async fn update(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateIn>,
) -> ApiResult {
    let mut db = db.write().await;
    let record = db
        .tags
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Tag not found"))?;
    record.name = input.name;
    record.updated_at = Utc::now();
    Ok(ok(record.out(), Some("Tag updated")))
}

pub async fn remove(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let mut db = db.write().await;
    let before = db.tags.len();
    db.tags.retain(|t| t.id != id);
    if db.tags.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Tag not found"));
    }
    Ok(deleted("Tag deleted"))
}
