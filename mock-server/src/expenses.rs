use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::envelope::{created, deleted, fail, ok, paginate, ApiResult, Reply};
use crate::store::{money, Db, ExpenseRecord, SharedDb};

#[derive(Deserialize)]
pub struct CreateIn {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category_id: i64,
    pub account_id: i64,
    #[serde(default)]
    pub tag_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub receipt_path: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateIn {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub account_id: Option<i64>,
    pub tag_ids: Option<Vec<i64>>,
    pub receipt_path: Option<String>,
}

/// Listing filters. `tag_ids` arrives as a comma-joined string.
#[derive(Deserialize)]
pub struct FilterParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub category_id: Option<i64>,
    pub account_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub tag_ids: Option<String>,
}

pub async fn list(State(db): State<SharedDb>, Query(params): Query<FilterParams>) -> ApiResult {
    let db = db.read().await;
    let tag_filter: Option<Vec<i64>> = params
        .tag_ids
        .as_deref()
        .map(|raw| raw.split(',').filter_map(|s| s.trim().parse().ok()).collect());

    let mut records: Vec<&ExpenseRecord> = db
        .expenses
        .iter()
        .filter(|e| params.category_id.map_or(true, |id| e.category_id == id))
        .filter(|e| params.account_id.map_or(true, |id| e.account_id == Some(id)))
        .filter(|e| params.start_date.map_or(true, |d| e.date >= d))
        .filter(|e| params.end_date.map_or(true, |d| e.date <= d))
        .filter(|e| {
            tag_filter
                .as_ref()
                .map_or(true, |wanted| wanted.iter().any(|id| e.tag_ids.contains(id)))
        })
        .collect();

    match params.sort.as_deref() {
        Some("amount") => records.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
        Some("date") => records.sort_by_key(|e| e.date),
        _ => records.sort_by_key(|e| e.id),
    }
    if params.order.as_deref() == Some("desc") {
        records.reverse();
    }

    let items: Vec<Value> = records.iter().map(|e| e.out(&db)).collect();
    Ok(ok(
        paginate(&items, params.page.unwrap_or(1), params.size.unwrap_or(10)),
        None,
    ))
}

pub async fn create(State(db): State<SharedDb>, Json(input): Json<CreateIn>) -> ApiResult {
    let mut db = db.write().await;
    check_refs(&db, input.category_id, Some(input.account_id), input.tag_ids.as_deref())?;
    let id = db.next_id();
    let now = Utc::now();
    let record = ExpenseRecord {
        id,
        amount: input.amount,
        date: input.date,
        description: input.description,
        category_id: input.category_id,
        account_id: Some(input.account_id),
        tag_ids: input.tag_ids.unwrap_or_default(),
        receipt_path: input.receipt_path,
        created_at: now,
        updated_at: now,
    };
    let out = record.out(&db);
    db.expenses.push(record);
    Ok(created(out, Some("Expense created")))
}

pub async fn get_one(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let db = db.read().await;
    db.expenses
        .iter()
        .find(|e| e.id == id)
        .map(|e| ok(e.out(&db), None))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Expense not found"))
}

pub async fn update(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateIn>,
) -> ApiResult {
    let mut db = db.write().await;
    let index = db
        .expenses
        .iter()
        .position(|e| e.id == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Expense not found"))?;
    if let Some(category_id) = input.category_id {
        if !db.categories.iter().any(|c| c.id == category_id) {
            return Err(fail(StatusCode::NOT_FOUND, "Category not found"));
        }
        db.expenses[index].category_id = category_id;
    }
    if let Some(account_id) = input.account_id {
        if !db.accounts.iter().any(|a| a.id == account_id) {
            return Err(fail(StatusCode::NOT_FOUND, "Account not found"));
        }
        db.expenses[index].account_id = Some(account_id);
    }
    if let Some(amount) = input.amount {
        db.expenses[index].amount = amount;
    }
    if let Some(date) = input.date {
        db.expenses[index].date = date;
    }
    if let Some(description) = input.description {
        db.expenses[index].description = description;
    }
    if let Some(tag_ids) = input.tag_ids {
        for tag_id in &tag_ids {
            if !db.tags.iter().any(|t| t.id == *tag_id) {
                return Err(fail(StatusCode::NOT_FOUND, "Tag not found"));
            }
        }
        db.expenses[index].tag_ids = tag_ids;
    }
    if let Some(receipt_path) = input.receipt_path {
        db.expenses[index].receipt_path = Some(receipt_path);
    }
    db.expenses[index].updated_at = Utc::now();
    Ok(ok(db.expenses[index].out(&db), Some("Expense updated")))
}

pub async fn remove(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let mut db = db.write().await;
    let before = db.expenses.len();
    db.expenses.retain(|e| e.id != id);
    if db.expenses.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Expense not found"));
    }
    Ok(deleted("Expense deleted"))
}

#[derive(Deserialize)]
pub struct SummaryParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category_id: Option<i64>,
}

pub async fn summary(State(db): State<SharedDb>, Query(params): Query<SummaryParams>) -> ApiResult {
    let db = db.read().await;
    let selected: Vec<&ExpenseRecord> = db
        .expenses
        .iter()
        .filter(|e| params.category_id.map_or(true, |id| e.category_id == id))
        .filter(|e| params.start_date.map_or(true, |d| e.date >= d))
        .filter(|e| params.end_date.map_or(true, |d| e.date <= d))
        .collect();

    let count = selected.len() as u64;
    let total: f64 = selected.iter().map(|e| e.amount).sum();
    let average = if count == 0 { 0.0 } else { total / count as f64 };

    let mut by_category = Vec::new();
    for category in &db.categories {
        let in_category: Vec<_> = selected.iter().filter(|e| e.category_id == category.id).collect();
        if in_category.is_empty() {
            continue;
        }
        by_category.push(json!({
            "category_id": category.id,
            "category_name": category.name,
            "total_amount": money(in_category.iter().map(|e| e.amount).sum()),
            "count": in_category.len(),
        }));
    }

    let mut by_tag = Vec::new();
    for tag in &db.tags {
        let tagged: Vec<_> = selected.iter().filter(|e| e.tag_ids.contains(&tag.id)).collect();
        if tagged.is_empty() {
            continue;
        }
        by_tag.push(json!({
            "tag_id": tag.id,
            "tag_name": tag.name,
            "total_amount": money(tagged.iter().map(|e| e.amount).sum()),
            "count": tagged.len(),
        }));
    }

    let today = Utc::now().date_naive();
    let start = params
        .start_date
        .or_else(|| selected.iter().map(|e| e.date).min())
        .unwrap_or(today);
    let end = params
        .end_date
        .or_else(|| selected.iter().map(|e| e.date).max())
        .unwrap_or(today);

    Ok(ok(
        json!({
            "total_amount": money(total),
            "average_amount": money(average),
            "count": count,
            "by_category": by_category,
            "by_tag": by_tag,
            "period": { "start_date": start, "end_date": end },
        }),
        None,
    ))
}

fn check_refs(
    db: &Db,
    category_id: i64,
    account_id: Option<i64>,
    tag_ids: Option<&[i64]>,
) -> Result<(), Reply> {
    if !db.categories.iter().any(|c| c.id == category_id) {
        return Err(fail(StatusCode::NOT_FOUND, "Category not found"));
    }
    if let Some(account_id) = account_id {
        if !db.accounts.iter().any(|a| a.id == account_id) {
            return Err(fail(StatusCode::NOT_FOUND, "Account not found"));
        }
    }
    if let Some(tag_ids) = tag_ids {
        for tag_id in tag_ids {
            if !db.tags.iter().any(|t| t.id == *tag_id) {
                return Err(fail(StatusCode::NOT_FOUND, "Tag not found"));
            }
        }
    }
    Ok(())
}
