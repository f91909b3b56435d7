use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Days, Months, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::envelope::{created, deleted, fail, ok, paginate, ApiResult};
use crate::params::ListParams;
use crate::store::{money, RecurringRecord, SharedDb};

const INTERVALS: [&str; 4] = ["daily", "weekly", "monthly", "yearly"];

#[derive(Deserialize)]
pub struct CreateIn {
    pub name: String,
    pub amount: f64,
    pub category_id: i64,
    pub interval: String,
    pub next_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct UpdateIn {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub category_id: Option<i64>,
    pub interval: Option<String>,
    pub next_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub async fn list(State(db): State<SharedDb>, Query(params): Query<ListParams>) -> ApiResult {
    let db = db.read().await;
    let items: Vec<Value> = db.recurring.iter().map(|r| r.out(&db)).collect();
    Ok(ok(paginate(&items, params.page(), params.size()), None))
}

pub async fn create(State(db): State<SharedDb>, Json(input): Json<CreateIn>) -> ApiResult {
    let mut db = db.write().await;
    if !db.categories.iter().any(|c| c.id == input.category_id) {
        return Err(fail(StatusCode::NOT_FOUND, "Category not found"));
    }
    if !INTERVALS.contains(&input.interval.as_str()) {
        return Err(fail(StatusCode::UNPROCESSABLE_ENTITY, "Invalid interval"));
    }
    let id = db.next_id();
    let now = Utc::now();
    let record = RecurringRecord {
        id,
        name: input.name,
        amount: input.amount,
        category_id: input.category_id,
        interval: input.interval,
        next_date: input.next_date,
        end_date: input.end_date,
        created_at: now,
        updated_at: now,
    };
    let out = record.out(&db);
    db.recurring.push(record);
    Ok(created(out, Some("Recurring expense created")))
}

pub async fn get_one(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let db = db.read().await;
    db.recurring
        .iter()
        .find(|r| r.id == id)
        .map(|r| ok(r.out(&db), None))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Recurring expense not found"))
}

pub async fn update(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateIn>,
) -> ApiResult {
    let mut db = db.write().await;
    let index = db
        .recurring
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Recurring expense not found"))?;
    if let Some(category_id) = input.category_id {
        if !db.categories.iter().any(|c| c.id == category_id) {
            return Err(fail(StatusCode::NOT_FOUND, "Category not found"));
        }
        db.recurring[index].category_id = category_id;
    }
    if let Some(interval) = input.interval {
        if !INTERVALS.contains(&interval.as_str()) {
            return Err(fail(StatusCode::UNPROCESSABLE_ENTITY, "Invalid interval"));
        }
        db.recurring[index].interval = interval;
    }
    if let Some(name) = input.name {
        db.recurring[index].name = name;
    }
    if let Some(amount) = input.amount {
        db.recurring[index].amount = amount;
    }
    if let Some(next_date) = input.next_date {
        db.recurring[index].next_date = next_date;
    }
    if let Some(end_date) = input.end_date {
        db.recurring[index].end_date = Some(end_date);
    }
    db.recurring[index].updated_at = Utc::now();
    Ok(ok(db.recurring[index].out(&db), Some("Recurring expense updated")))
}

pub async fn remove(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let mut db = db.write().await;
    let before = db.recurring.len();
    db.recurring.retain(|r| r.id != id);
    if db.recurring.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Recurring expense not found"));
    }
    Ok(deleted("Recurring expense deleted"))
}

#[derive(Deserialize)]
pub struct UpcomingParams {
    pub days: Option<u32>,
}

pub async fn upcoming(State(db): State<SharedDb>, Query(params): Query<UpcomingParams>) -> ApiResult {
    let horizon = i64::from(params.days.unwrap_or(7));
    let db = db.read().await;
    let today = Utc::now().date_naive();
    let mut items = Vec::new();
    let mut total = 0.0;
    for record in &db.recurring {
        let days_until = (record.next_date - today).num_days();
        if days_until < 0 || days_until > horizon {
            continue;
        }
        if record.end_date.map_or(false, |end| record.next_date > end) {
            continue;
        }
        let category = db
            .categories
            .iter()
            .find(|c| c.id == record.category_id)
            .map(|c| json!({ "id": c.id, "name": c.name }))
            .unwrap_or(Value::Null);
        items.push(json!({
            "id": record.id,
            "name": record.name,
            "amount": money(record.amount),
            "next_date": record.next_date,
            "category": category,
            "days_until": days_until,
        }));
        total += record.amount;
    }
    Ok(ok(
        json!({
            "items": items,
            "total_upcoming": money(total),
            "count": items.len(),
        }),
        None,
    ))
}

/// Materialize every due recurring expense (next_date on or before today)
/// into a real expense and advance its schedule.
pub async fn generate(State(db): State<SharedDb>) -> ApiResult {
    let mut db = db.write().await;
    let today = Utc::now().date_naive();
    let mut generated_ids = Vec::new();

    for i in 0..db.recurring.len() {
        loop {
            let (due, date, amount, name, category_id, interval) = {
                let record = &db.recurring[i];
                let within_end = record.end_date.map_or(true, |end| record.next_date <= end);
                (
                    record.next_date <= today && within_end,
                    record.next_date,
                    record.amount,
                    record.name.clone(),
                    record.category_id,
                    record.interval.clone(),
                )
            };
            if !due {
                break;
            }
            let id = db.next_id();
            let now = Utc::now();
            db.expenses.push(crate::store::ExpenseRecord {
                id,
                amount,
                date,
                description: name,
                category_id,
                account_id: None,
                tag_ids: Vec::new(),
                receipt_path: None,
                created_at: now,
                updated_at: now,
            });
            generated_ids.push(id);
            db.recurring[i].next_date = advance(date, &interval);
            db.recurring[i].updated_at = now;
        }
    }

    let generated: Vec<Value> = db
        .expenses
        .iter()
        .filter(|e| generated_ids.contains(&e.id))
        .map(|e| e.out(&db))
        .collect();
    let next_generation_date = db.recurring.iter().map(|r| r.next_date).min();
    Ok(ok(
        json!({
            "generated": generated,
            "total_generated": generated.len(),
            "next_generation_date": next_generation_date,
        }),
        Some("Recurring expenses generated"),
    ))
}

fn advance(date: NaiveDate, interval: &str) -> NaiveDate {
    let next = match interval {
        "daily" => date.checked_add_days(Days::new(1)),
        "weekly" => date.checked_add_days(Days::new(7)),
        "yearly" => date.checked_add_months(Months::new(12)),
        _ => date.checked_add_months(Months::new(1)),
    };
    next.unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn advance_steps_by_interval() {
        assert_eq!(advance(date(2025, 6, 1), "daily"), date(2025, 6, 2));
        assert_eq!(advance(date(2025, 6, 1), "weekly"), date(2025, 6, 8));
        assert_eq!(advance(date(2025, 6, 1), "monthly"), date(2025, 7, 1));
        assert_eq!(advance(date(2025, 6, 1), "yearly"), date(2026, 6, 1));
    }

    #[test]
    fn advance_clamps_month_end() {
        assert_eq!(advance(date(2025, 1, 31), "monthly"), date(2025, 2, 28));
    }
}
