use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::envelope::{created, deleted, fail, ok, paginate, ApiResult};
use crate::params::{ListParams, PeriodParams};
use crate::store::{money, BudgetRecord, Db, SharedDb};

#[derive(Deserialize)]
pub struct CreateIn {
    pub category_id: i64,
    pub year: i32,
    pub month: u32,
    pub amount: f64,
}

#[derive(Deserialize)]
pub struct UpdateIn {
    pub amount: f64,
}

pub async fn list(State(db): State<SharedDb>, Query(params): Query<ListParams>) -> ApiResult {
    let db = db.read().await;
    let items: Vec<Value> = db.budgets.iter().map(|b| b.out(&db)).collect();
    Ok(ok(paginate(&items, params.page(), params.size()), None))
}

pub async fn create(State(db): State<SharedDb>, Json(input): Json<CreateIn>) -> ApiResult {
    let mut db = db.write().await;
    if !db.categories.iter().any(|c| c.id == input.category_id) {
        return Err(fail(StatusCode::NOT_FOUND, "Category not found"));
    }
    if db
        .budgets
        .iter()
        .any(|b| b.category_id == input.category_id && b.year == input.year && b.month == input.month)
    {
        return Err(fail(
            StatusCode::CONFLICT,
            "Budget already exists for this category and period",
        ));
    }
    let id = db.next_id();
    let now = Utc::now();
    let record = BudgetRecord {
        id,
        category_id: input.category_id,
        year: input.year,
        month: input.month,
        amount: input.amount,
        created_at: now,
        updated_at: now,
    };
    let out = record.out(&db);
    db.budgets.push(record);
    Ok(created(out, Some("Budget created")))
}

pub async fn get_one(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let db = db.read().await;
    db.budgets
        .iter()
        .find(|b| b.id == id)
        .map(|b| ok(b.out(&db), None))
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Budget not found"))
}

pub async fn update(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateIn>,
) -> ApiResult {
    let mut db = db.write().await;
    let index = db
        .budgets
        .iter()
        .position(|b| b.id == id)
        .ok_or_else(|| fail(StatusCode::NOT_FOUND, "Budget not found"))?;
    db.budgets[index].amount = input.amount;
    db.budgets[index].updated_at = Utc::now();
    Ok(ok(db.budgets[index].out(&db), Some("Budget updated")))
}

pub async fn remove(State(db): State<SharedDb>, Path(id): Path<i64>) -> ApiResult {
    let mut db = db.write().await;
    let before = db.budgets.len();
    db.budgets.retain(|b| b.id != id);
    if db.budgets.len() == before {
        return Err(fail(StatusCode::NOT_FOUND, "Budget not found"));
    }
    Ok(deleted("Budget deleted"))
}

pub async fn status(State(db): State<SharedDb>, Query(params): Query<PeriodParams>) -> ApiResult {
    let (year, month) = require_period(&params)?;
    let db = db.read().await;
    let mut rows = Vec::new();
    let mut total_budget = 0.0;
    let mut total_spent = 0.0;
    for budget in db.budgets.iter().filter(|b| b.year == year && b.month == month) {
        let spent = spent_in_period(&db, budget.category_id, year, month);
        let percent = percent_of(spent, budget.amount);
        rows.push(json!({
            "category_id": budget.category_id,
            "category_name": category_name(&db, budget.category_id),
            "budget_amount": money(budget.amount),
            "total_spent": money(spent),
            "percent": percent,
            "status": health(percent),
        }));
        total_budget += budget.amount;
        total_spent += spent;
    }
    let percent = percent_of(total_spent, total_budget);
    Ok(ok(
        json!({
            "summary": {
                "total_budget": money(total_budget),
                "total_spent": money(total_spent),
                "percent": percent,
            },
            "categories": rows,
        }),
        None,
    ))
}

pub async fn overview(State(db): State<SharedDb>, Query(params): Query<PeriodParams>) -> ApiResult {
    let (year, month) = require_period(&params)?;
    let db = db.read().await;
    let mut rows = Vec::new();
    let mut total_budget = 0.0;
    let mut total_spent = 0.0;
    for budget in db.budgets.iter().filter(|b| b.year == year && b.month == month) {
        let spent = spent_in_period(&db, budget.category_id, year, month);
        let percent = percent_of(spent, budget.amount);
        rows.push(json!({
            "category_id": budget.category_id,
            "category_name": category_name(&db, budget.category_id),
            "budget_amount": money(budget.amount),
            "spent_amount": money(spent),
            "remaining": money(budget.amount - spent),
            "percent_used": percent,
            "status": health(percent),
        }));
        total_budget += budget.amount;
        total_spent += spent;
    }
    let percent = percent_of(total_spent, total_budget);
    Ok(ok(
        json!({
            "summary": {
                "total_budget": money(total_budget),
                "total_spent": money(total_spent),
                "remaining": money(total_budget - total_spent),
                "percent_used": percent,
            },
            "categories": rows,
            "period": { "year": year, "month": month },
        }),
        None,
    ))
}

fn require_period(params: &PeriodParams) -> Result<(i32, u32), crate::envelope::Reply> {
    match (params.year, params.month) {
        (Some(year), Some(month)) => Ok((year, month)),
        _ => Err(fail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "year and month are required",
        )),
    }
}

fn spent_in_period(db: &Db, category_id: i64, year: i32, month: u32) -> f64 {
    db.expenses
        .iter()
        .filter(|e| {
            e.category_id == category_id && e.date.year() == year && e.date.month() == month
        })
        .map(|e| e.amount)
        .sum()
}

fn category_name(db: &Db, category_id: i64) -> String {
    db.categories
        .iter()
        .find(|c| c.id == category_id)
        .map(|c| c.name.clone())
        .unwrap_or_default()
}

fn percent_of(spent: f64, budget: f64) -> f64 {
    if budget <= 0.0 {
        0.0
    } else {
        (spent / budget * 10_000.0).round() / 100.0
    }
}

fn health(percent: f64) -> &'static str {
    if percent >= 100.0 {
        "exceeded"
    } else if percent >= 80.0 {
        "warning"
    } else {
        "on_track"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_two_decimals() {
        assert_eq!(percent_of(1.0, 3.0), 33.33);
        assert_eq!(percent_of(0.0, 100.0), 0.0);
        assert_eq!(percent_of(50.0, 0.0), 0.0);
    }

    #[test]
    fn health_thresholds() {
        assert_eq!(health(79.99), "on_track");
        assert_eq!(health(80.0), "warning");
        assert_eq!(health(100.0), "exceeded");
    }
}
