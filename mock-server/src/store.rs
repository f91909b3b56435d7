//! In-memory store backing the mock API.
//!
//! Records keep amounts as `f64` and render them as two-decimal strings at
//! the edge, mirroring a backend that stores decimals and serializes them
//! as strings.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};
use tokio::sync::RwLock;

pub type SharedDb = Arc<RwLock<Db>>;

#[derive(Debug, Default)]
pub struct Db {
    pub users: Vec<UserRecord>,
    /// Bearer token -> user id.
    pub sessions: HashMap<String, i64>,
    pub accounts: Vec<AccountRecord>,
    pub categories: Vec<CategoryRecord>,
    pub tags: Vec<TagRecord>,
    pub budgets: Vec<BudgetRecord>,
    pub expenses: Vec<ExpenseRecord>,
    pub recurring: Vec<RecurringRecord>,
    next_id: i64,
}

impl Db {
    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Render an amount the way the API serializes decimals.
pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn out(&self) -> Value {
        json!({
            "id": self.id,
            "username": self.username,
            "email": self.email,
            "created_at": self.created_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub id: i64,
    pub name: String,
    pub initial_balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountRecord {
    pub fn out(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "initial_balance": money(self.initial_balance),
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }

    pub fn brief(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "initial_balance": money(self.initial_balance),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryRecord {
    pub fn out(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }

    pub fn brief(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TagRecord {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TagRecord {
    pub fn out(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }

    pub fn brief(&self) -> Value {
        json!({ "id": self.id, "name": self.name })
    }
}

#[derive(Debug, Clone)]
pub struct BudgetRecord {
    pub id: i64,
    pub category_id: i64,
    pub year: i32,
    pub month: u32,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BudgetRecord {
    pub fn out(&self, db: &Db) -> Value {
        let category = db
            .categories
            .iter()
            .find(|c| c.id == self.category_id)
            .map(CategoryRecord::brief)
            .unwrap_or(Value::Null);
        json!({
            "id": self.id,
            "category_id": self.category_id,
            "year": self.year,
            "month": self.month,
            "amount": money(self.amount),
            "created_at": self.created_at,
            "updated_at": self.updated_at,
            "category": category,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseRecord {
    pub id: i64,
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category_id: i64,
    pub account_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub receipt_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpenseRecord {
    pub fn out(&self, db: &Db) -> Value {
        let category = db
            .categories
            .iter()
            .find(|c| c.id == self.category_id)
            .map(CategoryRecord::brief)
            .unwrap_or(Value::Null);
        let account = self
            .account_id
            .and_then(|id| db.accounts.iter().find(|a| a.id == id))
            .map(AccountRecord::brief)
            .unwrap_or(Value::Null);
        let tags: Vec<Value> = db
            .tags
            .iter()
            .filter(|t| self.tag_ids.contains(&t.id))
            .map(TagRecord::brief)
            .collect();
        json!({
            "id": self.id,
            "amount": money(self.amount),
            "date": self.date,
            "description": self.description,
            "category": category,
            "account": account,
            "tags": tags,
            "receipt_path": self.receipt_path,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RecurringRecord {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub category_id: i64,
    pub interval: String,
    pub next_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecurringRecord {
    pub fn out(&self, db: &Db) -> Value {
        let category = db
            .categories
            .iter()
            .find(|c| c.id == self.category_id)
            .map(CategoryRecord::brief)
            .unwrap_or(Value::Null);
        json!({
            "id": self.id,
            "name": self.name,
            "amount": money(self.amount),
            "category_id": self.category_id,
            "interval": self.interval,
            "next_date": self.next_date,
            "end_date": self.end_date,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
            "category": category,
        })
    }
}
