use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CategoryRef;

/// A monthly spending limit for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category_id: i64,
    pub year: i32,
    pub month: u32,
    pub amount: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: CategoryRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBudget {
    pub category_id: i64,
    pub year: i32,
    pub month: u32,
    pub amount: f64,
}

/// Only the amount of an existing budget can change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBudget {
    pub amount: f64,
}

/// Server-computed health of a budget for the requested period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetHealth {
    OnTrack,
    Warning,
    Exceeded,
}

/// `GET /budgets/status` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub summary: StatusSummary,
    pub categories: Vec<CategoryBudgetStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total_budget: String,
    pub total_spent: String,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBudgetStatus {
    pub category_id: i64,
    pub category_name: String,
    pub budget_amount: String,
    pub total_spent: String,
    pub percent: f64,
    pub status: BudgetHealth,
}

/// `GET /budgets/overview` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub summary: OverviewSummary,
    pub categories: Vec<CategoryBudgetOverview>,
    pub period: Period,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewSummary {
    pub total_budget: String,
    pub total_spent: String,
    pub remaining: String,
    pub percent_used: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBudgetOverview {
    pub category_id: i64,
    pub category_name: String,
    pub budget_amount: String,
    pub spent_amount: String,
    pub remaining: String,
    pub percent_used: f64,
    pub status: BudgetHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_health_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&BudgetHealth::OnTrack).unwrap(),
            r#""on_track""#
        );
        let health: BudgetHealth = serde_json::from_str(r#""exceeded""#).unwrap();
        assert_eq!(health, BudgetHealth::Exceeded);
    }
}
