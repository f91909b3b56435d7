use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::CategoryRef;
use crate::types::expense::Expense;

/// How often a recurring expense repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// A template that materializes into expenses on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: i64,
    pub name: String,
    pub amount: String,
    pub category_id: i64,
    pub interval: Interval,
    pub next_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category: CategoryRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecurring {
    pub name: String,
    pub amount: f64,
    pub category_id: i64,
    pub interval: Interval,
    pub next_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecurring {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// `GET /recurring/upcoming` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingRecurring {
    pub items: Vec<UpcomingItem>,
    pub total_upcoming: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingItem {
    pub id: i64,
    pub name: String,
    pub amount: String,
    pub next_date: NaiveDate,
    pub category: UpcomingCategory,
    pub days_until: i64,
}

/// Slimmer category shape used only in the upcoming listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingCategory {
    pub id: i64,
    pub name: String,
}

/// `POST /recurring/generate` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedExpenses {
    pub generated: Vec<Expense>,
    pub total_generated: u64,
    pub next_generation_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&Interval::Monthly).unwrap(),
            r#""monthly""#
        );
        let interval: Interval = serde_json::from_str(r#""weekly""#).unwrap();
        assert_eq!(interval, Interval::Weekly);
    }

    #[test]
    fn create_recurring_omits_absent_end_date() {
        let input = CreateRecurring {
            name: "Rent".to_string(),
            amount: 900.0,
            category_id: 1,
            interval: Interval::Monthly,
            next_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end_date: None,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("end_date").is_none());
        assert_eq!(json["interval"], "monthly");
    }
}
