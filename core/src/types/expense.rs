use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountRef, CategoryRef, TagRef};
use crate::http::Query;

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: String,
    pub date: NaiveDate,
    pub description: String,
    pub category: CategoryRef,
    pub account: Option<AccountRef>,
    pub tags: Vec<TagRef>,
    pub receipt_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpense {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category_id: i64,
    pub account_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExpense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

/// Listing filters for `GET /expenses`. All fields optional; absent fields
/// do not appear in the query string.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
    pub category_id: Option<i64>,
    pub account_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub tag_ids: Option<Vec<i64>>,
}

impl ExpenseFilter {
    /// Render the filter as query parameters. `tag_ids` collapses to a
    /// comma-joined list, matching what the server parses.
    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .set_opt("page", self.page)
            .set_opt("size", self.size)
            .set_opt("sort", self.sort.as_deref())
            .set_opt("order", self.order)
            .set_opt("category_id", self.category_id)
            .set_opt("account_id", self.account_id)
            .set_opt("start_date", self.start_date)
            .set_opt("end_date", self.end_date)
            .set_opt(
                "tag_ids",
                self.tag_ids.as_ref().map(|ids| {
                    ids.iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(",")
                }),
            )
    }
}

/// `GET /expenses/summary` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total_amount: String,
    pub average_amount: String,
    pub count: u64,
    pub by_category: Vec<CategoryTotal>,
    pub by_tag: Vec<TagTotal>,
    pub period: DateRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_id: i64,
    pub category_name: String,
    pub total_amount: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagTotal {
    pub tag_id: i64,
    pub tag_name: String,
    pub total_amount: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_renders_only_present_fields() {
        let filter = ExpenseFilter {
            page: Some(2),
            category_id: Some(3),
            order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let query = filter.to_query();
        assert_eq!(
            query.pairs(),
            &[
                ("page".to_string(), "2".to_string()),
                ("order".to_string(), "desc".to_string()),
                ("category_id".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn tag_ids_are_comma_joined() {
        let filter = ExpenseFilter {
            tag_ids: Some(vec![1, 2, 5]),
            ..Default::default()
        };
        let query = filter.to_query();
        assert_eq!(
            query.pairs(),
            &[("tag_ids".to_string(), "1,2,5".to_string())]
        );
    }

    #[test]
    fn empty_filter_renders_nothing() {
        assert!(ExpenseFilter::default().to_query().is_empty());
    }

    #[test]
    fn create_expense_omits_absent_optionals() {
        let input = CreateExpense {
            amount: 12.5,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            description: "Lunch".to_string(),
            category_id: 1,
            account_id: 2,
            tag_ids: None,
            receipt_path: None,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("tag_ids").is_none());
        assert!(json.get("receipt_path").is_none());
        assert_eq!(json["date"], "2025-06-01");
    }
}
