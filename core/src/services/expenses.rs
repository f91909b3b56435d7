use chrono::NaiveDate;

use crate::error::ApiError;
use crate::http::Query;
use crate::types::expense::{
    CreateExpense, Expense, ExpenseFilter, ExpenseSummary, UpdateExpense,
};
use crate::types::{Envelope, Page};
use crate::ApiClient;

/// Operations on `/expenses`.
pub struct Expenses<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Expenses<'_> {
    pub async fn list(&self, filter: &ExpenseFilter) -> Result<Page<Expense>, ApiError> {
        let env: Envelope<Page<Expense>> =
            self.client.get_with("/expenses", &filter.to_query()).await?;
        env.into_data()
    }

    pub async fn get(&self, id: i64) -> Result<Expense, ApiError> {
        let env: Envelope<Expense> = self.client.get(&format!("/expenses/{id}")).await?;
        env.into_data()
    }

    pub async fn create(&self, input: &CreateExpense) -> Result<Expense, ApiError> {
        let env: Envelope<Expense> = self.client.post("/expenses", input).await?;
        env.into_data()
    }

    pub async fn update(&self, id: i64, input: &UpdateExpense) -> Result<Expense, ApiError> {
        let env: Envelope<Expense> = self.client.put(&format!("/expenses/{id}"), input).await?;
        env.into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let env: Envelope<()> = self.client.delete(&format!("/expenses/{id}")).await?;
        env.ensure_success()
    }

    /// Totals and per-category / per-tag rollups over an optional range.
    pub async fn summary(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        category_id: Option<i64>,
    ) -> Result<ExpenseSummary, ApiError> {
        let query = Query::new()
            .set_opt("start_date", start_date)
            .set_opt("end_date", end_date)
            .set_opt("category_id", category_id);
        let env: Envelope<ExpenseSummary> =
            self.client.get_with("/expenses/summary", &query).await?;
        env.into_data()
    }
}
