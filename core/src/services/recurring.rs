use crate::error::ApiError;
use crate::http::Query;
use crate::types::recurring::{
    CreateRecurring, GeneratedExpenses, RecurringExpense, UpcomingRecurring, UpdateRecurring,
};
use crate::types::{Envelope, Page};
use crate::ApiClient;

/// Operations on `/recurring`.
pub struct Recurring<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Recurring<'_> {
    pub async fn list(
        &self,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<Page<RecurringExpense>, ApiError> {
        let query = Query::new().set_opt("page", page).set_opt("size", size);
        let env: Envelope<Page<RecurringExpense>> =
            self.client.get_with("/recurring", &query).await?;
        env.into_data()
    }

    pub async fn get(&self, id: i64) -> Result<RecurringExpense, ApiError> {
        let env: Envelope<RecurringExpense> =
            self.client.get(&format!("/recurring/{id}")).await?;
        env.into_data()
    }

    pub async fn create(&self, input: &CreateRecurring) -> Result<RecurringExpense, ApiError> {
        let env: Envelope<RecurringExpense> = self.client.post("/recurring", input).await?;
        env.into_data()
    }

    pub async fn update(
        &self,
        id: i64,
        input: &UpdateRecurring,
    ) -> Result<RecurringExpense, ApiError> {
        let env: Envelope<RecurringExpense> =
            self.client.put(&format!("/recurring/{id}"), input).await?;
        env.into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let env: Envelope<()> = self.client.delete(&format!("/recurring/{id}")).await?;
        env.ensure_success()
    }

    /// Recurring expenses due within the next `days` (server default 7).
    pub async fn upcoming(&self, days: Option<u32>) -> Result<UpcomingRecurring, ApiError> {
        let query = Query::new().set_opt("days", days);
        let env: Envelope<UpcomingRecurring> =
            self.client.get_with("/recurring/upcoming", &query).await?;
        env.into_data()
    }

    /// Materialize all due recurring expenses into real expenses.
    pub async fn generate(&self) -> Result<GeneratedExpenses, ApiError> {
        let env: Envelope<GeneratedExpenses> =
            self.client.post_empty("/recurring/generate").await?;
        env.into_data()
    }
}
