use crate::error::ApiError;
use crate::http::Query;
use crate::types::budget::{
    Budget, BudgetOverview, BudgetStatus, CreateBudget, UpdateBudget,
};
use crate::types::{Envelope, Page};
use crate::ApiClient;

/// Operations on `/budgets`.
pub struct Budgets<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Budgets<'_> {
    pub async fn list(
        &self,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<Page<Budget>, ApiError> {
        let query = Query::new().set_opt("page", page).set_opt("size", size);
        let env: Envelope<Page<Budget>> = self.client.get_with("/budgets", &query).await?;
        env.into_data()
    }

    pub async fn get(&self, id: i64) -> Result<Budget, ApiError> {
        let env: Envelope<Budget> = self.client.get(&format!("/budgets/{id}")).await?;
        env.into_data()
    }

    pub async fn create(&self, input: &CreateBudget) -> Result<Budget, ApiError> {
        let env: Envelope<Budget> = self.client.post("/budgets", input).await?;
        env.into_data()
    }

    pub async fn update(&self, id: i64, input: &UpdateBudget) -> Result<Budget, ApiError> {
        let env: Envelope<Budget> = self.client.put(&format!("/budgets/{id}"), input).await?;
        env.into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let env: Envelope<()> = self.client.delete(&format!("/budgets/{id}")).await?;
        env.ensure_success()
    }

    /// Per-category spending against budget for one month.
    pub async fn status(&self, year: i32, month: u32) -> Result<BudgetStatus, ApiError> {
        let query = Query::new().set("year", year).set("month", month);
        let env: Envelope<BudgetStatus> =
            self.client.get_with("/budgets/status", &query).await?;
        env.into_data()
    }

    /// Dashboard overview with remaining amounts for one month.
    pub async fn overview(&self, year: i32, month: u32) -> Result<BudgetOverview, ApiError> {
        let query = Query::new().set("year", year).set("month", month);
        let env: Envelope<BudgetOverview> =
            self.client.get_with("/budgets/overview", &query).await?;
        env.into_data()
    }
}
