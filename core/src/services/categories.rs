use crate::error::ApiError;
use crate::http::Query;
use crate::types::category::{Category, CreateCategory, UpdateCategory};
use crate::types::expense::SortOrder;
use crate::types::{Envelope, Page};
use crate::ApiClient;

/// Operations on `/categories`.
pub struct Categories<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Categories<'_> {
    pub async fn list(
        &self,
        page: Option<u32>,
        size: Option<u32>,
        sort: Option<&str>,
        order: Option<SortOrder>,
    ) -> Result<Page<Category>, ApiError> {
        let query = Query::new()
            .set_opt("page", page)
            .set_opt("size", size)
            .set_opt("sort", sort)
            .set_opt("order", order);
        let env: Envelope<Page<Category>> = self.client.get_with("/categories", &query).await?;
        env.into_data()
    }

    pub async fn get(&self, id: i64) -> Result<Category, ApiError> {
        let env: Envelope<Category> = self.client.get(&format!("/categories/{id}")).await?;
        env.into_data()
    }

    pub async fn create(&self, input: &CreateCategory) -> Result<Category, ApiError> {
        let env: Envelope<Category> = self.client.post("/categories", input).await?;
        env.into_data()
    }

    pub async fn update(&self, id: i64, input: &UpdateCategory) -> Result<Category, ApiError> {
        let env: Envelope<Category> =
            self.client.put(&format!("/categories/{id}"), input).await?;
        env.into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let env: Envelope<()> = self.client.delete(&format!("/categories/{id}")).await?;
        env.ensure_success()
    }
}
