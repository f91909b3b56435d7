use crate::error::ApiError;
use crate::http::Query;
use crate::types::tag::{CreateTag, Tag, UpdateTag};
use crate::types::{Envelope, Page};
use crate::ApiClient;

/// Operations on `/tags`.
pub struct Tags<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Tags<'_> {
    pub async fn list(&self, page: Option<u32>, size: Option<u32>) -> Result<Page<Tag>, ApiError> {
        let query = Query::new().set_opt("page", page).set_opt("size", size);
        let env: Envelope<Page<Tag>> = self.client.get_with("/tags", &query).await?;
        env.into_data()
    }

    pub async fn get(&self, id: i64) -> Result<Tag, ApiError> {
        let env: Envelope<Tag> = self.client.get(&format!("/tags/{id}")).await?;
        env.into_data()
    }

    pub async fn create(&self, input: &CreateTag) -> Result<Tag, ApiError> {
        let env: Envelope<Tag> = self.client.post("/tags", input).await?;
        env.into_data()
    }

    pub async fn update(&self, id: i64, input: &UpdateTag) -> Result<Tag, ApiError> {
        let env: Envelope<Tag> = self.client.put(&format!("/tags/{id}"), input).await?;
        env.into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let env: Envelope<()> = self.client.delete(&format!("/tags/{id}")).await?;
        env.ensure_success()
    }
}
