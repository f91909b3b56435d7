use crate::error::ApiError;
use crate::http::Query;
use crate::types::account::{Account, CreateAccount, UpdateAccount};
use crate::types::{Envelope, Page};
use crate::ApiClient;

/// Operations on `/accounts`.
pub struct Accounts<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Accounts<'_> {
    pub async fn list(
        &self,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Result<Page<Account>, ApiError> {
        let query = Query::new().set_opt("page", page).set_opt("size", size);
        let env: Envelope<Page<Account>> = self.client.get_with("/accounts", &query).await?;
        env.into_data()
    }

    pub async fn get(&self, id: i64) -> Result<Account, ApiError> {
        let env: Envelope<Account> = self.client.get(&format!("/accounts/{id}")).await?;
        env.into_data()
    }

    pub async fn create(&self, input: &CreateAccount) -> Result<Account, ApiError> {
        let env: Envelope<Account> = self.client.post("/accounts", input).await?;
        env.into_data()
    }

    pub async fn update(&self, id: i64, input: &UpdateAccount) -> Result<Account, ApiError> {
        let env: Envelope<Account> = self.client.put(&format!("/accounts/{id}"), input).await?;
        env.into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let env: Envelope<()> = self.client.delete(&format!("/accounts/{id}")).await?;
        env.ensure_success()
    }
}
