use crate::error::ApiError;
use crate::types::auth::{AuthToken, Credentials, NewUser, User};
use crate::types::Envelope;
use crate::ApiClient;

/// Operations on `/auth`.
///
/// `login` returns the issued token but does not install it; callers pass
/// `token.access_token` to [`ApiClient::set_bearer_token`] and call
/// [`ApiClient::clear_bearer_token`] on logout.
pub struct Auth<'a> {
    pub(crate) client: &'a ApiClient,
}

impl Auth<'_> {
    pub async fn register(&self, input: &NewUser) -> Result<User, ApiError> {
        let env: Envelope<User> = self.client.post("/auth/register", input).await?;
        env.into_data()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        let env: Envelope<AuthToken> = self.client.post("/auth/token", credentials).await?;
        env.into_data()
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        let env: Envelope<User> = self.client.get("/auth/me").await?;
        env.into_data()
    }
}
