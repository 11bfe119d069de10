//! OAuth2 session bootstrap: trades the authorization code the user agent
//! obtained for a bearer token and saves it for the other services.

use std::sync::Arc;

use tracing::info;
use url::Url;

use unsplash_api::oauth::OAuth2Client;

use crate::error::ServiceResult;
use crate::services::TokenStore;

pub struct Oauth2TokenService {
    client: OAuth2Client,
    tokens: Arc<dyn TokenStore>,
}

impl Oauth2TokenService {
    pub fn new(client: OAuth2Client, tokens: Arc<dyn TokenStore>) -> Self {
        Self { client, tokens }
    }

    /// URL the login view should open to obtain an authorization code.
    pub fn authorize_url(&self) -> Url {
        self.client.authorize_url()
    }

    /// Exchange `code` for a bearer token and store it in the session.
    pub async fn fetch_token(&self, code: &str) -> ServiceResult<String> {
        let token = self.client.exchange_code(code).await?;
        self.tokens.store(token.access_token.clone());
        info!("session token stored");
        Ok(token.access_token)
    }
}
