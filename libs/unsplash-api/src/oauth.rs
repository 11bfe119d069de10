//! OAuth2 authorization-code flow against the photo API's OAuth host.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::models::TokenDto;

/// Static client credentials and endpoints for the code-for-token exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
    pub authorize_url: Url,
    pub token_url: Url,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
}

/// Client for the authorization-code flow.
#[derive(Debug, Clone)]
pub struct OAuth2Client {
    http: reqwest::Client,
    config: OAuth2Config,
}

impl OAuth2Client {
    pub fn new(config: OAuth2Config) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: OAuth2Config) -> Self {
        Self { http, config }
    }

    /// URL the user agent must open to obtain an authorization code.
    pub fn authorize_url(&self) -> Url {
        let mut url = self.config.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scope);
        url
    }

    /// Exchange an authorization code for a bearer token.
    pub async fn exchange_code(&self, code: &str) -> ApiResult<TokenDto> {
        debug!("exchanging authorization code for token");

        let response = self
            .http
            .post(self.config.token_url.clone())
            .query(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "token exchange rejected");
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(ApiError::Unauthorized);
            }
            return Err(ApiError::Status {
                status,
                endpoint: self.config.token_url.path().to_string(),
            });
        }

        let body = response.text().await?;
        let token: TokenDto = serde_json::from_str(&body)?;
        info!(token_type = %token.token_type, scope = %token.scope, "token obtained");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OAuth2Config {
        OAuth2Config {
            authorize_url: Url::parse("https://photos.example.com/oauth/authorize").unwrap(),
            token_url: Url::parse("https://photos.example.com/oauth/token").unwrap(),
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            redirect_uri: "urn:ietf:wg:oauth:2.0:oob".into(),
            scope: "public read_user write_likes".into(),
        }
    }

    #[test]
    fn authorize_url_carries_client_id_and_scope() {
        let client = OAuth2Client::new(config());

        let url = client.authorize_url();
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(query.contains(&("client_id".into(), "client-id".into())));
        assert!(query.contains(&("response_type".into(), "code".into())));
        assert!(query.contains(&("scope".into(), "public read_user write_likes".into())));
        assert!(query.contains(&("redirect_uri".into(), "urn:ietf:wg:oauth:2.0:oob".into())));
    }
}
