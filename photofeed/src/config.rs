/// Configuration management for the photo feed client
///
/// Loads configuration from environment variables. Client credentials are
/// required; endpoints and feed tuning have working defaults.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use unsplash_api::oauth::OAuth2Config;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// REST API settings
    pub api: ApiConfig,
    /// OAuth2 authorization-code flow settings
    pub oauth: OAuthConfig,
}

/// REST API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the photo API
    pub base_url: Url,
    /// Photos requested per feed page
    pub page_size: u32,
}

/// OAuth2 settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Authorization endpoint shown to the user agent
    pub authorize_url: Url,
    /// Token exchange endpoint
    pub token_url: Url,
    /// Client access key
    pub access_key: String,
    /// Client secret key
    pub secret_key: String,
    /// Redirect URI registered with the API
    pub redirect_uri: String,
    /// Requested scopes
    pub scope: String,
}

// Default values
fn default_page_size() -> u32 {
    10
}

const DEFAULT_API_BASE_URL: &str = "https://api.unsplash.com";
const DEFAULT_AUTHORIZE_URL: &str = "https://unsplash.com/oauth/authorize";
const DEFAULT_TOKEN_URL: &str = "https://unsplash.com/oauth/token";
const DEFAULT_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
const DEFAULT_SCOPE: &str = "public read_user write_likes";

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api = ApiConfig {
            base_url: parse_url_var("UNSPLASH_API_BASE_URL", DEFAULT_API_BASE_URL)?,
            page_size: std::env::var("FEED_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_page_size),
        };

        let oauth = OAuthConfig {
            authorize_url: parse_url_var("UNSPLASH_AUTHORIZE_URL", DEFAULT_AUTHORIZE_URL)?,
            token_url: parse_url_var("UNSPLASH_TOKEN_URL", DEFAULT_TOKEN_URL)?,
            access_key: std::env::var("UNSPLASH_ACCESS_KEY")
                .context("UNSPLASH_ACCESS_KEY environment variable not set")?,
            secret_key: std::env::var("UNSPLASH_SECRET_KEY")
                .context("UNSPLASH_SECRET_KEY environment variable not set")?,
            redirect_uri: std::env::var("UNSPLASH_REDIRECT_URI")
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string()),
            scope: std::env::var("UNSPLASH_ACCESS_SCOPE")
                .unwrap_or_else(|_| DEFAULT_SCOPE.to_string()),
        };

        Ok(Config { api, oauth })
    }
}

impl OAuthConfig {
    /// The credential set in the shape the OAuth client consumes.
    pub fn to_client_config(&self) -> OAuth2Config {
        OAuth2Config {
            authorize_url: self.authorize_url.clone(),
            token_url: self.token_url.clone(),
            client_id: self.access_key.clone(),
            client_secret: self.secret_key.clone(),
            redirect_uri: self.redirect_uri.clone(),
            scope: self.scope.clone(),
        }
    }
}

fn parse_url_var(name: &str, default: &str) -> Result<Url> {
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).with_context(|| format!("{name} is not a valid URL: {raw}"))
}
