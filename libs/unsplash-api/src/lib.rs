//! Typed HTTP client for the photo API.
//!
//! Two entry points:
//! - [`UnsplashApi`] — the REST surface (photo list, like/unlike, `/me`,
//!   public user profiles), authenticated with an optional bearer token.
//! - [`oauth::OAuth2Client`] — the authorization-code flow against the
//!   OAuth host (a different host than the API).
//!
//! The client is deliberately thin: it speaks the wire format
//! ([`models`]) and maps HTTP failures to [`ApiError`]; it holds no
//! application state.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

mod error;
pub mod models;
pub mod oauth;

pub use error::{ApiError, ApiResult};
pub use models::{MeDto, PhotoDto, PhotoUrlsDto, ProfileImageDto, TokenDto, UserDto};

/// REST client for the photo API
#[derive(Debug, Clone)]
pub struct UnsplashApi {
    http: reqwest::Client,
    base_url: Url,
}

impl UnsplashApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Build on a caller-provided `reqwest::Client` so connection pools
    /// can be shared across clients.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// `GET /photos?page=&per_page=` — one feed page, oldest-first within
    /// the page as served.
    pub async fn list_photos(
        &self,
        page: u32,
        per_page: u32,
        bearer: Option<&str>,
    ) -> ApiResult<Vec<PhotoDto>> {
        let mut url = self.endpoint("photos")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("per_page", &per_page.to_string());

        self.request_json(Method::GET, url, bearer).await
    }

    /// `POST /photos/{id}/like`
    pub async fn like_photo(&self, photo_id: &str, bearer: &str) -> ApiResult<()> {
        let url = self.endpoint(&format!("photos/{photo_id}/like"))?;
        self.request_empty(Method::POST, url, bearer).await
    }

    /// `DELETE /photos/{id}/like`
    pub async fn unlike_photo(&self, photo_id: &str, bearer: &str) -> ApiResult<()> {
        let url = self.endpoint(&format!("photos/{photo_id}/like"))?;
        self.request_empty(Method::DELETE, url, bearer).await
    }

    /// `GET /me` — the authenticated user's profile.
    pub async fn me(&self, bearer: &str) -> ApiResult<MeDto> {
        let url = self.endpoint("me")?;
        self.request_json(Method::GET, url, Some(bearer)).await
    }

    /// `GET /users/{username}` — public profile, including avatar URLs.
    pub async fn user(&self, username: &str, bearer: &str) -> ApiResult<UserDto> {
        let url = self.endpoint(&format!("users/{username}"))?;
        self.request_json(Method::GET, url, Some(bearer)).await
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        bearer: Option<&str>,
    ) -> ApiResult<T> {
        let endpoint = url.path().to_string();
        debug!(%method, %endpoint, "issuing API request");

        let mut request = self.http.request(method, url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Self::check_status(response.status(), &endpoint)?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn request_empty(&self, method: Method, url: Url, bearer: &str) -> ApiResult<()> {
        let endpoint = url.path().to_string();
        debug!(%method, %endpoint, "issuing API request");

        let response = self
            .http
            .request(method, url)
            .bearer_auth(bearer)
            .send()
            .await?;

        Self::check_status(response.status(), &endpoint)
    }

    fn check_status(status: StatusCode, endpoint: &str) -> ApiResult<()> {
        if status.is_success() {
            return Ok(());
        }
        warn!(%status, endpoint, "API request failed");
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        Err(ApiError::Status {
            status,
            endpoint: endpoint.to_string(),
        })
    }
}
