//! Profile of the authenticated user.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::info;

use unsplash_api::UnsplashApi;

use crate::domain::Profile;
use crate::error::{ServiceError, ServiceResult};
use crate::services::TokenStore;

#[async_trait]
pub trait ProfileService: Send + Sync {
    /// The last profile fetched, if any.
    fn current_profile(&self) -> Option<Profile>;

    /// Fetch `/me` and cache the result.
    async fn load_profile(&self) -> ServiceResult<Profile>;

    /// Forget the cached profile.
    fn reset(&self);
}

/// [`ProfileService`] backed by the photo API.
#[derive(Clone)]
pub struct RemoteProfileService {
    inner: Arc<ProfileInner>,
}

struct ProfileInner {
    api: UnsplashApi,
    tokens: Arc<dyn TokenStore>,
    profile: RwLock<Option<Profile>>,
}

impl RemoteProfileService {
    pub fn new(api: UnsplashApi, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            inner: Arc::new(ProfileInner {
                api,
                tokens,
                profile: RwLock::new(None),
            }),
        }
    }
}

#[async_trait]
impl ProfileService for RemoteProfileService {
    fn current_profile(&self) -> Option<Profile> {
        self.inner
            .profile
            .read()
            .expect("PROFILE RwLock poisoned")
            .clone()
    }

    async fn load_profile(&self) -> ServiceResult<Profile> {
        let bearer = self.inner.tokens.token().ok_or(ServiceError::MissingToken)?;
        let me = self.inner.api.me(&bearer).await?;
        let profile = Profile::from(me);

        info!(username = %profile.username, "profile loaded");
        *self.inner.profile.write().expect("PROFILE RwLock poisoned") = Some(profile.clone());
        Ok(profile)
    }

    fn reset(&self) {
        *self.inner.profile.write().expect("PROFILE RwLock poisoned") = None;
    }
}
