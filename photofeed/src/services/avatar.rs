//! Avatar URL of the authenticated user.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info};
use url::Url;

use unsplash_api::UnsplashApi;

use crate::domain::AvatarEvent;
use crate::error::{ServiceError, ServiceResult};
use crate::services::TokenStore;

const AVATAR_EVENT_CAPACITY: usize = 8;

#[async_trait]
pub trait AvatarService: Send + Sync {
    /// The last avatar URL fetched; `None` means "show placeholder".
    fn current_avatar_url(&self) -> Option<Url>;

    /// Fetch the user's public profile, cache the avatar URL, and
    /// broadcast [`AvatarEvent::Updated`].
    async fn load_avatar_url(&self, username: &str) -> ServiceResult<Url>;

    /// Subscribe to avatar change notifications.
    fn subscribe(&self) -> broadcast::Receiver<AvatarEvent>;

    /// Forget the cached URL.
    fn reset(&self);
}

/// [`AvatarService`] backed by the photo API; caches the medium-size
/// avatar asset.
#[derive(Clone)]
pub struct RemoteAvatarService {
    inner: Arc<AvatarInner>,
}

struct AvatarInner {
    api: UnsplashApi,
    tokens: Arc<dyn TokenStore>,
    avatar_url: RwLock<Option<Url>>,
    events: broadcast::Sender<AvatarEvent>,
}

impl RemoteAvatarService {
    pub fn new(api: UnsplashApi, tokens: Arc<dyn TokenStore>) -> Self {
        let (events, _) = broadcast::channel(AVATAR_EVENT_CAPACITY);
        Self {
            inner: Arc::new(AvatarInner {
                api,
                tokens,
                avatar_url: RwLock::new(None),
                events,
            }),
        }
    }
}

#[async_trait]
impl AvatarService for RemoteAvatarService {
    fn current_avatar_url(&self) -> Option<Url> {
        self.inner
            .avatar_url
            .read()
            .expect("AVATAR RwLock poisoned")
            .clone()
    }

    async fn load_avatar_url(&self, username: &str) -> ServiceResult<Url> {
        let bearer = self.inner.tokens.token().ok_or(ServiceError::MissingToken)?;
        let user = self.inner.api.user(username, &bearer).await?;
        let url = Url::parse(&user.profile_image.medium)?;

        info!(username, %url, "avatar URL loaded");
        *self
            .inner
            .avatar_url
            .write()
            .expect("AVATAR RwLock poisoned") = Some(url.clone());

        if self.inner.events.send(AvatarEvent::Updated).is_err() {
            debug!("no avatar subscribers");
        }
        Ok(url)
    }

    fn subscribe(&self) -> broadcast::Receiver<AvatarEvent> {
        self.inner.events.subscribe()
    }

    fn reset(&self) {
        *self
            .inner
            .avatar_url
            .write()
            .expect("AVATAR RwLock poisoned") = None;
    }
}
