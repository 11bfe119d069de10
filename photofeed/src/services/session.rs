//! Session state: the bearer token and the logout cleanup path.

use std::sync::Arc;
use std::sync::RwLock;

use tracing::info;

use crate::services::{AvatarService, ImageListService, ProfileService};

/// Holds the OAuth bearer token for the current session.
///
/// Secure persistence is out of scope; implementations may be backed by
/// anything from a keychain to plain memory.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn store(&self, token: String);
    fn clear(&self);
}

/// Token store with no persistence: the session ends with the process.
#[derive(Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for InMemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().expect("TOKEN RwLock poisoned").clone()
    }

    fn store(&self, token: String) {
        *self.token.write().expect("TOKEN RwLock poisoned") = Some(token);
    }

    fn clear(&self) {
        *self.token.write().expect("TOKEN RwLock poisoned") = None;
    }
}

/// Ends the current session.
pub trait LogoutService: Send + Sync {
    fn logout(&self);
}

/// Drops the token and empties every service cache so the next login
/// starts from a clean slate. Navigation back to the login screen is the
/// view layer's concern.
pub struct SessionLogoutService {
    tokens: Arc<dyn TokenStore>,
    image_list: Arc<dyn ImageListService>,
    profile: Arc<dyn ProfileService>,
    avatar: Arc<dyn AvatarService>,
}

impl SessionLogoutService {
    pub fn new(
        tokens: Arc<dyn TokenStore>,
        image_list: Arc<dyn ImageListService>,
        profile: Arc<dyn ProfileService>,
        avatar: Arc<dyn AvatarService>,
    ) -> Self {
        Self {
            tokens,
            image_list,
            profile,
            avatar,
        }
    }
}

impl LogoutService for SessionLogoutService {
    fn logout(&self) {
        info!("logging out: clearing token and service caches");
        self.tokens.clear();
        self.image_list.reset();
        self.profile.reset();
        self.avatar.reset();
    }
}
