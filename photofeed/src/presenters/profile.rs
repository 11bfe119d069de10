//! Profile presenter: pushes the profile and avatar to the view and owns
//! the logout confirmation flow.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::warn;
use url::Url;

use crate::domain::{AvatarEvent, ProfileViewModel};
use crate::services::{AvatarService, LogoutService, ProfileService};

/// Imperative surface of the profile screen.
pub trait ProfileView: Send + Sync {
    fn display_profile(&self, view_model: ProfileViewModel);
    /// `None` means "show the placeholder avatar".
    fn display_avatar(&self, url: Option<Url>);
    /// Ask the user to confirm logging out; `on_confirm` runs only on an
    /// explicit confirm.
    fn present_logout_alert(&self, on_confirm: Box<dyn FnOnce() + Send>);
}

pub struct ProfilePresenter {
    view: Arc<dyn ProfileView>,
    profile_service: Arc<dyn ProfileService>,
    avatar_service: Arc<dyn AvatarService>,
    logout_service: Arc<dyn LogoutService>,
    avatar_events: Option<broadcast::Receiver<AvatarEvent>>,
}

impl ProfilePresenter {
    pub fn new(
        view: Arc<dyn ProfileView>,
        profile_service: Arc<dyn ProfileService>,
        avatar_service: Arc<dyn AvatarService>,
        logout_service: Arc<dyn LogoutService>,
    ) -> Self {
        Self {
            view,
            profile_service,
            avatar_service,
            logout_service,
            avatar_events: None,
        }
    }

    /// The view is on screen: push the current profile (if any), start
    /// listening for avatar changes, and push the current avatar URL.
    pub fn on_view_ready(&mut self) {
        self.push_profile();
        if self.avatar_events.is_none() {
            self.avatar_events = Some(self.avatar_service.subscribe());
        }
        self.push_avatar();
    }

    /// Present the confirmation prompt; logout happens only on confirm,
    /// nothing changes on cancel.
    pub fn on_logout_tapped(&self) {
        let logout = Arc::clone(&self.logout_service);
        self.view
            .present_logout_alert(Box::new(move || logout.logout()));
    }

    /// Apply one avatar change notification: re-read and push, every time.
    pub fn handle_event(&self, event: AvatarEvent) {
        match event {
            AvatarEvent::Updated => self.push_avatar(),
        }
    }

    /// Pump avatar notifications until detached or the service goes away.
    pub async fn run(&mut self) {
        loop {
            let received = {
                let Some(events) = self.avatar_events.as_mut() else {
                    return;
                };
                events.recv().await
            };

            match received {
                Ok(event) => self.handle_event(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "avatar notifications lagged");
                    self.push_avatar();
                }
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }

    /// Stop receiving avatar notifications.
    pub fn detach(&mut self) {
        self.avatar_events = None;
    }

    fn push_profile(&self) {
        // No profile yet is not an error; the view keeps its placeholders.
        let Some(profile) = self.profile_service.current_profile() else {
            return;
        };
        self.view.display_profile(ProfileViewModel::from(&profile));
    }

    fn push_avatar(&self) {
        self.view
            .display_avatar(self.avatar_service.current_avatar_url());
    }
}
