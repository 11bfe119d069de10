//! Remote-backed photo list: the single source of truth for the feed.
//!
//! The service owns the authoritative ordered photo list and its
//! pagination cursor. Presenters read snapshots via [`ImageListService::
//! current_photos`] and learn about changes through the broadcast channel;
//! they never mutate the store directly.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use unsplash_api::UnsplashApi;

use crate::domain::{FeedEvent, Photo};
use crate::error::{ServiceError, ServiceResult};
use crate::services::TokenStore;

/// Capacity of the feed event channel. A lagged subscriber drops missed
/// events and re-snapshots on the next one, so overflow cannot corrupt
/// its state.
const FEED_EVENT_CAPACITY: usize = 16;

#[async_trait]
pub trait ImageListService: Send + Sync {
    /// Snapshot of the current ordered photo list.
    fn current_photos(&self) -> Vec<Photo>;

    /// Kick off a load of the next page. Fire-and-forget: completion is
    /// announced as [`FeedEvent::BulkUpdate`]; failures are logged and
    /// swallowed. Ignored while a page load is already in flight.
    fn fetch_next_page(&self);

    /// Set the like state of a photo. On success the store is updated and
    /// a [`FeedEvent::LikeUpdate`] is broadcast.
    async fn change_like(&self, photo_id: &str, is_like: bool) -> ServiceResult<()>;

    /// Subscribe to change notifications.
    fn subscribe(&self) -> broadcast::Receiver<FeedEvent>;

    /// Drop all cached photos and rewind the pagination cursor.
    fn reset(&self);
}

/// [`ImageListService`] backed by the photo API.
#[derive(Clone)]
pub struct RemoteImageListService {
    inner: Arc<ListInner>,
}

struct ListInner {
    api: UnsplashApi,
    tokens: Arc<dyn TokenStore>,
    page_size: u32,
    photos: RwLock<Vec<Photo>>,
    last_loaded_page: AtomicU32,
    page_in_flight: AtomicBool,
    events: broadcast::Sender<FeedEvent>,
}

impl RemoteImageListService {
    pub fn new(api: UnsplashApi, tokens: Arc<dyn TokenStore>, page_size: u32) -> Self {
        let (events, _) = broadcast::channel(FEED_EVENT_CAPACITY);
        Self {
            inner: Arc::new(ListInner {
                api,
                tokens,
                page_size,
                photos: RwLock::new(Vec::new()),
                last_loaded_page: AtomicU32::new(0),
                page_in_flight: AtomicBool::new(false),
                events,
            }),
        }
    }
}

impl ListInner {
    fn publish(&self, event: FeedEvent) {
        if self.events.send(event).is_err() {
            debug!(?event, "no feed subscribers");
        }
    }
}

#[async_trait]
impl ImageListService for RemoteImageListService {
    fn current_photos(&self) -> Vec<Photo> {
        self.inner
            .photos
            .read()
            .expect("PHOTOS RwLock poisoned")
            .clone()
    }

    fn fetch_next_page(&self) {
        if self.inner.page_in_flight.swap(true, Ordering::SeqCst) {
            debug!("page load already in flight, ignoring");
            return;
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let page = inner.last_loaded_page.load(Ordering::SeqCst) + 1;
            let bearer = inner.tokens.token();
            let result = inner
                .api
                .list_photos(page, inner.page_size, bearer.as_deref())
                .await;

            match result {
                Ok(dtos) => {
                    let (old_count, new_count) = {
                        let mut photos = inner.photos.write().expect("PHOTOS RwLock poisoned");
                        let old_count = photos.len();
                        photos.extend(dtos.into_iter().map(Photo::from));
                        (old_count, photos.len())
                    };
                    inner.last_loaded_page.store(page, Ordering::SeqCst);
                    info!(page, old_count, new_count, "feed page loaded");
                    inner.publish(FeedEvent::BulkUpdate {
                        old_count,
                        new_count,
                    });
                }
                Err(err) => warn!(%err, page, "feed page load failed"),
            }

            inner.page_in_flight.store(false, Ordering::SeqCst);
        });
    }

    async fn change_like(&self, photo_id: &str, is_like: bool) -> ServiceResult<()> {
        let bearer = self.inner.tokens.token().ok_or(ServiceError::MissingToken)?;

        if is_like {
            self.inner.api.like_photo(photo_id, &bearer).await?;
        } else {
            self.inner.api.unlike_photo(photo_id, &bearer).await?;
        }

        let updated_index = {
            let mut photos = self.inner.photos.write().expect("PHOTOS RwLock poisoned");
            photos.iter().position(|p| p.id == photo_id).map(|index| {
                photos[index].is_liked = is_like;
                index
            })
        };

        match updated_index {
            Some(index) => {
                info!(photo_id, is_like, index, "like state changed");
                self.inner.publish(FeedEvent::LikeUpdate { index });
            }
            None => warn!(photo_id, "liked photo is no longer in the list"),
        }

        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.inner.events.subscribe()
    }

    fn reset(&self) {
        let (old_count, new_count) = {
            let mut photos = self.inner.photos.write().expect("PHOTOS RwLock poisoned");
            let old_count = photos.len();
            photos.clear();
            (old_count, 0)
        };
        self.inner.last_loaded_page.store(0, Ordering::SeqCst);
        if old_count > 0 {
            info!(old_count, "photo list reset");
            self.inner.publish(FeedEvent::BulkUpdate {
                old_count,
                new_count,
            });
        }
    }
}
