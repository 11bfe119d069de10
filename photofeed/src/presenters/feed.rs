//! Feed presenter: owns a snapshot of the photo list and drives the feed
//! view through a narrow contract.
//!
//! The presenter is a single-threaded state machine. Row callbacks arrive
//! from the view, change notifications from the image list service, and
//! like-toggle completions from tasks it spawned; everything funnels into
//! one execution context (the [`FeedPresenter::run`] pump), so presenter
//! state mutation and view calls are never concurrent.

use std::ops::Range;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};
use url::Url;

use crate::domain::{FeedEvent, Photo};
use crate::error::ServiceResult;
use crate::services::ImageListService;

/// Row insets used by the aspect-ratio height computation.
const INSET_LEFT: f64 = 16.0;
const INSET_RIGHT: f64 = 16.0;
const INSET_TOP: f64 = 4.0;
const INSET_BOTTOM: f64 = 4.0;

/// Long date style, e.g. "August 5, 2026".
const DATE_FORMAT: &str = "%B %-d, %Y";

/// Imperative surface of the feed screen. The presenter decides when to
/// call; implementations only render.
pub trait FeedView: Send + Sync {
    /// Reconcile the visible row count from `old_count` to `new_count`.
    /// The structural change to apply is defined by [`reconcile_rows`].
    fn apply_updates(&self, old_count: usize, new_count: usize);
    fn apply_like_update(&self, index: usize, is_liked: bool);
    fn set_like_button_enabled(&self, index: usize, enabled: bool);
    fn show_blocking_progress(&self);
    fn hide_blocking_progress(&self);
    fn show_like_error(&self);
}

/// Render target for a single feed row.
pub trait PhotoRow {
    fn display(&mut self, photo: &Photo, date_text: &str);
}

/// Height decision for a feed row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowHeight {
    /// Let the layout system measure the row.
    Automatic,
    Points(f64),
}

/// Structural change behind an `apply_updates(old, new)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowUpdate {
    None,
    /// Insert exactly these rows as an incremental animated insert.
    Insert(Range<usize>),
    /// The list shrank: structural reset, reload everything.
    Reload,
}

/// Row-count reconciliation contract shared by feed view implementations.
pub fn reconcile_rows(old_count: usize, new_count: usize) -> RowUpdate {
    if new_count < old_count {
        RowUpdate::Reload
    } else if new_count > old_count {
        RowUpdate::Insert(old_count..new_count)
    } else {
        RowUpdate::None
    }
}

/// Outcome of a like round trip, marshalled back to the presenter's
/// execution context.
struct LikeCompletion {
    index: usize,
    previous: bool,
    result: ServiceResult<()>,
}

enum Pumped {
    Event(Result<FeedEvent, broadcast::error::RecvError>),
    Like(Option<LikeCompletion>),
}

pub struct FeedPresenter {
    view: Arc<dyn FeedView>,
    service: Arc<dyn ImageListService>,
    photos: Vec<Photo>,
    events: Option<broadcast::Receiver<FeedEvent>>,
    completions_tx: mpsc::UnboundedSender<LikeCompletion>,
    completions_rx: mpsc::UnboundedReceiver<LikeCompletion>,
}

impl FeedPresenter {
    pub fn new(view: Arc<dyn FeedView>, service: Arc<dyn ImageListService>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            view,
            service,
            photos: Vec::new(),
            events: None,
            completions_tx,
            completions_rx,
        }
    }

    /// The view is on screen: snapshot the current list, subscribe to
    /// change notifications, and trigger the first page fetch. Safe to
    /// call again; the subscription is only ever created once.
    pub fn on_view_ready(&mut self) {
        self.photos = self.service.current_photos();
        if self.events.is_none() {
            self.events = Some(self.service.subscribe());
        }
        self.service.fetch_next_page();
    }

    /// Row count for the view's list-rendering driver.
    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    /// Hand the photo and its display date to a row render target.
    /// Out-of-bounds indices are ignored; row callbacks can race async
    /// list updates.
    pub fn configure_row(&self, index: usize, row: &mut dyn PhotoRow) {
        let Some(photo) = self.photos.get(index) else {
            return;
        };
        row.display(photo, &format_date(photo.created_at.as_ref()));
    }

    /// Aspect-ratio-preserving row height for the given container width.
    pub fn row_height(&self, index: usize, container_width: f64) -> RowHeight {
        let Some(photo) = self.photos.get(index) else {
            return RowHeight::Automatic;
        };
        let image_width = container_width - INSET_LEFT - INSET_RIGHT;
        let scale = image_width / photo.size.width.max(1.0);
        RowHeight::Points(photo.size.height * scale + INSET_TOP + INSET_BOTTOM)
    }

    /// Full-resolution asset URL for the row, if any.
    pub fn image_url(&self, index: usize) -> Option<Url> {
        let photo = self.photos.get(index)?;
        Url::parse(&photo.full_image_url).ok()
    }

    /// The last known row is about to appear: fetch the next page.
    pub fn will_display_row(&self, index: usize) {
        if index + 1 == self.photos.len() {
            self.service.fetch_next_page();
        }
    }

    /// Toggle the like state of the row. The control is disabled and a
    /// blocking indicator shown until the round trip resolves; success is
    /// reflected via the service's own [`FeedEvent::LikeUpdate`], failure
    /// rolls the view back.
    pub fn did_tap_like(&self, index: usize) {
        let Some(photo) = self.photos.get(index) else {
            return;
        };
        let previous = photo.is_liked;
        let desired = !previous;

        self.view.show_blocking_progress();
        self.view.set_like_button_enabled(index, false);

        let service = Arc::clone(&self.service);
        let completions = self.completions_tx.clone();
        let photo_id = photo.id.clone();
        tokio::spawn(async move {
            let result = service.change_like(&photo_id, desired).await;
            let _ = completions.send(LikeCompletion {
                index,
                previous,
                result,
            });
        });
    }

    /// Apply one change notification from the image list service.
    pub fn handle_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::LikeUpdate { index } => {
                self.photos = self.service.current_photos();
                let Some(photo) = self.photos.get(index) else {
                    debug!(index, "like update for a row that is gone, dropping");
                    return;
                };
                self.view.apply_like_update(index, photo.is_liked);
                self.view.set_like_button_enabled(index, true);
                self.view.hide_blocking_progress();
            }
            FeedEvent::BulkUpdate { .. } => {
                let old_count = self.photos.len();
                self.photos = self.service.current_photos();
                let new_count = self.photos.len();
                if new_count != old_count {
                    self.view.apply_updates(old_count, new_count);
                }
            }
        }
    }

    /// Pump notifications and like completions until detached or the
    /// service goes away. This is the designated view-update execution
    /// context: all state mutation happens here or on the caller's
    /// thread, never concurrently.
    pub async fn run(&mut self) {
        loop {
            let pumped = {
                let Some(events) = self.events.as_mut() else {
                    return;
                };
                tokio::select! {
                    event = events.recv() => Pumped::Event(event),
                    completion = self.completions_rx.recv() => Pumped::Like(completion),
                }
            };

            match pumped {
                Pumped::Event(Ok(event)) => self.handle_event(event),
                Pumped::Event(Err(broadcast::error::RecvError::Lagged(skipped))) => {
                    warn!(skipped, "feed notifications lagged, resyncing on next event");
                }
                Pumped::Event(Err(broadcast::error::RecvError::Closed)) => return,
                Pumped::Like(Some(completion)) => self.finish_like(completion),
                Pumped::Like(None) => return,
            }
        }
    }

    /// Stop receiving change notifications. In-flight requests are not
    /// cancelled; their completions are simply never delivered to a view.
    pub fn detach(&mut self) {
        self.events = None;
    }

    fn finish_like(&mut self, completion: LikeCompletion) {
        match completion.result {
            Ok(()) => {
                // The service broadcasts the targeted update; nothing to
                // do here.
                debug!(index = completion.index, "like round trip confirmed");
            }
            Err(err) => {
                warn!(%err, index = completion.index, "like round trip failed, rolling back");
                self.view.hide_blocking_progress();
                self.view.set_like_button_enabled(completion.index, true);
                self.view.apply_like_update(completion.index, completion.previous);
                self.view.show_like_error();
            }
        }
    }
}

fn format_date(created_at: Option<&DateTime<Utc>>) -> String {
    created_at
        .map(|ts| ts.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
