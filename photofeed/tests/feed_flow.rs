//! End-to-end feed flow: remote-backed image list service driving a real
//! presenter and a recording view, with the API served by wiremock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tokio::time::timeout;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use photofeed::presenters::{FeedPresenter, FeedView};
use photofeed::services::{
    ImageListService, InMemoryTokenStore, RemoteImageListService, TokenStore,
};
use unsplash_api::UnsplashApi;

const RECV_WINDOW: Duration = Duration::from_secs(1);
const PUMP_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, PartialEq, Clone)]
enum ViewCall {
    Updates(usize, usize),
    LikeUpdate(usize, bool),
    LikeEnabled(usize, bool),
    ShowProgress,
    HideProgress,
    LikeError,
}

#[derive(Default)]
struct RecordingView {
    calls: Mutex<Vec<ViewCall>>,
}

impl RecordingView {
    fn calls(&self) -> Vec<ViewCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ViewCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl FeedView for RecordingView {
    fn apply_updates(&self, old_count: usize, new_count: usize) {
        self.record(ViewCall::Updates(old_count, new_count));
    }

    fn apply_like_update(&self, index: usize, is_liked: bool) {
        self.record(ViewCall::LikeUpdate(index, is_liked));
    }

    fn set_like_button_enabled(&self, index: usize, enabled: bool) {
        self.record(ViewCall::LikeEnabled(index, enabled));
    }

    fn show_blocking_progress(&self) {
        self.record(ViewCall::ShowProgress);
    }

    fn hide_blocking_progress(&self) {
        self.record(ViewCall::HideProgress);
    }

    fn show_like_error(&self) {
        self.record(ViewCall::LikeError);
    }
}

fn photo_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "created_at": "2016-05-03T11:00:28-04:00",
        "width": 1000,
        "height": 500,
        "description": null,
        "liked_by_user": false,
        "urls": {
            "raw": format!("https://images.example/{id}/raw"),
            "full": format!("https://images.example/{id}/full"),
            "regular": format!("https://images.example/{id}/regular"),
            "small": format!("https://images.example/{id}/small"),
            "thumb": format!("https://images.example/{id}/thumb")
        }
    })
}

async fn mount_page(server: &MockServer, page: &str, photos: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/photos"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(photos))
        .mount(server)
        .await;
}

#[tokio::test]
async fn feed_paginates_and_round_trips_a_like() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let server = MockServer::start().await;
    mount_page(
        &server,
        "1",
        json!([photo_json("a"), photo_json("b"), photo_json("c")]),
    )
    .await;
    mount_page(&server, "2", json!([photo_json("d"), photo_json("e")])).await;
    Mock::given(method("POST"))
        .and(path("/photos/b/like"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(InMemoryTokenStore::new());
    tokens.store("t".into());
    let api = UnsplashApi::new(Url::parse(&server.uri()).unwrap());
    let service = Arc::new(RemoteImageListService::new(api, tokens, 3));

    let view = Arc::new(RecordingView::default());
    let mut presenter = FeedPresenter::new(view.clone(), service.clone());

    // The test watches the service's channel to know when async loads
    // land, then feeds the presenter on this thread, exactly as the
    // view-update execution context would.
    let mut probe = service.subscribe();

    presenter.on_view_ready();
    let event = timeout(RECV_WINDOW, probe.recv()).await.unwrap().unwrap();
    presenter.handle_event(event);

    assert_eq!(presenter.photo_count(), 3);
    assert_eq!(view.calls(), vec![ViewCall::Updates(0, 3)]);

    // The last known row is about to appear: the next page is fetched.
    presenter.will_display_row(2);
    let event = timeout(RECV_WINDOW, probe.recv()).await.unwrap().unwrap();
    presenter.handle_event(event);

    assert_eq!(presenter.photo_count(), 5);
    assert_eq!(
        view.calls(),
        vec![ViewCall::Updates(0, 3), ViewCall::Updates(3, 5)]
    );

    // Like row 1. The pump drains the completion and the targeted
    // notification; the equal-count bulk updates it replays are silent.
    presenter.did_tap_like(1);
    let _ = timeout(PUMP_WINDOW, presenter.run()).await;

    assert!(service.current_photos()[1].is_liked);
    assert_eq!(
        view.calls(),
        vec![
            ViewCall::Updates(0, 3),
            ViewCall::Updates(3, 5),
            ViewCall::ShowProgress,
            ViewCall::LikeEnabled(1, false),
            ViewCall::LikeUpdate(1, true),
            ViewCall::LikeEnabled(1, true),
            ViewCall::HideProgress,
        ]
    );
}

#[tokio::test]
async fn failed_like_rolls_back_and_reports() {
    let server = MockServer::start().await;
    mount_page(&server, "1", json!([photo_json("a")])).await;
    Mock::given(method("POST"))
        .and(path("/photos/a/like"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(InMemoryTokenStore::new());
    tokens.store("t".into());
    let api = UnsplashApi::new(Url::parse(&server.uri()).unwrap());
    let service = Arc::new(RemoteImageListService::new(api, tokens, 3));

    let view = Arc::new(RecordingView::default());
    let mut presenter = FeedPresenter::new(view.clone(), service.clone());
    let mut probe = service.subscribe();

    presenter.on_view_ready();
    let event = timeout(RECV_WINDOW, probe.recv()).await.unwrap().unwrap();
    presenter.handle_event(event);

    presenter.did_tap_like(0);
    let _ = timeout(PUMP_WINDOW, presenter.run()).await;

    // The store is untouched and the view ended rolled back.
    assert!(!service.current_photos()[0].is_liked);
    assert_eq!(
        view.calls(),
        vec![
            ViewCall::Updates(0, 1),
            ViewCall::ShowProgress,
            ViewCall::LikeEnabled(0, false),
            ViewCall::HideProgress,
            ViewCall::LikeEnabled(0, true),
            ViewCall::LikeUpdate(0, false),
            ViewCall::LikeError,
        ]
    );
}
