// Hover previews driven through the registry, as a page would

mod common;

use std::time::Duration;

use common::FakeElement;
use video_modal_lib::config::PageConfig;
use video_modal_lib::hover::{PreviewRegistry, PREVIEW_MARKER};
use video_modal_lib::modal::PreviewState;
use video_modal_lib::sources::{classify, preview_url_for};

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn registry() -> PreviewRegistry {
    let config = PageConfig::from_json(r#"{"hoverDelayMs": 150, "minPreviewMs": 300}"#).unwrap();
    PreviewRegistry::new(config.hover_timing())
}

#[tokio::test(start_paused = true)]
async fn test_leaving_early_creates_nothing() {
    let registry = registry();
    let thumb = FakeElement::new("t1", &[("data-preview-url", "local:/media/teaser.mp4")]);
    assert!(registry.bind(&thumb));

    registry.pointer_enter("t1");
    advance(100).await;
    registry.pointer_leave("t1");
    advance(1000).await;

    assert!(thumb.overlay().is_empty());
    let preview = registry.get("t1").unwrap();
    assert_eq!(preview.state(), PreviewState::Idle);
    assert!(!preview.has_pending_timer());
}

#[tokio::test(start_paused = true)]
async fn test_native_preview_shown_then_removed() {
    let registry = registry();
    let thumb = FakeElement::new("t1", &[("data-preview-url", "LOCAL:/media/teaser.webm")]);
    registry.bind(&thumb);

    registry.pointer_enter("t1");
    advance(200).await;
    assert_eq!(thumb.overlay(), vec!["video:/media/teaser.webm"]);

    advance(500).await;
    registry.pointer_leave("t1");
    assert!(thumb.overlay().is_empty());

    let preview = registry.get("t1").unwrap();
    assert_eq!(preview.state(), PreviewState::Idle);
    assert!(!preview.has_pending_timer());
}

#[tokio::test(start_paused = true)]
async fn test_generated_youtube_preview_loops() {
    let source = classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    let preview_url = preview_url_for(&source).unwrap();
    assert!(preview_url.contains("mute=1"));
    assert!(preview_url.ends_with("&loop=1&playlist=dQw4w9WgXcQ"));

    let registry = registry();
    let thumb = FakeElement::new("yt", &[("data-preview-url", preview_url.as_str())]);
    registry.bind(&thumb);

    registry.pointer_enter("yt");
    advance(160).await;
    registry.pointer_leave("yt");
    // Shown for less than the minimum, so it lingers
    assert_eq!(thumb.overlay().len(), 1);
    assert!(thumb.overlay()[0].starts_with("iframe:https://www.youtube.com/embed/dQw4w9WgXcQ"));

    advance(400).await;
    assert!(thumb.overlay().is_empty());
    assert!(!registry.get("yt").unwrap().has_pending_timer());
}

#[tokio::test(start_paused = true)]
async fn test_rescan_after_insert_binds_new_elements_only() {
    let registry = registry();
    let first = FakeElement::new("a", &[("data-preview-url", "local:/media/a.mp4")]);
    let no_preview = FakeElement::new("b", &[("data-video-url", "/media/b.mp4")]);
    assert_eq!(registry.scan(&[first.clone(), no_preview.clone()]), 1);

    let inserted = FakeElement::new("c", &[("data-preview-url", "local:/media/c.mp4")]);
    assert_eq!(registry.scan(&[first.clone(), no_preview.clone(), inserted.clone()]), 1);
    assert_eq!(registry.len(), 2);
    assert!(first.markers.lock().unwrap().contains(PREVIEW_MARKER));
    assert!(!no_preview.markers.lock().unwrap().contains(PREVIEW_MARKER));

    // Pointer events are handled once per element even after repeated scans
    registry.pointer_enter("a");
    advance(200).await;
    assert_eq!(first.overlay().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unbind_tears_down_visible_preview() {
    let registry = registry();
    let thumb = FakeElement::new("t1", &[("data-preview-url", "local:/media/teaser.mp4")]);
    registry.bind(&thumb);

    registry.pointer_enter("t1");
    advance(200).await;
    assert!(registry.unbind("t1"));
    assert!(thumb.overlay().is_empty());
    assert!(registry.is_empty());

}

#[tokio::test(start_paused = true)]
async fn test_reinserted_element_gets_fresh_controller() {
    let registry = registry();
    let thumb = FakeElement::new("t1", &[("data-preview-url", "local:/media/teaser.mp4")]);
    assert_eq!(registry.scan(&[thumb.clone()]), 1);
    assert!(registry.unbind("t1"));
    assert!(thumb.markers.lock().unwrap().contains(PREVIEW_MARKER));

    // Page puts the same element back; its marker is left over from before
    assert_eq!(registry.scan(&[thumb.clone()]), 1);
    assert!(registry.get("t1").is_some());

    assert!(registry.pointer_enter("t1"));
    advance(200).await;
    assert_eq!(thumb.overlay(), vec!["video:/media/teaser.mp4"]);
}
