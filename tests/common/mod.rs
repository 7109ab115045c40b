// Recording fakes for the page-side traits

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use video_modal_lib::hover::PreviewSurface;
use video_modal_lib::modal::{
    DomElement, LocalPlaybackSpec, ModalLayout, ModalSurface, NativePlayer, PlaybackOptions,
    PlayerError, PlayerRuntime, VideoMetadata,
};

#[derive(Default)]
pub struct RecordingSurface {
    pub events: Mutex<Vec<String>>,
    pub scroll_locked: AtomicBool,
    pub listeners: AtomicUsize,
    pub signed_out: AtomicBool,
    pub focusable: Vec<String>,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            focusable: vec!["close".to_string(), "player".to_string(), "share".to_string()],
            ..Default::default()
        })
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events().iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn last_error(&self) -> Option<String> {
        self.events()
            .iter()
            .rev()
            .find_map(|e| e.strip_prefix("error:").map(str::to_string))
    }

    pub fn iframe(&self) -> Option<String> {
        self.events()
            .iter()
            .rev()
            .find_map(|e| e.strip_prefix("iframe:").map(str::to_string))
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked.load(Ordering::SeqCst)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.load(Ordering::SeqCst)
    }
}

impl ModalSurface for RecordingSurface {
    fn set_visible(&self, visible: bool) {
        self.push(format!("visible:{}", visible));
    }

    fn apply_layout(&self, layout: &ModalLayout) {
        self.push(format!("layout:{}", layout.classes.join(" ")));
    }

    fn set_metadata(&self, metadata: &VideoMetadata) {
        self.push(format!("title:{}", metadata.title.clone().unwrap_or_default()));
    }

    fn clear(&self) {
        self.push("clear".to_string());
    }

    fn set_loading(&self, visible: bool) {
        self.push(format!("loading:{}", visible));
    }

    fn mount_iframe(&self, src: &str) {
        self.push(format!("iframe:{}", src));
    }

    fn show_error(&self, message: &str) {
        self.push(format!("error:{}", message));
    }

    fn hide_error(&self) {
        self.push("hide-error".to_string());
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.store(locked, Ordering::SeqCst);
        self.push(format!("scroll-locked:{}", locked));
    }

    fn attach_key_listener(&self) {
        self.listeners.fetch_add(1, Ordering::SeqCst);
    }

    fn detach_key_listener(&self) {
        self.listeners.fetch_sub(1, Ordering::SeqCst);
    }

    fn focusable_elements(&self) -> Vec<String> {
        self.focusable.clone()
    }

    fn focus(&self, element: &str) {
        self.push(format!("focus:{}", element));
    }

    fn is_authenticated(&self) -> bool {
        !self.signed_out.load(Ordering::SeqCst)
    }

    fn prompt_login(&self) {
        self.push("login".to_string());
    }
}

/// How a fake player answers `play()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayPolicy {
    Allow,
    MutedOnly,
    Block,
    Broken,
}

pub struct FakePlayer {
    pub src: String,
    pub ready_delay: Duration,
    pub policy: PlayPolicy,
    pub plays: Mutex<Vec<bool>>,
    pub disposed: AtomicBool,
}

impl FakePlayer {
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    pub fn plays(&self) -> Vec<bool> {
        self.plays.lock().unwrap().clone()
    }
}

#[async_trait]
impl NativePlayer for FakePlayer {
    async fn ready(&self) -> Result<(), PlayerError> {
        tokio::time::sleep(self.ready_delay).await;
        Ok(())
    }

    async fn play(&self, muted: bool) -> Result<(), PlayerError> {
        self.plays.lock().unwrap().push(muted);
        let blocked = "NotAllowedError: play() failed because the user didn't interact with the document first";
        match (self.policy, muted) {
            (PlayPolicy::Allow, _) | (PlayPolicy::MutedOnly, true) => Ok(()),
            (PlayPolicy::MutedOnly, false) | (PlayPolicy::Block, _) => Err(PlayerError::from(blocked)),
            (PlayPolicy::Broken, _) => Err(PlayerError::from("MEDIA_ERR_SRC_NOT_SUPPORTED")),
        }
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }
}

pub struct FakeRuntime {
    pub load_delay: Duration,
    pub ready_delay: Duration,
    pub policy: PlayPolicy,
    pub loads: AtomicUsize,
    pub players: Mutex<Vec<Arc<FakePlayer>>>,
}

impl FakeRuntime {
    pub fn new(policy: PlayPolicy) -> Arc<Self> {
        Self::with_delays(policy, Duration::from_millis(20), Duration::from_millis(20))
    }

    pub fn with_delays(policy: PlayPolicy, load_delay: Duration, ready_delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            load_delay,
            ready_delay,
            policy,
            loads: AtomicUsize::new(0),
            players: Mutex::new(Vec::new()),
        })
    }

    pub fn players(&self) -> Vec<Arc<FakePlayer>> {
        self.players.lock().unwrap().clone()
    }

    pub fn live_players(&self) -> usize {
        self.players().iter().filter(|p| !p.is_disposed()).count()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerRuntime for FakeRuntime {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn load(&self) -> Result<(), PlayerError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.load_delay).await;
        Ok(())
    }

    fn create(
        &self,
        spec: &LocalPlaybackSpec,
        _options: &PlaybackOptions,
    ) -> Result<Arc<dyn NativePlayer>, PlayerError> {
        let player = Arc::new(FakePlayer {
            src: spec.url.clone(),
            ready_delay: self.ready_delay,
            policy: self.policy,
            plays: Mutex::new(Vec::new()),
            disposed: AtomicBool::new(false),
        });
        self.players.lock().unwrap().push(player.clone());
        Ok(player)
    }
}

/// Thumbnail element with data-* attributes and a preview overlay
#[derive(Default)]
pub struct FakeElement {
    pub key: String,
    pub attributes: HashMap<String, String>,
    pub markers: Mutex<HashSet<String>>,
    pub overlay: Mutex<Vec<String>>,
}

impl FakeElement {
    pub fn new(key: &str, attributes: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            key: key.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        })
    }

    pub fn overlay(&self) -> Vec<String> {
        self.overlay.lock().unwrap().clone()
    }
}

impl DomElement for FakeElement {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn has_marker(&self, marker: &str) -> bool {
        self.markers.lock().unwrap().contains(marker)
    }

    fn set_marker(&self, marker: &str) {
        self.markers.lock().unwrap().insert(marker.to_string());
    }
}

impl PreviewSurface for FakeElement {
    fn mount_native(&self, url: &str) {
        self.overlay.lock().unwrap().push(format!("video:{}", url));
    }

    fn mount_iframe(&self, src: &str) {
        self.overlay.lock().unwrap().push(format!("iframe:{}", src));
    }

    fn pause_native(&self) {
        self.overlay.lock().unwrap().push("paused".to_string());
    }

    fn remove_preview(&self) {
        self.overlay.lock().unwrap().clear();
    }
}
