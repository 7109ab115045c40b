// Modal lifecycle controller - state machine for the shared playback modal
//
// Closed -> Opening -> (Loading ->) Playing, Error reachable from any open
// state, Closed reachable from everywhere. Every open and close bumps a
// generation counter; async continuations compare it before touching state,
// so a close or a newer open silences whatever the previous open was
// awaiting.

use std::sync::{Arc, Mutex, MutexGuard};

use super::errors::{ModalError, PlayerError};
use super::focus::{next_focus, Key, KeyOutcome};
use super::loader::DependencyLoader;
use super::models::{
    EmbedTarget, LocalPlaybackSpec, ModalLayout, ModalState, PlaybackOptions, VideoMetadata,
    VideoSource,
};
use super::traits::{DomElement, ModalSurface, NativePlayer, PlayerRuntime};
use crate::config::{ConfigError, ElementData};
use crate::sources::build_embed;

/// Caller hook invoked once per failed open
pub type ErrorCallback = Arc<dyn Fn(&ModalError) + Send + Sync>;

/// Everything needed to open the modal on one video
#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub source: VideoSource,
    pub options: PlaybackOptions,
    pub metadata: VideoMetadata,
}

impl OpenRequest {
    pub fn new(source: VideoSource) -> Self {
        Self {
            source,
            options: PlaybackOptions::default(),
            metadata: VideoMetadata::default(),
        }
    }

    pub fn with_options(mut self, options: PlaybackOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_metadata(mut self, metadata: VideoMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

#[derive(Default)]
struct Inner {
    state: ModalState,
    generation: u64,
    player: Option<Arc<dyn NativePlayer>>,
    source: Option<VideoSource>,
    last_error: Option<ModalError>,
    scroll_locked: bool,
    key_listener: bool,
    trap_focus: bool,
}

pub struct ModalController {
    surface: Arc<dyn ModalSurface>,
    loader: DependencyLoader,
    on_error: Option<ErrorCallback>,
    inner: Mutex<Inner>,
}

impl ModalController {
    pub fn new(surface: Arc<dyn ModalSurface>, runtime: Arc<dyn PlayerRuntime>) -> Self {
        Self {
            surface,
            loader: DependencyLoader::new(runtime),
            on_error: None,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn with_error_callback(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> ModalState {
        self.inner().state
    }

    pub fn last_error(&self) -> Option<ModalError> {
        self.inner().last_error.clone()
    }

    pub fn current_source(&self) -> Option<VideoSource> {
        self.inner().source.clone()
    }

    pub fn has_player(&self) -> bool {
        self.inner().player.is_some()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.inner().scroll_locked
    }

    pub fn generation(&self) -> u64 {
        self.inner().generation
    }

    pub fn is_player_library_loaded(&self) -> bool {
        self.loader.is_loaded()
    }

    /// Open the modal on a video and drive it until it plays or fails.
    ///
    /// An open modal is torn down first. Returns the state the modal is in
    /// when this call finishes, which may belong to a newer open if one
    /// started while this one was waiting.
    pub async fn open(&self, request: OpenRequest) -> ModalState {
        let OpenRequest {
            source,
            options,
            metadata,
        } = request;

        if self.close() {
            tracing::debug!("modal was open, closed before reopening");
        }

        if options.require_auth && !self.surface.is_authenticated() {
            tracing::info!(kind = %source.kind, "sign-in required before playback");
            self.surface.prompt_login();
            self.report(ModalError::AuthRequired);
            return ModalState::Closed;
        }

        let source = source.or_local_fallback();
        let generation = self.begin(&source, &options, &metadata);
        tracing::info!(kind = %source.kind, id = %source.id, generation, "opening video modal");

        match build_embed(&source, &options) {
            Err(e) => self.fail(generation, e),
            Ok(EmbedTarget::Iframe { src }) => {
                self.surface.mount_iframe(&src);
                self.surface.set_loading(false);
                self.transition(generation, ModalState::Playing);
            }
            Ok(EmbedTarget::Native(spec)) => self.play_native(generation, &spec, &options).await,
        }

        self.state()
    }

    /// Open from a clicked element's data-* attributes
    pub async fn open_element(
        &self,
        element: &dyn DomElement,
        defaults: &PlaybackOptions,
    ) -> Result<ModalState, ConfigError> {
        let data = ElementData::from_element(element);
        let request = data
            .open_request(defaults)?
            .ok_or_else(|| ConfigError::MissingSource {
                element: element.key(),
            })?;
        Ok(self.open(request).await)
    }

    /// Closed -> Opening: reset the container and take the page-level locks
    fn begin(&self, source: &VideoSource, options: &PlaybackOptions, metadata: &VideoMetadata) -> u64 {
        let generation = {
            let mut inner = self.inner();
            inner.generation += 1;
            inner.state = ModalState::Opening;
            inner.source = Some(source.clone());
            inner.last_error = None;
            inner.scroll_locked = true;
            inner.key_listener = true;
            inner.trap_focus = options.trap_focus;
            inner.generation
        };

        self.surface.clear();
        self.surface.apply_layout(&ModalLayout::for_options(options));
        self.surface.set_metadata(metadata);
        self.surface.set_visible(true);
        self.surface.set_scroll_locked(true);
        self.surface.attach_key_listener();
        if options.loading_spinner {
            self.surface.set_loading(true);
        }

        generation
    }

    /// Opening -> Loading -> Playing for self-hosted files
    async fn play_native(&self, generation: u64, spec: &LocalPlaybackSpec, options: &PlaybackOptions) {
        if !self.transition(generation, ModalState::Loading) {
            return;
        }

        if let Err(e) = self.loader.ensure_loaded().await {
            self.fail(generation, ModalError::DependencyLoad(e.to_string()));
            return;
        }
        if !self.is_current(generation) {
            return;
        }

        let player = match self.loader.runtime().create(spec, options) {
            Ok(player) => player,
            Err(e) => {
                self.fail(generation, ModalError::PlayerRuntime(e.to_string()));
                return;
            }
        };
        {
            let mut inner = self.inner();
            if inner.generation != generation {
                drop(inner);
                player.dispose();
                return;
            }
            inner.player = Some(player.clone());
        }

        if let Err(e) = player.ready().await {
            self.fail(generation, ModalError::PlayerRuntime(e.to_string()));
            return;
        }
        if !self.is_current(generation) {
            tracing::debug!(generation, "ready event for a closed modal ignored");
            return;
        }
        self.surface.set_loading(false);

        if !options.autoplay {
            self.transition(generation, ModalState::Playing);
            return;
        }
        self.autoplay(generation, player.as_ref(), options.muted).await;
    }

    /// Unmuted first, then muted. Ends in Playing or Error.
    ///
    /// Only an autoplay-policy rejection earns the muted retry; any other
    /// rejection is a player error and fails the open straight away.
    async fn autoplay(&self, generation: u64, player: &dyn NativePlayer, muted: bool) {
        let attempts: &[bool] = if muted { &[true] } else { &[false, true] };

        for &muted in attempts {
            match player.play(muted).await {
                Ok(()) => {
                    if self.transition(generation, ModalState::Playing) {
                        tracing::info!(generation, muted, "playback started");
                    }
                    return;
                }
                Err(e) => {
                    if !self.is_current(generation) {
                        return;
                    }
                    if !e.is_autoplay_block() {
                        self.fail(generation, ModalError::PlayerRuntime(e.to_string()));
                        return;
                    }
                    tracing::warn!(generation, muted, error = %e, "play() blocked by autoplay policy");
                }
            }
        }

        self.fail(generation, ModalError::AutoplayRejected);
    }

    /// Runtime error reported by the mounted native player
    pub fn player_error(&self, error: PlayerError) {
        let generation = {
            let inner = self.inner();
            if !inner.state.is_open() || inner.player.is_none() {
                return;
            }
            inner.generation
        };
        self.fail(generation, ModalError::PlayerRuntime(error.to_string()));
    }

    /// The viewer started playback by hand after autoplay was refused
    pub fn playback_started(&self) -> bool {
        let mut inner = self.inner();
        if inner.state != ModalState::Error
            || inner.player.is_none()
            || inner.last_error != Some(ModalError::AutoplayRejected)
        {
            return false;
        }
        inner.state = ModalState::Playing;
        inner.last_error = None;
        drop(inner);

        self.surface.hide_error();
        true
    }

    fn is_current(&self, generation: u64) -> bool {
        self.inner().generation == generation
    }

    /// Move to `state` if `generation` is still the live open
    fn transition(&self, generation: u64, state: ModalState) -> bool {
        let mut inner = self.inner();
        if inner.generation != generation {
            return false;
        }
        tracing::debug!(from = %inner.state, to = %state, generation, "modal transition");
        inner.state = state;
        true
    }

    /// * -> Error for the live open; stale failures are dropped
    fn fail(&self, generation: u64, error: ModalError) {
        let player = {
            let mut inner = self.inner();
            if inner.generation != generation {
                tracing::debug!(generation, error = %error, "failure for a closed modal ignored");
                return;
            }
            inner.state = ModalState::Error;
            if error.keeps_player() {
                None
            } else {
                inner.player.take()
            }
        };
        if let Some(player) = player {
            player.dispose();
        }

        tracing::warn!(generation, error = %error, "video modal error");
        self.surface.set_loading(false);
        self.surface.show_error(&error.user_message());
        self.report(error);
    }

    fn report(&self, error: ModalError) {
        self.inner().last_error = Some(error.clone());
        if let Some(callback) = &self.on_error {
            callback(&error);
        }
    }

    /// * -> Closed. Disposes the player, clears the container, restores page
    /// scroll and removes the key listener. Returns `false` when already
    /// closed, so repeated closes do nothing.
    pub fn close(&self) -> bool {
        let (player, was_locked, had_listener) = {
            let mut inner = self.inner();
            if inner.state == ModalState::Closed
                && inner.player.is_none()
                && !inner.scroll_locked
                && !inner.key_listener
            {
                return false;
            }
            inner.generation += 1;
            inner.state = ModalState::Closed;
            inner.source = None;
            (
                inner.player.take(),
                std::mem::take(&mut inner.scroll_locked),
                std::mem::take(&mut inner.key_listener),
            )
        };

        if let Some(player) = player {
            player.dispose();
        }
        self.surface.clear();
        self.surface.set_loading(false);
        self.surface.set_visible(false);
        if was_locked {
            self.surface.set_scroll_locked(false);
        }
        if had_listener {
            self.surface.detach_key_listener();
        }
        tracing::debug!("video modal closed");
        true
    }

    /// Backdrop click closes the modal
    pub fn backdrop_click(&self) -> bool {
        self.close()
    }

    /// Escape always closes; Tab cycles inside the modal when focus is trapped
    pub fn handle_key(&self, key: Key, focused: Option<&str>) -> KeyOutcome {
        let (open, trap) = {
            let inner = self.inner();
            (inner.state.is_open(), inner.trap_focus)
        };
        if !open {
            return KeyOutcome::Ignored;
        }

        match key {
            Key::Escape => {
                self.close();
                KeyOutcome::Closed
            }
            Key::Tab { shift } if trap => {
                let elements = self.surface.focusable_elements();
                match next_focus(&elements, focused, shift) {
                    Some(element) => {
                        self.surface.focus(&element);
                        KeyOutcome::MovedFocus(element)
                    }
                    None => KeyOutcome::Ignored,
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }
}
