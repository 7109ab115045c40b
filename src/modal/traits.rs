// Seams between the engine and the page: modal surface, native player, elements

use std::sync::Arc;

use async_trait::async_trait;

use super::errors::PlayerError;
use super::models::{LocalPlaybackSpec, ModalLayout, PlaybackOptions, VideoMetadata};

/// The single on-page modal container
pub trait ModalSurface: Send + Sync {
    /// Show or hide the modal container
    fn set_visible(&self, visible: bool);

    /// Replace size/theme classes and apply custom dimensions
    fn apply_layout(&self, layout: &ModalLayout);

    /// Render title and published date in the header
    fn set_metadata(&self, metadata: &VideoMetadata);

    /// Remove player iframe / element and any error message
    fn clear(&self);

    fn set_loading(&self, visible: bool);

    /// Insert a provider iframe into the player container
    fn mount_iframe(&self, src: &str);

    fn show_error(&self, message: &str);

    fn hide_error(&self);

    /// Toggle the body-level "modal open" marker that suppresses page scroll
    fn set_scroll_locked(&self, locked: bool);

    /// Keyboard listener for Escape and Tab handling
    fn attach_key_listener(&self);

    fn detach_key_listener(&self);

    /// Focusable elements inside the modal, in tab order
    fn focusable_elements(&self) -> Vec<String>;

    fn focus(&self, element: &str);

    /// Whether the viewer has a signed-in session
    fn is_authenticated(&self) -> bool {
        true
    }

    /// Send the viewer to sign in (used when `require_auth` is set)
    fn prompt_login(&self) {}
}

/// Native player library (script + stylesheet) and player construction
#[async_trait]
pub trait PlayerRuntime: Send + Sync {
    /// Name of the runtime (for logging)
    fn name(&self) -> &'static str;

    /// Load the library. Called at most once per successful load.
    async fn load(&self) -> Result<(), PlayerError>;

    /// Construct a player element inside the modal container
    fn create(
        &self,
        spec: &LocalPlaybackSpec,
        options: &PlaybackOptions,
    ) -> Result<Arc<dyn NativePlayer>, PlayerError>;
}

/// A constructed native player instance
#[async_trait]
pub trait NativePlayer: Send + Sync {
    /// Resolves when the player reports it can play
    async fn ready(&self) -> Result<(), PlayerError>;

    /// Start playback; rejects when the browser refuses (autoplay policy)
    async fn play(&self, muted: bool) -> Result<(), PlayerError>;

    /// Destroy the player and release its element and listeners
    fn dispose(&self);
}

/// A page element the engine can bind to
pub trait DomElement: Send + Sync {
    /// Stable identity for the element within the page
    fn key(&self) -> String;

    /// Value of an attribute, e.g. `data-video-url`
    fn attribute(&self, name: &str) -> Option<String>;

    fn has_marker(&self, marker: &str) -> bool;

    fn set_marker(&self, marker: &str);
}
