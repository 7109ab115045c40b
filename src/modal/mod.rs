// Playback modal - the single shared modal and its lifecycle

pub mod controller;
pub mod errors;
pub mod focus;
pub mod loader;
pub mod models;
pub mod traits;
pub mod triggers;

pub use controller::{ErrorCallback, ModalController, OpenRequest};
pub use errors::{ModalError, PlayerError};
pub use focus::{Key, KeyOutcome};
pub use models::{
    CustomPlayers, EmbedFn, EmbedTarget, LocalPlaybackSpec, ModalLayout, ModalSize, ModalState,
    Orientation, PlaybackOptions, PlayerTheme, PreviewState, Theme, VideoKind, VideoMetadata,
    VideoSource,
};
pub use traits::{DomElement, ModalSurface, NativePlayer, PlayerRuntime};
pub use triggers::ModalTriggers;
