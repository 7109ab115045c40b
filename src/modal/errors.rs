// Error types for the playback modal and native player

use std::fmt;

use thiserror::Error;

use super::models::VideoKind;
use crate::sources::diagnostics::{diagnose_player_error, PlayerFailure};

/// Failures surfaced by the modal as in-modal UI state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    /// An iframe provider source has no extractable id
    #[error("This link does not contain a valid {} video ID", .kind.display_name())]
    MissingIdentifier { kind: VideoKind },

    /// Both unmuted and muted autoplay attempts were rejected
    #[error("Autoplay was blocked by the browser")]
    AutoplayRejected,

    /// Native player reported a load or decode error
    #[error("Player error: {0}")]
    PlayerRuntime(String),

    /// Native player library failed to load
    #[error("Player library failed to load: {0}")]
    DependencyLoad(String),

    /// Source requires a signed-in session
    #[error("Sign-in required to watch this video")]
    AuthRequired,

    /// No modal controller has been installed on the page
    #[error("Video modal is not installed")]
    NotInstalled,
}

impl ModalError {
    /// Message shown inside the modal
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingIdentifier { kind } => format!(
                "Sorry, this {} video could not be loaded. The video link appears to be invalid.",
                kind.display_name()
            ),
            Self::AutoplayRejected => {
                "Your browser blocked autoplay. Press play to start the video.".to_string()
            }
            Self::PlayerRuntime(_) | Self::DependencyLoad(_) => {
                "Sorry, this video could not be played. Please try again later.".to_string()
            }
            Self::AuthRequired => "Please sign in to watch this video.".to_string(),
            Self::NotInstalled => "The video player is unavailable.".to_string(),
        }
    }

    /// Autoplay rejection leaves the player usable via manual controls
    pub fn keeps_player(&self) -> bool {
        matches!(self, Self::AutoplayRejected)
    }
}

/// Error reported by the native player runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerError {
    pub failure: PlayerFailure,
    pub message: String,
}

impl PlayerError {
    pub fn new(failure: PlayerFailure, message: impl Into<String>) -> Self {
        Self {
            failure,
            message: message.into(),
        }
    }

    /// Check if the browser refused to start playback without a user gesture
    pub fn is_autoplay_block(&self) -> bool {
        self.failure == PlayerFailure::AutoplayBlocked
    }
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.failure.description())
        } else {
            write!(f, "{}: {}", self.failure.description(), self.message)
        }
    }
}

impl std::error::Error for PlayerError {}

// Raw runtime messages (DOMException / MediaError text) are classified on the way in
impl From<String> for PlayerError {
    fn from(message: String) -> Self {
        let failure = diagnose_player_error(&message);
        Self { failure, message }
    }
}

impl From<&str> for PlayerError {
    fn from(message: &str) -> Self {
        Self::from(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_identifier_names_provider() {
        let err = ModalError::MissingIdentifier {
            kind: VideoKind::Vimeo,
        };
        assert!(err.to_string().contains("Vimeo"));
        assert!(err.user_message().contains("Vimeo"));
    }

    #[test]
    fn test_runtime_errors_share_generic_message() {
        assert_eq!(
            ModalError::PlayerRuntime("decode".into()).user_message(),
            ModalError::DependencyLoad("404".into()).user_message()
        );
    }

    #[test]
    fn test_player_error_from_dom_exception() {
        let err = PlayerError::from(
            "NotAllowedError: play() failed because the user didn't interact with the document first",
        );
        assert!(err.is_autoplay_block());

        let err = PlayerError::from("MEDIA_ERR_DECODE");
        assert!(!err.is_autoplay_block());
        assert_eq!(err.failure, PlayerFailure::Decode);
    }
}
