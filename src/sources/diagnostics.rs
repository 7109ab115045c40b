// Player error diagnostics - identifies why native playback failed
//
// Analyzes DOMException names and MediaError codes reported by the browser to
// decide whether a failure is an autoplay-policy block (retryable muted) or a
// real playback error.

use serde::{Deserialize, Serialize};

/// Reasons native playback can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerFailure {
    /// `NotAllowedError`: autoplay policy requires a user gesture or muting
    AutoplayBlocked,

    /// `NotSupportedError` / `MEDIA_ERR_SRC_NOT_SUPPORTED`
    UnsupportedSource,

    /// `MEDIA_ERR_NETWORK` or a failed fetch of the media
    Network,

    /// `MEDIA_ERR_DECODE`
    Decode,

    /// `AbortError`: the play request was interrupted by a new load or pause
    Aborted,

    /// Player library script or stylesheet failed to load
    LibraryLoad,

    Unknown,
}

impl PlayerFailure {
    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::AutoplayBlocked => "Autoplay blocked by browser policy",
            Self::UnsupportedSource => "Media format not supported",
            Self::Network => "Network error while loading media",
            Self::Decode => "Media could not be decoded",
            Self::Aborted => "Playback request aborted",
            Self::LibraryLoad => "Player library failed to load",
            Self::Unknown => "Unknown player error",
        }
    }

    /// Check if retrying the same source could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AutoplayBlocked | Self::Aborted | Self::Network)
    }

    /// Extra hint for the few failures where the user can act
    pub fn user_explanation(&self) -> Option<&'static str> {
        match self {
            Self::AutoplayBlocked => Some("Press play to start the video."),
            Self::UnsupportedSource => {
                Some("This browser cannot play this video format. Try another browser.")
            }
            Self::Network => Some("Check your internet connection and try again."),
            _ => None,
        }
    }
}

/// Analyze a player error message and return the failure reason
pub fn diagnose_player_error(error: &str) -> PlayerFailure {
    let lower = error.to_lowercase();

    // Autoplay policy (checked first, it is the only recoverable case)
    if lower.contains("notallowederror")
        || lower.contains("user didn't interact")
        || lower.contains("user gesture")
        || lower.contains("autoplay")
    {
        return PlayerFailure::AutoplayBlocked;
    }

    if lower.contains("abort") || lower.contains("interrupted by a call to pause") {
        return PlayerFailure::Aborted;
    }

    if lower.contains("notsupportederror")
        || lower.contains("src_not_supported")
        || lower.contains("no supported source")
        || lower.contains("not supported")
    {
        return PlayerFailure::UnsupportedSource;
    }

    if lower.contains("media_err_decode") || lower.contains("decode") {
        return PlayerFailure::Decode;
    }

    if lower.contains("media_err_network")
        || lower.contains("network")
        || lower.contains("failed to fetch")
    {
        return PlayerFailure::Network;
    }

    if lower.contains("script") || lower.contains("stylesheet") || lower.contains("library") {
        return PlayerFailure::LibraryLoad;
    }

    PlayerFailure::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_allowed_detection() {
        let error = "NotAllowedError: The play method is not allowed by the user agent";
        assert_eq!(diagnose_player_error(error), PlayerFailure::AutoplayBlocked);
    }

    #[test]
    fn test_abort_detection() {
        let error = "AbortError: The play() request was interrupted by a call to pause()";
        assert_eq!(diagnose_player_error(error), PlayerFailure::Aborted);
    }

    #[test]
    fn test_unsupported_detection() {
        let error = "NotSupportedError: Failed to load because no supported source was found.";
        assert_eq!(diagnose_player_error(error), PlayerFailure::UnsupportedSource);
    }

    #[test]
    fn test_media_error_codes() {
        assert_eq!(diagnose_player_error("MEDIA_ERR_DECODE"), PlayerFailure::Decode);
        assert_eq!(diagnose_player_error("MEDIA_ERR_NETWORK"), PlayerFailure::Network);
    }

    #[test]
    fn test_library_load_detection() {
        assert_eq!(
            diagnose_player_error("failed to load script plyr.min.js"),
            PlayerFailure::LibraryLoad
        );
    }

    #[test]
    fn test_unknown_fallback() {
        assert_eq!(diagnose_player_error(""), PlayerFailure::Unknown);
        assert!(!PlayerFailure::Decode.is_retryable());
        assert!(PlayerFailure::AutoplayBlocked.user_explanation().is_some());
    }
}
