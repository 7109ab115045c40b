// Common data models for video sources and playback

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Container format assumed for self-hosted files with no usable extension
pub const DEFAULT_LOCAL_FORMAT: &str = "mp4";

/// Video hosting platform, or a self-hosted file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    Youtube,
    Vimeo,
    Wistia,
    Rumble,
    Muvi,
    Loom,
    /// Self-hosted file played by the native player
    Local,
    /// Nothing matched during classification
    Unknown,
}

impl VideoKind {
    /// Iframe providers, in classification priority order
    pub const PROVIDERS: [VideoKind; 6] = [
        Self::Youtube,
        Self::Vimeo,
        Self::Wistia,
        Self::Rumble,
        Self::Muvi,
        Self::Loom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Vimeo => "vimeo",
            Self::Wistia => "wistia",
            Self::Rumble => "rumble",
            Self::Muvi => "muvi",
            Self::Loom => "loom",
            Self::Local => "local",
            Self::Unknown => "unknown",
        }
    }

    /// Name shown to users in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Youtube => "YouTube",
            Self::Vimeo => "Vimeo",
            Self::Wistia => "Wistia",
            Self::Rumble => "Rumble",
            Self::Muvi => "Muvi",
            Self::Loom => "Loom",
            Self::Local => "video file",
            Self::Unknown => "video",
        }
    }

    /// Check if this kind is played inside a provider iframe
    pub fn is_iframe(&self) -> bool {
        !matches!(self, Self::Local | Self::Unknown)
    }

    /// Parse a `data-video-type` hint. Unrecognized hints yield `None`.
    pub fn parse(hint: &str) -> Option<Self> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "youtube" | "yt" => Some(Self::Youtube),
            "vimeo" => Some(Self::Vimeo),
            "wistia" => Some(Self::Wistia),
            "rumble" => Some(Self::Rumble),
            "muvi" => Some(Self::Muvi),
            "loom" => Some(Self::Loom),
            "local" | "file" | "self-hosted" | "upload" => Some(Self::Local),
            _ => None,
        }
    }
}

impl fmt::Display for VideoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified video source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSource {
    pub kind: VideoKind,
    /// Provider id; empty when unknown or not applicable
    pub id: String,
    pub raw_url: String,
    /// File extension, only set for `Local`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl VideoSource {
    pub fn unknown(raw_url: impl Into<String>) -> Self {
        Self {
            kind: VideoKind::Unknown,
            id: String::new(),
            raw_url: raw_url.into(),
            format: None,
        }
    }

    pub fn local(raw_url: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            kind: VideoKind::Local,
            id: String::new(),
            raw_url: raw_url.into(),
            format: Some(format.into()),
        }
    }

    pub fn provider(kind: VideoKind, id: impl Into<String>, raw_url: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            raw_url: raw_url.into(),
            format: None,
        }
    }

    /// Unknown sources are played as local mp4 files.
    ///
    /// This is permissive: a URL that is not media will fail later in the
    /// native player rather than here.
    pub fn or_local_fallback(self) -> Self {
        if self.kind != VideoKind::Unknown {
            return self;
        }
        tracing::warn!(url = %self.raw_url, "unrecognized video source, treating as local mp4");
        Self::local(self.raw_url, DEFAULT_LOCAL_FORMAT)
    }

    /// Canonical page URL on the provider's own site
    pub fn watch_url(&self) -> Option<String> {
        if self.kind.is_iframe() && self.id.is_empty() {
            return None;
        }
        match self.kind {
            VideoKind::Youtube => Some(format!("https://www.youtube.com/watch?v={}", self.id)),
            VideoKind::Vimeo => Some(format!("https://vimeo.com/{}", self.id)),
            VideoKind::Wistia => Some(format!("https://fast.wistia.net/medias/{}", self.id)),
            VideoKind::Rumble => Some(format!("https://rumble.com/{}", self.id)),
            VideoKind::Muvi => Some(format!("https://embed.muvi.com/embed/{}", self.id)),
            VideoKind::Loom => Some(format!("https://www.loom.com/share/{}", self.id)),
            VideoKind::Local if !self.raw_url.is_empty() => Some(self.raw_url.clone()),
            VideoKind::Local | VideoKind::Unknown => None,
        }
    }
}

/// What the native player needs to play a self-hosted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalPlaybackSpec {
    pub url: String,
    pub format: String,
}

impl LocalPlaybackSpec {
    /// MIME type for the `<source type>` attribute
    pub fn mime_type(&self) -> &'static str {
        match self.format.as_str() {
            "webm" => "video/webm",
            "ogg" => "video/ogg",
            "mov" => "video/quicktime",
            "avi" => "video/x-msvideo",
            "mkv" => "video/x-matroska",
            _ => "video/mp4",
        }
    }
}

/// Result of building a playable target for a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmbedTarget {
    /// Provider player, loaded into an iframe `src`
    Iframe { src: String },
    /// Self-hosted file for the native player
    Native(LocalPlaybackSpec),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerTheme {
    #[default]
    Default,
    Flat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Wide,
    Vertical,
}

/// Modal size: a named preset or explicit pixel dimensions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
    Fullscreen,
    Custom { width: u32, height: u32 },
}

impl FromStr for ModalSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_ascii_lowercase();
        match value.as_str() {
            "small" | "sm" => return Ok(Self::Small),
            "medium" | "md" => return Ok(Self::Medium),
            "large" | "lg" => return Ok(Self::Large),
            "fullscreen" | "full" => return Ok(Self::Fullscreen),
            _ => {}
        }

        // Custom dimensions: "800x450"
        let (w, h) = value
            .split_once('x')
            .ok_or_else(|| format!("unknown modal size: {}", s))?;
        let width: u32 = w.trim().parse().map_err(|_| format!("invalid width in {}", s))?;
        let height: u32 = h.trim().parse().map_err(|_| format!("invalid height in {}", s))?;
        if width == 0 || height == 0 {
            return Err(format!("modal dimensions must be non-zero: {}", s));
        }
        Ok(Self::Custom { width, height })
    }
}

impl TryFrom<String> for ModalSize {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModalSize> for String {
    fn from(size: ModalSize) -> Self {
        match size {
            ModalSize::Small => "small".to_string(),
            ModalSize::Medium => "medium".to_string(),
            ModalSize::Large => "large".to_string(),
            ModalSize::Fullscreen => "fullscreen".to_string(),
            ModalSize::Custom { width, height } => format!("{}x{}", width, height),
        }
    }
}

/// Embed function for a custom player: returns an iframe `src`
pub type EmbedFn = Arc<dyn Fn(&VideoSource, &PlaybackOptions) -> String + Send + Sync>;

/// Custom embed builders keyed by kind, consulted before the built-in templates
#[derive(Clone, Default)]
pub struct CustomPlayers(HashMap<VideoKind, EmbedFn>);

impl CustomPlayers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: VideoKind, embed: EmbedFn) {
        self.0.insert(kind, embed);
    }

    pub fn get(&self, kind: VideoKind) -> Option<&EmbedFn> {
        self.0.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CustomPlayers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// Per-invocation playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackOptions {
    pub autoplay: bool,
    pub muted: bool,
    pub theme: Theme,
    pub player_theme: PlayerTheme,
    pub modal_size: ModalSize,
    pub video_format_orientation: Orientation,
    pub show_controls: bool,
    pub require_auth: bool,
    pub loading_spinner: bool,
    pub trap_focus: bool,
    #[serde(skip)]
    pub custom_players: CustomPlayers,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            muted: false,
            theme: Theme::Dark,
            player_theme: PlayerTheme::Default,
            modal_size: ModalSize::Medium,
            video_format_orientation: Orientation::Wide,
            show_controls: true,
            require_auth: false,
            loading_spinner: true,
            trap_focus: true,
            custom_players: CustomPlayers::default(),
        }
    }
}

impl PlaybackOptions {
    /// Options used for hover previews: muted, autoplaying, no controls
    pub fn preview() -> Self {
        Self {
            autoplay: true,
            muted: true,
            show_controls: false,
            loading_spinner: false,
            trap_focus: false,
            ..Self::default()
        }
    }

    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn with_controls(mut self, show_controls: bool) -> Self {
        self.show_controls = show_controls;
        self
    }

    pub fn with_custom_player(mut self, kind: VideoKind, embed: EmbedFn) -> Self {
        self.custom_players.register(kind, embed);
        self
    }
}

/// Title and date shown in the modal header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub published_date: Option<String>,
}

impl VideoMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.published_date.is_none()
    }
}

/// CSS classes and dimensions applied to the modal container on open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalLayout {
    pub classes: Vec<String>,
    /// Explicit width and height in pixels for custom sizes
    pub dimensions: Option<(u32, u32)>,
}

impl ModalLayout {
    pub fn for_options(options: &PlaybackOptions) -> Self {
        let mut classes = vec!["video-modal".to_string()];

        let (size_class, dimensions) = match options.modal_size {
            ModalSize::Small => ("small", None),
            ModalSize::Medium => ("medium", None),
            ModalSize::Large => ("large", None),
            ModalSize::Fullscreen => ("fullscreen", None),
            ModalSize::Custom { width, height } => ("custom", Some((width, height))),
        };
        classes.push(format!("video-modal--{}", size_class));

        classes.push(match options.theme {
            Theme::Dark => "video-modal--dark".to_string(),
            Theme::Light => "video-modal--light".to_string(),
        });
        if options.player_theme == PlayerTheme::Flat {
            classes.push("video-modal--player-flat".to_string());
        }
        if options.video_format_orientation == Orientation::Vertical {
            classes.push("video-modal--vertical".to_string());
        }

        Self {
            classes,
            dimensions,
        }
    }
}

/// Lifecycle state of the shared modal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalState {
    #[default]
    Closed,
    Opening,
    Loading,
    Playing,
    Error,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl fmt::Display for ModalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Opening => write!(f, "opening"),
            Self::Loading => write!(f, "loading"),
            Self::Playing => write!(f, "playing"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// State of a single thumbnail's hover preview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewState {
    #[default]
    Idle,
    ArmedWaiting,
    Previewing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_hints() {
        assert_eq!(VideoKind::parse(" YouTube "), Some(VideoKind::Youtube));
        assert_eq!(VideoKind::parse("file"), Some(VideoKind::Local));
        assert_eq!(VideoKind::parse("dailymotion"), None);
        assert_eq!(VideoKind::parse(""), None);
    }

    #[test]
    fn test_unknown_falls_back_to_local_mp4() {
        let source = VideoSource::unknown("https://example.com/watch").or_local_fallback();
        assert_eq!(source.kind, VideoKind::Local);
        assert_eq!(source.format.as_deref(), Some("mp4"));
        assert_eq!(source.raw_url, "https://example.com/watch");
    }

    #[test]
    fn test_modal_size_parsing() {
        assert_eq!("Large".parse::<ModalSize>(), Ok(ModalSize::Large));
        assert_eq!(
            "800x450".parse::<ModalSize>(),
            Ok(ModalSize::Custom { width: 800, height: 450 })
        );
        assert!("0x450".parse::<ModalSize>().is_err());
        assert!("huge".parse::<ModalSize>().is_err());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: PlaybackOptions =
            serde_json::from_str(r#"{"muted": true, "modalSize": "640x360", "theme": "light"}"#)
                .unwrap();
        assert!(options.muted);
        assert!(options.autoplay);
        assert_eq!(options.theme, Theme::Light);
        assert_eq!(options.modal_size, ModalSize::Custom { width: 640, height: 360 });
    }

    #[test]
    fn test_layout_classes() {
        let options = PlaybackOptions {
            modal_size: ModalSize::Custom { width: 400, height: 700 },
            player_theme: PlayerTheme::Flat,
            video_format_orientation: Orientation::Vertical,
            ..PlaybackOptions::default()
        };
        let layout = ModalLayout::for_options(&options);
        assert_eq!(layout.dimensions, Some((400, 700)));
        assert!(layout.classes.contains(&"video-modal--custom".to_string()));
        assert!(layout.classes.contains(&"video-modal--player-flat".to_string()));
        assert!(layout.classes.contains(&"video-modal--vertical".to_string()));
    }

    #[test]
    fn test_watch_url_requires_id() {
        assert_eq!(VideoSource::provider(VideoKind::Vimeo, "", "x").watch_url(), None);
        assert_eq!(
            VideoSource::provider(VideoKind::Vimeo, "76979871", "x").watch_url().as_deref(),
            Some("https://vimeo.com/76979871")
        );
    }
}
