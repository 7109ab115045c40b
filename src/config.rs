// Page configuration and per-element data-attribute overrides
//
// Merge order, highest first: element data-* attributes, options passed to
// the call, page defaults.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hover::HoverTiming;
use crate::modal::controller::OpenRequest;
use crate::modal::models::{
    CustomPlayers, ModalSize, Orientation, PlaybackOptions, PlayerTheme, Theme, VideoMetadata,
    VideoSource,
};
use crate::modal::traits::DomElement;
use crate::sources::{resolve, PreviewTarget};

/// Attributes read from click-to-open and hover-to-preview elements
pub const KNOWN_ATTRIBUTES: [&str; 14] = [
    "data-video-url",
    "data-video-type",
    "data-video-id",
    "data-video-format",
    "data-title",
    "data-published-date",
    "data-preview-url",
    "data-autoplay",
    "data-muted",
    "data-show-controls",
    "data-modal-size",
    "data-player-theme",
    "data-video-format-orientation",
    "data-require-auth",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid page configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value {value:?} for {attribute}")]
    InvalidValue { attribute: String, value: String },

    #[error("Element {element} has no video URL or id")]
    MissingSource { element: String },
}

/// Partial playback options: only the fields that are set replace the
/// layer underneath. Used for call options and element overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackOverrides {
    pub autoplay: Option<bool>,
    pub muted: Option<bool>,
    pub theme: Option<Theme>,
    pub player_theme: Option<PlayerTheme>,
    pub modal_size: Option<ModalSize>,
    pub video_format_orientation: Option<Orientation>,
    pub show_controls: Option<bool>,
    pub require_auth: Option<bool>,
    pub loading_spinner: Option<bool>,
    pub trap_focus: Option<bool>,
    #[serde(skip)]
    pub custom_players: Option<CustomPlayers>,
}

impl PlaybackOverrides {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply the set fields on top of `base`
    pub fn merge_onto(&self, base: &PlaybackOptions) -> PlaybackOptions {
        let mut options = base.clone();
        if let Some(v) = self.autoplay {
            options.autoplay = v;
        }
        if let Some(v) = self.muted {
            options.muted = v;
        }
        if let Some(v) = self.theme {
            options.theme = v;
        }
        if let Some(v) = self.player_theme {
            options.player_theme = v;
        }
        if let Some(v) = self.modal_size {
            options.modal_size = v;
        }
        if let Some(v) = self.video_format_orientation {
            options.video_format_orientation = v;
        }
        if let Some(v) = self.show_controls {
            options.show_controls = v;
        }
        if let Some(v) = self.require_auth {
            options.require_auth = v;
        }
        if let Some(v) = self.loading_spinner {
            options.loading_spinner = v;
        }
        if let Some(v) = self.trap_focus {
            options.trap_focus = v;
        }
        if let Some(players) = &self.custom_players {
            options.custom_players = players.clone();
        }
        options
    }
}

/// Page-level configuration object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// Default playback options for every modal open
    #[serde(flatten)]
    pub defaults: PlaybackOptions,

    /// Delay before a hovered thumbnail starts previewing
    pub hover_delay_ms: u64,

    /// Minimum time a preview stays visible once shown
    pub min_preview_ms: u64,

    /// Turn hover previews off entirely
    pub hover_previews: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            defaults: PlaybackOptions::default(),
            hover_delay_ms: 150,
            min_preview_ms: 300,
            hover_previews: true,
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Effective options for one open: element overrides over call options
    /// over page defaults
    pub fn options_for(
        &self,
        call: &PlaybackOverrides,
        element: Option<&ElementData>,
    ) -> Result<PlaybackOptions, ConfigError> {
        let options = call.merge_onto(&self.defaults);
        match element {
            Some(element) => element.apply_overrides(options),
            None => Ok(options),
        }
    }

    pub fn hover_timing(&self) -> HoverTiming {
        HoverTiming {
            arm_delay: Duration::from_millis(self.hover_delay_ms),
            min_visible: Duration::from_millis(self.min_preview_ms),
        }
    }
}

/// Snapshot of an element's data-* attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    attributes: BTreeMap<String, String>,
}

impl ElementData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn from_element(element: &dyn DomElement) -> Self {
        let attributes = KNOWN_ATTRIBUTES
            .iter()
            .filter_map(|name| element.attribute(name).map(|v| (name.to_string(), v)))
            .collect();
        Self { attributes }
    }

    /// Trimmed, non-empty attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Whether the element describes a click-to-open video
    pub fn has_source(&self) -> bool {
        self.get("data-video-url").is_some() || self.get("data-video-id").is_some()
    }

    pub fn source(&self) -> Option<VideoSource> {
        if !self.has_source() {
            return None;
        }
        Some(resolve(
            self.get("data-video-type").unwrap_or(""),
            self.get("data-video-id").unwrap_or(""),
            self.get("data-video-url").unwrap_or(""),
            self.get("data-video-format").unwrap_or(""),
        ))
    }

    pub fn preview_target(&self) -> Option<PreviewTarget> {
        self.get("data-preview-url").and_then(PreviewTarget::parse)
    }

    pub fn metadata(&self) -> VideoMetadata {
        VideoMetadata {
            title: self.get("data-title").map(str::to_string),
            published_date: self.get("data-published-date").map(str::to_string),
        }
    }

    /// Overrides carried by the element's data-* attributes
    pub fn overrides(&self) -> Result<PlaybackOverrides, ConfigError> {
        let mut overrides = PlaybackOverrides::default();
        if let Some(v) = self.get("data-autoplay") {
            overrides.autoplay = Some(parse_bool("data-autoplay", v)?);
        }
        if let Some(v) = self.get("data-muted") {
            overrides.muted = Some(parse_bool("data-muted", v)?);
        }
        if let Some(v) = self.get("data-show-controls") {
            overrides.show_controls = Some(parse_bool("data-show-controls", v)?);
        }
        if let Some(v) = self.get("data-require-auth") {
            overrides.require_auth = Some(parse_bool("data-require-auth", v)?);
        }
        if let Some(v) = self.get("data-modal-size") {
            overrides.modal_size = Some(
                v.parse::<ModalSize>()
                    .map_err(|_| invalid("data-modal-size", v))?,
            );
        }
        if let Some(v) = self.get("data-player-theme") {
            overrides.player_theme = Some(match v.to_ascii_lowercase().as_str() {
                "default" => PlayerTheme::Default,
                "flat" => PlayerTheme::Flat,
                _ => return Err(invalid("data-player-theme", v)),
            });
        }
        if let Some(v) = self.get("data-video-format-orientation") {
            overrides.video_format_orientation = Some(match v.to_ascii_lowercase().as_str() {
                "wide" | "horizontal" | "landscape" => Orientation::Wide,
                "vertical" | "portrait" => Orientation::Vertical,
                _ => return Err(invalid("data-video-format-orientation", v)),
            });
        }
        Ok(overrides)
    }

    /// Apply element overrides on top of `options`
    pub fn apply_overrides(&self, options: PlaybackOptions) -> Result<PlaybackOptions, ConfigError> {
        Ok(self.overrides()?.merge_onto(&options))
    }

    /// Full open request for this element, or `None` if it carries no video
    pub fn open_request(&self, options: &PlaybackOptions) -> Result<Option<OpenRequest>, ConfigError> {
        let Some(source) = self.source() else {
            return Ok(None);
        };
        let options = self.apply_overrides(options.clone())?;
        Ok(Some(
            OpenRequest::new(source)
                .with_options(options)
                .with_metadata(self.metadata()),
        ))
    }
}

fn invalid(attribute: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(attribute: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(attribute, value)),
    }
}
