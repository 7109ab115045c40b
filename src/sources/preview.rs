// Preview resolver - hover-preview URLs built on the classifier and builder
//
// `data-preview-url` is either `local:<file url>` (native muted loop) or a
// provider embed URL carrying autoplay, mute, no-controls and loop parameters.

use crate::modal::models::{EmbedTarget, PlaybackOptions, VideoKind, VideoSource};

use super::classifier::classify;
use super::embed::build_embed;

/// Prefix marking a preview that plays in a native `<video>` element
pub const LOCAL_PREVIEW_PREFIX: &str = "local:";

/// Decoded `data-preview-url`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewTarget {
    /// Muted, looping native video over the thumbnail
    Native(String),
    /// Borderless provider iframe over the thumbnail
    Iframe(String),
}

impl PreviewTarget {
    /// Parse a `data-preview-url` attribute. Blank values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        let prefix_len = LOCAL_PREVIEW_PREFIX.len();
        if value.len() >= prefix_len
            && value.is_char_boundary(prefix_len)
            && value[..prefix_len].eq_ignore_ascii_case(LOCAL_PREVIEW_PREFIX)
        {
            let url = value[prefix_len..].trim();
            return (!url.is_empty()).then(|| Self::Native(url.to_string()));
        }

        Some(Self::Iframe(value.to_string()))
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Native(url) | Self::Iframe(url) => url,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }
}

/// Build the `data-preview-url` value for a source. Provider sources without
/// an id have no preview.
pub fn preview_url_for(source: &VideoSource) -> Option<String> {
    let source = source.clone().or_local_fallback();
    match build_embed(&source, &PlaybackOptions::preview()).ok()? {
        EmbedTarget::Native(spec) => Some(format!("{}{}", LOCAL_PREVIEW_PREFIX, spec.url)),
        EmbedTarget::Iframe { src } => Some(format!("{}{}", src, loop_params(&source))),
    }
}

/// Resolve a raw URL straight to a preview target
pub fn resolve_preview(url: &str) -> Option<PreviewTarget> {
    preview_url_for(&classify(url)).and_then(|value| PreviewTarget::parse(&value))
}

fn loop_params(source: &VideoSource) -> String {
    match source.kind {
        // YouTube only loops a single video when it is also its own playlist
        VideoKind::Youtube => format!("&loop=1&playlist={}", source.id),
        VideoKind::Vimeo => "&loop=1&background=1".to_string(),
        VideoKind::Wistia => "&endVideoBehavior=loop".to_string(),
        VideoKind::Rumble | VideoKind::Muvi | VideoKind::Loom => "&loop=1".to_string(),
        VideoKind::Local | VideoKind::Unknown => String::new(),
    }
}
