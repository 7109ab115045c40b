// Provider identifier extraction
//
// One pattern per provider, each tolerant of the watch, short-link and embed
// URL shapes that provider hands out.

use regex::Regex;

use crate::modal::models::VideoKind;

lazy_static::lazy_static! {
    static ref YOUTUBE_RE: Regex = Regex::new(
        r"(?i)(?:youtube(?:-nocookie)?\.com/(?:watch\?(?:[^#]*&)?v=|embed/|v/|shorts/|live/)|youtu\.be/)([a-z0-9_-]{11})"
    ).unwrap();
    static ref VIMEO_RE: Regex = Regex::new(
        r"(?i)vimeo\.com/(?:video/|channels/[^/]+/|groups/[^/]+/videos/|album/\d+/video/|showcase/\d+/video/)?(\d+)"
    ).unwrap();
    static ref WISTIA_RE: Regex = Regex::new(
        r"(?i)(?:wistia\.(?:com|net)/(?:medias|embed/iframe|embed/medias|embed)/|wi\.st/(?:medias/)?)([a-z0-9]+)"
    ).unwrap();
    static ref RUMBLE_RE: Regex = Regex::new(
        r"(?i)rumble\.com/(?:embed/)?(v[a-z0-9]+)"
    ).unwrap();
    static ref MUVI_RE: Regex = Regex::new(
        r"(?i)muvi\.com/(?:embed/|player/|videos?/|watch/)?([a-z0-9_-]+)"
    ).unwrap();
    static ref LOOM_RE: Regex = Regex::new(
        r"(?i)loom\.com/(?:share|embed)/([a-z0-9]+)"
    ).unwrap();
}

/// Extract the provider id from a URL. Returns an empty string when the
/// pattern does not match; `Local` and `Unknown` always yield empty.
pub fn extract_id(kind: VideoKind, url: &str) -> String {
    let pattern: &Regex = match kind {
        VideoKind::Youtube => &YOUTUBE_RE,
        VideoKind::Vimeo => &VIMEO_RE,
        VideoKind::Wistia => &WISTIA_RE,
        VideoKind::Rumble => &RUMBLE_RE,
        VideoKind::Muvi => &MUVI_RE,
        VideoKind::Loom => &LOOM_RE,
        VideoKind::Local | VideoKind::Unknown => return String::new(),
    };

    pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
