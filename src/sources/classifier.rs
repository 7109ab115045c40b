// Source classification - raw URL to VideoSource
//
// Order of checks:
// 1. Provider host substrings (first match wins)
// 2. File extension of the URL path
// 3. Hosting-infrastructure markers: re-derive the filename, then default to mp4
// 4. Otherwise Unknown

use url::Url;

use super::identifier::extract_id;
use crate::modal::models::{VideoKind, VideoSource, DEFAULT_LOCAL_FORMAT};

/// Host substrings per provider, in priority order
const PROVIDER_MARKERS: [(VideoKind, &[&str]); 6] = [
    (VideoKind::Youtube, &["youtube.com", "youtu.be", "youtube-nocookie.com"]),
    (VideoKind::Vimeo, &["vimeo.com"]),
    (VideoKind::Wistia, &["wistia.com", "wistia.net", "wi.st"]),
    (VideoKind::Rumble, &["rumble.com"]),
    (VideoKind::Muvi, &["muvi.com"]),
    (VideoKind::Loom, &["loom.com"]),
];

/// Extensions the native player accepts
pub const LOCAL_EXTENSIONS: [&str; 7] = ["mp4", "webm", "ogg", "mov", "avi", "m4v", "mkv"];

/// Upload paths and storage domains that only ever serve media files
const HOSTING_MARKERS: [&str; 10] = [
    "/uploads/",
    "/wp-content/",
    "/storage/",
    "/media/",
    "amazonaws.com",
    "cloudfront.net",
    "storage.googleapis.com",
    "blob.core.windows.net",
    "digitaloceanspaces.com",
    "b-cdn.net",
];

/// Classify an arbitrary string. Never fails; malformed input yields `Unknown`.
pub fn classify(url: &str) -> VideoSource {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return VideoSource::unknown(url);
    }

    let lower = trimmed.to_lowercase();

    if let Some(kind) = provider_for(&lower) {
        let id = extract_id(kind, trimmed);
        if id.is_empty() {
            tracing::debug!(%kind, url = trimmed, "provider matched but no id found");
        }
        return VideoSource::provider(kind, id, trimmed);
    }

    let parsed = Url::parse(trimmed).ok();
    let path = match &parsed {
        Some(u) => u.path().to_string(),
        None => strip_query(trimmed).to_string(),
    };

    if let Some(ext) = extension_of(last_segment(&path)) {
        return VideoSource::local(trimmed, ext);
    }

    if HOSTING_MARKERS.iter().any(|m| lower.contains(m)) {
        let format = rederive_extension(parsed.as_ref(), &path)
            .unwrap_or_else(|| DEFAULT_LOCAL_FORMAT.to_string());
        return VideoSource::local(trimmed, format);
    }

    VideoSource::unknown(trimmed)
}

/// First provider whose host marker occurs in the lowercased URL
fn provider_for(lower: &str) -> Option<VideoKind> {
    PROVIDER_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| lower.contains(m)))
        .map(|(kind, _)| *kind)
}

fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Lowercased extension of a filename if it is a playable video extension
fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    LOCAL_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Second look for hosted files: the last non-empty path segment (tolerates a
/// trailing slash or `;` parameters) and filename-bearing query values such as
/// `?file=clip.webm` on signed storage URLs.
fn rederive_extension(parsed: Option<&Url>, path: &str) -> Option<String> {
    let segment = path
        .split('/')
        .rev()
        .find(|s| !s.is_empty())
        .map(|s| s.split(';').next().unwrap_or(s));
    if let Some(ext) = segment.and_then(extension_of) {
        return Some(ext);
    }

    parsed?
        .query_pairs()
        .find_map(|(_, value)| extension_of(last_segment(&value)))
}
