// Source resolution - classification, id extraction and embed building
//
// Everything in here is pure: no state, no I/O. Both the modal and the hover
// previews read from these functions.

pub mod classifier;
pub mod diagnostics;
pub mod embed;
pub mod identifier;
pub mod preview;

pub use classifier::classify;
pub use diagnostics::{diagnose_player_error, PlayerFailure};
pub use embed::{build_embed, build_embed_url};
pub use identifier::extract_id;
pub use preview::{preview_url_for, resolve_preview, PreviewTarget};

use crate::modal::models::{VideoKind, VideoSource, DEFAULT_LOCAL_FORMAT};

/// Resolve a source from element hints (`data-video-type`, `data-video-id`,
/// `data-video-url`, `data-video-format`).
///
/// An explicit type wins over classification. A missing id is extracted from
/// the URL; an explicit id wins over the extracted one.
pub fn resolve(kind_hint: &str, id: &str, url: &str, format: &str) -> VideoSource {
    let id = id.trim();
    let format = format.trim().trim_start_matches('.').to_ascii_lowercase();

    let kind = match VideoKind::parse(kind_hint) {
        Some(kind) => kind,
        None => {
            let classified = classify(url);
            return match classified.kind {
                VideoKind::Local | VideoKind::Unknown if !format.is_empty() => {
                    VideoSource::local(url.trim(), format)
                }
                kind if kind.is_iframe() && !id.is_empty() => {
                    VideoSource::provider(kind, id, classified.raw_url)
                }
                _ => classified,
            };
        }
    };

    match kind {
        VideoKind::Local => {
            let format = if format.is_empty() {
                classify(url)
                    .format
                    .unwrap_or_else(|| DEFAULT_LOCAL_FORMAT.to_string())
            } else {
                format
            };
            VideoSource::local(url.trim(), format)
        }
        kind => {
            let id = if id.is_empty() {
                extract_id(kind, url)
            } else {
                id.to_string()
            };
            VideoSource::provider(kind, id, url.trim())
        }
    }
}
