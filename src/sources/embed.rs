// Embed URL builder - VideoSource + PlaybackOptions to a playable target
//
// Each provider has a fixed URL template. Output depends only on the inputs,
// so the same (source, options) pair always yields the same string.

use url::form_urlencoded::byte_serialize;

use crate::modal::errors::ModalError;
use crate::modal::models::{
    EmbedTarget, LocalPlaybackSpec, PlaybackOptions, VideoKind, VideoSource, DEFAULT_LOCAL_FORMAT,
};

/// Build the embeddable target for a source.
///
/// Iframe kinds without an id fail with `MissingIdentifier`. `Unknown` is
/// played as a local mp4.
pub fn build_embed(source: &VideoSource, options: &PlaybackOptions) -> Result<EmbedTarget, ModalError> {
    if let Some(embed) = options.custom_players.get(source.kind) {
        return Ok(EmbedTarget::Iframe {
            src: embed(source, options),
        });
    }

    match source.kind {
        VideoKind::Local | VideoKind::Unknown => Ok(EmbedTarget::Native(LocalPlaybackSpec {
            url: source.raw_url.clone(),
            format: source
                .format
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCAL_FORMAT.to_string()),
        })),
        kind => {
            let id = source.id.trim();
            if id.is_empty() {
                return Err(ModalError::MissingIdentifier { kind });
            }
            Ok(EmbedTarget::Iframe {
                src: provider_embed_url(kind, &encode_id(id), options),
            })
        }
    }
}

/// Build the iframe `src` only; local sources yield `None`
pub fn build_embed_url(source: &VideoSource, options: &PlaybackOptions) -> Result<Option<String>, ModalError> {
    Ok(match build_embed(source, options)? {
        EmbedTarget::Iframe { src } => Some(src),
        EmbedTarget::Native(_) => None,
    })
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

fn encode_id(id: &str) -> String {
    byte_serialize(id.as_bytes()).collect()
}

fn provider_embed_url(kind: VideoKind, id: &str, options: &PlaybackOptions) -> String {
    let autoplay = options.autoplay;
    let muted = options.muted;
    let controls = options.show_controls;

    match kind {
        VideoKind::Youtube => format!(
            "https://www.youtube.com/embed/{}?autoplay={}&controls={}&mute={}&rel=0&modestbranding=1&playsinline=1",
            id,
            flag(autoplay),
            flag(controls),
            flag(muted)
        ),
        VideoKind::Vimeo => format!(
            "https://player.vimeo.com/video/{}?autoplay={}&muted={}&controls={}&title=0&byline=0&portrait=0",
            id,
            flag(autoplay),
            flag(muted),
            flag(controls)
        ),
        VideoKind::Wistia => format!(
            "https://fast.wistia.net/embed/iframe/{}?autoPlay={}&muted={}&playbar={}&controlsVisibleOnLoad={}&videoFoam=true",
            id, autoplay, muted, controls, controls
        ),
        VideoKind::Rumble => format!(
            "https://rumble.com/embed/{}/?pub=4&autoplay={}&muted={}&controls={}",
            id,
            if autoplay { 2 } else { 0 },
            flag(muted),
            flag(controls)
        ),
        VideoKind::Muvi => format!(
            "https://embed.muvi.com/embed/{}?autoplay={}&muted={}&controls={}",
            id, autoplay, muted, controls
        ),
        VideoKind::Loom => format!(
            "https://www.loom.com/embed/{}?autoplay={}&muted={}&hide_owner=true&hide_share=true&hide_title=true&hideEmbedTopBar={}",
            id, autoplay, muted, !controls
        ),
        VideoKind::Local | VideoKind::Unknown => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::classify;
    use std::sync::Arc;

    #[test]
    fn test_youtube_autoplay_unmuted() {
        let source = classify("https://www.youtube.com/watch?v=abc12345678");
        let options = PlaybackOptions::default().with_autoplay(true).with_muted(false);
        let src = build_embed_url(&source, &options).unwrap().unwrap();
        assert!(src.starts_with("https://www.youtube.com/embed/abc12345678?"));
        let autoplay = src.find("autoplay=1").unwrap();
        let mute = src.find("mute=0").unwrap();
        assert!(autoplay < mute);
    }

    #[test]
    fn test_every_provider_builds() {
        for kind in VideoKind::PROVIDERS {
            let source = VideoSource::provider(kind, "abc123", "");
            let target = build_embed(&source, &PlaybackOptions::default()).unwrap();
            match target {
                EmbedTarget::Iframe { src } => assert!(src.contains("abc123"), "{}", src),
                EmbedTarget::Native(_) => panic!("{} should be an iframe", kind),
            }
        }
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let source = VideoSource::provider(VideoKind::Vimeo, "", "https://vimeo.com/");
        assert_eq!(
            build_embed(&source, &PlaybackOptions::default()),
            Err(ModalError::MissingIdentifier {
                kind: VideoKind::Vimeo
            })
        );
    }

    #[test]
    fn test_local_spec() {
        let source = classify("https://cdn.example.com/uploads/video123.webm");
        let target = build_embed(&source, &PlaybackOptions::default()).unwrap();
        assert_eq!(
            target,
            EmbedTarget::Native(LocalPlaybackSpec {
                url: "https://cdn.example.com/uploads/video123.webm".to_string(),
                format: "webm".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_plays_as_mp4() {
        let source = VideoSource::unknown("https://example.com/page");
        match build_embed(&source, &PlaybackOptions::default()).unwrap() {
            EmbedTarget::Native(spec) => assert_eq!(spec.format, "mp4"),
            other => panic!("unexpected target {:?}", other),
        }
    }

    #[test]
    fn test_deterministic() {
        let source = classify("https://www.loom.com/share/0281766fa2d04bb788eaf19e65135184");
        let options = PlaybackOptions::default().with_controls(false);
        assert_eq!(build_embed(&source, &options), build_embed(&source, &options));
    }

    #[test]
    fn test_untrusted_id_is_encoded() {
        let source = VideoSource::provider(VideoKind::Vimeo, "12\"><script>", "");
        let src = build_embed_url(&source, &PlaybackOptions::default()).unwrap().unwrap();
        assert!(!src.contains('<'));
        assert!(!src.contains('"'));
    }

    #[test]
    fn test_custom_player_takes_precedence() {
        let options = PlaybackOptions::default().with_custom_player(
            VideoKind::Rumble,
            Arc::new(|source: &VideoSource, _: &PlaybackOptions| format!("https://player.example.com/{}", source.id)),
        );
        let source = VideoSource::provider(VideoKind::Rumble, "v4abcd", "");
        assert_eq!(
            build_embed_url(&source, &options).unwrap().as_deref(),
            Some("https://player.example.com/v4abcd")
        );
    }
}
