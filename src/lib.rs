// Video source resolution and playback-modal engine
//
// `sources` is pure (classification, id extraction, embed URLs). `modal` and
// `hover` hold the stateful controllers; the page is reached through the
// traits in `modal::traits` and `hover::PreviewSurface`.

pub mod config;
pub mod hover;
pub mod modal;
pub mod registry;
pub mod sources;

use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;

pub use config::{ConfigError, ElementData, PageConfig, PlaybackOverrides};
pub use hover::{HoverPreview, HoverTiming, PreviewRegistry, PreviewSurface};
pub use modal::{
    ModalController, ModalError, ModalState, ModalTriggers, OpenRequest, PlaybackOptions,
    VideoKind, VideoSource,
};
pub use sources::{build_embed, build_embed_url, preview_url_for, resolve};

/// Controller behind the page-level entry points, with the page's defaults
#[derive(Clone)]
struct Installed {
    controller: Arc<ModalController>,
    page: PageConfig,
}

lazy_static! {
    static ref GLOBAL_MODAL: RwLock<Option<Installed>> = RwLock::new(None);
}

/// Install the controller used by [`open`] and [`close`] with default page
/// configuration. Replaces (and closes) any previously installed one.
pub fn install(controller: Arc<ModalController>) {
    install_with_config(controller, PageConfig::default());
}

/// Install a controller together with the page configuration whose
/// defaults sit underneath every [`open`] call's options
pub fn install_with_config(controller: Arc<ModalController>, page: PageConfig) {
    let previous = GLOBAL_MODAL
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .replace(Installed { controller, page });
    if let Some(previous) = previous {
        previous.controller.close();
    }
}

/// Remove the installed controller, closing it first
pub fn uninstall() -> bool {
    let previous = GLOBAL_MODAL.write().unwrap_or_else(|e| e.into_inner()).take();
    match previous {
        Some(installed) => {
            installed.controller.close();
            true
        }
        None => false,
    }
}

fn installed() -> Option<Installed> {
    GLOBAL_MODAL.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Classify a URL into a provider and id
pub fn classify(url: &str) -> VideoSource {
    sources::classify(url)
}

/// Programmatic open: `kind` and `id` may be empty, in which case they are
/// derived from `url`. Fields set in `options` override the page defaults.
pub async fn open(
    kind: &str,
    id: &str,
    url: &str,
    format: &str,
    options: PlaybackOverrides,
) -> Result<ModalState, ModalError> {
    let installed = installed().ok_or(ModalError::NotInstalled)?;
    let source = resolve(kind, id, url, format);
    let options = options.merge_onto(&installed.page.defaults);
    Ok(installed
        .controller
        .open(OpenRequest::new(source).with_options(options))
        .await)
}

/// Programmatic close. Returns `false` when nothing was open or no
/// controller is installed.
pub fn close() -> bool {
    installed().is_some_and(|installed| installed.controller.close())
}
