// Hover preview bindings for every thumbnail on the page

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::controller::{HoverPreview, HoverTiming, PreviewSurface};
use crate::modal::traits::DomElement;
use crate::registry::BindingRegistry;
use crate::sources::PreviewTarget;

/// Marker set on elements that already have hover handlers
pub const PREVIEW_MARKER: &str = "video-preview-bound";

pub struct PreviewRegistry {
    registry: BindingRegistry,
    timing: HoverTiming,
    previews: Mutex<HashMap<String, Arc<HoverPreview>>>,
}

impl PreviewRegistry {
    pub fn new(timing: HoverTiming) -> Self {
        Self {
            registry: BindingRegistry::new(PREVIEW_MARKER),
            timing,
            previews: Mutex::new(HashMap::new()),
        }
    }

    fn previews(&self) -> MutexGuard<'_, HashMap<String, Arc<HoverPreview>>> {
        self.previews.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Attach a preview controller to an element carrying `data-preview-url`.
    /// Returns `false` for elements without one and for elements already bound.
    pub fn bind<E>(&self, element: &Arc<E>) -> bool
    where
        E: DomElement + PreviewSurface + 'static,
    {
        let Some(target) = element
            .attribute("data-preview-url")
            .as_deref()
            .map(str::trim)
            .and_then(PreviewTarget::parse)
        else {
            return false;
        };
        if !self.registry.bind(element.as_ref()) {
            return false;
        }

        let key = element.key();
        let surface: Arc<dyn PreviewSurface> = element.clone();
        tracing::debug!(element = %key, native = target.is_native(), "hover preview bound");
        self.previews().insert(
            key.clone(),
            Arc::new(HoverPreview::new(key, target, surface, self.timing)),
        );
        true
    }

    /// Bind every eligible element; returns how many were newly bound
    pub fn scan<E>(&self, elements: &[Arc<E>]) -> usize
    where
        E: DomElement + PreviewSurface + 'static,
    {
        elements.iter().filter(|element| self.bind(element)).count()
    }

    pub fn get(&self, key: &str) -> Option<Arc<HoverPreview>> {
        self.previews().get(key).cloned()
    }

    pub fn pointer_enter(&self, key: &str) -> bool {
        match self.get(key) {
            Some(preview) => {
                preview.pointer_enter();
                true
            }
            None => false,
        }
    }

    pub fn pointer_leave(&self, key: &str) -> bool {
        match self.get(key) {
            Some(preview) => {
                preview.pointer_leave();
                true
            }
            None => false,
        }
    }

    /// Element left the page: drop its controller and any visible preview
    pub fn unbind(&self, key: &str) -> bool {
        let preview = self.previews().remove(key);
        self.registry.unbind(key);
        match preview {
            Some(preview) => {
                preview.dispose();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.previews().len()
    }

    pub fn is_empty(&self) -> bool {
        self.previews().is_empty()
    }
}

impl Default for PreviewRegistry {
    fn default() -> Self {
        Self::new(HoverTiming::default())
    }
}
