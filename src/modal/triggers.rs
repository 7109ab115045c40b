// Click-to-open bindings for thumbnails carrying data-video-* attributes

use std::sync::Arc;

use super::controller::ModalController;
use super::models::{ModalState, PlaybackOptions};
use super::traits::DomElement;
use crate::config::{ConfigError, ElementData, PlaybackOverrides};
use crate::registry::BindingRegistry;

/// Marker set on elements that already open the modal on click
pub const TRIGGER_MARKER: &str = "video-modal-bound";

pub struct ModalTriggers {
    controller: Arc<ModalController>,
    registry: BindingRegistry,
    defaults: PlaybackOptions,
}

impl ModalTriggers {
    pub fn new(controller: Arc<ModalController>, defaults: PlaybackOptions) -> Self {
        Self {
            controller,
            registry: BindingRegistry::new(TRIGGER_MARKER),
            defaults,
        }
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    /// Bind one element. Elements without a video source are skipped.
    pub fn bind(&self, element: &dyn DomElement) -> bool {
        if !ElementData::from_element(element).has_source() {
            return false;
        }
        self.registry.bind(element)
    }

    /// Bind every qualifying element not bound yet. Returns how many were new.
    pub fn scan(&self, elements: &[Arc<dyn DomElement>]) -> usize {
        let bound = elements.iter().filter(|e| self.bind(e.as_ref())).count();
        if bound > 0 {
            tracing::debug!(bound, total = self.registry.len(), "bound video triggers");
        }
        bound
    }

    /// Handle a click on a bound element
    pub async fn click(&self, element: &dyn DomElement) -> Result<ModalState, ConfigError> {
        self.click_with(element, &PlaybackOverrides::default()).await
    }

    /// Click with call options layered between the page defaults and the
    /// element's own data-* overrides
    pub async fn click_with(
        &self,
        element: &dyn DomElement,
        call: &PlaybackOverrides,
    ) -> Result<ModalState, ConfigError> {
        if !self.registry.is_bound(&element.key()) {
            return Ok(self.controller.state());
        }
        let options = call.merge_onto(&self.defaults);
        self.controller.open_element(element, &options).await
    }
}
