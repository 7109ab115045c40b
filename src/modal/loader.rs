// Native player dependency loader
//
// The library loads at most once per page. Opens that arrive while a load is
// in flight wait on that same load instead of starting their own; a failed
// load is retried by the next open.

use std::sync::Arc;

use tokio::sync::OnceCell;

use super::errors::PlayerError;
use super::traits::PlayerRuntime;

pub struct DependencyLoader {
    runtime: Arc<dyn PlayerRuntime>,
    loaded: OnceCell<()>,
}

impl DependencyLoader {
    pub fn new(runtime: Arc<dyn PlayerRuntime>) -> Self {
        Self {
            runtime,
            loaded: OnceCell::new(),
        }
    }

    pub fn runtime(&self) -> &Arc<dyn PlayerRuntime> {
        &self.runtime
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Load the runtime if it has not been loaded yet
    pub async fn ensure_loaded(&self) -> Result<(), PlayerError> {
        self.loaded
            .get_or_try_init(|| async {
                tracing::debug!(runtime = self.runtime.name(), "loading player library");
                self.runtime.load().await?;
                tracing::info!(runtime = self.runtime.name(), "player library loaded");
                Ok::<(), PlayerError>(())
            })
            .await
            .map(|_| ())
    }
}
