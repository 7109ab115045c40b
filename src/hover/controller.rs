// Hover preview controller - one instance per thumbnail
//
// Idle -> ArmedWaiting on pointer enter, ArmedWaiting -> Previewing when the
// arm delay elapses with the pointer still over the element, back to Idle on
// pointer leave. A preview that was shown for less than the minimum visible
// time lingers until that time is up.
//
// Timers are Tokio tasks, so the pointer handlers must run inside a runtime.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::modal::models::PreviewState;
use crate::sources::PreviewTarget;

/// Element-side operations for a preview overlay
pub trait PreviewSurface: Send + Sync {
    /// Insert a muted, looping, inline `<video>` over the thumbnail
    fn mount_native(&self, url: &str);

    /// Insert a borderless iframe over the thumbnail
    fn mount_iframe(&self, src: &str);

    fn pause_native(&self);

    /// Remove the overlay element
    fn remove_preview(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTiming {
    /// Delay between pointer enter and showing the preview
    pub arm_delay: Duration,
    /// Minimum time a shown preview stays up
    pub min_visible: Duration,
}

impl Default for HoverTiming {
    fn default() -> Self {
        Self {
            arm_delay: Duration::from_millis(150),
            min_visible: Duration::from_millis(300),
        }
    }
}

#[derive(Default)]
struct HoverInner {
    state: PreviewState,
    hovered: bool,
    generation: u64,
    arm_timer: Option<JoinHandle<()>>,
    removal_timer: Option<JoinHandle<()>>,
    shown_at: Option<Instant>,
}

struct Shared {
    key: String,
    target: PreviewTarget,
    surface: Arc<dyn PreviewSurface>,
    inner: Mutex<HoverInner>,
}

impl Shared {
    fn inner(&self) -> MutexGuard<'_, HoverInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Arm timer fired
    fn show(&self, generation: u64) {
        let mut inner = self.inner();
        if inner.generation != generation {
            // Superseded; the slot may already hold a newer timer
            return;
        }
        inner.arm_timer = None;
        if !inner.hovered || inner.state != PreviewState::ArmedWaiting {
            return;
        }

        inner.state = PreviewState::Previewing;
        inner.shown_at = Some(Instant::now());
        match &self.target {
            PreviewTarget::Native(url) => self.surface.mount_native(url),
            PreviewTarget::Iframe(src) => self.surface.mount_iframe(src),
        }
        tracing::debug!(element = %self.key, "hover preview shown");
    }

    /// Delayed removal fired
    fn remove(&self, generation: u64) {
        let mut inner = self.inner();
        if inner.generation != generation {
            return;
        }
        inner.removal_timer = None;
        if inner.hovered || inner.state != PreviewState::Previewing {
            return;
        }
        self.take_down(&mut inner);
    }

    fn take_down(&self, inner: &mut HoverInner) {
        if self.target.is_native() {
            self.surface.pause_native();
        }
        self.surface.remove_preview();
        inner.state = PreviewState::Idle;
        inner.shown_at = None;
        tracing::debug!(element = %self.key, "hover preview removed");
    }
}

pub struct HoverPreview {
    timing: HoverTiming,
    shared: Arc<Shared>,
}

impl HoverPreview {
    pub fn new(
        key: impl Into<String>,
        target: PreviewTarget,
        surface: Arc<dyn PreviewSurface>,
        timing: HoverTiming,
    ) -> Self {
        Self {
            timing,
            shared: Arc::new(Shared {
                key: key.into(),
                target,
                surface,
                inner: Mutex::new(HoverInner::default()),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.shared.key
    }

    pub fn target(&self) -> &PreviewTarget {
        &self.shared.target
    }

    pub fn state(&self) -> PreviewState {
        self.shared.inner().state
    }

    /// Whether an arm or removal timer is still scheduled
    pub fn has_pending_timer(&self) -> bool {
        let inner = self.shared.inner();
        let pending = |t: &Option<JoinHandle<()>>| t.as_ref().is_some_and(|h| !h.is_finished());
        pending(&inner.arm_timer) || pending(&inner.removal_timer)
    }

    pub fn pointer_enter(&self) {
        let mut inner = self.shared.inner();
        inner.hovered = true;

        match inner.state {
            PreviewState::Previewing => {
                // Back before the lingering preview was taken down
                if let Some(timer) = inner.removal_timer.take() {
                    timer.abort();
                }
            }
            PreviewState::ArmedWaiting => {}
            PreviewState::Idle => {
                inner.generation += 1;
                inner.state = PreviewState::ArmedWaiting;

                let generation = inner.generation;
                let delay = self.timing.arm_delay;
                let shared = Arc::clone(&self.shared);
                inner.arm_timer = Some(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    shared.show(generation);
                }));
            }
        }
    }

    pub fn pointer_leave(&self) {
        let mut inner = self.shared.inner();
        inner.hovered = false;
        if let Some(timer) = inner.arm_timer.take() {
            timer.abort();
        }

        match inner.state {
            PreviewState::Idle => {}
            PreviewState::ArmedWaiting => {
                inner.generation += 1;
                inner.state = PreviewState::Idle;
            }
            PreviewState::Previewing => {
                let elapsed = inner
                    .shown_at
                    .map(|shown| shown.elapsed())
                    .unwrap_or(self.timing.min_visible);
                if elapsed >= self.timing.min_visible {
                    inner.generation += 1;
                    self.shared.take_down(&mut inner);
                } else if inner.removal_timer.is_none() {
                    inner.generation += 1;
                    let generation = inner.generation;
                    let remaining = self.timing.min_visible - elapsed;
                    let shared = Arc::clone(&self.shared);
                    inner.removal_timer = Some(tokio::spawn(async move {
                        tokio::time::sleep(remaining).await;
                        shared.remove(generation);
                    }));
                }
            }
        }
    }

    /// Tear down immediately (element removed or page navigating)
    pub fn dispose(&self) {
        let mut inner = self.shared.inner();
        inner.hovered = false;
        inner.generation += 1;
        for timer in [inner.arm_timer.take(), inner.removal_timer.take()].into_iter().flatten() {
            timer.abort();
        }
        if inner.state == PreviewState::Previewing {
            self.shared.take_down(&mut inner);
        }
        inner.state = PreviewState::Idle;
    }
}

impl Drop for HoverPreview {
    fn drop(&mut self) {
        self.dispose();
    }
}
