use std::task::Poll;

use crate::foundation::core::FrameCounter;
use crate::foundation::error::SceneResult;
use crate::render::layer::LayerTree;
use crate::render::raster::{FrameRGBA, rasterize, read_frame};
use crate::render::surface::{PendingSurface, Surface, SurfaceBackend, SurfaceDesc};
use crate::render::ticker::{RenderLoop, TickerToken};
use crate::scene::definition::{SceneDefinition, SceneInfo, SetupCtx};
use crate::scene::frame::SceneView;
use crate::scene::motion::MotionPreference;
use crate::scroll::tracker::ScrollProgress;

/// Lifecycle state of one scene instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum LifecycleState {
    /// No surface attached. An allocation may be in flight.
    Uninitialized,
    /// Surface attached, layer tree built, ticker registered.
    Active,
    /// Reduced motion requested: nothing is ever allocated.
    ReducedMotionFallback,
}

/// Per-instance counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LifecycleStats {
    /// Allocation requests issued.
    pub requests: u64,
    /// Successful setups (entries into Active).
    pub activations: u64,
    /// Cleanups run (exits from Active).
    pub teardowns: u64,
    /// Allocations cancelled while in flight.
    pub cancelled: u64,
    /// Surfaces that resolved after cancellation and were released unseen.
    pub discarded_surfaces: u64,
    /// Allocations that failed.
    pub alloc_failures: u64,
    /// Setups that returned an error.
    pub setup_failures: u64,
    /// Ticker invocations.
    pub ticks: u64,
}

struct Attempt {
    pending: PendingSurface,
    cancelled: bool,
}

/// Everything owned for one Active period. Dropped as a unit at teardown.
struct ActiveScene<H> {
    surface: Surface,
    tree: LayerTree,
    handles: H,
    frame: FrameCounter,
    ticker: TickerToken,
}

/// Owns lazy allocation, animation registration, and teardown for one scene instance.
///
/// Inputs arrive through [`sync`](Self::sync) (the tracker's outputs), [`poll`](Self::poll)
/// (allocation progress) and [`on_frame`](Self::on_frame) (the host's animation frame). The
/// reduced-motion preference is re-read on each of them.
pub struct SceneLifecycle<S: SceneDefinition> {
    scene: S,
    backend: Box<dyn SurfaceBackend>,
    render_loop: RenderLoop,
    motion: MotionPreference,

    state: LifecycleState,
    attempts: Vec<Attempt>,
    active: Option<ActiveScene<S::Handles>>,
    generation: u32,
    progress: f64,
    mounted: bool,
    // A failed activation is retried only after the scene leaves view and comes back.
    failed_in_view: bool,
    stats: LifecycleStats,
}

impl<S: SceneDefinition> SceneLifecycle<S> {
    /// Mount a scene. If motion is already reduced, the instance starts in the fallback
    /// state and never requests a surface until the preference clears.
    pub fn new(
        scene: S,
        backend: impl SurfaceBackend + 'static,
        render_loop: RenderLoop,
        motion: MotionPreference,
    ) -> Self {
        let state = if motion.reduced_motion() {
            LifecycleState::ReducedMotionFallback
        } else {
            LifecycleState::Uninitialized
        };
        Self {
            scene,
            backend: Box::new(backend),
            render_loop,
            motion,
            state,
            attempts: Vec::new(),
            active: None,
            generation: 0,
            progress: 0.0,
            mounted: true,
            failed_in_view: false,
            stats: LifecycleStats::default(),
        }
    }

    /// The scene definition.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Accessible description.
    pub fn info(&self) -> &SceneInfo {
        self.scene.info()
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Counters.
    pub fn stats(&self) -> LifecycleStats {
        self.stats
    }

    /// `true` while a non-cancelled allocation is in flight.
    pub fn is_allocating(&self) -> bool {
        self.attempts.iter().any(|a| !a.cancelled)
    }

    /// Allocations still in flight, cancelled ones included.
    pub fn in_flight(&self) -> usize {
        self.attempts.len()
    }

    /// Frame counter of the current Active period.
    pub fn frame_counter(&self) -> Option<FrameCounter> {
        self.active.as_ref().map(|a| a.frame)
    }

    /// Layer tree of the current Active period.
    pub fn tree(&self) -> Option<&LayerTree> {
        self.active.as_ref().map(|a| &a.tree)
    }

    /// Last progress value received.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Apply the tracker's outputs.
    ///
    /// Visibility drives activation and teardown, the preference can force the fallback, and
    /// progress is relayed to the scene only while Active.
    pub fn sync(&mut self, input: ScrollProgress) {
        if !self.mounted {
            return;
        }
        if self.apply_preference() {
            self.progress = input.progress;
            return;
        }

        if input.is_in_view {
            self.attempt_activation();
        } else {
            self.teardown("left view");
        }
        self.poll();

        if input.progress != self.progress {
            self.progress = input.progress;
            if let Some(active) = self.active.as_mut() {
                self.scene
                    .progress(&active.handles, self.progress, &mut active.tree);
            }
        }
    }

    /// Drive in-flight allocations.
    ///
    /// A surface that resolves for a cancelled attempt is released without being attached
    /// and without running setup.
    pub fn poll(&mut self) {
        if self.attempts.is_empty() {
            return;
        }
        for mut attempt in std::mem::take(&mut self.attempts) {
            match attempt.pending.poll() {
                Poll::Pending => self.attempts.push(attempt),
                Poll::Ready(Ok(surface)) if attempt.cancelled => {
                    tracing::debug!(
                        scene = self.scene.info().id,
                        surface = surface.id().0,
                        "allocation resolved after cancellation, releasing"
                    );
                    self.stats.discarded_surfaces += 1;
                    self.backend.release(surface);
                }
                Poll::Ready(Ok(surface)) => self.attach(surface),
                Poll::Ready(Err(err)) => {
                    if !attempt.cancelled {
                        self.failed_in_view = true;
                        tracing::warn!(
                            scene = self.scene.info().id,
                            error = %err,
                            "surface allocation failed, scene stays uninitialized"
                        );
                    }
                    self.stats.alloc_failures += 1;
                }
            }
        }
    }

    /// Host animation frame: advance the counter and run the ticker while Active.
    ///
    /// Returns `true` when the ticker ran.
    pub fn on_frame(&mut self) -> bool {
        if !self.mounted || self.apply_preference() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !self.render_loop.is_registered(&active.ticker) {
            return false;
        }
        active.frame = active.frame.next();
        self.scene
            .tick(&mut active.handles, active.frame, &mut active.tree);
        self.stats.ticks += 1;
        true
    }

    /// Rasterize the current tree and read it back. `None` unless Active.
    ///
    /// The preference is re-read first, so a surface the reader no longer wants is torn down
    /// instead of drawn.
    pub fn render(&mut self) -> SceneResult<Option<FrameRGBA>> {
        if self.mounted && self.apply_preference() {
            return Ok(None);
        }
        let Some(active) = self.active.as_mut() else {
            return Ok(None);
        };
        rasterize(&active.tree, &mut active.surface)?;
        Ok(Some(read_frame(&active.surface)))
    }

    /// What the host should present right now.
    pub fn view(&mut self) -> SceneResult<SceneView> {
        if self.mounted {
            self.apply_preference();
        }
        if self.state == LifecycleState::ReducedMotionFallback {
            return Ok(SceneView::Fallback {
                text: self.scene.info().fallback_text.to_owned(),
            });
        }
        Ok(match self.render()? {
            Some(frame) => SceneView::Live(frame),
            None => SceneView::Pending,
        })
    }

    /// Tear down and stop reacting to further input.
    pub fn unmount(&mut self) {
        self.teardown("unmount");
        self.drain();
        self.mounted = false;
    }

    /// Returns `true` when the fallback is in effect after applying the preference.
    fn apply_preference(&mut self) -> bool {
        let reduce = self.motion.reduced_motion();
        match (reduce, self.state) {
            (true, LifecycleState::ReducedMotionFallback) => true,
            (true, _) => {
                self.teardown("reduced motion");
                self.state = LifecycleState::ReducedMotionFallback;
                tracing::debug!(scene = self.scene.info().id, "entered reduced-motion fallback");
                true
            }
            (false, LifecycleState::ReducedMotionFallback) => {
                self.state = LifecycleState::Uninitialized;
                tracing::debug!(scene = self.scene.info().id, "left reduced-motion fallback");
                false
            }
            (false, _) => false,
        }
    }

    fn attempt_activation(&mut self) {
        if self.state != LifecycleState::Uninitialized
            || self.is_allocating()
            || self.failed_in_view
        {
            return;
        }
        self.stats.requests += 1;
        tracing::debug!(scene = self.scene.info().id, "requesting surface");
        let pending = self.backend.request(SurfaceDesc::default());
        self.attempts.push(Attempt {
            pending,
            cancelled: false,
        });
    }

    fn attach(&mut self, surface: Surface) {
        self.generation = self.generation.wrapping_add(1);
        let mut tree = LayerTree::new(self.generation);
        let ctx = SetupCtx {
            canvas: surface.canvas(),
            surface: surface.id(),
            generation: self.generation,
        };
        let handles = match self.scene.setup(&ctx, &mut tree) {
            Ok(h) => h,
            Err(err) => {
                tracing::warn!(
                    scene = self.scene.info().id,
                    error = %err,
                    "scene setup failed, releasing surface"
                );
                self.stats.setup_failures += 1;
                self.failed_in_view = true;
                self.backend.release(surface);
                return;
            }
        };
        self.scene.progress(&handles, self.progress, &mut tree);
        let ticker = self.render_loop.add(self.scene.info().id);
        tracing::debug!(
            scene = self.scene.info().id,
            surface = surface.id().0,
            ticker = ticker.id(),
            "scene active"
        );
        self.active = Some(ActiveScene {
            surface,
            tree,
            handles,
            frame: FrameCounter::default(),
            ticker,
        });
        self.state = LifecycleState::Active;
        self.stats.activations += 1;
    }

    // Hand back surfaces that already resolved for cancelled attempts. Attempts still pending
    // are dropped with the lifecycle and the backend reclaims them on resolve.
    fn drain(&mut self) {
        self.poll();
    }

    fn teardown(&mut self, reason: &'static str) {
        self.failed_in_view = false;
        for attempt in self.attempts.iter_mut().filter(|a| !a.cancelled) {
            attempt.cancelled = true;
            self.stats.cancelled += 1;
            tracing::debug!(
                scene = self.scene.info().id,
                reason,
                "cancelled in-flight allocation"
            );
        }
        if let Some(mut active) = self.active.take() {
            self.render_loop.remove(active.ticker);
            self.scene.cleanup(active.handles, &mut active.tree);
            self.backend.release(active.surface);
            self.stats.teardowns += 1;
            tracing::debug!(scene = self.scene.info().id, reason, "scene torn down");
        }
        if self.state == LifecycleState::Active {
            self.state = LifecycleState::Uninitialized;
        }
    }
}

impl<S: SceneDefinition> Drop for SceneLifecycle<S> {
    fn drop(&mut self) {
        self.teardown("dropped");
        self.drain();
    }
}

/// Object-safe view of a [`SceneLifecycle`], so a page can hold different scenes side by
/// side.
pub trait SceneSlot {
    /// Accessible description.
    fn info(&self) -> &SceneInfo;
    /// See [`SceneLifecycle::sync`].
    fn sync(&mut self, input: ScrollProgress);
    /// See [`SceneLifecycle::poll`].
    fn poll(&mut self);
    /// See [`SceneLifecycle::on_frame`].
    fn on_frame(&mut self) -> bool;
    /// See [`SceneLifecycle::view`].
    fn view(&mut self) -> SceneResult<SceneView>;
    /// See [`SceneLifecycle::unmount`].
    fn unmount(&mut self);
    /// See [`SceneLifecycle::state`].
    fn state(&self) -> LifecycleState;
    /// See [`SceneLifecycle::stats`].
    fn stats(&self) -> LifecycleStats;
    /// See [`SceneLifecycle::frame_counter`].
    fn frame_counter(&self) -> Option<FrameCounter>;
}

impl<S: SceneDefinition> SceneSlot for SceneLifecycle<S> {
    fn info(&self) -> &SceneInfo {
        SceneLifecycle::info(self)
    }

    fn sync(&mut self, input: ScrollProgress) {
        SceneLifecycle::sync(self, input);
    }

    fn poll(&mut self) {
        SceneLifecycle::poll(self);
    }

    fn on_frame(&mut self) -> bool {
        SceneLifecycle::on_frame(self)
    }

    fn view(&mut self) -> SceneResult<SceneView> {
        SceneLifecycle::view(self)
    }

    fn unmount(&mut self) {
        SceneLifecycle::unmount(self);
    }

    fn state(&self) -> LifecycleState {
        SceneLifecycle::state(self)
    }

    fn stats(&self) -> LifecycleStats {
        SceneLifecycle::stats(self)
    }

    fn frame_counter(&self) -> Option<FrameCounter> {
        SceneLifecycle::frame_counter(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/lifecycle.rs"]
mod tests;
