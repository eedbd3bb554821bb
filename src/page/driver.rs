use crate::foundation::core::FrameCounter;
use crate::foundation::error::{SceneError, SceneResult};
use crate::page::layout::{PageLayout, SectionLayout};
use crate::render::surface::SurfaceBackend;
use crate::render::ticker::RenderLoop;
use crate::scene::frame::{FramedScene, PresentOpts, SceneFrame};
use crate::scene::lifecycle::{LifecycleState, SceneSlot};
use crate::scene::motion::MotionPreference;
use crate::scroll::element::ElementRef;
use crate::scroll::geometry::Viewport;
use crate::scroll::tracker::{ProgressTracker, TrackerOpts};

struct Section {
    layout: SectionLayout,
    element: ElementRef,
    tracker: ProgressTracker,
    slot: Box<dyn SceneSlot>,
    frame: SceneFrame,
}

/// Per-section state after a step, as printed by the `scroll` command.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionReport {
    /// Scene id.
    pub scene: &'static str,
    /// Tracker progress.
    pub progress: f64,
    /// Tracker visibility.
    pub is_in_view: bool,
    /// Lifecycle state.
    pub state: LifecycleState,
    /// Frame counter of the current Active period.
    pub frame: Option<FrameCounter>,
}

/// Whole-page state after a step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageReport {
    /// Current scroll offset.
    pub scroll_y: f64,
    /// Host frames driven so far.
    pub frames: u64,
    /// Callbacks registered on the render loop.
    pub live_tickers: usize,
    /// One entry per section, in document order.
    pub sections: Vec<SectionReport>,
}

/// A scrolling page hosting several scenes.
///
/// Drives the event order a browser would: scrolling fires intersection callbacks and the
/// scroll listener, and the next animation frame applies the coalesced progress, polls
/// allocations, and runs tickers.
pub struct ScrollPage {
    viewport: Viewport,
    scroll_y: f64,
    render_loop: RenderLoop,
    motion: MotionPreference,
    sections: Vec<Section>,
}

impl ScrollPage {
    /// Mount every section of `layout` at scroll offset 0.
    ///
    /// All sections share one backend (cloned per section), one render loop and one
    /// reduced-motion preference.
    pub fn new<B>(
        layout: &PageLayout,
        backend: B,
        render_loop: RenderLoop,
        motion: MotionPreference,
        tracker_opts: TrackerOpts,
    ) -> SceneResult<Self>
    where
        B: SurfaceBackend + Clone + 'static,
    {
        layout.validate()?;
        let sections = layout
            .sections
            .iter()
            .map(|&s| -> SceneResult<Section> {
                let element = ElementRef::new();
                element.mount(s.rect_at(0.0)?);
                Ok(Section {
                    layout: s,
                    tracker: ProgressTracker::new(element.clone(), tracker_opts),
                    element,
                    slot: s
                        .scene
                        .mount(backend.clone(), render_loop.clone(), motion.clone()),
                    frame: SceneFrame::for_scene(s.scene.info()),
                })
            })
            .collect::<SceneResult<Vec<_>>>()?;

        let mut page = Self {
            viewport: layout.viewport()?,
            scroll_y: 0.0,
            render_loop,
            motion,
            sections,
        };
        page.observe();
        Ok(page)
    }

    /// Current scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// The shared render loop.
    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    /// The shared reduced-motion preference.
    pub fn motion(&self) -> &MotionPreference {
        &self.motion
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// `true` when the page has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Scroll to `scroll_y`: move every element, fire intersection callbacks and the scroll
    /// listener. Progress itself is applied on the next [`animation_frame`](Self::animation_frame).
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn scroll_to(&mut self, scroll_y: f64) -> SceneResult<()> {
        if !scroll_y.is_finite() {
            return Err(SceneError::validation("scroll offset must be finite"));
        }
        self.scroll_y = scroll_y;
        for s in &mut self.sections {
            if s.element.is_mounted() {
                s.element.mount(s.layout.rect_at(scroll_y)?);
            }
        }
        self.observe();
        for s in &mut self.sections {
            s.tracker.on_scroll();
        }
        Ok(())
    }

    /// One host animation frame.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn animation_frame(&mut self) {
        self.render_loop.begin_frame();
        for s in &mut self.sections {
            s.tracker.on_animation_frame(self.viewport);
            s.slot.sync(s.tracker.snapshot());
            s.slot.poll();
            s.slot.on_frame();
        }
    }

    /// Change the reduced-motion preference and apply it to every scene right away.
    pub fn set_reduced_motion(&mut self, reduce: bool) -> bool {
        if !self.motion.set(reduce) {
            return false;
        }
        for s in &mut self.sections {
            s.slot.sync(s.tracker.snapshot());
        }
        true
    }

    /// Unmount one section's element. Its tracker ignores further updates.
    pub fn unmount_element(&mut self, index: usize) -> bool {
        match self.sections.get(index) {
            Some(s) => {
                s.element.unmount();
                true
            }
            None => false,
        }
    }

    /// Tear everything down: scenes, listeners, element refs.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn unmount(&mut self) {
        for s in &mut self.sections {
            s.slot.unmount();
            s.tracker.disconnect();
            s.element.unmount();
        }
    }

    /// Per-section state.
    pub fn report(&self) -> PageReport {
        PageReport {
            scroll_y: self.scroll_y,
            frames: self.render_loop.frame(),
            live_tickers: self.render_loop.live(),
            sections: self
                .sections
                .iter()
                .map(|s| SectionReport {
                    scene: s.slot.info().id,
                    progress: s.tracker.progress(),
                    is_in_view: s.tracker.is_in_view(),
                    state: s.slot.state(),
                    frame: s.slot.frame_counter(),
                })
                .collect(),
        }
    }

    /// Present section `index` inside its frame.
    pub fn present(&mut self, index: usize, opts: PresentOpts) -> SceneResult<FramedScene> {
        let s = self
            .sections
            .get_mut(index)
            .ok_or_else(|| SceneError::validation(format!("no section at index {index}")))?;
        let view = s.slot.view()?;
        s.frame.present(s.slot.info(), view, opts)
    }

    fn observe(&mut self) {
        for s in &mut self.sections {
            if s.tracker.on_intersection(self.viewport) {
                tracing::debug!(
                    scene = s.slot.info().id,
                    in_view = s.tracker.is_in_view(),
                    "visibility changed"
                );
                s.slot.sync(s.tracker.snapshot());
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/driver.rs"]
mod tests;
