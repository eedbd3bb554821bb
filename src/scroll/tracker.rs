use crate::scroll::element::ElementRef;
use crate::scroll::geometry::{Viewport, intersects, scroll_progress};

/// Environment variable overriding [`TrackerOpts::margin_px`].
pub const VIEW_MARGIN_ENV: &str = "PIXELSCROLL_VIEW_MARGIN_PX";

/// Options for [`ProgressTracker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerOpts {
    /// Extra distance above and below the viewport that still counts as "in view".
    pub margin_px: f64,
}

impl Default for TrackerOpts {
    fn default() -> Self {
        Self { margin_px: 100.0 }
    }
}

impl TrackerOpts {
    /// Return options with a different intersection margin. Negative values clamp to 0.
    pub fn with_margin_px(mut self, margin_px: f64) -> Self {
        self.margin_px = if margin_px.is_finite() {
            margin_px.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Defaults, with the margin taken from `PIXELSCROLL_VIEW_MARGIN_PX` when it parses.
    pub fn from_env() -> Self {
        let margin = std::env::var(VIEW_MARGIN_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|m| m.is_finite() && *m >= 0.0);
        match margin {
            Some(m) => Self::default().with_margin_px(m),
            None => Self::default(),
        }
    }
}

/// The tracker's two outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScrollProgress {
    /// Normalized progress in `[0, 1]`.
    pub progress: f64,
    /// Coarse visibility, widened by the tracker margin.
    pub is_in_view: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScrollListener {
    Detached,
    Attached { frame_requested: bool },
}

/// Observes one element and derives `{progress, is_in_view}` from its geometry.
///
/// Event entry points mirror the browser: [`on_intersection`](Self::on_intersection) is the
/// observer callback, [`on_scroll`](Self::on_scroll) the passive scroll listener, and
/// [`on_animation_frame`](Self::on_animation_frame) the coalesced frame callback. The scroll
/// listener only exists while the element is in view.
#[derive(Debug)]
pub struct ProgressTracker {
    element: ElementRef,
    opts: TrackerOpts,
    progress: f64,
    is_in_view: bool,
    listener: ScrollListener,
}

impl ProgressTracker {
    /// Create a tracker observing `element`.
    pub fn new(element: ElementRef, opts: TrackerOpts) -> Self {
        Self {
            element,
            opts,
            progress: 0.0,
            is_in_view: false,
            listener: ScrollListener::Detached,
        }
    }

    /// The observed element reference.
    pub fn element(&self) -> &ElementRef {
        &self.element
    }

    /// Tracker options.
    pub fn opts(&self) -> TrackerOpts {
        self.opts
    }

    /// Current outputs.
    pub fn snapshot(&self) -> ScrollProgress {
        ScrollProgress {
            progress: self.progress,
            is_in_view: self.is_in_view,
        }
    }

    /// Current progress.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Current visibility.
    pub fn is_in_view(&self) -> bool {
        self.is_in_view
    }

    /// `true` while the scroll listener is attached.
    pub fn listener_attached(&self) -> bool {
        matches!(self.listener, ScrollListener::Attached { .. })
    }

    /// `true` while a coalesced frame is queued.
    pub fn frame_pending(&self) -> bool {
        matches!(
            self.listener,
            ScrollListener::Attached {
                frame_requested: true
            }
        )
    }

    /// Intersection observer callback. Returns `true` when visibility flipped.
    ///
    /// Entering view attaches the scroll listener and computes progress once; leaving view
    /// detaches it and drops any queued frame. An unmounted element is ignored.
    pub fn on_intersection(&mut self, viewport: Viewport) -> bool {
        let Some(rect) = self.element.rect() else {
            return false;
        };
        let now = intersects(rect, viewport, self.opts.margin_px);
        if now == self.is_in_view {
            return false;
        }
        self.is_in_view = now;
        if now {
            self.listener = ScrollListener::Attached {
                frame_requested: false,
            };
            tracing::trace!(top = rect.top, "scroll listener attached");
            self.update_progress(viewport);
        } else {
            self.listener = ScrollListener::Detached;
            tracing::trace!(top = rect.top, "scroll listener detached");
        }
        true
    }

    /// Passive scroll listener. Returns `true` when this event queued a new frame.
    ///
    /// Any number of scroll events between two frames collapse into one recompute.
    pub fn on_scroll(&mut self) -> bool {
        match self.listener {
            ScrollListener::Attached {
                frame_requested: false,
            } => {
                self.listener = ScrollListener::Attached {
                    frame_requested: true,
                };
                true
            }
            _ => false,
        }
    }

    /// Frame callback. Recomputes progress if a frame was queued; returns `true` when the
    /// value changed.
    pub fn on_animation_frame(&mut self, viewport: Viewport) -> bool {
        if self.listener
            != (ScrollListener::Attached {
                frame_requested: true,
            })
        {
            return false;
        }
        self.listener = ScrollListener::Attached {
            frame_requested: false,
        };
        self.update_progress(viewport)
    }

    /// Disconnect the observer and listener. The tracker reports out-of-view afterwards.
    pub fn disconnect(&mut self) {
        if self.listener_attached() {
            tracing::trace!("scroll listener detached on disconnect");
        }
        self.listener = ScrollListener::Detached;
        self.is_in_view = false;
    }

    fn update_progress(&mut self, viewport: Viewport) -> bool {
        let Some(rect) = self.element.rect() else {
            return false;
        };
        let p = scroll_progress(rect, viewport);
        let changed = p != self.progress;
        self.progress = p;
        changed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/tracker.rs"]
mod tests;
