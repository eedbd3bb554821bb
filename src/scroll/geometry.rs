use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::clamp01;

/// Vertical placement of a block element, relative to the viewport's top edge.
///
/// `top` is negative once the element has scrolled above the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementRect {
    /// Distance from the viewport top to the element's top edge.
    pub top: f64,
    /// Element height in logical pixels.
    pub height: f64,
}

impl ElementRect {
    /// Create a rect. Height must be finite and non-negative.
    pub fn new(top: f64, height: f64) -> SceneResult<Self> {
        if !top.is_finite() {
            return Err(SceneError::validation("element top must be finite"));
        }
        if !height.is_finite() || height < 0.0 {
            return Err(SceneError::validation(
                "element height must be finite and >= 0",
            ));
        }
        Ok(Self { top, height })
    }

    /// Position of the bottom edge.
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// The visible window of the page.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport height in logical pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a viewport with a positive, finite height.
    pub fn new(height: f64) -> SceneResult<Self> {
        if !height.is_finite() || height <= 0.0 {
            return Err(SceneError::validation("viewport height must be > 0"));
        }
        Ok(Self { height })
    }
}

/// Normalized scroll progress of `rect` through `viewport`.
///
/// 0 when the element's top sits on the viewport's bottom edge, 1 when its bottom edge has
/// passed the viewport's top edge. The travel distance is `viewport + element height`.
pub fn scroll_progress(rect: ElementRect, viewport: Viewport) -> f64 {
    let total_travel = viewport.height + rect.height;
    if total_travel <= 0.0 {
        return 0.0;
    }
    let traveled = viewport.height - rect.top;
    clamp01(traveled / total_travel)
}

/// Intersection test with threshold 0 and a root margin of `margin` on the top and bottom.
///
/// Edges that merely touch the expanded root do not count, matching how intersection
/// observers report `isIntersecting` for zero-area overlaps on non-empty targets.
pub fn intersects(rect: ElementRect, viewport: Viewport, margin: f64) -> bool {
    let root_top = -margin;
    let root_bottom = viewport.height + margin;
    rect.top < root_bottom && rect.bottom() > root_top
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/geometry.rs"]
mod tests;
