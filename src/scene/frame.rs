use crate::foundation::error::SceneResult;
use crate::render::raster::{FrameRGBA, upscale_nearest};
use crate::scene::definition::SceneInfo;

/// Badge shown on the frame's top border.
pub const DEFAULT_BADGE: &str = "場景重現";

/// What a scene instance contributes to its frame.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneView {
    /// Rasterized pixels at logical resolution.
    Live(FrameRGBA),
    /// The container is mounted but no surface is attached (out of view, allocating, or the
    /// backend is unavailable).
    Pending,
    /// Reduced motion: static text in a bordered placeholder, no canvas.
    Fallback {
        /// Short description shown in place of the canvas.
        text: String,
    },
}

impl SceneView {
    /// `true` for [`SceneView::Live`].
    pub fn is_live(&self) -> bool {
        matches!(self, SceneView::Live(_))
    }
}

/// Display options applied when presenting a live frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentOpts {
    /// Integer nearest-neighbour scale factor. 1 keeps logical resolution.
    pub scale: u32,
}

impl Default for PresentOpts {
    fn default() -> Self {
        Self { scale: 1 }
    }
}

impl PresentOpts {
    /// Return options with a different scale factor.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }
}

/// Border, badge and caption around one scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneFrame {
    badge: String,
    caption: String,
}

impl SceneFrame {
    /// Frame with the default badge.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            badge: DEFAULT_BADGE.to_owned(),
            caption: caption.into(),
        }
    }

    /// Frame captioned with the scene's own caption.
    pub fn for_scene(info: &SceneInfo) -> Self {
        Self::new(info.caption)
    }

    /// Replace the badge.
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = badge.into();
        self
    }

    /// Badge text.
    pub fn badge(&self) -> &str {
        &self.badge
    }

    /// Caption text.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Wrap a view. The caption is carried on every path, live or not.
    pub fn present(
        &self,
        info: &SceneInfo,
        view: SceneView,
        opts: PresentOpts,
    ) -> SceneResult<FramedScene> {
        let body = match view {
            SceneView::Live(frame) => SceneView::Live(upscale_nearest(&frame, opts.scale)?),
            other => other,
        };
        Ok(FramedScene {
            badge: self.badge.clone(),
            caption: self.caption.clone(),
            aria_label: info.aria_label.to_owned(),
            body,
        })
    }
}

/// A presented scene: chrome plus body.
#[derive(Clone, Debug, PartialEq)]
pub struct FramedScene {
    /// Badge text on the top border.
    pub badge: String,
    /// Caption under the body.
    pub caption: String,
    /// Image-role label for the body.
    pub aria_label: String,
    /// Canvas pixels, pending container, or fallback text.
    pub body: SceneView,
}

impl FramedScene {
    /// Render as a bordered plain-text block.
    ///
    /// Live bodies are summarized by their pixel size; the fallback text sits inside the
    /// inner border the way the reduced-motion figure does.
    pub fn to_text(&self) -> String {
        let inner = match &self.body {
            SceneView::Live(frame) => {
                format!("[ {}×{} ] {}", frame.width, frame.height, self.aria_label)
            }
            SceneView::Pending => format!("[ … ] {}", self.aria_label),
            SceneView::Fallback { text } => text.clone(),
        };
        let width = [
            inner.chars().count(),
            self.caption.chars().count(),
            self.badge.chars().count() + 2,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 2;

        let mut out = String::new();
        let badge = format!("─ {} ", self.badge);
        let fill = width.saturating_sub(badge.chars().count());
        out.push_str(&format!("┌{badge}{}┐\n", "─".repeat(fill)));
        out.push_str(&format!("│ {inner:<w$} │\n", w = width - 2));
        out.push_str(&format!("│ {:<w$} │\n", "", w = width - 2));
        out.push_str(&format!("│ {:<w$} │\n", self.caption, w = width - 2));
        out.push_str(&format!("└{}┘", "─".repeat(width)));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/frame.rs"]
mod tests;
