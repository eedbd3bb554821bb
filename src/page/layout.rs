use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{SceneError, SceneResult};
use crate::scenes::SceneKind;
use crate::scroll::geometry::{ElementRect, Viewport};

/// One scene section in document coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionLayout {
    /// Which illustration the section shows.
    pub scene: SceneKind,
    /// Distance from the document top to the section's top edge.
    pub offset: f64,
    /// Section height in logical pixels.
    pub height: f64,
}

impl SectionLayout {
    /// Element rect relative to the viewport at `scroll_y`.
    pub fn rect_at(&self, scroll_y: f64) -> SceneResult<ElementRect> {
        ElementRect::new(self.offset - scroll_y, self.height)
    }
}

/// JSON-facing description of a scrolling page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageLayout {
    /// Viewport height in logical pixels.
    pub viewport_height: f64,
    /// Sections, in document order.
    pub sections: Vec<SectionLayout>,
}

impl PageLayout {
    /// Parse a layout from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<Self> {
        let layout: PageLayout = serde_json::from_reader(r)
            .map_err(|e| SceneError::serde(format!("parse page layout JSON: {e}")))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Parse a layout from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneError::validation(format!("open page layout '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Five sections 400px tall, 1200px apart, under an 800px viewport.
    pub fn demo() -> Self {
        let sections = SceneKind::ALL
            .into_iter()
            .enumerate()
            .map(|(i, scene)| SectionLayout {
                scene,
                offset: 1000.0 + i as f64 * 1200.0,
                height: 400.0,
            })
            .collect();
        Self {
            viewport_height: 800.0,
            sections,
        }
    }

    /// Check the viewport and every section rect.
    pub fn validate(&self) -> SceneResult<()> {
        self.viewport()?;
        for (i, s) in self.sections.iter().enumerate() {
            if !s.offset.is_finite() {
                return Err(SceneError::validation(format!(
                    "section {i} ({}): offset must be finite",
                    s.scene
                )));
            }
            s.rect_at(0.0).map_err(|e| {
                SceneError::validation(format!("section {i} ({}): {e}", s.scene))
            })?;
        }
        Ok(())
    }

    /// The validated viewport.
    pub fn viewport(&self) -> SceneResult<Viewport> {
        Viewport::new(self.viewport_height)
    }

    /// Scroll offset at which the last section has fully left the viewport.
    pub fn scroll_extent(&self) -> f64 {
        self.sections
            .iter()
            .map(|s| s.offset + s.height)
            .fold(0.0, f64::max)
    }
}
