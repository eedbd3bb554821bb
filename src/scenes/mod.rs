//! The five illustrations and a registry to look them up by id.

use std::str::FromStr;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::layer::Graphics;
use crate::render::surface::SurfaceBackend;
use crate::render::ticker::RenderLoop;
use crate::scene::definition::{SceneDefinition, SceneInfo};
use crate::scene::lifecycle::{SceneLifecycle, SceneSlot};
use crate::scene::motion::MotionPreference;

pub(crate) mod charred_office;
pub(crate) mod courtroom;
pub(crate) mod editors_desk;
pub(crate) mod intelligence_office;
pub(crate) mod standoff;

pub use charred_office::CharredOffice;
pub use courtroom::Courtroom;
pub use editors_desk::EditorsDesk;
pub use intelligence_office::IntelligenceOffice;
pub use standoff::Standoff;

/// Opaque block `(x, y, w, h, 0xRRGGBB)`.
pub(crate) type Block = (f64, f64, f64, f64, u32);

/// Append opaque blocks in order.
pub(crate) fn fill(g: &mut Graphics, blocks: &[Block]) {
    for &(x, y, w, h, hex) in blocks {
        g.rect(x, y, w, h, Rgb8::hex(hex));
    }
}

/// Every scene, identified for CLI and layout files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Editor-in-chief's desk at night.
    EditorsDesk,
    /// Seventy-one days of self-confinement, split interior/exterior.
    Standoff,
    /// Bird's-eye surveillance office.
    IntelligenceOffice,
    /// Military courtroom.
    Courtroom,
    /// The office after the fire.
    CharredOffice,
}

impl SceneKind {
    /// All scenes, in page order.
    pub const ALL: [SceneKind; 5] = [
        SceneKind::EditorsDesk,
        SceneKind::Standoff,
        SceneKind::IntelligenceOffice,
        SceneKind::Courtroom,
        SceneKind::CharredOffice,
    ];

    /// Static description.
    pub fn info(self) -> &'static SceneInfo {
        match self {
            SceneKind::EditorsDesk => &editors_desk::INFO,
            SceneKind::Standoff => &standoff::INFO,
            SceneKind::IntelligenceOffice => &intelligence_office::INFO,
            SceneKind::Courtroom => &courtroom::INFO,
            SceneKind::CharredOffice => &charred_office::INFO,
        }
    }

    /// Stable id.
    pub fn id(self) -> &'static str {
        self.info().id
    }

    /// Mount a lifecycle for this scene behind the object-safe slot interface.
    pub fn mount(
        self,
        backend: impl SurfaceBackend + 'static,
        render_loop: RenderLoop,
        motion: MotionPreference,
    ) -> Box<dyn SceneSlot> {
        fn boxed<S: SceneDefinition + 'static>(
            scene: S,
            backend: impl SurfaceBackend + 'static,
            render_loop: RenderLoop,
            motion: MotionPreference,
        ) -> Box<dyn SceneSlot> {
            Box::new(SceneLifecycle::new(scene, backend, render_loop, motion))
        }

        match self {
            SceneKind::EditorsDesk => boxed(EditorsDesk, backend, render_loop, motion),
            SceneKind::Standoff => boxed(Standoff, backend, render_loop, motion),
            SceneKind::IntelligenceOffice => {
                boxed(IntelligenceOffice, backend, render_loop, motion)
            }
            SceneKind::Courtroom => boxed(Courtroom, backend, render_loop, motion),
            SceneKind::CharredOffice => boxed(CharredOffice::new(), backend, render_loop, motion),
        }
    }
}

impl FromStr for SceneKind {
    type Err = SceneError;

    fn from_str(s: &str) -> SceneResult<Self> {
        SceneKind::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = SceneKind::ALL.iter().map(|k| k.id()).collect();
                SceneError::validation(format!(
                    "unknown scene '{s}' (expected one of: {})",
                    known.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for SceneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/registry.rs"]
mod tests;
