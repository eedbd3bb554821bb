use crate::foundation::core::{Canvas, FrameCounter};
use crate::foundation::error::SceneResult;
use crate::render::layer::LayerTree;
use crate::render::surface::SurfaceId;

/// Static, accessible description of a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SceneInfo {
    /// Stable identifier, used for CLI selection and ticker labels.
    pub id: &'static str,
    /// Image-role label describing the whole illustration.
    pub aria_label: &'static str,
    /// Short text shown instead of the canvas when motion is reduced.
    pub fallback_text: &'static str,
    /// Caption shown under the frame on every path.
    pub caption: &'static str,
}

/// What a scene sees while building its layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetupCtx {
    /// Logical resolution of the attached surface.
    pub canvas: Canvas,
    /// Surface the tree will be rasterized into.
    pub surface: SurfaceId,
    /// Generation of the tree being built.
    pub generation: u32,
}

/// Contract every illustration implements.
///
/// A scene owns no per-activation state itself. [`setup`](Self::setup) builds the layer tree
/// and returns `Handles`, which the lifecycle keeps for exactly one Active period and passes
/// back to the ticker, the progress callback and [`cleanup`](Self::cleanup).
pub trait SceneDefinition {
    /// Layer ids (and any fixed tables) captured during setup.
    type Handles;

    /// Accessible description.
    fn info(&self) -> &SceneInfo;

    /// Build static geometry and empty placeholders for animated or revealed content.
    /// Must not animate.
    fn setup(&self, ctx: &SetupCtx, tree: &mut LayerTree) -> SceneResult<Self::Handles>;

    /// Redraw animated layers for `frame`. Pure function of the counter; never reads progress.
    fn tick(&self, handles: &mut Self::Handles, frame: FrameCounter, tree: &mut LayerTree);

    /// Map scroll progress to layer opacities.
    fn progress(&self, handles: &Self::Handles, progress: f64, tree: &mut LayerTree);

    /// Called once when the Active period that produced `handles` ends.
    fn cleanup(&self, handles: Self::Handles, tree: &mut LayerTree) {
        let _ = (handles, tree);
    }
}
