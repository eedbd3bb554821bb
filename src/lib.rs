//! Pixelscroll renders small fixed-resolution pixel scenes whose animation and reveal follow
//! how far their page section has scrolled through the viewport.
//!
//! The moving parts:
//!
//! - A [`ProgressTracker`] turns element geometry into `{progress, is_in_view}`
//! - A [`SceneLifecycle`] allocates a [`Surface`] lazily while in view, runs the scene's
//!   ticker off a [`RenderLoop`], and tears everything down when the scene leaves view or
//!   reduced motion is requested
//! - Five [`SceneDefinition`]s build and animate their [`LayerTree`]s
//! - A [`SceneFrame`] wraps whatever the lifecycle produced with a badge and caption
//!
//! [`ScrollPage`] wires several of these to one viewport for hosts and the preview binary.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod page;
pub(crate) mod render;
pub(crate) mod scene;
/// The five illustrations.
pub mod scenes;
pub(crate) mod scroll;

pub use crate::foundation::core::{BezPath, Canvas, FrameCounter, Point, Rect, Rgb8, Rgba8Premul};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::foundation::math::{RevealWindow, clamp01};

pub use crate::page::driver::{PageReport, ScrollPage, SectionReport};
pub use crate::page::layout::{PageLayout, SectionLayout};
pub use crate::render::layer::{DrawCmd, Graphics, LayerId, LayerKind, LayerNode, LayerTree};
pub use crate::render::raster::{FrameRGBA, rasterize, read_frame, upscale_nearest};
pub use crate::render::surface::{
    CpuSurfaceBackend, DeferredSurfaceBackend, PendingSurface, Surface, SurfaceBackend,
    SurfaceDesc, SurfaceId, SurfaceStats,
};
pub use crate::render::ticker::{RenderLoop, TickerToken};
pub use crate::scene::definition::{SceneDefinition, SceneInfo, SetupCtx};
pub use crate::scene::frame::{DEFAULT_BADGE, FramedScene, PresentOpts, SceneFrame, SceneView};
pub use crate::scene::lifecycle::{LifecycleState, LifecycleStats, SceneLifecycle, SceneSlot};
pub use crate::scene::motion::{MotionPreference, REDUCED_MOTION_ENV, REDUCED_MOTION_QUERY};
pub use crate::scenes::SceneKind;
pub use crate::scroll::element::ElementRef;
pub use crate::scroll::geometry::{ElementRect, Viewport, intersects, scroll_progress};
pub use crate::scroll::tracker::{ProgressTracker, ScrollProgress, TrackerOpts, VIEW_MARGIN_ENV};
