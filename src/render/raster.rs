use kurbo::Shape;

use crate::foundation::core::{BezPath, Canvas, Point, Rgb8};
use crate::foundation::error::{SceneError, SceneResult};
use crate::render::layer::{DrawCmd, LayerId, LayerKind, LayerTree};
use crate::render::surface::Surface;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha, e.g. before writing a PNG.
    pub fn to_straight(&self) -> FrameRGBA {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }
}

/// Paint `tree` into `surface`, replacing its previous contents.
///
/// Groups with alpha below 1 are composited through an opacity layer; fully transparent
/// subtrees are skipped.
pub fn rasterize(tree: &LayerTree, surface: &mut Surface) -> SceneResult<()> {
    let canvas = surface.canvas();
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| SceneError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| SceneError::render("surface height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    draw_node(&mut ctx, tree, tree.root());
    ctx.flush();

    surface.clear();
    ctx.render_to_pixmap(surface.pixmap_mut());
    Ok(())
}

/// Copy a surface's pixels out.
pub fn read_frame(surface: &Surface) -> FrameRGBA {
    let canvas = surface.canvas();
    FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: surface.data().to_vec(),
        premultiplied: true,
    }
}

/// Scale `frame` up by an integer factor without smoothing.
///
/// This is the display path: the logical resolution stays fixed and each logical pixel
/// becomes a `factor × factor` block.
pub fn upscale_nearest(frame: &FrameRGBA, factor: u32) -> SceneResult<FrameRGBA> {
    if factor == 0 {
        return Err(SceneError::validation("scale factor must be >= 1"));
    }
    if factor == 1 {
        return Ok(frame.clone());
    }
    let out = Canvas::new(
        frame.width.saturating_mul(factor),
        frame.height.saturating_mul(factor),
    )?;
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .ok_or_else(|| SceneError::render("frame byte length does not match its size"))?;
    let scaled = image::imageops::resize(
        &img,
        out.width,
        out.height,
        image::imageops::FilterType::Nearest,
    );
    Ok(FrameRGBA {
        width: out.width,
        height: out.height,
        data: scaled.into_raw(),
        premultiplied: frame.premultiplied,
    })
}

fn draw_node(ctx: &mut vello_cpu::RenderContext, tree: &LayerTree, id: LayerId) {
    let Some(node) = tree.node(id) else {
        return;
    };
    if node.alpha <= 0.0 {
        return;
    }
    let layered = node.alpha < 1.0;
    if layered {
        ctx.push_opacity_layer(node.alpha as f32);
    }
    match &node.kind {
        LayerKind::Group(children) => {
            for &child in children {
                draw_node(ctx, tree, child);
            }
        }
        LayerKind::Graphics(g) => {
            for cmd in g.cmds() {
                draw_cmd(ctx, cmd);
            }
        }
    }
    if layered {
        ctx.pop_layer();
    }
}

fn draw_cmd(ctx: &mut vello_cpu::RenderContext, cmd: &DrawCmd) {
    match cmd {
        DrawCmd::Rect { rect, color, alpha } => {
            if *alpha <= 0.0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            ctx.set_paint(paint(*color, *alpha));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                rect.x0, rect.y0, rect.x1, rect.y1,
            ));
        }
        DrawCmd::Circle {
            center,
            radius,
            color,
            alpha,
        } => {
            if *alpha <= 0.0 || *radius <= 0.0 {
                return;
            }
            let path = kurbo::Circle::new(*center, *radius).to_path(0.1);
            ctx.set_paint(paint(*color, *alpha));
            ctx.fill_path(&bezpath_to_cpu(&path));
        }
        DrawCmd::Polygon {
            points,
            color,
            alpha,
        } => {
            if *alpha <= 0.0 || points.len() < 3 {
                return;
            }
            let mut path = BezPath::new();
            path.move_to(points[0]);
            for &p in &points[1..] {
                path.line_to(p);
            }
            path.close_path();
            ctx.set_paint(paint(*color, *alpha));
            ctx.fill_path(&bezpath_to_cpu(&path));
        }
    }
}

fn paint(color: Rgb8, alpha: f64) -> vello_cpu::peniko::Color {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
