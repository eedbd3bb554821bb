use crate::foundation::core::{Point, Rect, Rgb8};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::clamp01;

/// Handle to a node in one [`LayerTree`].
///
/// The generation ties the handle to the tree it came from. Handles kept past teardown
/// resolve to nothing in any later tree, so writes through them are no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId {
    index: u32,
    generation: u32,
}

/// One fill instruction. Colours are straight alpha; `alpha` is in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Axis-aligned rectangle.
    Rect {
        /// Bounds in surface pixels.
        rect: Rect,
        /// Fill colour.
        color: Rgb8,
        /// Fill alpha.
        alpha: f64,
    },
    /// Filled circle.
    Circle {
        /// Centre point.
        center: Point,
        /// Radius in pixels.
        radius: f64,
        /// Fill colour.
        color: Rgb8,
        /// Fill alpha.
        alpha: f64,
    },
    /// Closed polygon.
    Polygon {
        /// Vertices, implicitly closed.
        points: Vec<Point>,
        /// Fill colour.
        color: Rgb8,
        /// Fill alpha.
        alpha: f64,
    },
}

/// Retained draw list for a leaf layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graphics {
    cmds: Vec<DrawCmd>,
}

impl Graphics {
    /// Opaque rectangle at `(x, y)` with size `w × h`.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb8) -> &mut Self {
        self.rect_alpha(x, y, w, h, color, 1.0)
    }

    /// Rectangle with alpha.
    pub fn rect_alpha(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Rgb8,
        alpha: f64,
    ) -> &mut Self {
        self.cmds.push(DrawCmd::Rect {
            rect: Rect::new(x, y, x + w, y + h),
            color,
            alpha: clamp01(alpha),
        });
        self
    }

    /// Opaque circle.
    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb8) -> &mut Self {
        self.circle_alpha(cx, cy, radius, color, 1.0)
    }

    /// Circle with alpha.
    pub fn circle_alpha(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        color: Rgb8,
        alpha: f64,
    ) -> &mut Self {
        self.cmds.push(DrawCmd::Circle {
            center: Point::new(cx, cy),
            radius,
            color,
            alpha: clamp01(alpha),
        });
        self
    }

    /// Closed polygon through `points`.
    pub fn polygon(&mut self, points: &[(f64, f64)], color: Rgb8, alpha: f64) -> &mut Self {
        self.cmds.push(DrawCmd::Polygon {
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            color,
            alpha: clamp01(alpha),
        });
        self
    }

    /// Drop every instruction.
    pub fn clear(&mut self) -> &mut Self {
        self.cmds.clear();
        self
    }

    /// `true` when nothing will be drawn.
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Recorded instructions, in paint order.
    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }
}

/// Node payload.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerKind {
    /// Container painting its children in order.
    Group(Vec<LayerId>),
    /// Leaf with a draw list.
    Graphics(Graphics),
}

/// One named node.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerNode {
    /// Debug name, unique per tree by convention.
    pub name: String,
    /// Opacity in `[0, 1]`, applied to the whole subtree.
    pub alpha: f64,
    /// Payload.
    pub kind: LayerKind,
}

/// Arena of drawable layers, built once per Active period.
#[derive(Clone, Debug)]
pub struct LayerTree {
    generation: u32,
    nodes: Vec<LayerNode>,
}

impl LayerTree {
    /// Create a tree containing only the root group.
    pub fn new(generation: u32) -> Self {
        Self {
            generation,
            nodes: vec![LayerNode {
                name: "root".to_owned(),
                alpha: 1.0,
                kind: LayerKind::Group(Vec::new()),
            }],
        }
    }

    /// Generation stamped into every id from this tree.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// The root group.
    pub fn root(&self) -> LayerId {
        LayerId {
            index: 0,
            generation: self.generation,
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root exists for the tree's whole life.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve `id` to a node of this tree.
    pub fn node(&self, id: LayerId) -> Option<&LayerNode> {
        if id.generation != self.generation {
            return None;
        }
        self.nodes.get(id.index as usize)
    }

    fn node_mut(&mut self, id: LayerId) -> Option<&mut LayerNode> {
        if id.generation != self.generation {
            return None;
        }
        self.nodes.get_mut(id.index as usize)
    }

    /// Append an empty group under `parent`.
    pub fn add_group(&mut self, parent: LayerId, name: &str) -> SceneResult<LayerId> {
        self.push(parent, name, LayerKind::Group(Vec::new()))
    }

    /// Append an empty graphics leaf under `parent`.
    pub fn add_graphics(&mut self, parent: LayerId, name: &str) -> SceneResult<LayerId> {
        self.push(parent, name, LayerKind::Graphics(Graphics::default()))
    }

    /// Append a graphics leaf under `parent` and fill it with `draw`.
    pub fn draw(
        &mut self,
        parent: LayerId,
        name: &str,
        draw: impl FnOnce(&mut Graphics),
    ) -> SceneResult<LayerId> {
        let mut g = Graphics::default();
        draw(&mut g);
        self.push(parent, name, LayerKind::Graphics(g))
    }

    fn push(&mut self, parent: LayerId, name: &str, kind: LayerKind) -> SceneResult<LayerId> {
        let index = u32::try_from(self.nodes.len())
            .map_err(|_| SceneError::setup("layer tree exceeds u32 nodes"))?;
        let id = LayerId {
            index,
            generation: self.generation,
        };
        match self.node_mut(parent).map(|n| &mut n.kind) {
            Some(LayerKind::Group(children)) => children.push(id),
            Some(LayerKind::Graphics(_)) => {
                return Err(SceneError::setup(format!(
                    "cannot add '{name}' under a graphics layer"
                )));
            }
            None => {
                return Err(SceneError::setup(format!(
                    "parent of '{name}' is not part of this tree"
                )));
            }
        }
        self.nodes.push(LayerNode {
            name: name.to_owned(),
            alpha: 1.0,
            kind,
        });
        Ok(id)
    }

    /// Mutable draw list of a graphics leaf. `None` for stale ids and groups.
    pub fn graphics_mut(&mut self, id: LayerId) -> Option<&mut Graphics> {
        match self.node_mut(id).map(|n| &mut n.kind) {
            Some(LayerKind::Graphics(g)) => Some(g),
            _ => None,
        }
    }

    /// Draw list of a graphics leaf.
    pub fn graphics(&self, id: LayerId) -> Option<&Graphics> {
        match self.node(id).map(|n| &n.kind) {
            Some(LayerKind::Graphics(g)) => Some(g),
            _ => None,
        }
    }

    /// Set a layer's opacity. Returns `false` for stale ids.
    pub fn set_alpha(&mut self, id: LayerId, alpha: f64) -> bool {
        match self.node_mut(id) {
            Some(n) => {
                n.alpha = clamp01(alpha);
                true
            }
            None => false,
        }
    }

    /// A layer's opacity.
    pub fn alpha(&self, id: LayerId) -> Option<f64> {
        self.node(id).map(|n| n.alpha)
    }

    /// First layer named `name`.
    pub fn find(&self, name: &str) -> Option<LayerId> {
        let index = self.nodes.iter().position(|n| n.name == name)?;
        Some(LayerId {
            index: index as u32,
            generation: self.generation,
        })
    }

    /// Names of `id`'s direct children, in paint order.
    pub fn child_names(&self, id: LayerId) -> Vec<&str> {
        match self.node(id).map(|n| &n.kind) {
            Some(LayerKind::Group(children)) => children
                .iter()
                .filter_map(|&c| self.node(c))
                .map(|n| n.name.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
