use crate::foundation::core::{Canvas, FrameCounter, Rgb8};
use crate::foundation::error::SceneResult;
use crate::foundation::math::RevealWindow;
use crate::render::layer::{LayerId, LayerTree};
use crate::scene::definition::{SceneDefinition, SceneInfo, SetupCtx};
use crate::scenes::{Block, fill};

pub(crate) const INFO: SceneInfo = SceneInfo {
    id: "editors_desk",
    aria_label: "鄭南榕的編輯桌——打字機、稿件堆、角落的汽油桶，頭頂吊燈緩緩搖擺",
    fallback_text: "[ 場景：《自由時代》雜誌社總編輯室——打字機、稿件與汽油桶 ]",
    caption: "《自由時代》總編輯室：打字機、稿件，與角落裡的汽油桶",
};

/// Single-phase reveal: the whole scene, no secondary layer.
pub const SCENE_WINDOW: RevealWindow = RevealWindow::new(0.0, 0.4);

const VOID: u32 = 0x0a0f0a;
const FLOOR: u32 = 0x0d120d;
const DESK_TOP: u32 = 0x3d3229;
const DESK_LEG: u32 = 0x2a2118;
const LAMP_WIRE: Rgb8 = Rgb8::hex(0x4a4a4a);
const LAMP_SHADE: Rgb8 = Rgb8::hex(0x5a5a50);
const LAMP_BULB: Rgb8 = Rgb8::hex(0xf0e8d0);
const LIGHT_CONE: Rgb8 = Rgb8::hex(0xf0e8d0);
const TYPEWRITER_BODY: u32 = 0x2a2a2a;
const TYPEWRITER_KEYS: u32 = 0x1a1a1a;
const TYPEWRITER_PAPER: u32 = 0xe8e4db;
const TYPEWRITER_ROLLER: u32 = 0x3a3a3a;
const MANUSCRIPT_BASE: Rgb8 = Rgb8::hex(0xd4c4a0);
const MANUSCRIPT_LINE: u32 = 0x9a8f7d;
const GASOLINE_CAN: u32 = 0x4a5a3a;
const GASOLINE_CAP: u32 = 0x6a7a5a;
const GASOLINE_LABEL: u32 = 0x8a4a2a;
const CHAIR: u32 = 0x2a2218;
const GLINT: Rgb8 = Rgb8::hex(0xffffff);

const DESK: &[Block] = &[
    (100.0, 95.0, 120.0, 5.0, DESK_TOP),
    (108.0, 100.0, 4.0, 30.0, DESK_LEG),
    (210.0, 100.0, 4.0, 30.0, DESK_LEG),
    (112.0, 118.0, 98.0, 2.0, DESK_LEG),
];

const TYPEWRITER: &[Block] = &[
    (140.0, 82.0, 40.0, 13.0, TYPEWRITER_BODY),
    (145.0, 74.0, 30.0, 8.0, TYPEWRITER_ROLLER),
    (152.0, 62.0, 16.0, 16.0, TYPEWRITER_PAPER),
    (154.0, 65.0, 12.0, 1.0, MANUSCRIPT_LINE),
    (154.0, 68.0, 10.0, 1.0, MANUSCRIPT_LINE),
    (154.0, 71.0, 8.0, 1.0, MANUSCRIPT_LINE),
    (143.0, 88.0, 34.0, 2.0, TYPEWRITER_KEYS),
    (144.0, 91.0, 32.0, 2.0, TYPEWRITER_KEYS),
];

const MANUSCRIPT_LINES: &[Block] = &[
    (111.0, 83.0, 16.0, 1.0, MANUSCRIPT_LINE),
    (111.0, 85.0, 14.0, 1.0, MANUSCRIPT_LINE),
    (111.0, 87.0, 12.0, 1.0, MANUSCRIPT_LINE),
];

const CHAIR_PARTS: &[Block] = &[
    (148.0, 100.0, 24.0, 3.0, CHAIR),
    (150.0, 103.0, 2.0, 14.0, CHAIR),
    (170.0, 103.0, 2.0, 14.0, CHAIR),
    (168.0, 82.0, 3.0, 20.0, CHAIR),
];

const GASOLINE: &[Block] = &[
    (224.0, 108.0, 16.0, 22.0, GASOLINE_CAN),
    (228.0, 104.0, 8.0, 4.0, GASOLINE_CAP),
    (230.0, 100.0, 4.0, 4.0, GASOLINE_CAP),
    (226.0, 114.0, 12.0, 6.0, GASOLINE_LABEL),
];

/// The editor-in-chief's desk under a swaying lamp.
#[derive(Clone, Copy, Debug, Default)]
pub struct EditorsDesk;

/// Layers kept for one Active period.
#[derive(Debug)]
pub struct EditorsDeskHandles {
    scene: LayerId,
    light_cone: LayerId,
    glint: LayerId,
    lamp: LayerId,
}

/// Horizontal lamp offset at frame `t`.
pub fn lamp_sway(frame: FrameCounter) -> f64 {
    (frame.t() * 0.012).sin() * 1.5
}

impl SceneDefinition for EditorsDesk {
    type Handles = EditorsDeskHandles;

    fn info(&self) -> &SceneInfo {
        &INFO
    }

    fn setup(&self, ctx: &SetupCtx, tree: &mut LayerTree) -> SceneResult<EditorsDeskHandles> {
        let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
        let scene = tree.add_group(tree.root(), "scene")?;

        tree.draw(scene, "background", |g| {
            g.rect(0.0, 0.0, w, h, Rgb8::hex(VOID));
        })?;
        tree.draw(scene, "floor", |g| {
            g.rect(0.0, 130.0, w, 50.0, Rgb8::hex(FLOOR));
        })?;
        let light_cone = tree.add_graphics(scene, "light_cone")?;
        tree.draw(scene, "desk", |g| fill(g, DESK))?;
        tree.draw(scene, "typewriter", |g| fill(g, TYPEWRITER))?;
        tree.draw(scene, "manuscripts", |g| {
            g.rect(108.0, 88.0, 24.0, 2.0, MANUSCRIPT_BASE)
                .rect_alpha(109.0, 86.0, 24.0, 2.0, MANUSCRIPT_BASE, 0.9)
                .rect_alpha(110.0, 84.0, 24.0, 2.0, MANUSCRIPT_BASE, 0.8)
                .rect_alpha(109.0, 82.0, 24.0, 2.0, MANUSCRIPT_BASE, 0.7);
            fill(g, MANUSCRIPT_LINES);
        })?;
        tree.draw(scene, "chair", |g| fill(g, CHAIR_PARTS))?;
        tree.draw(scene, "gasoline", |g| fill(g, GASOLINE))?;
        let glint = tree.add_graphics(scene, "gasoline_glint")?;
        let lamp = tree.add_graphics(scene, "lamp")?;

        Ok(EditorsDeskHandles {
            scene,
            light_cone,
            glint,
            lamp,
        })
    }

    fn tick(&self, handles: &mut EditorsDeskHandles, frame: FrameCounter, tree: &mut LayerTree) {
        let t = frame.t();
        let x = 160.0 + lamp_sway(frame);
        let bottom = Canvas::BASE.h();

        if let Some(g) = tree.graphics_mut(handles.lamp) {
            g.clear()
                .rect(x, 0.0, 1.0, 24.0, LAMP_WIRE)
                .polygon(
                    &[(x - 10.0, 24.0), (x + 11.0, 24.0), (x + 7.0, 32.0), (x - 6.0, 32.0)],
                    LAMP_SHADE,
                    1.0,
                )
                .rect(x - 1.0, 32.0, 3.0, 3.0, LAMP_BULB);
        }

        if let Some(g) = tree.graphics_mut(handles.light_cone) {
            g.clear()
                .polygon(
                    &[
                        (x - 8.0, 35.0),
                        (x + 9.0, 35.0),
                        (x + 55.0, bottom),
                        (x - 54.0, bottom),
                    ],
                    LIGHT_CONE,
                    0.04,
                )
                .polygon(
                    &[
                        (x - 4.0, 35.0),
                        (x + 5.0, 35.0),
                        (x + 35.0, bottom),
                        (x - 34.0, bottom),
                    ],
                    LIGHT_CONE,
                    0.03,
                );
        }

        if let Some(g) = tree.graphics_mut(handles.glint) {
            g.clear();
            let glint = (t * 0.02).sin() * 0.5 + 0.5;
            if glint > 0.7 {
                g.rect_alpha(225.0, 109.0, 1.0, 8.0, GLINT, (glint - 0.7) * 0.3);
            }
        }
    }

    fn progress(&self, handles: &EditorsDeskHandles, progress: f64, tree: &mut LayerTree) {
        tree.set_alpha(handles.scene, SCENE_WINDOW.alpha(progress));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/editors_desk.rs"]
mod tests;
