use crate::foundation::core::{FrameCounter, Rgb8};
use crate::foundation::error::SceneResult;
use crate::foundation::math::RevealWindow;
use crate::render::layer::{LayerId, LayerTree};
use crate::scene::definition::{SceneDefinition, SceneInfo, SetupCtx};
use crate::scenes::{Block, fill};

pub(crate) const INFO: SceneInfo = SceneInfo {
    id: "standoff",
    aria_label: "對峙場景——左側辦公室內鄭南榕伏案寫作，暖色燈光；右側警方包圍建築，警車閃燈",
    fallback_text: "[ 場景：1989年1月27日至4月7日——71天的自囚與包圍 ]",
    caption: "1989年1月27日至4月7日——71天的自囚與包圍",
};

/// Whole scene fades in first.
pub const SCENE_WINDOW: RevealWindow = RevealWindow::new(0.0, 0.3);
/// Then the police outside.
pub const EXTERIOR_WINDOW: RevealWindow = RevealWindow::new(0.3, 0.7);

/// Frames each police light colour stays on.
pub const LIGHT_PERIOD: u64 = 15;

const INTERIOR_BG: u32 = 0x1a1608;
const INTERIOR_WALL: u32 = 0x2a2418;
const DESK: u32 = 0x3d3229;
const LAMP_WARM: Rgb8 = Rgb8::hex(0xf0d890);
const PAPER: u32 = 0xe8e4db;
const TEXT_LINE: u32 = 0x9a8f7d;
const FIGURE_HAIR: u32 = 0x1c1814;
const FIGURE_SKIN: u32 = 0xc9a882;
const FIGURE_SHIRT: u32 = 0xd4d0c8;
const GLASSES: u32 = 0x332b25;
const SHELF: u32 = 0x3a3020;
const BOOK_1: u32 = 0x5a3a2a;
const BOOK_2: u32 = 0x4a5a3a;
const BOOK_3: u32 = 0x3a3a5a;
const LAMP_METAL: u32 = 0x5a5a50;
const INTERIOR_FLOOR: u32 = 0x0d0d08;

const EXTERIOR_BG: u32 = 0x0a0e14;
const BUILDING: u32 = 0x1a1a20;
const BUILDING_WINDOW: u32 = 0x0a0a10;
const POLICE_BLUE: u32 = 0x1a2a4a;
const POLICE_UNIFORM: u32 = 0x2a3a5a;
const POLICE_SKIN: u32 = 0xc9a882;
const POLICE_HELMET: u32 = 0x3a3a4a;
const POLICE_LIGHT_RED: Rgb8 = Rgb8::hex(0xcc2222);
const POLICE_LIGHT_BLUE: Rgb8 = Rgb8::hex(0x2244cc);
const STREET: u32 = 0x1a1a1a;
const BARRICADE: u32 = 0x5a5a50;
const WHEEL: Rgb8 = Rgb8::hex(0x1a1a1a);

const DIVIDER: u32 = 0x0a0a0a;
const WINDOW_GLASS: u32 = 0x1a2a3a;
const WINDOW_FRAME: u32 = 0x3a3a3a;

const BOOKSHELF: &[Block] = &[
    (8.0, 30.0, 40.0, 4.0, SHELF),
    (8.0, 55.0, 40.0, 4.0, SHELF),
    (8.0, 80.0, 40.0, 4.0, SHELF),
    (10.0, 20.0, 6.0, 10.0, BOOK_1),
    (17.0, 22.0, 5.0, 8.0, BOOK_2),
    (23.0, 18.0, 7.0, 12.0, BOOK_3),
    (31.0, 21.0, 5.0, 9.0, BOOK_1),
    (37.0, 19.0, 6.0, 11.0, BOOK_2),
    (10.0, 35.0, 7.0, 16.0, BOOK_3),
    (18.0, 38.0, 5.0, 13.0, BOOK_1),
    (24.0, 36.0, 6.0, 15.0, BOOK_2),
    (31.0, 40.0, 8.0, 11.0, BOOK_3),
];

const WRITING_DESK: &[Block] = &[
    (60.0, 100.0, 80.0, 5.0, DESK),
    (68.0, 105.0, 3.0, 20.0, DESK),
    (132.0, 105.0, 3.0, 20.0, DESK),
];

const PAPERS: &[Block] = &[
    (70.0, 92.0, 14.0, 10.0, PAPER),
    (72.0, 93.0, 10.0, 1.0, TEXT_LINE),
    (72.0, 95.0, 8.0, 1.0, TEXT_LINE),
    (90.0, 94.0, 12.0, 8.0, PAPER),
    (92.0, 95.0, 8.0, 1.0, TEXT_LINE),
    (92.0, 97.0, 6.0, 1.0, TEXT_LINE),
];

// Seated at the desk, facing the window.
const WRITER: &[Block] = &[
    (108.0, 76.0, 8.0, 7.0, FIGURE_SKIN),
    (108.0, 76.0, 8.0, 2.0, FIGURE_HAIR),
    (113.0, 78.0, 3.0, 2.0, GLASSES),
    (104.0, 83.0, 16.0, 14.0, FIGURE_SHIRT),
    (100.0, 94.0, 8.0, 3.0, FIGURE_SKIN),
    (116.0, 94.0, 8.0, 3.0, FIGURE_SKIN),
];

const BARRICADE_PARTS: &[Block] = &[
    (230.0, 118.0, 30.0, 3.0, BARRICADE),
    (235.0, 112.0, 3.0, 6.0, BARRICADE),
    (255.0, 112.0, 3.0, 6.0, BARRICADE),
];

const OFFICERS: [(f64, f64); 3] = [(240.0, 96.0), (258.0, 100.0), (278.0, 94.0)];

/// Warm interior against the police cordon outside.
#[derive(Clone, Copy, Debug, Default)]
pub struct Standoff;

/// Layers kept for one Active period.
#[derive(Debug)]
pub struct StandoffHandles {
    scene: LayerId,
    interior_light: LayerId,
    exterior: LayerId,
    police_lights: LayerId,
}

/// Alpha of the warm interior wash at frame `t`.
pub fn interior_flicker(frame: FrameCounter) -> f64 {
    0.03 + (frame.t() * 0.08).sin() * 0.01
}

/// `true` while the red light is on, `false` for blue.
pub fn red_phase(frame: FrameCounter) -> bool {
    (frame.0 / LIGHT_PERIOD) % 2 == 0
}

impl SceneDefinition for Standoff {
    type Handles = StandoffHandles;

    fn info(&self) -> &SceneInfo {
        &INFO
    }

    fn setup(&self, ctx: &SetupCtx, tree: &mut LayerTree) -> SceneResult<StandoffHandles> {
        let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
        let mid = w / 2.0;
        let scene = tree.add_group(tree.root(), "scene")?;

        tree.draw(scene, "interior_background", |g| {
            g.rect(0.0, 0.0, mid, h, Rgb8::hex(INTERIOR_BG))
                .rect(0.0, 0.0, mid, 120.0, Rgb8::hex(INTERIOR_WALL));
        })?;
        let interior_light = tree.add_graphics(scene, "interior_light")?;
        tree.draw(scene, "bookshelf", |g| fill(g, BOOKSHELF))?;
        tree.draw(scene, "desk", |g| fill(g, WRITING_DESK))?;
        tree.draw(scene, "papers", |g| fill(g, PAPERS))?;
        tree.draw(scene, "writer", |g| fill(g, WRITER))?;
        tree.draw(scene, "desk_lamp", |g| {
            g.rect(128.0, 86.0, 2.0, 8.0, Rgb8::hex(LAMP_METAL))
                .rect(124.0, 84.0, 10.0, 3.0, Rgb8::hex(LAMP_METAL))
                .rect(127.0, 87.0, 4.0, 2.0, LAMP_WARM);
        })?;
        tree.draw(scene, "interior_floor", |g| {
            g.rect(0.0, 130.0, mid, 50.0, Rgb8::hex(INTERIOR_FLOOR));
        })?;

        tree.draw(scene, "divider", |g| {
            g.rect(mid - 1.0, 0.0, 2.0, h, Rgb8::hex(DIVIDER));
        })?;
        tree.draw(scene, "window", |g| {
            fill(
                g,
                &[
                    (mid - 8.0, 40.0, 16.0, 40.0, WINDOW_GLASS),
                    (mid - 1.0, 40.0, 2.0, 40.0, WINDOW_FRAME),
                    (mid - 8.0, 59.0, 16.0, 2.0, WINDOW_FRAME),
                ],
            );
        })?;

        let exterior = tree.add_group(scene, "exterior")?;
        tree.draw(exterior, "exterior_background", |g| {
            g.rect(mid, 0.0, mid, h, Rgb8::hex(EXTERIOR_BG));
        })?;
        tree.draw(exterior, "building", |g| {
            g.rect(162.0, 15.0, 60.0, 115.0, Rgb8::hex(BUILDING));
            for row in 0..4 {
                for col in 0..3 {
                    g.rect(
                        168.0 + f64::from(col) * 18.0,
                        25.0 + f64::from(row) * 22.0,
                        10.0,
                        12.0,
                        Rgb8::hex(BUILDING_WINDOW),
                    );
                }
            }
            // His office, second floor.
            g.rect_alpha(168.0, 47.0, 10.0, 12.0, LAMP_WARM, 0.3);
        })?;
        tree.draw(exterior, "street", |g| {
            g.rect(mid, 130.0, mid, 50.0, Rgb8::hex(STREET));
        })?;
        tree.draw(exterior, "barricade", |g| fill(g, BARRICADE_PARTS))?;
        tree.draw(exterior, "officers", |g| {
            for (x, y) in OFFICERS {
                fill(
                    g,
                    &[
                        (x, y, 8.0, 4.0, POLICE_HELMET),
                        (x + 1.0, y + 4.0, 6.0, 4.0, POLICE_SKIN),
                        (x - 2.0, y + 8.0, 12.0, 14.0, POLICE_UNIFORM),
                        (x - 1.0, y + 22.0, 5.0, 10.0, POLICE_BLUE),
                        (x + 5.0, y + 22.0, 5.0, 10.0, POLICE_BLUE),
                    ],
                );
            }
        })?;
        tree.draw(exterior, "police_car", |g| {
            fill(
                g,
                &[
                    (275.0, 122.0, 36.0, 14.0, POLICE_BLUE),
                    (278.0, 118.0, 12.0, 4.0, POLICE_BLUE),
                    (295.0, 118.0, 12.0, 4.0, POLICE_BLUE),
                ],
            );
            g.circle(282.0, 136.0, 3.0, WHEEL)
                .circle(304.0, 136.0, 3.0, WHEEL);
        })?;
        let police_lights = tree.add_graphics(exterior, "police_lights")?;

        Ok(StandoffHandles {
            scene,
            interior_light,
            exterior,
            police_lights,
        })
    }

    fn tick(&self, handles: &mut StandoffHandles, frame: FrameCounter, tree: &mut LayerTree) {
        if let Some(g) = tree.graphics_mut(handles.interior_light) {
            g.clear()
                .rect_alpha(60.0, 60.0, 80.0, 70.0, LAMP_WARM, interior_flicker(frame));
        }

        if let Some(g) = tree.graphics_mut(handles.police_lights) {
            let (bar_x, color) = if red_phase(frame) {
                (288.0, POLICE_LIGHT_RED)
            } else {
                (294.0, POLICE_LIGHT_BLUE)
            };
            g.clear()
                .rect_alpha(bar_x, 116.0, 6.0, 3.0, color, 0.8)
                .rect_alpha(270.0, 110.0, 50.0, 30.0, color, 0.03);
        }
    }

    fn progress(&self, handles: &StandoffHandles, progress: f64, tree: &mut LayerTree) {
        tree.set_alpha(handles.scene, SCENE_WINDOW.alpha(progress));
        tree.set_alpha(handles.exterior, EXTERIOR_WINDOW.alpha(progress));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/standoff.rs"]
mod tests;
