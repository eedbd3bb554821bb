use crate::foundation::core::{FrameCounter, Rgb8};
use crate::foundation::error::SceneResult;
use crate::foundation::math::RevealWindow;
use crate::render::layer::{LayerId, LayerTree};
use crate::scene::definition::{SceneDefinition, SceneInfo, SetupCtx};
use crate::scenes::{Block, fill};

pub(crate) const INFO: SceneInfo = SceneInfo {
    id: "courtroom",
    aria_label: "軍事法庭——法官高坐審判台上，被告渺小地站在欄杆之後，「唯一死刑」印章浮現",
    fallback_text: "[ 場景：懲治叛亂條例下的軍事法庭——法官沒有從輕量刑的選擇 ]",
    caption: "懲治叛亂條例第二條第一項：唯一死刑",
};

/// Whole scene fades in first.
pub const SCENE_WINDOW: RevealWindow = RevealWindow::new(0.0, 1.0 / 3.0);
/// The sentence stamp comes in last.
pub const STAMP_WINDOW: RevealWindow = RevealWindow::new(0.6, 1.0);

const BG: u32 = 0x0d120d;
const WALL: u32 = 0x1a211a;
const WOOD_DARK: u32 = 0x2a2018;
const WOOD_MEDIUM: u32 = 0x3d3229;
const JUDGE_ROBE: u32 = 0x1a1a2a;
const JUDGE_COLLAR: u32 = 0xd4d0c3;
const SKIN: u32 = 0xc9a882;
const JUDGE_HAIR: u32 = 0x3a3a3a;
const DEFENDANT_SHIRT: u32 = 0xd4d0c8;
const DEFENDANT_HAIR: u32 = 0x1c1814;
const DEFENDANT_PANTS: u32 = 0x4a4a50;
const PAPER: Rgb8 = Rgb8::hex(0xe8e4db);
const TEXT_LINE: Rgb8 = Rgb8::hex(0x9a8f7d);
const STAMP_RED: Rgb8 = Rgb8::hex(0xdc2626);
const STAMP_RED_DIM: Rgb8 = Rgb8::hex(0x7f1d1d);
const GAVEL: u32 = 0x3d2b1a;
const FLAG_RED: Rgb8 = Rgb8::hex(0x991b1b);
const FLAG_BLUE: Rgb8 = Rgb8::hex(0x1a1a5a);
const LIGHT: u32 = 0xf0e8d0;
const RAILING: u32 = 0x5a5a50;
const GUARD_UNIFORM: u32 = 0x3a4a3a;
const FLOOR: u32 = 0x0a0f0a;

const BENCH: &[Block] = &[
    (80.0, 55.0, 160.0, 6.0, WOOD_DARK),
    (85.0, 48.0, 150.0, 7.0, WOOD_MEDIUM),
    (85.0, 55.0, 150.0, 20.0, WOOD_DARK),
];

const JUDGE: &[Block] = &[
    (156.0, 28.0, 8.0, 7.0, SKIN),
    (156.0, 28.0, 8.0, 2.0, JUDGE_HAIR),
    (148.0, 35.0, 24.0, 14.0, JUDGE_ROBE),
    (154.0, 35.0, 12.0, 3.0, JUDGE_COLLAR),
];

const GAVEL_PARTS: &[Block] = &[
    (140.0, 46.0, 3.0, 8.0, GAVEL),
    (137.0, 44.0, 9.0, 3.0, GAVEL),
];

const LIGHTS: &[Block] = &[
    (100.0, 0.0, 1.0, 8.0, RAILING),
    (96.0, 8.0, 9.0, 3.0, RAILING),
    (99.0, 11.0, 3.0, 2.0, LIGHT),
    (220.0, 0.0, 1.0, 8.0, RAILING),
    (216.0, 8.0, 9.0, 3.0, RAILING),
    (219.0, 11.0, 3.0, 2.0, LIGHT),
];

const DEFENDANT: &[Block] = &[
    (156.0, 100.0, 8.0, 7.0, SKIN),
    (156.0, 100.0, 8.0, 2.0, DEFENDANT_HAIR),
    (150.0, 107.0, 20.0, 14.0, DEFENDANT_SHIRT),
    (154.0, 118.0, 12.0, 3.0, SKIN),
    (152.0, 121.0, 7.0, 16.0, DEFENDANT_PANTS),
    (161.0, 121.0, 7.0, 16.0, DEFENDANT_PANTS),
];

const GUARDS: &[Block] = &[
    (110.0, 98.0, 8.0, 7.0, SKIN),
    (106.0, 105.0, 16.0, 18.0, GUARD_UNIFORM),
    (107.0, 123.0, 6.0, 14.0, GUARD_UNIFORM),
    (115.0, 123.0, 6.0, 14.0, GUARD_UNIFORM),
    (202.0, 98.0, 8.0, 7.0, SKIN),
    (198.0, 105.0, 16.0, 18.0, GUARD_UNIFORM),
    (199.0, 123.0, 6.0, 14.0, GUARD_UNIFORM),
    (207.0, 123.0, 6.0, 14.0, GUARD_UNIFORM),
];

/// Military courtroom with the sentence stamp fading in.
#[derive(Clone, Copy, Debug, Default)]
pub struct Courtroom;

/// Layers kept for one Active period.
#[derive(Debug)]
pub struct CourtroomHandles {
    scene: LayerId,
    paper: LayerId,
    stamp: LayerId,
}

/// Vertical offset of the loose sheet at frame `t`.
pub fn paper_flutter(frame: FrameCounter) -> f64 {
    (frame.t() * 0.03).sin() * 0.3
}

/// Stamp brightness multiplier at frame `t`, in `[0.7, 1.0]`.
pub fn stamp_pulse(frame: FrameCounter) -> f64 {
    (frame.t() * 0.04).sin() * 0.15 + 0.85
}

impl SceneDefinition for Courtroom {
    type Handles = CourtroomHandles;

    fn info(&self) -> &SceneInfo {
        &INFO
    }

    fn setup(&self, ctx: &SetupCtx, tree: &mut LayerTree) -> SceneResult<CourtroomHandles> {
        let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
        let scene = tree.add_group(tree.root(), "scene")?;

        tree.draw(scene, "wall", |g| {
            g.rect(0.0, 0.0, w, h, Rgb8::hex(BG))
                .rect(0.0, 0.0, w, 100.0, Rgb8::hex(WALL));
        })?;
        tree.draw(scene, "bench", |g| {
            fill(g, BENCH);
            g.rect_alpha(152.0, 10.0, 16.0, 16.0, FLAG_BLUE, 0.6)
                .circle_alpha(160.0, 18.0, 6.0, FLAG_RED, 0.5);
        })?;
        tree.draw(scene, "judge", |g| fill(g, JUDGE))?;
        tree.draw(scene, "judge_papers", |g| {
            g.rect(120.0, 46.0, 14.0, 8.0, PAPER)
                .rect(122.0, 47.0, 10.0, 1.0, TEXT_LINE)
                .rect(122.0, 49.0, 8.0, 1.0, TEXT_LINE)
                .rect(190.0, 45.0, 12.0, 8.0, PAPER)
                .rect(192.0, 46.0, 8.0, 1.0, TEXT_LINE)
                .rect(192.0, 48.0, 6.0, 1.0, TEXT_LINE);
        })?;
        let paper = tree.add_graphics(scene, "loose_paper")?;
        tree.draw(scene, "gavel", |g| fill(g, GAVEL_PARTS))?;
        tree.draw(scene, "lights", |g| fill(g, LIGHTS))?;
        tree.draw(scene, "railing", |g| {
            g.rect(60.0, 90.0, 200.0, 3.0, Rgb8::hex(RAILING));
            for x in (70..=250).step_by(20) {
                g.rect(f64::from(x), 82.0, 2.0, 8.0, Rgb8::hex(RAILING));
            }
        })?;
        tree.draw(scene, "defendant", |g| fill(g, DEFENDANT))?;
        tree.draw(scene, "guards", |g| fill(g, GUARDS))?;
        tree.draw(scene, "floor", |g| {
            g.rect(0.0, 140.0, w, 40.0, Rgb8::hex(FLOOR));
        })?;
        let stamp = tree.add_graphics(scene, "stamp")?;
        tree.set_alpha(stamp, 0.0);

        Ok(CourtroomHandles {
            scene,
            paper,
            stamp,
        })
    }

    fn tick(&self, handles: &mut CourtroomHandles, frame: FrameCounter, tree: &mut LayerTree) {
        if let Some(g) = tree.graphics_mut(handles.paper) {
            let dy = paper_flutter(frame);
            g.clear()
                .rect_alpha(170.0, 46.0 + dy, 14.0, 8.0, PAPER, 0.8)
                .rect(172.0, 47.0 + dy, 10.0, 1.0, TEXT_LINE)
                .rect(172.0, 49.0 + dy, 7.0, 1.0, TEXT_LINE);
        }

        // Hidden stamp keeps whatever it last drew.
        if tree.alpha(handles.stamp).unwrap_or(0.0) <= 0.0 {
            return;
        }
        if let Some(g) = tree.graphics_mut(handles.stamp) {
            let pulse = stamp_pulse(frame);
            g.clear().rect_alpha(130.0, 62.0, 60.0, 14.0, STAMP_RED, 0.2 * pulse);
            // Four character blocks.
            for i in 0..4 {
                let x = 134.0 + f64::from(i) * 14.0;
                g.rect_alpha(x, 65.0, 10.0, 8.0, STAMP_RED, 0.7 * pulse);
            }
            let border = 0.5 * pulse;
            g.rect_alpha(128.0, 60.0, 64.0, 2.0, STAMP_RED_DIM, border)
                .rect_alpha(128.0, 78.0, 64.0, 2.0, STAMP_RED_DIM, border)
                .rect_alpha(128.0, 60.0, 2.0, 20.0, STAMP_RED_DIM, border)
                .rect_alpha(190.0, 60.0, 2.0, 20.0, STAMP_RED_DIM, border);
        }
    }

    fn progress(&self, handles: &CourtroomHandles, progress: f64, tree: &mut LayerTree) {
        tree.set_alpha(handles.scene, SCENE_WINDOW.alpha(progress));
        tree.set_alpha(handles.stamp, STAMP_WINDOW.alpha(progress));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/courtroom.rs"]
mod tests;
