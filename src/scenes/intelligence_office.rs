use crate::foundation::core::{FrameCounter, Point, Rgb8};
use crate::foundation::error::SceneResult;
use crate::foundation::math::RevealWindow;
use crate::render::layer::{LayerId, LayerTree};
use crate::scene::definition::{SceneDefinition, SceneInfo, SetupCtx};
use crate::scenes::{Block, fill};

pub(crate) const INFO: SceneInfo = SceneInfo {
    id: "intelligence_office",
    aria_label: "情報辦公室鳥瞰——情治人員伏案撰寫監控報告，周圍是檔案櫃、轉盤電話、冒煙的菸灰缸",
    fallback_text: "[ 場景：青谷專案下的情報辦公室——每一份報告的另一端，都是一個人的日常 ]",
    caption: "青谷專案下的情報辦公室：每一份報告的另一端，都是一個人的日常",
};

/// Whole scene fades in first.
pub const SCENE_WINDOW: RevealWindow = RevealWindow::new(0.0, 1.0 / 3.0);
/// Overflowing case files appear late.
pub const FILES_WINDOW: RevealWindow = RevealWindow::new(0.5, 1.0);

/// Number of smoke wisps rising from the ashtray.
pub const SMOKE_WISPS: usize = 3;

const FLOOR: u32 = 0x1a211a;
const DESK_TOP: u32 = 0x5a5040;
const DESK_EDGE: u32 = 0x3d3229;
const PAPER: Rgb8 = Rgb8::hex(0xe8e4db);
const TEXT_LINE: u32 = 0x9a8f7d;
const STAMP_RED: Rgb8 = Rgb8::hex(0xc23b22);
const AGENT_HAIR: u32 = 0x1c1814;
const AGENT_SHIRT: u32 = 0x4a5a4a;
const AGENT_ARM: u32 = 0xc9a882;
const PEN: Rgb8 = Rgb8::hex(0x1a1a1a);
const PEN_TIP: Rgb8 = Rgb8::hex(0x1a1a5a);
const CABINET_BODY: u32 = 0x3a4a3a;
const CABINET_DRAWER: u32 = 0x4a5a4a;
const CABINET_HANDLE: u32 = 0x8a8a7a;
const PHONE_BODY: Rgb8 = Rgb8::hex(0x2a2a2a);
const PHONE_DIAL: Rgb8 = Rgb8::hex(0x3a3a3a);
const PHONE_HANDSET: u32 = 0x1a1a1a;
const ASHTRAY: Rgb8 = Rgb8::hex(0x5a5a5a);
const ASH: Rgb8 = Rgb8::hex(0x8a8a8a);
const CIGARETTE: u32 = 0xe8e4db;
const CIGARETTE_TIP: u32 = 0xff6b00;
const SMOKE: Rgb8 = Rgb8::hex(0x9a9a9a);
const FLUORESCENT: Rgb8 = Rgb8::hex(0xe8f0d8);
const FILE_GREEN: u32 = 0x4a6a4a;
const FILE_MANILA: u32 = 0xc4b480;
const RUBBER_STAMP: u32 = 0x5a3020;
const INK_PAD: u32 = 0x2a1a2a;

const DESK: &[Block] = &[
    (60.0, 30.0, 160.0, 100.0, DESK_TOP),
    (60.0, 30.0, 160.0, 3.0, DESK_EDGE),
    (60.0, 30.0, 3.0, 100.0, DESK_EDGE),
    (217.0, 30.0, 3.0, 100.0, DESK_EDGE),
    (60.0, 127.0, 160.0, 3.0, DESK_EDGE),
];

// Seen from above: head, shoulders, arms reaching onto the desk.
const AGENT: &[Block] = &[
    (132.0, 102.0, 16.0, 14.0, AGENT_HAIR),
    (118.0, 116.0, 44.0, 14.0, AGENT_SHIRT),
    (108.0, 80.0, 8.0, 40.0, AGENT_SHIRT),
    (164.0, 80.0, 8.0, 40.0, AGENT_SHIRT),
    (108.0, 74.0, 6.0, 8.0, AGENT_ARM),
    (164.0, 74.0, 6.0, 8.0, AGENT_ARM),
];

const FILES: &[Block] = &[
    (8.0, 30.0, 14.0, 10.0, FILE_GREEN),
    (24.0, 28.0, 12.0, 12.0, FILE_MANILA),
    (38.0, 32.0, 8.0, 8.0, FILE_GREEN),
    (4.0, 145.0, 20.0, 14.0, FILE_MANILA),
    (26.0, 148.0, 18.0, 10.0, FILE_GREEN),
    (280.0, 50.0, 24.0, 16.0, FILE_MANILA),
    (278.0, 70.0, 28.0, 14.0, FILE_GREEN),
    (282.0, 88.0, 20.0, 12.0, FILE_MANILA),
];

/// Surveillance office from above, an agent writing a report.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntelligenceOffice;

/// Layers kept for one Active period.
#[derive(Debug)]
pub struct IntelligenceOfficeHandles {
    scene: LayerId,
    pen: LayerId,
    smoke: LayerId,
    files: LayerId,
}

/// Top-left corner of the pen at frame `t`.
pub fn pen_position(frame: FrameCounter) -> Point {
    let t = frame.t();
    Point::new(120.0 + (t * 0.1).sin() * 8.0, 80.0 + (t * 0.07).cos() * 2.0)
}

/// One visible smoke puff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wisp {
    /// Centre.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// Fill alpha.
    pub alpha: f64,
}

/// Wisp `i` at frame `t`, or `None` while it is between puffs.
pub fn smoke_wisp(frame: FrameCounter, i: usize) -> Option<Wisp> {
    let fi = i as f64;
    let age = (frame.t() * 0.5 + fi * 20.0) % 60.0;
    if age >= 40.0 {
        return None;
    }
    Some(Wisp {
        center: Point::new(174.0 + (age * 0.15 + fi).sin() * 3.0, 94.0 - age * 0.5),
        radius: 1.0 + age * 0.03,
        alpha: (0.3 - age * 0.008).max(0.0),
    })
}

impl SceneDefinition for IntelligenceOffice {
    type Handles = IntelligenceOfficeHandles;

    fn info(&self) -> &SceneInfo {
        &INFO
    }

    fn setup(
        &self,
        ctx: &SetupCtx,
        tree: &mut LayerTree,
    ) -> SceneResult<IntelligenceOfficeHandles> {
        let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
        let scene = tree.add_group(tree.root(), "scene")?;

        tree.draw(scene, "floor", |g| {
            g.rect(0.0, 0.0, w, h, Rgb8::hex(FLOOR));
        })?;
        tree.draw(scene, "fluorescent", |g| {
            g.rect_alpha(40.0, 20.0, 200.0, 140.0, FLUORESCENT, 0.02);
        })?;
        tree.draw(scene, "desk", |g| fill(g, DESK))?;
        tree.draw(scene, "report", |g| {
            g.rect(110.0, 55.0, 50.0, 65.0, PAPER).rect_alpha(
                115.0,
                58.0,
                40.0,
                6.0,
                Rgb8::hex(FILE_GREEN),
                0.3,
            );
            for y in (68..110).step_by(4) {
                let len = 30 + (y * 7) % 10;
                g.rect(115.0, f64::from(y), f64::from(len), 1.0, Rgb8::hex(TEXT_LINE));
            }
        })?;
        tree.draw(scene, "classification_stamp", |g| {
            g.rect_alpha(130.0, 58.0, 16.0, 5.0, STAMP_RED, 0.5);
        })?;
        tree.draw(scene, "other_papers", |g| {
            g.rect_alpha(68.0, 40.0, 30.0, 40.0, PAPER, 0.8);
            fill(
                g,
                &[
                    (70.0, 42.0, 26.0, 1.0, TEXT_LINE),
                    (70.0, 46.0, 22.0, 1.0, TEXT_LINE),
                    (70.0, 50.0, 18.0, 1.0, TEXT_LINE),
                ],
            );
            g.rect_alpha(170.0, 45.0, 35.0, 45.0, PAPER, 0.9);
            fill(
                g,
                &[
                    (172.0, 48.0, 28.0, 1.0, TEXT_LINE),
                    (172.0, 52.0, 24.0, 1.0, TEXT_LINE),
                    (172.0, 56.0, 20.0, 1.0, TEXT_LINE),
                ],
            );
        })?;
        tree.draw(scene, "stamp_kit", |g| {
            g.rect(190.0, 95.0, 14.0, 8.0, Rgb8::hex(INK_PAD))
                .rect_alpha(192.0, 97.0, 10.0, 4.0, STAMP_RED, 0.6)
                .rect(208.0, 92.0, 6.0, 12.0, Rgb8::hex(RUBBER_STAMP));
        })?;
        tree.draw(scene, "agent", |g| fill(g, AGENT))?;
        let pen = tree.add_graphics(scene, "pen")?;
        tree.draw(scene, "cabinet", |g| {
            g.rect(4.0, 40.0, 44.0, 100.0, Rgb8::hex(CABINET_BODY));
            for i in 0..4 {
                let dy = 44.0 + f64::from(i) * 24.0;
                g.rect(6.0, dy, 40.0, 20.0, Rgb8::hex(CABINET_DRAWER)).rect(
                    22.0,
                    dy + 8.0,
                    10.0,
                    3.0,
                    Rgb8::hex(CABINET_HANDLE),
                );
            }
        })?;
        tree.draw(scene, "phone", |g| {
            g.rect(70.0, 95.0, 20.0, 16.0, PHONE_BODY)
                .circle(80.0, 103.0, 6.0, PHONE_DIAL)
                .circle(80.0, 103.0, 2.0, PHONE_BODY);
            fill(
                g,
                &[
                    (66.0, 90.0, 8.0, 4.0, PHONE_HANDSET),
                    (86.0, 90.0, 8.0, 4.0, PHONE_HANDSET),
                    (66.0, 88.0, 28.0, 3.0, PHONE_HANDSET),
                ],
            );
        })?;
        tree.draw(scene, "ashtray", |g| {
            g.circle(176.0, 102.0, 8.0, ASHTRAY)
                .circle(176.0, 102.0, 6.0, ASH);
            fill(
                g,
                &[
                    (172.0, 96.0, 10.0, 2.0, CIGARETTE),
                    (172.0, 96.0, 3.0, 2.0, CIGARETTE_TIP),
                ],
            );
        })?;
        let smoke = tree.add_graphics(scene, "smoke")?;
        let files = tree.draw(scene, "files", |g| fill(g, FILES))?;
        tree.set_alpha(files, 0.0);

        Ok(IntelligenceOfficeHandles {
            scene,
            pen,
            smoke,
            files,
        })
    }

    fn tick(
        &self,
        handles: &mut IntelligenceOfficeHandles,
        frame: FrameCounter,
        tree: &mut LayerTree,
    ) {
        if let Some(g) = tree.graphics_mut(handles.pen) {
            let p = pen_position(frame);
            g.clear()
                .rect(p.x, p.y, 2.0, 8.0, PEN)
                .rect(p.x, p.y + 8.0, 1.0, 2.0, PEN_TIP);
        }

        if let Some(g) = tree.graphics_mut(handles.smoke) {
            g.clear();
            for wisp in (0..SMOKE_WISPS).filter_map(|i| smoke_wisp(frame, i)) {
                g.circle_alpha(wisp.center.x, wisp.center.y, wisp.radius, SMOKE, wisp.alpha);
            }
        }
    }

    fn progress(&self, handles: &IntelligenceOfficeHandles, progress: f64, tree: &mut LayerTree) {
        tree.set_alpha(handles.scene, SCENE_WINDOW.alpha(progress));
        tree.set_alpha(handles.files, FILES_WINDOW.alpha(progress));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/intelligence_office.rs"]
mod tests;
