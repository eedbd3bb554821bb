use crate::foundation::core::{Canvas, FrameCounter, Point, Rgb8};
use crate::foundation::error::SceneResult;
use crate::foundation::math::RevealWindow;
use crate::render::layer::{LayerId, LayerTree};
use crate::scene::definition::{SceneDefinition, SceneInfo, SetupCtx};
use crate::scenes::{Block, fill};

pub(crate) const INFO: SceneInfo = SceneInfo {
    id: "charred_office",
    aria_label: "燒毀的辦公室——焦黑殘骸中，一道光從破窗射入，塵埃在光束中浮動，餘燼微微閃爍",
    fallback_text: "[ 場景：《自由時代》雜誌社內部——基金會保存了現場原貌至今 ]",
    caption: "《自由時代》雜誌社內部：基金會保存了現場原貌至今",
};

/// Light beam fades in first.
pub const SCENE_WINDOW: RevealWindow = RevealWindow::new(0.0, 0.3);
/// Then the burnt remains.
pub const CONTENT_WINDOW: RevealWindow = RevealWindow::new(0.3, 0.8);

/// Size of the dust phase table.
pub const DUST_PARTICLES: usize = 12;

const EMBER_SPOTS: [(f64, f64); 3] = [(95.0, 108.0), (130.0, 112.0), (42.0, 82.0)];

const VOID: u32 = 0x0a0808;
const CHAR_BROWN: u32 = 0x3d2b1a;
const CHAR_BLACK: u32 = 0x1a1008;
const SCORCH: Rgb8 = Rgb8::hex(0x5c3a1e);
const ASH_GREY: u32 = 0x4a4440;
const WALL_BURNT: u32 = 0x1a1410;
const WALL_STAIN: u32 = 0x2a2018;
const BEAM: Rgb8 = Rgb8::hex(0xf0e8d0);
const BEAM_DUST: Rgb8 = Rgb8::hex(0xe8dcc4);
const WINDOW_FRAME: u32 = 0x3a3a3a;
const SKY: u32 = 0x2a3a4a;
const EMBER_CORE: Rgb8 = Rgb8::hex(0xff6b00);
const EMBER_DIM: Rgb8 = Rgb8::hex(0xcc4400);
const METAL_DARK: u32 = 0x3a3a3a;
const METAL_RUST: u32 = 0x5a3a2a;
const DEBRIS: u32 = 0x2a2018;

const BROKEN_WINDOW: &[Block] = &[
    (240.0, 20.0, 40.0, 50.0, WINDOW_FRAME),
    (244.0, 24.0, 32.0, 42.0, SKY),
    (244.0, 24.0, 4.0, 8.0, WINDOW_FRAME),
    (268.0, 24.0, 8.0, 6.0, WINDOW_FRAME),
    (244.0, 58.0, 10.0, 8.0, WINDOW_FRAME),
    (270.0, 50.0, 6.0, 16.0, WINDOW_FRAME),
];

const TYPEWRITER_RUIN: &[Block] = &[
    (100.0, 102.0, 30.0, 8.0, METAL_DARK),
    (106.0, 96.0, 18.0, 6.0, METAL_RUST),
    (110.0, 92.0, 10.0, 4.0, METAL_DARK),
];

const CABINET_RUIN: &[Block] = &[
    (200.0, 100.0, 24.0, 40.0, METAL_DARK),
    (202.0, 104.0, 20.0, 8.0, METAL_RUST),
    (204.0, 120.0, 18.0, 8.0, METAL_RUST),
    (195.0, 140.0, 30.0, 4.0, ASH_GREY),
    (220.0, 138.0, 20.0, 6.0, ASH_GREY),
];

/// One entry of the fixed dust phase table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DustParticle {
    /// Resting x.
    pub x: f64,
    /// Starting y.
    pub y: f64,
    /// Rise per frame.
    pub speed: f64,
    /// Sideways drift frequency.
    pub drift: f64,
    /// Phase offset.
    pub phase: f64,
}

impl DustParticle {
    fn table() -> [DustParticle; DUST_PARTICLES] {
        std::array::from_fn(|i| {
            let fi = i as f64;
            DustParticle {
                x: 165.0 + ((i % 4) as f64) * 8.0 - 12.0,
                y: 30.0 + ((i * 11) % 100) as f64,
                speed: 0.2 + (fi * 0.07) % 0.3,
                drift: (fi * 0.13) % 0.4,
                phase: fi * 1.3,
            }
        })
    }

    /// Position at frame `t`, before beam clipping.
    pub fn position(&self, frame: FrameCounter) -> Point {
        let t = frame.t();
        let y = (self.y - t * self.speed + self.phase * 30.0) % 140.0 + 20.0;
        let x = self.x + (t * self.drift + self.phase).sin() * 6.0;
        Point::new(x, y)
    }
}

/// `true` when `p` lies inside the light beam's horizontal extent at its height.
pub fn in_beam(p: Point) -> bool {
    let depth = p.y / Canvas::BASE.h();
    let left = 244.0 - depth * 104.0;
    let right = 276.0 - depth * 76.0;
    p.x > left && p.x < right
}

/// Glow of ember `i` at frame `t`, or `None` while it is dark.
pub fn ember_alpha(frame: FrameCounter, i: usize) -> Option<f64> {
    let glow = (frame.t() * 0.03 + i as f64 * 2.1).sin() * 0.5 + 0.5;
    (glow > 0.3).then(|| (glow - 0.3) * 0.4)
}

/// The office after the fire, lit through a broken window.
#[derive(Clone, Debug)]
pub struct CharredOffice {
    dust: [DustParticle; DUST_PARTICLES],
}

impl Default for CharredOffice {
    fn default() -> Self {
        Self::new()
    }
}

impl CharredOffice {
    /// Build the scene and its dust phase table.
    pub fn new() -> Self {
        Self {
            dust: DustParticle::table(),
        }
    }

    /// The dust phase table.
    pub fn dust(&self) -> &[DustParticle] {
        &self.dust
    }
}

/// Layers kept for one Active period.
#[derive(Debug)]
pub struct CharredOfficeHandles {
    scene: LayerId,
    dust: LayerId,
    content: LayerId,
    embers: LayerId,
}

impl SceneDefinition for CharredOffice {
    type Handles = CharredOfficeHandles;

    fn info(&self) -> &SceneInfo {
        &INFO
    }

    fn setup(&self, ctx: &SetupCtx, tree: &mut LayerTree) -> SceneResult<CharredOfficeHandles> {
        let (w, h) = (ctx.canvas.w(), ctx.canvas.h());
        let scene = tree.add_group(tree.root(), "scene")?;

        tree.draw(scene, "background", |g| {
            g.rect(0.0, 0.0, w, h, Rgb8::hex(VOID));
        })?;
        let walls = tree.draw(scene, "walls", |g| {
            fill(
                g,
                &[
                    (0.0, 0.0, w, 130.0, WALL_BURNT),
                    (20.0, 30.0, 40.0, 60.0, WALL_STAIN),
                    (240.0, 20.0, 50.0, 80.0, WALL_STAIN),
                ],
            );
            g.rect_alpha(100.0, 10.0, 30.0, 40.0, SCORCH, 0.3);
        })?;
        tree.set_alpha(walls, 0.4);
        tree.draw(scene, "window", |g| fill(g, BROKEN_WINDOW))?;
        tree.draw(scene, "light_beam", |g| {
            g.polygon(
                &[(244.0, 30.0), (276.0, 30.0), (200.0, h), (140.0, h)],
                BEAM,
                0.06,
            )
            .polygon(
                &[(252.0, 34.0), (268.0, 34.0), (185.0, h), (155.0, h)],
                BEAM,
                0.04,
            );
        })?;
        let dust = tree.add_graphics(scene, "dust")?;

        let content = tree.add_group(scene, "charred_content")?;
        tree.set_alpha(content, 0.0);
        tree.draw(content, "desk_ruin", |g| {
            g.rect(80.0, 110.0, 80.0, 4.0, Rgb8::hex(CHAR_BROWN)).polygon(
                &[(80.0, 110.0), (76.0, 130.0), (80.0, 130.0)],
                Rgb8::hex(CHAR_BLACK),
                1.0,
            );
            fill(
                g,
                &[
                    (155.0, 114.0, 3.0, 20.0, CHAR_BLACK),
                    (90.0, 106.0, 12.0, 4.0, DEBRIS),
                    (110.0, 108.0, 8.0, 3.0, DEBRIS),
                    (130.0, 104.0, 14.0, 6.0, DEBRIS),
                ],
            );
        })?;
        tree.draw(content, "shelf_ruin", |g| {
            g.rect(10.0, 70.0, 50.0, 3.0, Rgb8::hex(CHAR_BROWN)).polygon(
                &[(10.0, 73.0), (8.0, 130.0), (12.0, 130.0)],
                Rgb8::hex(CHAR_BLACK),
                1.0,
            );
            fill(
                g,
                &[
                    (15.0, 80.0, 8.0, 6.0, CHAR_BLACK),
                    (30.0, 78.0, 6.0, 8.0, CHAR_BROWN),
                    (44.0, 76.0, 10.0, 4.0, CHAR_BLACK),
                ],
            );
        })?;
        tree.draw(content, "typewriter_ruin", |g| fill(g, TYPEWRITER_RUIN))?;
        tree.draw(content, "cabinet_ruin", |g| fill(g, CABINET_RUIN))?;
        tree.draw(content, "floor_debris", |g| {
            for x in (20..280).step_by(15) {
                let y = 135 + (x * 7) % 15;
                let len = 4 + (x * 3) % 8;
                g.rect(
                    f64::from(x),
                    f64::from(y),
                    f64::from(len),
                    2.0,
                    Rgb8::hex(ASH_GREY),
                );
            }
            fill(
                g,
                &[
                    (60.0, 140.0, 10.0, 6.0, CHAR_BROWN),
                    (160.0, 145.0, 14.0, 4.0, CHAR_BLACK),
                    (240.0, 142.0, 8.0, 5.0, DEBRIS),
                ],
            );
        })?;
        let embers = tree.add_graphics(content, "embers")?;

        Ok(CharredOfficeHandles {
            scene,
            dust,
            content,
            embers,
        })
    }

    fn tick(&self, handles: &mut CharredOfficeHandles, frame: FrameCounter, tree: &mut LayerTree) {
        let t = frame.t();

        if let Some(g) = tree.graphics_mut(handles.dust) {
            g.clear();
            for p in &self.dust {
                let pos = p.position(frame);
                if in_beam(pos) {
                    let brightness = 0.3 + (t * 0.05 + p.phase).sin() * 0.2;
                    g.rect_alpha(pos.x, pos.y, 1.0, 1.0, BEAM_DUST, brightness);
                }
            }
        }

        if let Some(g) = tree.graphics_mut(handles.embers) {
            g.clear();
            for (i, &(x, y)) in EMBER_SPOTS.iter().enumerate() {
                if let Some(alpha) = ember_alpha(frame, i) {
                    g.rect_alpha(x, y, 2.0, 2.0, EMBER_CORE, alpha).rect_alpha(
                        x - 1.0,
                        y - 1.0,
                        4.0,
                        4.0,
                        EMBER_DIM,
                        alpha * 0.3,
                    );
                }
            }
        }
    }

    fn progress(&self, handles: &CharredOfficeHandles, progress: f64, tree: &mut LayerTree) {
        tree.set_alpha(handles.scene, SCENE_WINDOW.alpha(progress));
        tree.set_alpha(handles.content, CONTENT_WINDOW.alpha(progress));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/charred_office.rs"]
mod tests;
