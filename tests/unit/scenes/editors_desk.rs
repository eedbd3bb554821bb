use super::*;
use crate::render::surface::SurfaceId;

fn build() -> (LayerTree, EditorsDeskHandles) {
    let mut tree = LayerTree::new(1);
    let ctx = SetupCtx {
        canvas: Canvas::BASE,
        surface: SurfaceId(1),
        generation: 1,
    };
    let handles = EditorsDesk.setup(&ctx, &mut tree).unwrap();
    (tree, handles)
}

#[test]
fn setup_paints_back_to_front_without_animating() {
    let (tree, h) = build();
    assert_eq!(
        tree.child_names(h.scene),
        [
            "background",
            "floor",
            "light_cone",
            "desk",
            "typewriter",
            "manuscripts",
            "chair",
            "gasoline",
            "gasoline_glint",
            "lamp",
        ]
    );
    for id in [h.light_cone, h.glint, h.lamp] {
        assert!(tree.graphics(id).unwrap().is_empty());
    }
}

#[test]
fn whole_scene_reveals_over_first_forty_percent() {
    let (mut tree, h) = build();
    for (p, want) in [(0.0, 0.0), (0.2, 0.5), (0.4, 1.0), (0.9, 1.0)] {
        EditorsDesk.progress(&h, p, &mut tree);
        let got = tree.alpha(h.scene).unwrap();
        assert!((got - want).abs() < 1e-9, "progress {p}: {got} != {want}");
    }
}

#[test]
fn lamp_sways_within_a_pixel_and_a_half() {
    assert_eq!(lamp_sway(FrameCounter(0)), 0.0);
    for f in (0..2_000).step_by(7) {
        assert!(lamp_sway(FrameCounter(f)).abs() <= 1.5);
    }
}

#[test]
fn tick_redraws_lamp_and_cone_deterministically() {
    let (mut a, mut ha) = build();
    let (mut b, mut hb) = build();
    EditorsDesk.tick(&mut ha, FrameCounter(3), &mut a);
    EditorsDesk.tick(&mut ha, FrameCounter(90), &mut a);
    EditorsDesk.tick(&mut hb, FrameCounter(90), &mut b);

    assert_eq!(a.graphics(ha.lamp), b.graphics(hb.lamp));
    assert_eq!(a.graphics(ha.light_cone), b.graphics(hb.light_cone));
    // Wire, shade, bulb.
    assert_eq!(a.graphics(ha.lamp).unwrap().cmds().len(), 3);
    assert_eq!(a.graphics(ha.light_cone).unwrap().cmds().len(), 2);
}

#[test]
fn glint_only_shows_near_the_sine_peak() {
    let (mut tree, mut h) = build();
    // sin(0) * 0.5 + 0.5 = 0.5, below the 0.7 threshold.
    EditorsDesk.tick(&mut h, FrameCounter(0), &mut tree);
    assert!(tree.graphics(h.glint).unwrap().is_empty());

    // t * 0.02 = pi / 2 puts the glint at its peak.
    let peak = (std::f64::consts::FRAC_PI_2 / 0.02).round() as u64;
    EditorsDesk.tick(&mut h, FrameCounter(peak), &mut tree);
    assert_eq!(tree.graphics(h.glint).unwrap().cmds().len(), 1);
}
