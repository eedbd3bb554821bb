use super::*;
use crate::scroll::geometry::ElementRect;

fn setup(top: f64) -> (ElementRef, ProgressTracker, Viewport) {
    let el = ElementRef::new();
    el.mount(ElementRect::new(top, 400.0).unwrap());
    let tracker = ProgressTracker::new(el.clone(), TrackerOpts::default());
    (el, tracker, Viewport::new(800.0).unwrap())
}

#[test]
fn listener_exists_only_while_in_view() {
    let (el, mut t, vp) = setup(2_000.0);
    assert!(!t.on_intersection(vp));
    assert!(!t.listener_attached());
    assert!(!t.on_scroll());

    el.mount(ElementRect::new(600.0, 400.0).unwrap());
    assert!(t.on_intersection(vp));
    assert!(t.is_in_view());
    assert!(t.listener_attached());
    // Entering view computes progress immediately.
    assert!((t.progress() - 200.0 / 1200.0).abs() < 1e-9);

    el.mount(ElementRect::new(-600.0, 400.0).unwrap());
    assert!(t.on_intersection(vp));
    assert!(!t.is_in_view());
    assert!(!t.listener_attached());
}

#[test]
fn scroll_events_coalesce_into_one_frame() {
    let (el, mut t, vp) = setup(600.0);
    t.on_intersection(vp);

    el.mount(ElementRect::new(500.0, 400.0).unwrap());
    assert!(t.on_scroll());
    assert!(!t.on_scroll());
    assert!(!t.on_scroll());
    assert!(t.frame_pending());

    assert!(t.on_animation_frame(vp));
    assert!(!t.frame_pending());
    assert!((t.progress() - 300.0 / 1200.0).abs() < 1e-9);

    // No queued frame: nothing recomputes even if geometry moved.
    el.mount(ElementRect::new(100.0, 400.0).unwrap());
    assert!(!t.on_animation_frame(vp));
    assert!((t.progress() - 300.0 / 1200.0).abs() < 1e-9);
}

#[test]
fn unmounted_element_updates_are_silent_noops() {
    let (el, mut t, vp) = setup(600.0);
    t.on_intersection(vp);
    let before = t.snapshot();

    t.on_scroll();
    el.unmount();
    assert!(!t.on_animation_frame(vp));
    assert!(!t.on_intersection(vp));
    assert_eq!(t.snapshot(), before);
}

#[test]
fn leaving_view_drops_a_queued_frame() {
    let (el, mut t, vp) = setup(600.0);
    t.on_intersection(vp);
    t.on_scroll();
    el.mount(ElementRect::new(3_000.0, 400.0).unwrap());
    t.on_intersection(vp);
    assert!(!t.frame_pending());
    assert!(!t.on_animation_frame(vp));
}

#[test]
fn disconnect_detaches_everything() {
    let (_el, mut t, vp) = setup(600.0);
    t.on_intersection(vp);
    t.disconnect();
    assert!(!t.listener_attached());
    assert!(!t.is_in_view());
}

#[test]
fn margin_builder_clamps_negative_values() {
    assert_eq!(TrackerOpts::default().margin_px, 100.0);
    assert_eq!(TrackerOpts::default().with_margin_px(-5.0).margin_px, 0.0);
    assert_eq!(TrackerOpts::default().with_margin_px(f64::NAN).margin_px, 0.0);
}
