use super::*;

fn rect(top: f64, height: f64) -> ElementRect {
    ElementRect::new(top, height).unwrap()
}

#[test]
fn progress_endpoints_match_documented_scenario() {
    let vp = Viewport::new(800.0).unwrap();
    assert_eq!(scroll_progress(rect(800.0, 400.0), vp), 0.0);
    assert_eq!(scroll_progress(rect(-400.0, 400.0), vp), 1.0);
    assert!((scroll_progress(rect(200.0, 400.0), vp) - 0.5).abs() < 1e-9);
}

#[test]
fn progress_is_clamped_outside_the_travel_window() {
    let vp = Viewport::new(800.0).unwrap();
    assert_eq!(scroll_progress(rect(5_000.0, 400.0), vp), 0.0);
    assert_eq!(scroll_progress(rect(-5_000.0, 400.0), vp), 1.0);
}

#[test]
fn progress_is_monotonic_during_a_downward_scroll() {
    let vp = Viewport::new(720.0).unwrap();
    let mut prev = -1.0;
    let mut top = 1_500.0;
    while top > -1_500.0 {
        let p = scroll_progress(rect(top, 333.0), vp);
        assert!((0.0..=1.0).contains(&p));
        assert!(p >= prev);
        prev = p;
        top -= 17.0;
    }
}

#[test]
fn intersection_honors_margin_on_both_edges() {
    let vp = Viewport::new(800.0).unwrap();
    // Below the viewport but inside the 100px margin.
    assert!(intersects(rect(850.0, 400.0), vp, 100.0));
    assert!(!intersects(rect(900.0, 400.0), vp, 100.0));
    // Scrolled past the top: bottom edge at -50 is still inside the margin.
    assert!(intersects(rect(-450.0, 400.0), vp, 100.0));
    assert!(!intersects(rect(-500.0, 400.0), vp, 100.0));
}

#[test]
fn in_view_outlasts_full_progress() {
    let vp = Viewport::new(800.0).unwrap();
    let r = rect(-420.0, 400.0);
    assert_eq!(scroll_progress(r, vp), 1.0);
    assert!(intersects(r, vp, 100.0));
}

#[test]
fn invalid_geometry_is_rejected() {
    assert!(ElementRect::new(f64::NAN, 1.0).is_err());
    assert!(ElementRect::new(0.0, -1.0).is_err());
    assert!(Viewport::new(0.0).is_err());
}
