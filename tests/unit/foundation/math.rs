use super::*;

#[test]
fn clamp01_bounds_and_nan() {
    assert_eq!(clamp01(-0.5), 0.0);
    assert_eq!(clamp01(1.5), 1.0);
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(0.25), 0.25);
}

#[test]
fn two_phase_reveal_breakpoints() {
    let scene = RevealWindow::new(0.0, 0.3);
    let w = RevealWindow::new(0.3, 0.8);
    assert_eq!(scene.alpha(0.0), 0.0);
    assert!((scene.alpha(0.15) - 0.5).abs() < 1e-9);
    assert_eq!(scene.alpha(0.3), 1.0);
    assert_eq!(w.alpha(0.3), 0.0);
    assert!((w.alpha(0.55) - 0.5).abs() < 1e-9);
    assert_eq!(w.alpha(0.8), 1.0);
    assert_eq!(w.alpha(0.95), 1.0);
}

#[test]
fn degenerate_window_is_a_step() {
    let w = RevealWindow::new(0.5, 0.5);
    assert_eq!(w.alpha(0.49), 0.0);
    assert_eq!(w.alpha(0.5), 1.0);
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn reveal_window_is_total_over_any_input() {
    let w = RevealWindow::new(0.3, 0.8);
    assert_eq!(w.alpha(f64::NAN), 0.0);
    assert_eq!(w.alpha(-4.0), 0.0);
    assert_eq!(w.alpha(f64::INFINITY), 1.0);
    assert_eq!(RevealWindow::new(0.0, 0.4).alpha(f64::NAN), 0.0);
}
