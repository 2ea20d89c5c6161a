use super::*;

#[test]
fn backing_px_scales_by_dpr() {
    assert_eq!(backing_px(800.0, 1.0), 800);
    assert_eq!(backing_px(800.0, 2.0), 1600);
    assert_eq!(backing_px(333.0, 1.5), 500);
}

#[test]
fn backing_px_shrinks_below_unit_dpr() {
    assert_eq!(backing_px(800.0, 0.5), 400);
    assert_eq!(backing_px(1200.0, 0.9), 1080);
}

#[test]
fn backing_px_rounds_to_nearest() {
    assert_eq!(backing_px(100.4, 1.0), 100);
    assert_eq!(backing_px(100.6, 1.0), 101);
}

#[test]
fn backing_px_rejects_degenerate_sizes() {
    assert_eq!(backing_px(0.0, 2.0), 0);
    assert_eq!(backing_px(-10.0, 1.0), 0);
    assert_eq!(backing_px(f64::NAN, 1.0), 0);
    assert_eq!(backing_px(f64::INFINITY, 1.0), 0);
}
