use super::*;

#[test]
fn canvas_rejects_zero_and_oversized_edges() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(Canvas::MAX_DIM + 1, 10).is_err());

    let c = Canvas::new(500, 300).unwrap();
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 500.0, 300.0));
}

#[test]
fn rgba_premul_conversion() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.g, 64);
    assert_eq!(c.b, 0);
    assert_eq!(Rgba8Premul::white(), Rgba8Premul::from_straight_array([255; 4]));
}

#[test]
fn straight_roundtrip_is_exact_for_opaque_colors() {
    let c = Rgba8Premul::from_straight_rgba(0x82, 0x2b, 0x33, 255);
    assert_eq!(c.to_straight_array(), [0x82, 0x2b, 0x33, 255]);
    assert_eq!(Rgba8Premul::transparent().to_straight_array(), [0, 0, 0, 0]);
}
