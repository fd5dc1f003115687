use super::*;

#[test]
fn raster_size_rounds_up_and_skips_empty() {
    assert_eq!(svg_raster_size(10.2, 3.0).unwrap(), Some((11, 3)));
    assert_eq!(svg_raster_size(0.0, 10.0).unwrap(), None);
    assert!(svg_raster_size(f64::NAN, 1.0).is_err());
    assert!(svg_raster_size(100_000.0, 1.0).is_err());
}

#[test]
fn rasterizes_filled_rect_opaque() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect width="2" height="2" fill="#ff0000"/></svg>"##;
    let tree = usvg::Tree::from_data(svg, &usvg::Options::default()).unwrap();
    let px = rasterize_svg_to_premul_rgba8(&tree, 4, 4).unwrap();
    assert_eq!(px.len(), 4 * 4 * 4);
    assert_eq!(&px[0..4], &[255, 0, 0, 255]);
}
