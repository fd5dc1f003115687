use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, [100, 50, 200, 128]);

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_drawable_picks_raster_for_png() {
    let d = decode_drawable(&png_bytes(3, 2, [1, 2, 3, 255]), false).unwrap();
    assert_eq!(d.kind(), "raster");
    assert_eq!(d.size(), (3.0, 2.0));
}

#[test]
fn decode_drawable_sniffs_svg_markup() {
    let svg = br#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4"><rect width="8" height="4"/></svg>"#;
    let d = decode_drawable(svg, false).unwrap();
    assert_eq!(d.kind(), "svg");
    assert_eq!(d.size(), (8.0, 4.0));
}

#[test]
fn decode_drawable_sniffs_svg_with_doctype() {
    let svg = br#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" width="6" height="3"><rect width="6" height="3"/></svg>"#;
    let d = decode_drawable(svg, false).unwrap();
    assert_eq!(d.kind(), "svg");
    assert_eq!(d.size(), (6.0, 3.0));
}

#[test]
fn decode_drawable_rejects_garbage() {
    assert!(decode_drawable(b"definitely not an image", false).is_err());
    assert!(decode_drawable(&[0x89, b'P', b'N', b'G', 0, 0, 0], false).is_err());
    assert!(decode_drawable(b"<svg", true).is_err());
}

#[test]
fn decode_svg_parse_ok_and_err() {
    let ok = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    parse_svg(ok).unwrap();

    let bad = br#"<svg"#;
    assert!(parse_svg(bad).is_err());
}
