use crate::foundation::error::{BrandmarkError, BrandmarkResult};

const MAX_DIM: u32 = 16_384;

/// Pixel size to rasterize an SVG at so it lands crisp in a destination box of `dst_w × dst_h`.
///
/// Returns `None` for empty destinations; nothing needs to be drawn then.
pub(crate) fn svg_raster_size(dst_w: f64, dst_h: f64) -> BrandmarkResult<Option<(u32, u32)>> {
    if !dst_w.is_finite() || !dst_h.is_finite() {
        return Err(BrandmarkError::render("svg destination size is not finite"));
    }
    if dst_w < 0.5 || dst_h < 0.5 {
        return Ok(None);
    }
    let w = dst_w.ceil() as u32;
    let h = dst_h.ceil() as u32;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(BrandmarkError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok(Some((w, h)))
}

/// Rasterize `tree` stretched to exactly `width × height`, returning premultiplied RGBA8.
pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> BrandmarkResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BrandmarkError::render("failed to allocate svg pixmap"))?;

    let size = tree.size();
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg_raster.rs"]
mod tests;
