use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{BrandmarkError, BrandmarkResult};

#[derive(Clone, Debug)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Debug)]
/// Prepared SVG asset represented as a parsed `usvg` tree.
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

/// A fully decoded, ready-to-paint image.
#[derive(Clone, Debug)]
pub enum Drawable {
    /// Decoded raster pixels.
    Raster(PreparedImage),
    /// Vector image, rasterized at the destination size when drawn.
    Svg(PreparedSvg),
}

impl Drawable {
    /// Intrinsic size in pixels.
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Raster(img) => (f64::from(img.width), f64::from(img.height)),
            Self::Svg(svg) => {
                let s = svg.tree.size();
                (f64::from(s.width()), f64::from(s.height()))
            }
        }
    }

    /// Short kind label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Raster(_) => "raster",
            Self::Svg(_) => "svg",
        }
    }
}

/// Decode bytes into a [`Drawable`].
///
/// Raster formats recognized by `image` win. Otherwise the bytes are parsed as SVG when the source
/// declared SVG or the content looks like XML markup.
pub fn decode_drawable(bytes: &[u8], declared_svg: bool) -> BrandmarkResult<Drawable> {
    if image::guess_format(bytes).is_ok() {
        return decode_image(bytes).map(Drawable::Raster);
    }
    if declared_svg || looks_like_svg(bytes) {
        return parse_svg(bytes).map(Drawable::Svg);
    }
    Err(BrandmarkError::validation("unrecognized image format"))
}

/// Decode a raster image into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> BrandmarkResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(BrandmarkError::validation("decoded image has zero size"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG markup with default `usvg` options.
pub fn parse_svg(bytes: &[u8]) -> BrandmarkResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();
    ["<?xml", "<svg", "<!--", "<!DOCTYPE", "<!doctype"]
        .iter()
        .any(|p| trimmed.starts_with(p))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
