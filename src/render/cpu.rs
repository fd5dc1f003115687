use std::sync::Arc;

use crate::assets::decode::Drawable;
use crate::assets::svg_raster::{rasterize_svg_to_premul_rgba8, svg_raster_size};
use crate::foundation::core::{Affine, BezPath, Rect, Rgba8Premul};
use crate::foundation::error::{BrandmarkError, BrandmarkResult};
use crate::render::plan::{DrawOp, DrawPlan};
use crate::render::surface::Surface;

/// CPU backend powered by `vello_cpu` for vector rasterization.
///
/// Executes a [`DrawPlan`] strictly in order and writes the result into a [`Surface`]. The render
/// context is reused across plans of the same size.
#[derive(Default)]
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
}

struct ImagePaint {
    paint: vello_cpu::Image,
    w: f64,
    h: f64,
}

impl CpuBackend {
    /// Backend with no cached render context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw every step of `plan` onto `surface`, replacing its previous pixels.
    pub fn execute(&mut self, plan: &DrawPlan, surface: &mut Surface) -> BrandmarkResult<()> {
        let canvas = surface.canvas();
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| BrandmarkError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| BrandmarkError::render("surface height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();

        let full = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
        for step in &plan.steps {
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

            match &step.op {
                DrawOp::Clear { color } => {
                    ctx.set_paint(to_cpu_color(*color));
                    ctx.fill_rect(&rect_to_cpu(full));
                }
                DrawOp::Image { image, dst } => {
                    let Some(p) = image_paint(image, *dst)? else {
                        continue;
                    };
                    let tr = Affine::translate((dst.x0, dst.y0))
                        * Affine::scale_non_uniform(dst.width() / p.w, dst.height() / p.h);
                    ctx.set_transform(affine_to_cpu(tr));
                    ctx.set_paint(p.paint);
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, p.w, p.h));
                }
                DrawOp::FillPath { path, color } => {
                    ctx.set_paint(to_cpu_color(*color));
                    ctx.fill_path(&bezpath_to_cpu(path));
                }
                DrawOp::StrokePath { path, color, width } => {
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
                    ctx.set_paint(to_cpu_color(*color));
                    ctx.stroke_path(&bezpath_to_cpu(path));
                }
                DrawOp::FillRegion { region, color } => {
                    if region.is_empty() {
                        continue;
                    }
                    ctx.set_paint(to_cpu_color(*color));
                    ctx.fill_path(&bezpath_to_cpu(&region.to_path()));
                }
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);
        self.ctx = Some(ctx);

        tracing::debug!(steps = plan.len(), width, height, "draw plan executed");
        Ok(())
    }
}

fn image_paint(image: &Drawable, dst: Rect) -> BrandmarkResult<Option<ImagePaint>> {
    if dst.width() <= 0.0 || dst.height() <= 0.0 {
        return Ok(None);
    }
    match image {
        Drawable::Raster(img) => {
            let paint = rgba_premul_to_image(&img.rgba8_premul, img.width, img.height)?;
            Ok(Some(ImagePaint {
                paint,
                w: f64::from(img.width),
                h: f64::from(img.height),
            }))
        }
        Drawable::Svg(svg) => {
            let Some((w, h)) = svg_raster_size(dst.width(), dst.height())? else {
                return Ok(None);
            };
            let rgba = rasterize_svg_to_premul_rgba8(&svg.tree, w, h)?;
            let paint = rgba_premul_to_image(&rgba, w, h)?;
            Ok(Some(ImagePaint {
                paint,
                w: f64::from(w),
                h: f64::from(h),
            }))
        }
    }
}

fn to_cpu_color(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_straight_array();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BrandmarkResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BrandmarkError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BrandmarkError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BrandmarkError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let opaque = bytes.chunks_exact(4).all(|px| px[3] == 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, !opaque,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> BrandmarkResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
