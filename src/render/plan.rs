use crate::assets::decode::Drawable;
use crate::compose::context::{IconSlot, RenderContext};
use crate::foundation::core::{BezPath, Rect, Rgba8Premul};
use crate::layout::engine::{Layout, Region};

/// How an icon is mapped into its slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconFit {
    /// Fill the whole slot, ignoring the icon's aspect ratio.
    #[default]
    Stretch,
    /// Largest aspect-preserving size that fits, centered in the slot.
    Contain,
}

impl IconFit {
    /// Destination rectangle for an image of `size` drawn into `slot`.
    pub fn place(self, slot: Rect, size: (f64, f64)) -> Rect {
        match self {
            Self::Stretch => slot,
            Self::Contain => {
                let (iw, ih) = size;
                if iw <= 0.0 || ih <= 0.0 || slot.width() <= 0.0 || slot.height() <= 0.0 {
                    return Rect::from_origin_size(slot.center(), (0.0, 0.0));
                }
                let scale = (slot.width() / iw).min(slot.height() / ih);
                let (w, h) = (iw * scale, ih * scale);
                let c = slot.center();
                Rect::new(c.x - w * 0.5, c.y - h * 0.5, c.x + w * 0.5, c.y + h * 0.5)
            }
        }
    }
}

/// Outline drawn around the accent triangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrokeStyle {
    /// Line width in pixels; `0` disables the outline.
    pub width: f64,
    /// Straight-alpha RGBA8 color.
    pub color: [u8; 4],
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: [0, 0, 0, 255],
        }
    }
}

/// Paint settings that do not depend on the request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanOpts {
    /// Flood fill drawn before anything else.
    pub background: Rgba8Premul,
    /// Fill of both cards.
    pub card_fill: Rgba8Premul,
    /// Accent outline.
    pub accent_stroke: StrokeStyle,
    /// Icon placement inside slots.
    pub icon_fit: IconFit,
}

impl Default for PlanOpts {
    fn default() -> Self {
        Self {
            background: Rgba8Premul::white(),
            card_fill: Rgba8Premul::white(),
            accent_stroke: StrokeStyle::default(),
            icon_fit: IconFit::default(),
        }
    }
}

/// Named z-layers, bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Flood fill.
    Background,
    /// Base image, full canvas.
    BaseImage,
    /// Accent triangle fill.
    AccentFill,
    /// Accent triangle outline.
    AccentStroke,
    /// Top-left card.
    TopLeftCard,
    /// Bottom-right card.
    BottomRightCard,
    /// Brand icon.
    BrandIcon,
    /// Framework badge.
    FrameworkIcon,
}

impl Layer {
    /// Stable snake_case name for logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::BaseImage => "base_image",
            Self::AccentFill => "accent_fill",
            Self::AccentStroke => "accent_stroke",
            Self::TopLeftCard => "top_left_card",
            Self::BottomRightCard => "bottom_right_card",
            Self::BrandIcon => "brand_icon",
            Self::FrameworkIcon => "framework_icon",
        }
    }
}

/// One backend-agnostic draw operation.
#[derive(Clone, Debug)]
pub enum DrawOp {
    /// Fill the whole surface.
    Clear {
        /// Fill color.
        color: Rgba8Premul,
    },
    /// Draw an image stretched into `dst`.
    Image {
        /// Decoded image.
        image: Drawable,
        /// Destination in canvas pixels.
        dst: Rect,
    },
    /// Fill a closed path.
    FillPath {
        /// Path in canvas pixels.
        path: BezPath,
        /// Fill color.
        color: Rgba8Premul,
    },
    /// Stroke a path.
    StrokePath {
        /// Path in canvas pixels.
        path: BezPath,
        /// Stroke color.
        color: Rgba8Premul,
        /// Line width in pixels.
        width: f64,
    },
    /// Fill a (possibly rounded) region.
    FillRegion {
        /// Region in canvas pixels.
        region: Region,
        /// Fill color.
        color: Rgba8Premul,
    },
}

/// A draw operation tagged with its layer.
#[derive(Clone, Debug)]
pub struct DrawStep {
    /// Layer the operation belongs to.
    pub layer: Layer,
    /// Operation to execute.
    pub op: DrawOp,
}

/// Ordered draw operations for one render. Executed strictly front to back.
#[derive(Clone, Debug, Default)]
pub struct DrawPlan {
    /// Steps in z-order.
    pub steps: Vec<DrawStep>,
}

impl DrawPlan {
    fn push(&mut self, layer: Layer, op: DrawOp) {
        self.steps.push(DrawStep { layer, op });
    }

    /// Layer sequence of the plan.
    pub fn layers(&self) -> Vec<Layer> {
        self.steps.iter().map(|s| s.layer).collect()
    }

    /// Layer names in z-order.
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.layer.name()).collect()
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Return `true` when the plan draws nothing.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Turn a resolved layout and a prepared render into the fixed z-order:
/// background, base image, accent fill and outline, both cards, brand icon, framework icon.
///
/// The framework layer is omitted when the context carries no framework icon.
pub fn build_plan(layout: &Layout, ctx: RenderContext, opts: &PlanOpts) -> DrawPlan {
    let (base, mut icons, accent) = ctx.into_parts();
    let mut plan = DrawPlan::default();

    plan.push(
        Layer::Background,
        DrawOp::Clear {
            color: opts.background,
        },
    );
    plan.push(
        Layer::BaseImage,
        DrawOp::Image {
            image: base,
            dst: layout.canvas,
        },
    );

    plan.push(
        Layer::AccentFill,
        DrawOp::FillPath {
            path: layout.corner_accent.clone(),
            color: accent.to_rgba8_premul(),
        },
    );
    let stroke = opts.accent_stroke;
    if stroke.width.is_finite() && stroke.width > 0.0 {
        plan.push(
            Layer::AccentStroke,
            DrawOp::StrokePath {
                path: layout.corner_accent.clone(),
                color: Rgba8Premul::from_straight_array(stroke.color),
                width: stroke.width,
            },
        );
    }

    plan.push(
        Layer::TopLeftCard,
        DrawOp::FillRegion {
            region: layout.top_left_card,
            color: opts.card_fill,
        },
    );
    plan.push(
        Layer::BottomRightCard,
        DrawOp::FillRegion {
            region: layout.bottom_right_card,
            color: opts.card_fill,
        },
    );

    for (slot, layer, region) in [
        (IconSlot::Brand, Layer::BrandIcon, &layout.brand_slot),
        (IconSlot::Framework, Layer::FrameworkIcon, &layout.framework_slot),
    ] {
        let Some(image) = icons.remove(&slot) else {
            continue;
        };
        let dst = opts.icon_fit.place(region.rect, image.size());
        plan.push(layer, DrawOp::Image { image, dst });
    }

    plan
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
