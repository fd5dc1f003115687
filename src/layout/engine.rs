use kurbo::{RoundedRect, RoundedRectRadii, Shape};

use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::error::{BrandmarkError, BrandmarkResult};

/// Proportions driving the overlay geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutParams {
    /// Card edge as a fraction of the matching canvas edge. Must be in `[0, 0.5)`.
    pub card_ratio: f64,
    /// Extra card margin around each icon slot, in pixels.
    pub padding: f64,
    /// Radius of the single rounded corner of each card, in pixels.
    pub card_radius: f64,
    /// Accent triangle legs as a fraction of the matching canvas edge. Must be in `[0, 1]`.
    pub accent_ratio: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            card_ratio: 1.0 / 3.0,
            padding: 5.0,
            card_radius: 20.0,
            accent_ratio: 1.0 / 3.0,
        }
    }
}

impl LayoutParams {
    /// Reject values the engine would otherwise have to clamp silently.
    pub fn validate(&self) -> BrandmarkResult<()> {
        let finite_non_neg = |name: &str, v: f64| {
            if !v.is_finite() || v < 0.0 {
                return Err(BrandmarkError::validation(format!(
                    "layout.{name} must be finite and >= 0, got {v}"
                )));
            }
            Ok(())
        };
        finite_non_neg("card_ratio", self.card_ratio)?;
        finite_non_neg("padding", self.padding)?;
        finite_non_neg("card_radius", self.card_radius)?;
        finite_non_neg("accent_ratio", self.accent_ratio)?;
        if self.card_ratio >= 0.5 {
            return Err(BrandmarkError::validation(
                "layout.card_ratio must be < 0.5 so the cards cannot overlap",
            ));
        }
        if self.accent_ratio > 1.0 {
            return Err(BrandmarkError::validation(
                "layout.accent_ratio must be <= 1",
            ));
        }
        Ok(())
    }
}

/// Per-corner radii in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadii {
    /// Top-left radius.
    pub top_left: f64,
    /// Top-right radius.
    pub top_right: f64,
    /// Bottom-right radius.
    pub bottom_right: f64,
    /// Bottom-left radius.
    pub bottom_left: f64,
}

impl CornerRadii {
    fn only_top_left(r: f64) -> Self {
        Self {
            top_left: r,
            ..Self::default()
        }
    }

    fn only_bottom_right(r: f64) -> Self {
        Self {
            bottom_right: r,
            ..Self::default()
        }
    }

    fn clamped_to(self, rect: Rect) -> Self {
        let max = (rect.width().min(rect.height()) * 0.5).max(0.0);
        let c = |v: f64| v.clamp(0.0, max);
        Self {
            top_left: c(self.top_left),
            top_right: c(self.top_right),
            bottom_right: c(self.bottom_right),
            bottom_left: c(self.bottom_left),
        }
    }
}

/// Axis-aligned pixel rectangle with optional rounded corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// Bounds in canvas pixels.
    pub rect: Rect,
    /// Corner radii; all zero for plain rectangles.
    pub radii: CornerRadii,
}

impl Region {
    fn plain(rect: Rect) -> Self {
        Self {
            rect,
            radii: CornerRadii::default(),
        }
    }

    fn rounded(rect: Rect, radii: CornerRadii) -> Self {
        Self {
            rect,
            radii: radii.clamped_to(rect),
        }
    }

    /// Corner points: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let r = self.rect;
        [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }

    /// Return `true` for zero-area regions.
    pub fn is_empty(&self) -> bool {
        self.rect.width() <= 0.0 || self.rect.height() <= 0.0
    }

    /// Outline of the region including its rounded corners.
    pub fn to_path(&self) -> BezPath {
        let radii = RoundedRectRadii::new(
            self.radii.top_left,
            self.radii.top_right,
            self.radii.bottom_right,
            self.radii.bottom_left,
        );
        RoundedRect::from_rect(self.rect, radii).to_path(0.1)
    }
}

/// Resolved overlay geometry for one canvas size.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Full canvas bounds.
    pub canvas: Rect,
    /// Closed triangle anchored at the top-right corner.
    pub corner_accent: BezPath,
    /// Card behind the brand icon, rounded at its bottom-right corner.
    pub top_left_card: Region,
    /// Card behind the framework badge, rounded at its top-left corner.
    pub bottom_right_card: Region,
    /// Brand icon destination.
    pub brand_slot: Region,
    /// Framework badge destination.
    pub framework_slot: Region,
}

impl Layout {
    /// Vertices of the accent triangle in drawing order.
    pub fn accent_vertices(&self) -> Vec<Point> {
        self.corner_accent
            .elements()
            .iter()
            .filter_map(|el| el.end_point())
            .collect()
    }

    /// Named rectangular regions, in z-order.
    pub fn regions(&self) -> [(&'static str, &Region); 4] {
        [
            ("top_left_card", &self.top_left_card),
            ("bottom_right_card", &self.bottom_right_card),
            ("brand_slot", &self.brand_slot),
            ("framework_slot", &self.framework_slot),
        ]
    }
}

/// Computes overlay regions as proportions of the canvas.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutEngine {
    params: LayoutParams,
}

impl LayoutEngine {
    /// Engine for `params`. Out-of-range values are clamped at compute time.
    pub fn new(params: LayoutParams) -> Self {
        Self { params }
    }

    /// Parameters in use.
    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Resolve every region for a `width × height` canvas.
    ///
    /// Never fails: zero, negative or non-finite sizes are treated as zero and produce degenerate
    /// (zero-area) regions. Every coordinate stays within the canvas.
    pub fn compute(&self, width: f64, height: f64) -> Layout {
        let w = non_neg(width);
        let h = non_neg(height);
        let r = non_neg(self.params.card_ratio).min(0.5);
        let a = non_neg(self.params.accent_ratio).min(1.0);

        // Cap the padding so the two cards meet at most on the canvas midlines.
        let p = non_neg(self.params.padding)
            .min(w * (0.5 - r))
            .min(h * (0.5 - r));

        let cw = w * r;
        let ch = h * r;

        let top_left_rect = Rect::new(0.0, 0.0, (cw + p).min(w), (ch + p).min(h));
        let bottom_right_rect = Rect::new((w - cw - p).max(0.0), (h - ch - p).max(0.0), w, h);

        let radius = non_neg(self.params.card_radius);
        let top_left_card =
            Region::rounded(top_left_rect, CornerRadii::only_bottom_right(radius));
        let bottom_right_card =
            Region::rounded(bottom_right_rect, CornerRadii::only_top_left(radius));

        let brand_slot = Region::plain(Rect::new(0.0, 0.0, cw, ch));
        let framework_slot = Region::plain(Rect::new((w - cw).max(0.0), (h - ch).max(0.0), w, h));

        let mut corner_accent = BezPath::new();
        corner_accent.move_to(Point::new((w - w * a).max(0.0), 0.0));
        corner_accent.line_to(Point::new(w, 0.0));
        corner_accent.line_to(Point::new(w, h * a));
        corner_accent.close_path();

        Layout {
            canvas: Rect::new(0.0, 0.0, w, h),
            corner_accent,
            top_left_card,
            bottom_right_card,
            brand_slot,
            framework_slot,
        }
    }
}

fn non_neg(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
