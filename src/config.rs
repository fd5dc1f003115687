use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::source::AssetSource;
use crate::compose::compositor::{CompositorOpts, DEFAULT_BRAND_ICON};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{BrandmarkError, BrandmarkResult};
use crate::layout::engine::LayoutParams;
use crate::render::plan::{IconFit, PlanOpts, StrokeStyle};

/// User-tunable look of the overlay, usually read from a JSON file.
///
/// Every field is optional in JSON; unknown fields are rejected.
///
/// ```json
/// { "layout": { "padding": 8 }, "icon_fit": "contain", "background": [0, 0, 0, 255] }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
    /// Overlay geometry.
    pub layout: LayoutParams,
    /// Icon placement inside slots.
    pub icon_fit: IconFit,
    /// Accent triangle outline.
    pub accent_stroke: StrokeStyle,
    /// Straight-alpha RGBA8 flood fill.
    pub background: [u8; 4],
    /// Straight-alpha RGBA8 card fill.
    pub card_fill: [u8; 4],
    /// Brand mark source: an assets-root-relative path, an absolute path, or a `data:` URI.
    pub brand_icon: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            layout: LayoutParams::default(),
            icon_fit: IconFit::default(),
            accent_stroke: StrokeStyle::default(),
            background: [255, 255, 255, 255],
            card_fill: [255, 255, 255, 255],
            brand_icon: DEFAULT_BRAND_ICON.to_owned(),
        }
    }
}

impl BrandConfig {
    /// Parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> BrandmarkResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json(text: &str) -> BrandmarkResult<Self> {
        let cfg: Self =
            serde_json::from_str(text).map_err(|e| BrandmarkError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that cannot produce a sensible overlay.
    pub fn validate(&self) -> BrandmarkResult<()> {
        self.layout.validate()?;
        let w = self.accent_stroke.width;
        if !w.is_finite() || w < 0.0 {
            return Err(BrandmarkError::validation(format!(
                "accent_stroke.width must be finite and >= 0, got {w}"
            )));
        }
        if self.brand_icon.trim().is_empty() {
            return Err(BrandmarkError::validation("brand_icon must be non-empty"));
        }
        Ok(())
    }

    /// Paint settings derived from this config.
    pub fn plan_opts(&self) -> PlanOpts {
        PlanOpts {
            background: Rgba8Premul::from_straight_array(self.background),
            card_fill: Rgba8Premul::from_straight_array(self.card_fill),
            accent_stroke: self.accent_stroke,
            icon_fit: self.icon_fit,
        }
    }

    /// Compositor options resolving relative assets against `assets_root`.
    pub fn compositor_opts(&self, assets_root: impl Into<PathBuf>) -> CompositorOpts {
        CompositorOpts {
            assets_root: assets_root.into(),
            cache: true,
            layout: self.layout,
            plan: self.plan_opts(),
            brand_icon: AssetSource::parse(&self.brand_icon),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
