use std::collections::BTreeMap;

use crate::assets::decode::Drawable;
use crate::brand::color::AccentColor;

/// Icon positions on the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IconSlot {
    /// Brand mark in the top-left card.
    Brand,
    /// Framework badge in the bottom-right card.
    Framework,
}

/// Everything one render needs after its loads settled: decoded images and the accent color.
///
/// Built once per generation and consumed by plan building.
#[derive(Clone, Debug)]
pub struct RenderContext {
    base: Drawable,
    icons: BTreeMap<IconSlot, Drawable>,
    accent: AccentColor,
}

impl RenderContext {
    /// Bundle a render. `framework` is `None` when the requested framework has no badge.
    pub fn new(
        base: Drawable,
        brand: Drawable,
        framework: Option<Drawable>,
        accent: AccentColor,
    ) -> Self {
        let mut icons = BTreeMap::new();
        icons.insert(IconSlot::Brand, brand);
        if let Some(fw) = framework {
            icons.insert(IconSlot::Framework, fw);
        }
        Self {
            base,
            icons,
            accent,
        }
    }

    /// Decoded base image.
    pub fn base(&self) -> &Drawable {
        &self.base
    }

    /// Decoded icon for `slot`, if one was requested.
    pub fn icon(&self, slot: IconSlot) -> Option<&Drawable> {
        self.icons.get(&slot)
    }

    /// Derived accent color.
    pub fn accent(&self) -> &AccentColor {
        &self.accent
    }

    pub(crate) fn into_parts(self) -> (Drawable, BTreeMap<IconSlot, Drawable>, AccentColor) {
        (self.base, self.icons, self.accent)
    }
}
