//! Brandmark paints branded composite images.
//!
//! A render takes a user-supplied base image, a project key and a framework id, and draws on top
//! of the base image:
//!
//! - a corner accent triangle whose color is derived deterministically from the project key,
//! - two white cards in opposite corners,
//! - the brand mark and the framework badge inside those cards.
//!
//! The entry point is [`Compositor::render`], which paints onto a shareable [`CanvasHandle`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod brand;
mod catalog;
mod compose;
mod config;
mod foundation;
mod layout;
mod render;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{BrandmarkError, BrandmarkResult};

pub use crate::assets::decode::{Drawable, PreparedImage, PreparedSvg, decode_drawable};
pub use crate::assets::loader::{AssetLoader, AssetLoaderOpts};
pub use crate::assets::source::{AssetSource, to_data_uri};
pub use crate::brand::color::{AccentColor, derive_color};
pub use crate::catalog::registry::{FrameworkEntry, FrameworkRegistry};
pub use crate::compose::compositor::{
    Compositor, CompositorOpts, DEFAULT_BRAND_ICON, RenderOutcome, RenderRequest, RenderSummary,
};
pub use crate::compose::context::{IconSlot, RenderContext};
pub use crate::config::BrandConfig;
pub use crate::layout::engine::{CornerRadii, Layout, LayoutEngine, LayoutParams, Region};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::plan::{
    DrawOp, DrawPlan, DrawStep, IconFit, Layer, PlanOpts, StrokeStyle, build_plan,
};
pub use crate::render::surface::{CanvasHandle, FrameRGBA, GenerationToken, Surface};
