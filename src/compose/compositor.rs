use std::path::PathBuf;
use std::sync::Mutex;

use crate::assets::loader::{AssetLoader, AssetLoaderOpts};
use crate::assets::source::AssetSource;
use crate::brand::color::{AccentColor, derive_color};
use crate::catalog::registry::FrameworkRegistry;
use crate::compose::context::{IconSlot, RenderContext};
use crate::foundation::error::{BrandmarkError, BrandmarkResult};
use crate::layout::engine::{LayoutEngine, LayoutParams};
use crate::render::cpu::CpuBackend;
use crate::render::plan::{Layer, PlanOpts, build_plan};
use crate::render::surface::{CanvasHandle, GenerationToken};

/// Default brand mark, relative to the assets root.
pub const DEFAULT_BRAND_ICON: &str = "overlay/lightning.svg";

/// Options for [`Compositor`].
#[derive(Clone, Debug)]
pub struct CompositorOpts {
    /// Root directory for relative asset paths (brand and framework icons).
    pub assets_root: PathBuf,
    /// Keep decoded icons (brand mark and framework badges) across renders. The request's base
    /// image is always read fresh.
    pub cache: bool,
    /// Overlay geometry.
    pub layout: LayoutParams,
    /// Paint settings.
    pub plan: PlanOpts,
    /// Brand mark drawn into the top-left card.
    pub brand_icon: AssetSource,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("assets"),
            cache: true,
            layout: LayoutParams::default(),
            plan: PlanOpts::default(),
            brand_icon: AssetSource::path(DEFAULT_BRAND_ICON),
        }
    }
}

/// One request to paint a branded image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    /// User-supplied base image. Required.
    pub base_image: Option<AssetSource>,
    /// Arbitrary project identifier the accent color is derived from. May be empty.
    pub project_key: String,
    /// Framework id looked up in the catalog. Unknown ids omit the badge.
    pub framework: String,
}

impl RenderRequest {
    /// Request with a base image.
    pub fn new(
        base_image: impl Into<AssetSource>,
        project_key: impl Into<String>,
        framework: impl Into<String>,
    ) -> Self {
        Self {
            base_image: Some(base_image.into()),
            project_key: project_key.into(),
            framework: framework.into(),
        }
    }
}

/// What a finished render drew.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSummary {
    /// Generation the render ran as.
    pub generation: GenerationToken,
    /// Accent color used for the corner triangle.
    pub accent: AccentColor,
    /// Layers drawn, bottom to top.
    pub layers: Vec<Layer>,
    /// Whether the framework badge was drawn.
    pub framework_drawn: bool,
}

/// Result of [`Compositor::render`].
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    /// The surface now shows this render.
    Drawn(RenderSummary),
    /// A newer render started on the same handle before this one reached its draw phase.
    /// The surface was not touched.
    ///
    /// Starting is enough to supersede: if the newer render later fails (for example with
    /// [`BrandmarkError::Load`]), this render is still discarded and the surface keeps whatever
    /// it showed before both.
    Superseded,
}

impl RenderOutcome {
    /// Summary of a drawn render.
    pub fn summary(&self) -> Option<&RenderSummary> {
        match self {
            Self::Drawn(s) => Some(s),
            Self::Superseded => None,
        }
    }

    /// Return `true` when the render was discarded.
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

/// Orchestrates one branded render: validate, load concurrently, derive the accent, lay out,
/// then draw the fixed layer stack onto a [`CanvasHandle`].
///
/// A compositor is cheap to share behind an `Arc`; renders on different handles run
/// independently, renders on the same handle are serialized by its surface lock.
pub struct Compositor {
    loader: AssetLoader,
    registry: FrameworkRegistry,
    layout: LayoutEngine,
    plan_opts: PlanOpts,
    brand_icon: AssetSource,
    backend: Mutex<CpuBackend>,
}

impl Compositor {
    /// Build a compositor with the builtin framework catalog.
    pub fn new(opts: CompositorOpts) -> BrandmarkResult<Self> {
        opts.layout.validate()?;
        Ok(Self {
            loader: AssetLoader::new(opts.assets_root, AssetLoaderOpts { cache: opts.cache }),
            registry: FrameworkRegistry::builtin(),
            layout: LayoutEngine::new(opts.layout),
            plan_opts: opts.plan,
            brand_icon: opts.brand_icon,
            backend: Mutex::new(CpuBackend::new()),
        })
    }

    /// Replace the framework catalog.
    pub fn with_registry(mut self, registry: FrameworkRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Framework catalog in use.
    pub fn registry(&self) -> &FrameworkRegistry {
        &self.registry
    }

    /// Asset loader in use.
    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }

    /// Paint `request` onto `canvas`.
    ///
    /// Fails with [`BrandmarkError::MissingInput`] before loading anything when no base image is
    /// given, and with [`BrandmarkError::Load`] when any asset cannot be fetched or decoded; in
    /// both cases the surface is left as it was.
    #[tracing::instrument(
        level = "info",
        skip(self, canvas, request),
        fields(project = %request.project_key, framework = %request.framework)
    )]
    pub async fn render(
        &self,
        canvas: &CanvasHandle,
        request: RenderRequest,
    ) -> BrandmarkResult<RenderOutcome> {
        let Some(base_src) = request.base_image.as_ref() else {
            return Err(BrandmarkError::missing_input("base image is required"));
        };

        let token = canvas.begin_generation();

        let framework_src = self.registry.resolve_icon(&request.framework);
        if framework_src.is_none() {
            tracing::warn!(framework = %request.framework, "unknown framework, badge omitted");
        }

        let (base, brand, framework) = tokio::try_join!(
            self.loader.load_uncached(base_src),
            self.loader.load(&self.brand_icon),
            async {
                match framework_src {
                    Some(src) => self.loader.load(src).await.map(Some),
                    None => Ok(None),
                }
            },
        )?;

        let accent = derive_color(&request.project_key);

        let mut surface = canvas.lock().await;
        if !canvas.is_current(token) {
            tracing::warn!(generation = token.0, "render superseded, discarding");
            return Ok(RenderOutcome::Superseded);
        }

        let c = surface.canvas();
        let layout = self.layout.compute(f64::from(c.width), f64::from(c.height));
        let ctx = RenderContext::new(base, brand, framework, accent.clone());
        let framework_drawn = ctx.icon(IconSlot::Framework).is_some();
        let plan = build_plan(&layout, ctx, &self.plan_opts);

        self.backend
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .execute(&plan, &mut surface)?;

        tracing::info!(
            accent = %accent,
            layers = plan.len(),
            framework_drawn,
            "render finished"
        );
        Ok(RenderOutcome::Drawn(RenderSummary {
            generation: token,
            accent,
            layers: plan.layers(),
            framework_drawn,
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
