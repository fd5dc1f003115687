use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::assets::decode::{Drawable, decode_drawable};
use crate::assets::source::{AssetSource, normalize_rel_path, parse_data_uri};
use crate::foundation::error::{BrandmarkError, BrandmarkResult};

/// Options for [`AssetLoader`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AssetLoaderOpts {
    /// Keep successfully decoded path sources for later loads.
    pub cache: bool,
}

/// Turns an [`AssetSource`] into a decoded [`Drawable`].
///
/// Every failure, fetch or decode, surfaces as [`BrandmarkError::Load`]. Nothing is retried.
pub struct AssetLoader {
    assets_root: PathBuf,
    opts: AssetLoaderOpts,
    cache: Mutex<HashMap<PathBuf, Drawable>>,
    decodes: AtomicU64,
}

impl AssetLoader {
    /// Create a loader resolving relative paths against `assets_root`.
    pub fn new(assets_root: impl Into<PathBuf>, opts: AssetLoaderOpts) -> Self {
        Self {
            assets_root: assets_root.into(),
            opts,
            cache: Mutex::new(HashMap::new()),
            decodes: AtomicU64::new(0),
        }
    }

    /// Root directory for relative path sources.
    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    /// Number of decodes performed so far (cache hits excluded).
    pub fn decode_count(&self) -> u64 {
        self.decodes.load(Ordering::Relaxed)
    }

    /// Fetch and decode one asset, going through the cache when it is enabled.
    pub async fn load(&self, source: &AssetSource) -> BrandmarkResult<Drawable> {
        self.load_with(source, self.opts.cache).await
    }

    /// Fetch and decode one asset, bypassing the cache in both directions.
    ///
    /// Used for per-request inputs whose bytes may change between renders at the same path.
    pub async fn load_uncached(&self, source: &AssetSource) -> BrandmarkResult<Drawable> {
        self.load_with(source, false).await
    }

    #[tracing::instrument(level = "debug", skip(self, source), fields(asset = %source))]
    async fn load_with(
        &self,
        source: &AssetSource,
        use_cache: bool,
    ) -> BrandmarkResult<Drawable> {
        let label = source.to_string();
        let fail = |reason: String| BrandmarkError::load(label.clone(), reason);

        let (bytes, cache_key) = match source {
            AssetSource::Path(p) => {
                let full = self.resolve_path(p).map_err(|e| fail(e.to_string()))?;
                if use_cache && let Some(hit) = self.cached(&full) {
                    tracing::debug!(path = %full.display(), "asset cache hit");
                    return Ok(hit);
                }
                let bytes = tokio::fs::read(&full)
                    .await
                    .map_err(|e| fail(format!("read '{}': {e}", full.display())))?;
                (bytes, Some(full))
            }
            AssetSource::DataUri(uri) => {
                let data = parse_data_uri(uri).map_err(|e| fail(e.to_string()))?;
                (data.bytes, None)
            }
            AssetSource::Bytes(b) => (b.to_vec(), None),
        };

        let drawable =
            decode_drawable(&bytes, source.declares_svg()).map_err(|e| fail(e.to_string()))?;
        self.decodes.fetch_add(1, Ordering::Relaxed);

        let (w, h) = drawable.size();
        tracing::debug!(kind = drawable.kind(), width = w, height = h, "asset decoded");

        if use_cache
            && let Some(key) = cache_key
        {
            self.cache
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(key, drawable.clone());
        }
        Ok(drawable)
    }

    fn resolve_path(&self, p: &Path) -> BrandmarkResult<PathBuf> {
        if p.is_absolute() {
            return Ok(p.to_path_buf());
        }
        let norm = normalize_rel_path(&p.to_string_lossy())?;
        Ok(self.assets_root.join(Path::new(&norm)))
    }

    fn cached(&self, full: &Path) -> Option<Drawable> {
        self.cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(full)
            .cloned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
