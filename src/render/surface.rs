use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{BrandmarkError, BrandmarkResult};

/// A rendered image as RGBA8 pixels.
///
/// Surfaces store **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` as stored, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Return `true` when every byte is zero (nothing has been drawn).
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let c = Rgba8Premul {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            };
            out.extend_from_slice(&c.to_straight_array());
        }
        out
    }

    /// Encode the frame as PNG at `path`, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> BrandmarkResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Pixel target the compositor paints into.
pub struct Surface {
    canvas: Canvas,
    pub(crate) pixmap: vello_cpu::Pixmap,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> BrandmarkResult<Self> {
        let canvas = Canvas::new(width, height)?;
        let w: u16 = width
            .try_into()
            .map_err(|_| BrandmarkError::validation("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| BrandmarkError::validation("surface height exceeds u16"))?;
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Copy the current pixels out.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

/// Identifies one render attempt on a [`CanvasHandle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenerationToken(pub u64);

struct CanvasShared {
    canvas: Canvas,
    surface: tokio::sync::Mutex<Surface>,
    generation: AtomicU64,
}

/// Shareable handle to one drawing surface.
///
/// Draw phases on the same handle never interleave: they hold the surface lock for their whole
/// z-ordered sequence. Each render takes a [`GenerationToken`] when it starts; a render whose
/// token is no longer the latest when its loads finish is discarded instead of drawn.
#[derive(Clone)]
pub struct CanvasHandle {
    inner: Arc<CanvasShared>,
}

impl CanvasHandle {
    /// Allocate a `width × height` surface behind a new handle.
    pub fn new(width: u32, height: u32) -> BrandmarkResult<Self> {
        let surface = Surface::new(width, height)?;
        Ok(Self {
            inner: Arc::new(CanvasShared {
                canvas: surface.canvas(),
                surface: tokio::sync::Mutex::new(surface),
                generation: AtomicU64::new(0),
            }),
        })
    }

    /// Surface dimensions.
    pub fn canvas(&self) -> Canvas {
        self.inner.canvas
    }

    /// Start a new generation, superseding every earlier one.
    pub fn begin_generation(&self) -> GenerationToken {
        GenerationToken(self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` belongs to the most recently started generation.
    pub fn is_current(&self, token: GenerationToken) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == token.0
    }

    /// Exclusive access to the surface.
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, Surface> {
        self.inner.surface.lock().await
    }

    /// Copy the current pixels out.
    pub async fn snapshot(&self) -> FrameRGBA {
        self.lock().await.snapshot()
    }
}

impl std::fmt::Debug for CanvasHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasHandle")
            .field("canvas", &self.inner.canvas)
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
