use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine as _;

use crate::foundation::error::{BrandmarkError, BrandmarkResult};

/// Where the bytes of an asset come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetSource {
    /// A file path. Relative paths resolve against the loader's assets root.
    Path(PathBuf),
    /// An inline `data:` URI.
    DataUri(String),
    /// Raw bytes handed over by the caller (e.g. an uploaded file).
    Bytes(Arc<[u8]>),
}

impl AssetSource {
    /// Build a [`AssetSource::Path`] source.
    pub fn path(p: impl Into<PathBuf>) -> Self {
        Self::Path(p.into())
    }

    /// Build a [`AssetSource::Bytes`] source.
    pub fn bytes(b: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(b.into())
    }

    /// Build a source from a string, treating `data:` prefixes as inline URIs.
    pub fn parse(s: &str) -> Self {
        if s.starts_with("data:") {
            Self::DataUri(s.to_owned())
        } else {
            Self::Path(PathBuf::from(s))
        }
    }

    /// Whether the source itself declares SVG content (file extension or data URI mime).
    pub(crate) fn declares_svg(&self) -> bool {
        match self {
            Self::Path(p) => p
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("svg")),
            Self::DataUri(uri) => parse_data_uri(uri)
                .map(|d| d.mime.eq_ignore_ascii_case("image/svg+xml"))
                .unwrap_or(false),
            Self::Bytes(_) => false,
        }
    }
}

impl std::fmt::Display for AssetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::DataUri(uri) => {
                let head = uri.split(',').next().unwrap_or("data:");
                write!(f, "{head},<{} chars>", uri.len().saturating_sub(head.len() + 1))
            }
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<PathBuf> for AssetSource {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for AssetSource {
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<Vec<u8>> for AssetSource {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value.into())
    }
}

/// Decoded payload of a `data:` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DataUri {
    /// Declared media type; `text/plain` when omitted.
    pub(crate) mime: String,
    pub(crate) bytes: Vec<u8>,
}

/// Parse `data:[<mime>][;param]*[;base64],<payload>`.
///
/// Base64 payloads use the standard alphabet. Other payloads are taken verbatim as UTF-8 bytes.
pub(crate) fn parse_data_uri(uri: &str) -> BrandmarkResult<DataUri> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| BrandmarkError::validation("data uri must start with 'data:'"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| BrandmarkError::validation("data uri is missing ','"))?;

    let mut params = header.split(';');
    let mime = match params.next() {
        Some(m) if !m.trim().is_empty() => m.trim().to_owned(),
        _ => "text/plain".to_owned(),
    };
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| BrandmarkError::validation(format!("invalid base64 payload: {e}")))?
    } else {
        payload.as_bytes().to_vec()
    };

    Ok(DataUri { mime, bytes })
}

/// Encode bytes as a base64 `data:` URI.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Normalize and validate asset-root-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> BrandmarkResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BrandmarkError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(BrandmarkError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BrandmarkError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BrandmarkError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
