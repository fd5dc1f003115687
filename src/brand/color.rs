use sha2::{Digest, Sha256};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{BrandmarkError, BrandmarkResult};

/// Deterministic accent color derived from a project key, formatted as `#rrggbb`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccentColor(String);

impl AccentColor {
    /// Parse a `#rrggbb` string (case-insensitive; stored lowercase).
    pub fn parse(s: &str) -> BrandmarkResult<Self> {
        let hex_part = s
            .strip_prefix('#')
            .ok_or_else(|| BrandmarkError::validation("accent color must start with '#'"))?;
        if hex_part.len() != 6 || !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BrandmarkError::validation(format!(
                "accent color must be #rrggbb, got \"{s}\""
            )));
        }
        Ok(Self(format!("#{}", hex_part.to_ascii_lowercase())))
    }

    /// The `#rrggbb` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> [u8; 3] {
        let mut out = [0u8; 3];
        // `parse` and `derive_color` only ever store 6 validated hex digits.
        if hex::decode_to_slice(&self.0[1..], &mut out).is_err() {
            return [0, 0, 0];
        }
        out
    }

    /// Opaque premultiplied form used by the renderer.
    pub fn to_rgba8_premul(&self) -> Rgba8Premul {
        let [r, g, b] = self.rgb();
        Rgba8Premul::from_straight_rgba(r, g, b, 255)
    }
}

impl std::fmt::Display for AccentColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AccentColor {
    type Error = BrandmarkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccentColor> for String {
    fn from(value: AccentColor) -> Self {
        value.0
    }
}

/// Map an arbitrary project key to its accent color.
///
/// The key is lower-cased, hashed with SHA-256 over its UTF-8 bytes, and the first three digest
/// bytes become the RGB channels. The result is identical across runs and platforms for the same
/// case-folded key; it is a stable color seed, not a security primitive.
pub fn derive_color(identifier: &str) -> AccentColor {
    let normalized = identifier.to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    let hex_digest = hex::encode(digest);
    AccentColor(format!("#{}", &hex_digest[..6]))
}

#[cfg(test)]
#[path = "../../tests/unit/brand/color.rs"]
mod tests;
