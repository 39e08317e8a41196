//! Conversion settings and their JSON configuration file.

use crate::ramp::Ramp;
use crate::{PicasciiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lower end of the resolution slider offered to users.
pub const MIN_UI_RESOLUTION: f64 = 0.05;
/// Upper end of the resolution slider offered to users.
pub const MAX_UI_RESOLUTION: f64 = 0.30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionSettings {
    /// Fraction of source columns that become sample columns, in (0, 1].
    pub resolution: f64,
    #[serde(alias = "char_set")]
    pub char_set: Ramp,
    pub inverted: bool,
    /// Luma brightness and white glyphs when set; perceived brightness and
    /// per-glyph color otherwise.
    pub grayscale: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self { resolution: 0.15, char_set: Ramp::Standard, inverted: false, grayscale: true }
    }
}

impl ConversionSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 || self.resolution > 1.0 {
            return Err(PicasciiError::InvalidSettings(format!(
                "resolution must be in (0, 1], got {}",
                self.resolution
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}
