//! Tunable constants of the interpolation and zone builders.

use std::path::Path;

use crate::error::{GeometryError, Result};

/// Configuration shared by the centerline, offset, pairing and paired-polygon
/// builders. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeometryConfig {
    /// PK spacing of interpolated centerline samples.
    pub pk_step: f64,
    /// Tracks whose average positions are closer than this are paired.
    pub adjacency_threshold: f64,
    /// Number of intervals sampled across a paired overlap.
    pub paired_samples: usize,
    /// Width used for zones without an explicit one.
    pub default_zone_width: f64,
    /// Gap left on each side of the median between two paired polygons.
    pub median_separation: f64,
    /// Scale applied to the half-width of single-track borders.
    pub offset_multiplier: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            pk_step: 0.1,
            adjacency_threshold: 200.0,
            paired_samples: 30,
            default_zone_width: 20.0,
            median_separation: 0.5,
            offset_multiplier: 1.0,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GeometryError::InvalidConfig {
            field,
            reason: format!("expected a positive finite number, got {value}"),
        });
    }
    Ok(())
}

impl GeometryConfig {
    /// Checks every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<()> {
        positive("pkStep", self.pk_step)?;
        positive("adjacencyThreshold", self.adjacency_threshold)?;
        positive("defaultZoneWidth", self.default_zone_width)?;
        positive("offsetMultiplier", self.offset_multiplier)?;
        if self.paired_samples == 0 {
            return Err(GeometryError::InvalidConfig {
                field: "pairedSamples",
                reason: "must be at least 1".into(),
            });
        }
        if !self.median_separation.is_finite() || self.median_separation < 0.0 {
            return Err(GeometryError::InvalidConfig {
                field: "medianSeparation",
                reason: format!(
                    "expected a non-negative finite number, got {}",
                    self.median_separation
                ),
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
