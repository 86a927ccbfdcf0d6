//! Defaults applied to newly created curves.
//!
//! A [`CurveConfig`] is plain serde data, so an application can keep it in a
//! TOML file next to its other settings. Missing keys fall back to the
//! defaults.
//!
//! ```
//! use curvum::config::CurveConfig;
//! use curvum::curves::SampleBoundary;
//!
//! let config = CurveConfig::from_toml_str("sample_count = 250").unwrap();
//! assert_eq!(config.sample_count, 250);
//! assert_eq!(config.default_degree, 3);
//! assert_eq!(config.bspline_boundary, SampleBoundary::ExcludeEnd);
//! ```

use crate::curves::SampleBoundary;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default number of samples a curve is rendered with.
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Default B-spline degree.
pub const DEFAULT_DEGREE: usize = 3;

/// Sampling and B-spline defaults for new curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Number of parameter values a curve is sampled at.
    pub sample_count: usize,
    /// Degree given to new B-spline curves.
    pub default_degree: usize,
    /// Which trailing samples B-spline samplers drop.
    pub bspline_boundary: SampleBoundary,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            default_degree: DEFAULT_DEGREE,
            bspline_boundary: SampleBoundary::default(),
        }
    }
}

impl CurveConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as pretty-printed TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks that every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count == 0 {
            return Err(ConfigError::Invalid("sample_count must be at least 1".into()));
        }
        if self.default_degree == 0 {
            return Err(ConfigError::Invalid("default_degree must be at least 1".into()));
        }
        Ok(())
    }
}
