//! Configuration for the colorizing pipeline.

use crate::telemetry;
use raster_source::{FallbackPolicy, SyntheticPattern};
use renderer::export::DEFAULT_FILE_STEM;
use renderer::{ExportFormat, Palette};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thermal_common::{BoundingBox, ThermalError, ThermalResult};

/// Configuration for the colorizing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AetherConfig {
    /// Palette applied to normalized values.
    pub palette: Palette,

    /// Zero-based band of the GeoTIFF to render.
    pub band: usize,

    /// Generator used when the input cannot be decoded.
    pub fallback_pattern: SyntheticPattern,

    /// Bounds reported for synthetic and fallback rasters.
    pub fallback_bounds: BoundingBox,

    /// Seed for synthetic noise. `None` draws from OS entropy on each render.
    pub seed: Option<u64>,

    /// Container for exported files.
    pub export_format: ExportFormat,

    /// File name stem for exports, `processed` gives `processed.tif`.
    pub file_stem: String,

    /// Logging settings.
    pub log: LogConfig,
}

impl Default for AetherConfig {
    fn default() -> Self {
        Self {
            palette: Palette::FourBand,
            band: 0,
            fallback_pattern: SyntheticPattern::RadialHotspots,
            fallback_bounds: BoundingBox::default(),
            seed: None,
            export_format: ExportFormat::GeoTiff,
            file_stem: DEFAULT_FILE_STEM.to_string(),
            log: LogConfig::default(),
        }
    }
}

impl AetherConfig {
    /// Load configuration from `AETHER_*` environment variables.
    ///
    /// Unset or unparseable variables keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup, using the same
    /// variable names as [`AetherConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("AETHER_PALETTE") {
            if let Ok(palette) = val.parse() {
                config.palette = palette;
            }
        }

        if let Some(val) = lookup("AETHER_BAND") {
            if let Ok(band) = val.trim().parse() {
                config.band = band;
            }
        }

        if let Some(val) = lookup("AETHER_FALLBACK_PATTERN") {
            if let Ok(pattern) = val.parse() {
                config.fallback_pattern = pattern;
            }
        }

        // west,south,east,north
        if let Some(val) = lookup("AETHER_FALLBACK_BOUNDS") {
            if let Ok(bounds) = BoundingBox::from_param_string(&val) {
                config.fallback_bounds = bounds;
            }
        }

        if let Some(val) = lookup("AETHER_SEED") {
            if let Ok(seed) = val.trim().parse() {
                config.seed = Some(seed);
            }
        }

        if let Some(val) = lookup("AETHER_EXPORT_FORMAT") {
            if let Ok(format) = val.parse() {
                config.export_format = format;
            }
        }

        if let Some(val) = lookup("AETHER_FILE_STEM") {
            if !val.trim().is_empty() {
                config.file_stem = val.trim().to_string();
            }
        }

        if let Some(val) = lookup("AETHER_LOG_LEVEL") {
            if !val.trim().is_empty() {
                config.log.level = val.trim().to_string();
            }
        }

        if let Some(val) = lookup("AETHER_LOG_FORMAT") {
            if let Ok(format) = val.parse() {
                config.log.format = format;
            }
        }

        config
    }

    /// Parse a JSON configuration. Missing fields keep their default.
    pub fn from_json(json_str: &str) -> ThermalResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ThermalResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ThermalResult<()> {
        self.fallback_bounds.validate()?;

        if let SyntheticPattern::LinearNoise { amplitude } = self.fallback_pattern {
            if !amplitude.is_finite() || amplitude < 0.0 {
                return Err(ThermalError::Config(format!(
                    "linear_noise amplitude must be finite and >= 0, got {}",
                    amplitude
                )));
            }
        }

        validate_file_stem(&self.file_stem)?;

        telemetry::env_filter(&self.log.level)?;

        Ok(())
    }

    /// Fallback settings handed to the raster source.
    pub fn fallback_policy(&self) -> FallbackPolicy {
        FallbackPolicy {
            pattern: self.fallback_pattern,
            bounds: self.fallback_bounds,
        }
    }
}

/// A stem must be a bare, non-empty file name.
pub(crate) fn validate_file_stem(stem: &str) -> ThermalResult<()> {
    if stem.trim().is_empty() || stem.contains(['/', '\\']) || stem == "." || stem == ".." {
        return Err(ThermalError::Config(format!("invalid file stem: {:?}", stem)));
    }
    Ok(())
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `aether=debug,renderer=warn`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str("text"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ThermalError::Config(format!("unknown log format: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_valid() {
        let config = AetherConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.palette, Palette::FourBand);
        assert_eq!(config.export_format, ExportFormat::GeoTiff);
        assert_eq!(config.fallback_bounds.north, 34.1);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = AetherConfig::from_lookup(lookup(&[
            ("AETHER_PALETTE", "b"),
            ("AETHER_BAND", "2"),
            ("AETHER_FALLBACK_PATTERN", "linear_noise:5"),
            ("AETHER_FALLBACK_BOUNDS", "10,22,13,24"),
            ("AETHER_SEED", "42"),
            ("AETHER_EXPORT_FORMAT", "png"),
            ("AETHER_FILE_STEM", "sahara-processed"),
            ("AETHER_LOG_LEVEL", "debug"),
            ("AETHER_LOG_FORMAT", "json"),
        ]));

        assert_eq!(config.palette, Palette::SevenBand);
        assert_eq!(config.band, 2);
        assert_eq!(
            config.fallback_pattern,
            SyntheticPattern::LinearNoise { amplitude: 5.0 }
        );
        assert_eq!(config.fallback_bounds.west, 10.0);
        assert_eq!(config.fallback_bounds.north, 24.0);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.export_format, ExportFormat::Png);
        assert_eq!(config.file_stem, "sahara-processed");
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn test_unparseable_values_keep_defaults() {
        let config = AetherConfig::from_lookup(lookup(&[
            ("AETHER_PALETTE", "rainbow"),
            ("AETHER_BAND", "-1"),
            ("AETHER_FALLBACK_BOUNDS", "1,2,3"),
            ("AETHER_SEED", "soon"),
            ("AETHER_LOG_FORMAT", "xml"),
        ]));
        assert_eq!(config, AetherConfig::default());
    }

    #[test]
    fn test_invalid_amplitude_rejected() {
        let config = AetherConfig {
            fallback_pattern: SyntheticPattern::LinearNoise { amplitude: f64::NAN },
            ..AetherConfig::default()
        };
        assert!(matches!(config.validate(), Err(ThermalError::Config(_))));
    }

    #[test]
    fn test_file_stem_must_be_bare_name() {
        for stem in ["", "  ", "../escape", "a/b", "a\\b", ".."] {
            let config = AetherConfig {
                file_stem: stem.to_string(),
                ..AetherConfig::default()
            };
            assert!(config.validate().is_err(), "{:?}", stem);
        }
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("yaml".parse::<LogFormat>().is_err());
    }
}
