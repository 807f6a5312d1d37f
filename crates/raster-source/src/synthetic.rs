//! Procedural thermal rasters.
//!
//! These stand in for real imagery when no file is available or decoding
//! fails. Every generator draws noise from a caller-supplied RNG so tests can
//! seed it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thermal_common::{BoundingBox, GridSize, RasterGrid, ThermalError};

/// Default noise amplitude for [`SyntheticPattern::LinearNoise`].
pub const DEFAULT_LINEAR_NOISE: f64 = 10.0;

/// Half-width of the uniform noise added by [`SyntheticPattern::RadialGradient`].
const RADIAL_GRADIENT_NOISE: f64 = 20.0;

/// Procedural generator used for a synthetic raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyntheticPattern {
    /// Warm centre falling off radially, with two Gaussian hotspots and
    /// light noise. Values lie in `[0, 1]`.
    RadialHotspots,
    /// Cold centre rising to hot edges, with +/-20 noise. Values lie in `[0, 255]`.
    RadialGradient,
    /// `x + y` plus uniform noise in `[0, amplitude)`.
    LinearNoise { amplitude: f64 },
}

impl Default for SyntheticPattern {
    fn default() -> Self {
        Self::RadialHotspots
    }
}

impl SyntheticPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RadialHotspots => "radial_hotspots",
            Self::RadialGradient => "radial_gradient",
            Self::LinearNoise { .. } => "linear_noise",
        }
    }

    /// Sample value at column `x`, row `y` of a `width` x `height` grid.
    fn sample<R: Rng + ?Sized>(&self, x: f64, y: f64, width: f64, height: f64, rng: &mut R) -> f64 {
        match *self {
            Self::RadialHotspots => {
                let center_x = width / 2.0;
                let center_y = height / 2.0;
                let distance = ((x - center_x).powi(2) + (y - center_y).powi(2)).sqrt();
                let max_distance = (center_x.powi(2) + center_y.powi(2)).sqrt();
                let gradient = 1.0 - distance / max_distance;

                let hotspot1 =
                    (-((x - width * 0.3).powi(2) + (y - height * 0.3).powi(2)) / 1000.0).exp();
                let hotspot2 =
                    (-((x - width * 0.7).powi(2) + (y - height * 0.7).powi(2)) / 800.0).exp();

                let noise: f64 = rng.gen();
                (gradient * 0.6 + hotspot1 * 0.3 + hotspot2 * 0.2 + noise * 0.1).min(1.0)
            }
            Self::RadialGradient => {
                let radius = width / 2.0;
                let distance = ((x - width / 2.0).powi(2) + (y - height / 2.0).powi(2)).sqrt();
                let t = (distance / radius).min(1.0);
                let noise = rng.gen_range(-RADIAL_GRADIENT_NOISE..RADIAL_GRADIENT_NOISE);
                (t * 255.0 + noise).clamp(0.0, 255.0)
            }
            Self::LinearNoise { amplitude } => {
                let noise: f64 = rng.gen();
                x + y + noise * amplitude
            }
        }
    }
}

impl fmt::Display for SyntheticPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyntheticPattern {
    type Err = ThermalError;

    /// Accepts `radial_hotspots`, `radial_gradient`, `linear_noise` and
    /// `linear_noise:<amplitude>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s.as_str(), None),
        };

        match (name, arg) {
            ("radial_hotspots", None) => Ok(Self::RadialHotspots),
            ("radial_gradient", None) => Ok(Self::RadialGradient),
            ("linear_noise", None) => Ok(Self::LinearNoise {
                amplitude: DEFAULT_LINEAR_NOISE,
            }),
            ("linear_noise", Some(arg)) => {
                let amplitude: f64 = arg
                    .parse()
                    .map_err(|_| ThermalError::Config(format!("invalid noise amplitude: {}", arg)))?;
                if !amplitude.is_finite() || amplitude < 0.0 {
                    return Err(ThermalError::Config(format!(
                        "noise amplitude must be finite and >= 0, got {}",
                        amplitude
                    )));
                }
                Ok(Self::LinearNoise { amplitude })
            }
            _ => Err(ThermalError::Config(format!("unknown synthetic pattern: {}", s))),
        }
    }
}

/// Generate a synthetic raster using the thread-local RNG.
pub fn synthesize(size: GridSize, pattern: SyntheticPattern, bounds: BoundingBox) -> RasterGrid {
    synthesize_with_rng(size, pattern, bounds, &mut rand::thread_rng())
}

/// Generate a synthetic raster with an explicit RNG.
pub fn synthesize_with_rng<R: Rng + ?Sized>(
    size: GridSize,
    pattern: SyntheticPattern,
    bounds: BoundingBox,
    rng: &mut R,
) -> RasterGrid {
    let (width, height) = (size.width() as f64, size.height() as f64);
    RasterGrid::from_fn(size, bounds, |col, row| {
        pattern.sample(col as f64, row as f64, width, height, &mut *rng)
    })
}
