//! Thermal color palettes.
//!
//! Every palette is a piecewise-linear ramp over the normalized `[0, 255]`
//! domain: cold values are blue, warm values yellow, hot values red. Inputs
//! are clamped to the domain first (NaN counts as 0), each channel is clamped
//! to `[0, 255]` and floored, and alpha is always opaque.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thermal_common::ThermalError;

/// An RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorPixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorPixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque pixel.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for ColorPixel {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Named thermal color ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    /// Four 64-wide bands: blue, cyan, yellow, red.
    #[default]
    #[serde(alias = "a")]
    FourBand,
    /// Seven bands with steeper slopes, ending in a ramp towards white.
    #[serde(alias = "b")]
    SevenBand,
    /// Five 51-wide bands: dark blue, blue, cyan, green, yellow, red.
    #[serde(alias = "c")]
    FiveBand,
}

impl Palette {
    pub const ALL: [Palette; 3] = [Palette::FourBand, Palette::SevenBand, Palette::FiveBand];

    pub fn as_str(&self) -> &'static str {
        match self {
            Palette::FourBand => "four_band",
            Palette::SevenBand => "seven_band",
            Palette::FiveBand => "five_band",
        }
    }

    /// Map a normalized value to a color.
    pub fn colorize(&self, value: f64) -> ColorPixel {
        let v = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 255.0)
        };

        match self {
            Palette::FourBand => four_band(v),
            Palette::SevenBand => seven_band(v),
            Palette::FiveBand => five_band(v),
        }
    }
}

fn four_band(v: f64) -> ColorPixel {
    if v < 64.0 {
        rgb(0.0, v * 2.0, 255.0)
    } else if v < 128.0 {
        rgb(0.0, 255.0, 255.0 - (v - 64.0) * 4.0)
    } else if v < 192.0 {
        rgb((v - 128.0) * 4.0, 255.0, 0.0)
    } else {
        rgb(255.0, 255.0 - (v - 192.0) * 4.0, 0.0)
    }
}

fn seven_band(v: f64) -> ColorPixel {
    match v {
        v if v < 32.0 => rgb(0.0, 0.0, v * 4.0),
        v if v < 64.0 => rgb(0.0, (v - 32.0) * 8.0, 255.0),
        v if v < 96.0 => rgb(0.0, 255.0, 255.0 - (v - 64.0) * 8.0),
        v if v < 128.0 => rgb((v - 96.0) * 8.0, 255.0, 0.0),
        v if v < 160.0 => rgb(255.0, 255.0 - (v - 128.0) * 8.0, 0.0),
        v if v < 192.0 => rgb(255.0, 128.0 - (v - 160.0) * 4.0, 0.0),
        v => rgb(255.0, (v - 192.0) * 2.0, (v - 192.0) * 2.0),
    }
}

fn five_band(v: f64) -> ColorPixel {
    match v {
        v if v < 51.0 => rgb(0.0, 0.0, v * 5.0),
        v if v < 102.0 => rgb(0.0, (v - 51.0) * 5.0, 255.0),
        v if v < 153.0 => rgb(0.0, 255.0, 255.0 - (v - 102.0) * 5.0),
        v if v < 204.0 => rgb((v - 153.0) * 5.0, 255.0, 0.0),
        v => rgb(255.0, 255.0 - (v - 204.0) * 5.0, 0.0),
    }
}

#[inline]
fn rgb(r: f64, g: f64, b: f64) -> ColorPixel {
    ColorPixel::opaque(channel(r), channel(g), channel(b))
}

#[inline]
fn channel(x: f64) -> u8 {
    if x.is_nan() {
        0
    } else {
        x.clamp(0.0, 255.0).floor() as u8
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Palette {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "four_band" | "a" => Ok(Palette::FourBand),
            "seven_band" | "b" => Ok(Palette::SevenBand),
            "five_band" | "c" => Ok(Palette::FiveBand),
            other => Err(ThermalError::Config(format!("unknown palette: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_domain_inputs_clamp() {
        assert_eq!(Palette::FourBand.colorize(-50.0), Palette::FourBand.colorize(0.0));
        assert_eq!(Palette::FourBand.colorize(1e9), Palette::FourBand.colorize(255.0));
        assert_eq!(Palette::SevenBand.colorize(f64::NAN), Palette::SevenBand.colorize(0.0));
    }

    #[test]
    fn test_fractional_values_floor() {
        // 10.75 * 2 = 21.5 -> 21
        assert_eq!(Palette::FourBand.colorize(10.75), ColorPixel::opaque(0, 21, 255));
        // 7.9 * 4 = 31.6 -> 31
        assert_eq!(Palette::SevenBand.colorize(7.9), ColorPixel::opaque(0, 0, 31));
    }

    #[test]
    fn test_parse_palette_names() {
        assert_eq!("four_band".parse::<Palette>().unwrap(), Palette::FourBand);
        assert_eq!("Seven-Band".parse::<Palette>().unwrap(), Palette::SevenBand);
        assert_eq!("b".parse::<Palette>().unwrap(), Palette::SevenBand);
        assert_eq!("Five_Band".parse::<Palette>().unwrap(), Palette::FiveBand);
        assert!("viridis".parse::<Palette>().is_err());
    }

    #[test]
    fn test_serde_names_and_aliases() {
        assert_eq!(serde_json::to_string(&Palette::SevenBand).unwrap(), r#""seven_band""#);
        let p: Palette = serde_json::from_str(r#""a""#).unwrap();
        assert_eq!(p, Palette::FourBand);
    }
}
