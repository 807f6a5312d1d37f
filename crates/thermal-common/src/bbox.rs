//! Geographic bounding boxes.

use crate::error::{ThermalError, ThermalResult};
use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees.
///
/// `north` must be greater than `south`. `east` may be numerically less than
/// `west` for boxes crossing the antimeridian; no wraparound logic is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl BoundingBox {
    /// Create a bounding box, rejecting non-finite edges and `north <= south`.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> ThermalResult<Self> {
        let bbox = Self {
            north,
            south,
            east,
            west,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    /// Create from a `[west, south, east, north]` extent, the order GeoTIFF
    /// readers report.
    pub fn from_extent(extent: [f64; 4]) -> ThermalResult<Self> {
        let [west, south, east, north] = extent;
        Self::new(north, south, east, west)
    }

    /// Parse a "west,south,east,north" string.
    pub fn from_param_string(s: &str) -> ThermalResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ThermalError::InvalidBbox(format!(
                "{}: expected 'west,south,east,north'",
                s
            )));
        }

        let mut values = [0.0; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| ThermalError::InvalidBbox(format!("invalid number: {}", part)))?;
        }

        Self::from_extent(values)
    }

    /// Check the box invariants.
    pub fn validate(&self) -> ThermalResult<()> {
        let edges = [self.north, self.south, self.east, self.west];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(ThermalError::InvalidBbox(format!(
                "non-finite edge in {:?}",
                self
            )));
        }
        if self.north <= self.south {
            return Err(ThermalError::InvalidBbox(format!(
                "north ({}) must be greater than south ({})",
                self.north, self.south
            )));
        }
        Ok(())
    }

    /// East-west span as a plain difference.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// North-south span.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }
}

impl Default for BoundingBox {
    /// The downtown Los Angeles tile used when no georeferenced input exists.
    fn default() -> Self {
        Self {
            north: 34.1,
            south: 34.0,
            east: -118.2,
            west: -118.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_latitudes() {
        let err = BoundingBox::new(10.0, 20.0, 5.0, 0.0).unwrap_err();
        assert!(matches!(err, ThermalError::InvalidBbox(_)));
        assert!(BoundingBox::new(10.0, 10.0, 5.0, 0.0).is_err());
    }

    #[test]
    fn test_accepts_antimeridian_crossing() {
        let bbox = BoundingBox::new(50.0, -50.0, -140.0, 160.0).unwrap();
        assert!(bbox.east < bbox.west);
        assert_eq!(bbox.width(), -300.0);
    }

    #[test]
    fn test_parse_param_string() {
        let bbox = BoundingBox::from_param_string("-118.3, 34.0, -118.2, 34.1").unwrap();
        assert_eq!(bbox, BoundingBox::default());

        assert!(BoundingBox::from_param_string("1,2,3").is_err());
        assert!(BoundingBox::from_param_string("a,2,3,4").is_err());
    }

    #[test]
    fn test_default_is_valid() {
        BoundingBox::default().validate().unwrap();
    }
}
