//! Common types shared by every crate in the Aether thermal colorizer.

pub mod bbox;
pub mod error;
pub mod grid;

pub use bbox::BoundingBox;
pub use error::{ThermalError, ThermalResult};
pub use grid::{GridSize, RasterGrid};
