//! Thermal raster colorizing pipeline.
//!
//! Ties the workspace crates together: GeoTIFF bytes (or a synthetic
//! fallback) flow through normalization and a thermal palette into an RGBA
//! image, which can be written onto a surface or exported as PNG/GeoTIFF.
//!
//! ```no_run
//! use aether::{AetherConfig, ThermalPipeline};
//!
//! # async fn run() -> thermal_common::ThermalResult<()> {
//! let pipeline = ThermalPipeline::new(AetherConfig::from_env())?;
//! let outcome = pipeline.render_file("scene.tif").await?;
//! let file = pipeline.export(&outcome)?;
//! println!("{} ({} bytes)", file.file_name, file.bytes.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod pipeline;
pub mod telemetry;

pub use config::{AetherConfig, LogConfig, LogFormat};
pub use pipeline::{ExportedFile, RenderOutcome, ThermalPipeline};
pub use telemetry::init_tracing;
