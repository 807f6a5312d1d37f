//! The end-to-end colorizing pipeline.
//!
//! `bytes -> RasterSource -> normalize -> palette -> ThermalImage`, then either
//! onto a [`Surface`] or out through [`renderer::export`]. Decode failures
//! never reach the caller; they are replaced by a synthetic raster and
//! reported through [`RenderOutcome::provenance`].

use crate::config::{validate_file_stem, AetherConfig};
use bytes::Bytes;
use rand::rngs::StdRng;
use rand::SeedableRng;
use raster_source::{Provenance, RasterMetadata, RasterSource, SourcedRaster, SyntheticPattern};
use renderer::canvas::{self, Surface};
use renderer::export::{self, ExportOptions};
use renderer::gradient::{colorize_grid, ThermalImage};
use renderer::normalize::{normalize, NormalizeStats};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thermal_common::{GridSize, ThermalResult};
use tracing::{debug, error, info};

/// A rendered image with everything known about where it came from.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub image: ThermalImage,
    pub metadata: RasterMetadata,
    pub provenance: Provenance,
    pub stats: NormalizeStats,
}

/// Bytes of an exported image and the name to offer it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Stateless pipeline driven by an [`AetherConfig`].
#[derive(Debug, Clone)]
pub struct ThermalPipeline {
    config: AetherConfig,
}

impl ThermalPipeline {
    /// Create a pipeline after validating `config`.
    pub fn new(config: AetherConfig) -> ThermalResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a pipeline from `AETHER_*` environment variables.
    pub fn from_env() -> ThermalResult<Self> {
        Self::new(AetherConfig::from_env())
    }

    pub fn config(&self) -> &AetherConfig {
        &self.config
    }

    /// Decode the configured band of `data`, falling back to a synthetic
    /// 256x256 raster if decoding fails.
    pub fn load(&self, data: impl Into<Bytes>) -> SourcedRaster {
        let source = RasterSource::Decoded {
            data: data.into(),
            band: self.config.band,
        };
        source.resolve(&self.config.fallback_policy(), &mut self.rng())
    }

    /// Normalize and colorize a sourced raster.
    pub fn render(&self, raster: SourcedRaster) -> RenderOutcome {
        let start = Instant::now();
        let normalized = normalize(&raster.grid);
        let image = colorize_grid(&normalized, self.config.palette);

        info!(
            width = image.width(),
            height = image.height(),
            palette = %self.config.palette,
            fallback = raster.provenance.is_fallback(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered thermal image"
        );

        RenderOutcome {
            image,
            metadata: raster.metadata,
            provenance: raster.provenance,
            stats: *normalized.stats(),
        }
    }

    /// Load and render GeoTIFF bytes. Never fails.
    pub fn render_bytes(&self, data: impl Into<Bytes>) -> RenderOutcome {
        self.render(self.load(data))
    }

    /// Render a generated raster over the configured fallback bounds.
    pub fn render_synthetic(&self, size: GridSize, pattern: SyntheticPattern) -> RenderOutcome {
        let source = RasterSource::Synthetic {
            size,
            pattern,
            bounds: self.config.fallback_bounds,
        };
        let raster = source.resolve(&self.config.fallback_policy(), &mut self.rng());
        self.render(raster)
    }

    /// Read a GeoTIFF from disk and render it.
    ///
    /// Only I/O errors surface; an unreadable raster still falls back.
    pub async fn render_file(&self, path: impl AsRef<Path>) -> ThermalResult<RenderOutcome> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to read raster file");
            e
        })?;
        debug!(path = %path.display(), bytes = data.len(), "Read raster file");
        Ok(self.render_bytes(data))
    }

    /// Copy a rendered image onto a display surface of the same size.
    pub fn present<S: Surface + ?Sized>(
        &self,
        image: &ThermalImage,
        surface: &mut S,
    ) -> ThermalResult<()> {
        canvas::write(image, surface).map_err(|e| {
            error!(error = %e, kind = e.kind(), "Failed to present thermal image");
            e
        })
    }

    /// Encode a render in the configured export format, georeferenced with
    /// the raster's bounds, named after the configured file stem.
    pub fn export(&self, outcome: &RenderOutcome) -> ThermalResult<ExportedFile> {
        self.export_named(outcome, &self.config.file_stem)
    }

    /// Like [`ThermalPipeline::export`] but offered under `stem`, e.g. one
    /// built by [`renderer::location_stem`].
    pub fn export_named(&self, outcome: &RenderOutcome, stem: &str) -> ThermalResult<ExportedFile> {
        validate_file_stem(stem)?;
        let format = self.config.export_format;
        let options = ExportOptions {
            format,
            bounds: Some(outcome.metadata.bounds),
        };
        let bytes = export::export(&outcome.image, &options)?;

        Ok(ExportedFile {
            file_name: format.file_name(stem),
            mime_type: format.mime_type(),
            bytes,
        })
    }

    /// Export a render and write it into `dir`, returning the file path.
    pub async fn save(
        &self,
        outcome: &RenderOutcome,
        dir: impl AsRef<Path>,
    ) -> ThermalResult<PathBuf> {
        let file = self.export(outcome)?;
        let path = dir.as_ref().join(&file.file_name);
        tokio::fs::write(&path, &file.bytes).await?;
        info!(path = %path.display(), bytes = file.bytes.len(), "Saved thermal export");
        Ok(path)
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::Palette;

    fn seeded() -> ThermalPipeline {
        ThermalPipeline::new(AetherConfig {
            seed: Some(7),
            ..AetherConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = AetherConfig::default();
        config.fallback_bounds.north = config.fallback_bounds.south;
        assert!(ThermalPipeline::new(config).is_err());
    }

    #[test]
    fn test_garbage_falls_back_to_256() {
        let outcome = seeded().render_bytes(&b"not a tiff"[..]);
        assert!(outcome.provenance.is_fallback());
        assert_eq!((outcome.image.width(), outcome.image.height()), (256, 256));
        assert_eq!(outcome.metadata.bounds, AetherConfig::default().fallback_bounds);
    }

    #[test]
    fn test_seeded_renders_are_reproducible() {
        let pipeline = seeded();
        let size = GridSize::new(32, 16).unwrap();
        let first = pipeline.render_synthetic(size, SyntheticPattern::RadialGradient);
        let second = pipeline.render_synthetic(size, SyntheticPattern::RadialGradient);
        assert_eq!(first.image, second.image);
        assert_eq!(first.provenance, Provenance::Synthetic);
    }

    #[test]
    fn test_palette_from_config() {
        let pipeline = ThermalPipeline::new(AetherConfig {
            palette: Palette::SevenBand,
            seed: Some(1),
            ..AetherConfig::default()
        })
        .unwrap();
        let outcome = pipeline.render_synthetic(
            GridSize::new(4, 4).unwrap(),
            SyntheticPattern::LinearNoise { amplitude: 0.0 },
        );
        // x + y is 0 at the origin, the seven-band coldest color is black
        assert_eq!(outcome.image.pixel(0, 0).map(|p| (p.r, p.g, p.b)), Some((0, 0, 0)));
    }
}
