use crate::error::RestoreError;
use crate::imageio::{self, GrayImage};
use crate::models::{ImageFormat, RestoreConfig, DEFAULT_DIMENSION};
use halftone_restore::{InverseHalftoner, PipelineOptions};
use std::path::Path;
use std::time::Duration;

/// Summary of one restored file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreReport {
    pub rows: usize,
    pub cols: usize,
    pub format: ImageFormat,
    /// Time spent restoring, excluding file I/O
    pub elapsed: Duration,
}

/// Whole-image restoration with the general pipeline
pub struct RestoreService {
    halftoner: InverseHalftoner,
    raw_rows: usize,
    raw_cols: usize,
}

impl RestoreService {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            halftoner: InverseHalftoner::with_options(options),
            raw_rows: DEFAULT_DIMENSION,
            raw_cols: DEFAULT_DIMENSION,
        }
    }

    pub fn from_config(config: &RestoreConfig) -> Result<Self, RestoreError> {
        let (rows, cols) = config.raw_dimensions();
        Ok(Self::new(config.pipeline_options()?).raw_dimensions(rows, cols))
    }

    /// Dimensions assumed for headerless input files
    pub fn raw_dimensions(mut self, rows: usize, cols: usize) -> Self {
        self.raw_rows = rows;
        self.raw_cols = cols;
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        self.halftoner.options()
    }

    /// Restore an in-memory image, keeping its layout
    pub fn restore_image(&self, image: &GrayImage) -> Result<(GrayImage, Duration), RestoreError> {
        let restored = self
            .halftoner
            .restore(&image.pixels, image.rows(), image.cols())?;
        let elapsed = restored.elapsed();
        Ok((GrayImage::new(image.spec, restored.into_pixels()), elapsed))
    }

    /// Decode `input`, restore it, and write the result to `output`
    pub fn restore_file(&self, input: &Path, output: &Path) -> Result<RestoreReport, RestoreError> {
        let image = imageio::decode_file(input, self.raw_rows, self.raw_cols)?;
        let (restored, elapsed) = self.restore_image(&image)?;
        imageio::encode_file(output, &restored)?;

        let options = self.options();
        tracing::info!(
            rows = image.rows(),
            cols = image.cols(),
            method = %options.method,
            gain = options.gain,
            threshold = options.threshold,
            elapsed_ms = elapsed.as_millis() as u64,
            "Restored image"
        );

        Ok(RestoreReport {
            rows: image.rows(),
            cols: image.cols(),
            format: image.format(),
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageSpec;
    use halftone_restore::HalftoneMethod;

    #[test]
    fn test_from_config() {
        let config = RestoreConfig {
            method: "clustered".to_string(),
            gain: 1,
            rows: 64,
            cols: Some(32),
            ..RestoreConfig::default()
        };
        let service = RestoreService::from_config(&config).unwrap();

        assert_eq!(service.options().method, HalftoneMethod::ClusteredDither);
        assert_eq!(service.options().gain, 1);
        assert_eq!((service.raw_rows, service.raw_cols), (64, 32));
    }

    #[test]
    fn test_from_config_bad_method() {
        let config = RestoreConfig {
            method: "0".to_string(),
            ..RestoreConfig::default()
        };
        assert!(matches!(
            RestoreService::from_config(&config),
            Err(RestoreError::Halftone(_))
        ));
    }

    #[test]
    fn test_restore_image_keeps_layout() {
        let spec = ImageSpec::new(8, 10, ImageFormat::Pgm);
        let image = GrayImage::new(spec, vec![255; 80]);
        let service = RestoreService::new(PipelineOptions::default());

        let (restored, _) = service.restore_image(&image).unwrap();
        assert_eq!(restored.spec, spec);
        assert!(restored.pixels.iter().all(|&p| p == 255));
    }

    #[test]
    fn test_restore_image_too_small() {
        let spec = ImageSpec::new(4, 10, ImageFormat::Raw);
        let image = GrayImage::new(spec, vec![0; 40]);
        let service = RestoreService::new(PipelineOptions::default());

        assert!(matches!(
            service.restore_image(&image),
            Err(RestoreError::Halftone(_))
        ));
    }
}
