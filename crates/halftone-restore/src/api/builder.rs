//! InverseHalftoner builder, the ergonomic entry point for the crate.

use crate::output::RestoredImage;
use crate::pipeline::{inverse_halftone, HalftoneMethod, PipelineOptions};

use super::HalftoneError;

/// Reusable inverse halftoning front end.
///
/// - Configuration methods consume and return `self`
/// - [`restore()`](Self::restore) takes `&self`, so one configured builder
///   can restore any number of images
///
/// # Example
///
/// ```
/// use halftone_restore::{HalftoneMethod, InverseHalftoner};
///
/// let halftoner = InverseHalftoner::new(HalftoneMethod::ErrorDiffusion)
///     .gain(0)
///     .threshold(2);
///
/// let halftone = vec![0u8; 16 * 16];
/// let restored = halftoner.restore(&halftone, 16, 16).unwrap();
/// assert_eq!(restored.rows(), 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InverseHalftoner {
    options: PipelineOptions,
}

impl InverseHalftoner {
    /// Create a halftoner for `method` with gain 4 and threshold 0.
    pub fn new(method: HalftoneMethod) -> Self {
        Self {
            options: PipelineOptions::new(method),
        }
    }

    /// Start from a complete option set.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn method(mut self, method: HalftoneMethod) -> Self {
        self.options = self.options.method(method);
        self
    }

    /// Set the edge-enhancement gain.
    #[inline]
    pub fn gain(mut self, gain: u32) -> Self {
        self.options = self.options.gain(gain);
        self
    }

    /// Set the edge noise threshold.
    #[inline]
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.options = self.options.threshold(threshold);
        self
    }

    #[inline]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run the pipeline on a `rows x cols` halftone.
    pub fn restore(
        &self,
        pixels: &[u8],
        rows: usize,
        cols: usize,
    ) -> Result<RestoredImage, HalftoneError> {
        inverse_halftone(pixels, rows, cols, &self.options)
    }
}
