//! Pipeline configuration.

use super::method::HalftoneMethod;

/// Default edge gain applied to the high-frequency residual.
pub const DEFAULT_GAIN: u32 = 4;

/// Default noise threshold for the edge detector.
pub const DEFAULT_THRESHOLD: u32 = 0;

/// Settings for one run of [`inverse_halftone`](crate::inverse_halftone).
///
/// # Example
///
/// ```
/// use halftone_restore::{HalftoneMethod, PipelineOptions};
///
/// let options = PipelineOptions::new(HalftoneMethod::DispersedDither)
///     .gain(2)
///     .threshold(3);
/// assert_eq!(options.gain, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Halftoning process that produced the input.
    pub method: HalftoneMethod,

    /// Multiplier for the edge residual added back to the smooth estimate.
    /// Zero disables edge enhancement.
    ///
    /// Default: `4`
    pub gain: u32,

    /// Largest low-pass difference (in grey levels) treated as noise.
    ///
    /// Default: `0`
    pub threshold: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::new(HalftoneMethod::default())
    }
}

impl PipelineOptions {
    pub fn new(method: HalftoneMethod) -> Self {
        Self {
            method,
            gain: DEFAULT_GAIN,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn method(mut self, method: HalftoneMethod) -> Self {
        self.method = method;
        self
    }

    pub fn gain(mut self, gain: u32) -> Self {
        self.gain = gain;
        self
    }

    pub fn threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = PipelineOptions::default();
        assert_eq!(options.method, HalftoneMethod::ErrorDiffusion);
        assert_eq!(options.gain, 4);
        assert_eq!(options.threshold, 0);
    }

    #[test]
    fn test_builder_chain() {
        let options = PipelineOptions::new(HalftoneMethod::ErrorDiffusion)
            .method(HalftoneMethod::ClusteredDither)
            .gain(0)
            .threshold(12);
        assert_eq!(options.method, HalftoneMethod::ClusteredDither);
        assert_eq!(options.gain, 0);
        assert_eq!(options.threshold, 12);
    }
}
