//! General inverse halftoning pipeline.
//!
//! Five stages run over whole-image float planes:
//!
//! ```text
//! bytes -> y0 = lowpass(input)      binary separable convolution
//!       -> y1 = median(y0)          3x3 or 5x5 exact median
//!       -> y2 = smooth(y1)          grey separable convolution
//!       -> z  = narrow(y2)          grey separable convolution
//!       -> hie = edges(y2, z)       thresholded, majority-cleaned y2 - z
//!       -> clip(round(gain * hie + y1))
//! ```
//!
//! The method only decides the kernels and the median window; the edge and
//! composite stages are identical for all three.

mod composite;
mod edge;
mod method;
mod options;

use std::time::Instant;

pub use composite::composite;
pub use edge::edge_residual;
pub use method::{FilterSet, HalftoneMethod, MedianWindow};
pub use options::{PipelineOptions, DEFAULT_GAIN, DEFAULT_THRESHOLD};

use crate::api::HalftoneError;
use crate::filter::{convolve_binary, convolve_grey, median3x3, median5x5};
use crate::matrix::{check_extents, try_zeroed, FloatMatrix};
use crate::output::RestoredImage;

/// Restore a grey image from a `rows x cols` halftone.
///
/// `pixels` holds one byte per pixel, row-major; any nonzero byte counts as
/// white. All intermediate planes are allocated up front and dropped on
/// return, whether or not the call succeeds.
///
/// # Errors
///
/// - [`HalftoneError::ImageTooSmall`] if either extent is below 5
/// - [`HalftoneError::SizeMismatch`] if `pixels.len() != rows * cols`
/// - [`HalftoneError::NoMemory`] if an intermediate plane cannot be allocated
///
/// # Example
///
/// ```
/// use halftone_restore::{inverse_halftone, HalftoneMethod, PipelineOptions};
///
/// let halftone = vec![255u8; 8 * 8];
/// let options = PipelineOptions::new(HalftoneMethod::ErrorDiffusion);
/// let restored = inverse_halftone(&halftone, 8, 8, &options).unwrap();
/// assert!(restored.pixels().iter().all(|&p| p == 255));
/// ```
pub fn inverse_halftone(
    pixels: &[u8],
    rows: usize,
    cols: usize,
    options: &PipelineOptions,
) -> Result<RestoredImage, HalftoneError> {
    check_extents(rows, cols)?;

    let input = FloatMatrix::from_bytes(pixels, rows, cols, "input")?;
    let mut y0 = FloatMatrix::zeros(rows, cols, "y0")?;
    let mut y1 = FloatMatrix::zeros(rows, cols, "y1")?;
    let mut y2 = FloatMatrix::zeros(rows, cols, "y2")?;
    let mut z = FloatMatrix::zeros(rows, cols, "z")?;
    let mut hie = FloatMatrix::zeros(rows, cols, "hie")?;
    let mut output = try_zeroed::<u8>(rows * cols, "output")?;

    let filters = options.method.filters();
    let start = Instant::now();

    convolve_binary(&input, &filters.lowpass, &mut y0)?;
    match filters.median {
        MedianWindow::ThreeByThree => median3x3(&y0, &mut y1),
        MedianWindow::FiveByFive => median5x5(&y0, &mut y1),
    }
    convolve_grey(&y1, &filters.smooth, &mut y2)?;
    convolve_grey(&y2, &filters.narrow, &mut z)?;
    edge_residual(&y2, z, options.threshold, &mut hie)?;
    composite(options.gain, &hie, &y1, &mut output);

    Ok(RestoredImage::new(output, rows, cols, start.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_small_images() {
        let options = PipelineOptions::default();
        let err = inverse_halftone(&[0; 16], 4, 4, &options).unwrap_err();
        assert!(matches!(err, HalftoneError::ImageTooSmall { rows: 4, cols: 4 }));
        let err = inverse_halftone(&[0; 20], 5, 4, &options).unwrap_err();
        assert!(matches!(err, HalftoneError::ImageTooSmall { .. }));
    }

    #[test]
    fn test_rejects_wrong_buffer_length() {
        let options = PipelineOptions::default();
        let err = inverse_halftone(&[0; 30], 6, 6, &options).unwrap_err();
        assert!(matches!(
            err,
            HalftoneError::SizeMismatch {
                expected: 36,
                actual: 30
            }
        ));
    }

    #[test]
    fn test_output_dimensions() {
        let halftone: Vec<u8> = (0..7 * 11).map(|i| if i % 3 == 0 { 255 } else { 0 }).collect();
        for method in HalftoneMethod::ALL {
            let restored =
                inverse_halftone(&halftone, 7, 11, &PipelineOptions::new(method)).unwrap();
            assert_eq!(restored.rows(), 7);
            assert_eq!(restored.cols(), 11);
            assert_eq!(restored.pixels().len(), 77);
        }
    }
}
