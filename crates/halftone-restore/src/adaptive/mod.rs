//! Streaming inverse halftoning for error-diffused images.
//!
//! This engine never holds more than seven padded rows of input. For each
//! pixel it measures horizontal and vertical gradients at two scales,
//! turns them into a pair of smoothing parameters and builds a separable
//! 7x7 smoothing kernel on the spot: flat areas get the widest kernel,
//! strong edges the narrowest. Output bytes are written in raster order as
//! they are produced.
//!
//! # Example
//!
//! ```
//! use halftone_restore::adaptive::{adaptive_inverse_halftone_stream, ReadRows};
//!
//! let halftone = vec![0u8; 6 * 6];
//! let mut restored = Vec::new();
//! adaptive_inverse_halftone_stream(&mut ReadRows::new(&halftone[..]), &mut restored, 6, 6)
//!     .unwrap();
//! assert_eq!(restored, vec![0u8; 36]);
//! ```

pub mod gradient;
pub mod smoothing;
pub mod window;

use std::io::{self, Read, Write};
use std::time::Instant;

pub use gradient::{smoothing_parameter, Gradients};
pub use smoothing::{AdaptiveKernel, FILTSCALE2};
pub use window::RowWindow;

use crate::api::HalftoneError;
use crate::matrix::{check_extents, try_zeroed};
use crate::output::RestoredImage;

use window::WINDOW_ROWS;

/// Sequential supplier of image rows.
pub trait RowSource {
    /// Fill `buf` with the next row; `buf.len()` is the image width.
    fn next_row(&mut self, buf: &mut [u8]) -> io::Result<()>;
}

impl<T: RowSource + ?Sized> RowSource for &mut T {
    fn next_row(&mut self, buf: &mut [u8]) -> io::Result<()> {
        (**self).next_row(buf)
    }
}

/// [`RowSource`] over any byte reader holding rows back to back.
#[derive(Debug)]
pub struct ReadRows<R> {
    inner: R,
}

impl<R: Read> ReadRows<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> RowSource for ReadRows<R> {
    fn next_row(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)
    }
}

/// Restore one output pixel from the window centred on padded column
/// `col + 3`.
fn restore_pixel(window: &RowWindow, col: usize) -> u8 {
    let gradients = Gradients::measure(window, col);
    let fx = AdaptiveKernel::synthesize(smoothing_parameter(gradients.horizontal()));
    let fy = AdaptiveKernel::synthesize(smoothing_parameter(gradients.vertical()));

    let mut out = 0i32;
    for (slot, &weight) in fy.taps.iter().enumerate() {
        let line = &window.row(slot)[col..col + WINDOW_ROWS];
        let mut row_sum = 0i32;
        for (&pixel, &tap) in line.iter().zip(&fx.taps) {
            if pixel != 0 {
                row_sum += tap;
            }
        }
        out += row_sum * weight;
    }

    let value = ((FILTSCALE2 * out as f32 / (fx.norm * fy.norm)) as f64 + 0.5) as f32;
    if value < 0.0 {
        0
    } else if value > 255.0 {
        255
    } else {
        value as u8
    }
}

/// Restore a `rows x cols` error-diffused halftone read row by row from
/// `source`, writing `rows * cols` bytes to `sink`.
///
/// Memory use is proportional to `cols` only. Rows past the bottom edge are
/// mirrored from rows already in the window, so exactly `rows` rows are
/// read. The sink is flushed before returning.
///
/// # Errors
///
/// - [`HalftoneError::ImageTooSmall`] if either extent is below 5
/// - [`HalftoneError::Io`] if a row cannot be read or output written
/// - [`HalftoneError::NoMemory`] if the window cannot be allocated
pub fn adaptive_inverse_halftone_stream<S, W>(
    source: &mut S,
    sink: &mut W,
    rows: usize,
    cols: usize,
) -> Result<(), HalftoneError>
where
    S: RowSource + ?Sized,
    W: Write + ?Sized,
{
    check_extents(rows, cols)?;
    let mut window = RowWindow::new(cols)?;
    let mut line = try_zeroed::<u8>(cols, "output")?;

    window.prime(source)?;
    for row in 0..rows {
        for (col, pixel) in line.iter_mut().enumerate() {
            *pixel = restore_pixel(&window, col);
        }
        sink.write_all(&line)?;

        window.advance();
        if row + 4 < rows {
            window.load(WINDOW_ROWS - 1, source)?;
        } else if row + 1 < rows {
            // Image row `row + 4` is past the bottom; its mirror is still in
            // the window at slot `reflect(row + 4) - (row - 2)`.
            window.copy_slot(2 * (rows - row - 2), WINDOW_ROWS - 1);
        }
    }
    sink.flush()?;
    Ok(())
}

/// Restore an in-memory halftone with the streaming engine.
///
/// # Errors
///
/// As [`adaptive_inverse_halftone_stream`], plus
/// [`HalftoneError::SizeMismatch`] if `pixels.len() != rows * cols`.
pub fn adaptive_inverse_halftone(
    pixels: &[u8],
    rows: usize,
    cols: usize,
) -> Result<RestoredImage, HalftoneError> {
    check_extents(rows, cols)?;
    let expected = rows
        .checked_mul(cols)
        .ok_or(HalftoneError::NoMemory { buffer: "output" })?;
    if pixels.len() != expected {
        return Err(HalftoneError::SizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let mut output = Vec::new();
    output
        .try_reserve_exact(expected)
        .map_err(|_| HalftoneError::NoMemory { buffer: "output" })?;

    let start = Instant::now();
    adaptive_inverse_halftone_stream(&mut ReadRows::new(pixels), &mut output, rows, cols)?;
    Ok(RestoredImage::new(output, rows, cols, start.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_reads_exactly_rows() {
        for rows in 5..10 {
            let mut pixels = vec![255u8; rows * 6];
            // Trailing bytes must stay unread.
            pixels.extend_from_slice(&[1, 2, 3]);
            let mut source = ReadRows::new(&pixels[..]);
            let mut out = Vec::new();
            adaptive_inverse_halftone_stream(&mut source, &mut out, rows, 6).unwrap();
            assert_eq!(out.len(), rows * 6);
            assert_eq!(source.into_inner(), &[1, 2, 3]);
        }
    }

    #[test]
    fn test_all_white_stays_white() {
        let restored = adaptive_inverse_halftone(&[255; 64], 8, 8).unwrap();
        assert!(restored.pixels().iter().all(|&p| p == 255));
    }

    #[test]
    fn test_truncated_input_is_io_error() {
        let pixels = vec![0u8; 6 * 5];
        let mut out = Vec::new();
        let err = adaptive_inverse_halftone_stream(&mut ReadRows::new(&pixels[..]), &mut out, 6, 6)
            .unwrap_err();
        assert!(matches!(err, HalftoneError::Io(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn test_write_failure_is_io_error() {
        let pixels = vec![0u8; 36];
        let err = adaptive_inverse_halftone_stream(
            &mut ReadRows::new(&pixels[..]),
            &mut FailingSink,
            6,
            6,
        )
        .unwrap_err();
        assert!(matches!(err, HalftoneError::Io(_)));
    }

    #[test]
    fn test_rejects_small_and_mismatched() {
        assert!(matches!(
            adaptive_inverse_halftone(&[0; 16], 4, 4),
            Err(HalftoneError::ImageTooSmall { .. })
        ));
        assert!(matches!(
            adaptive_inverse_halftone(&[0; 10], 5, 5),
            Err(HalftoneError::SizeMismatch { expected: 25, actual: 10 })
        ));
    }

    #[test]
    fn test_vertical_edge_is_preserved() {
        // Left half black, right half white. Every row sees the same
        // neighbourhood, and the step stays sharp around the boundary.
        let (rows, cols) = (9, 16);
        let pixels: Vec<u8> = (0..rows * cols)
            .map(|i| if i % cols >= cols / 2 { 255 } else { 0 })
            .collect();
        let restored = adaptive_inverse_halftone(&pixels, rows, cols).unwrap();
        let first = &restored.pixels()[..cols];
        for r in 0..rows {
            assert_eq!(&restored.pixels()[r * cols..(r + 1) * cols], first, "row {}", r);
        }
        assert_eq!(first[0], 0);
        assert_eq!(first[cols - 1], 255);
        assert!(first[7] < 128 && first[8] > 128, "{:?}", first);
    }
}
