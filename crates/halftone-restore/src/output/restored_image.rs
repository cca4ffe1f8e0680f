use std::time::Duration;

/// Grey image produced by [`inverse_halftone`](crate::inverse_halftone).
///
/// One byte per pixel, row-major. `elapsed` covers the filter stages only,
/// not the input conversion or allocation.
///
/// # Example
///
/// ```
/// use halftone_restore::RestoredImage;
/// use std::time::Duration;
///
/// let image = RestoredImage::new(vec![0, 64, 128, 255], 2, 2, Duration::ZERO);
/// assert_eq!(image.pixel(1, 0), 128);
/// assert_eq!(image.into_pixels(), vec![0, 64, 128, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredImage {
    pixels: Vec<u8>,
    rows: usize,
    cols: usize,
    elapsed: Duration,
}

impl RestoredImage {
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `pixels.len() == rows * cols`.
    pub fn new(pixels: Vec<u8>, rows: usize, cols: usize, elapsed: Duration) -> Self {
        debug_assert_eq!(
            pixels.len(),
            rows * cols,
            "pixel count ({}) must match rows * cols ({}x{})",
            pixels.len(),
            rows,
            cols
        );
        Self {
            pixels,
            rows,
            cols,
            elapsed,
        }
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Time spent in the filter stages.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Grey level at `(row, col)`.
    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> u8 {
        self.pixels[row * self.cols + col]
    }

    /// Take ownership of the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let image = RestoredImage::new(vec![1, 2, 3, 4, 5, 6], 2, 3, Duration::from_millis(7));
        assert_eq!(image.rows(), 2);
        assert_eq!(image.cols(), 3);
        assert_eq!(image.pixel(1, 2), 6);
        assert_eq!(image.pixels(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(image.elapsed(), Duration::from_millis(7));
    }
}
