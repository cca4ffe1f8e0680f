//! Mirror-indexed float plane.
//!
//! Every filter stage reads its neighbourhood through [`reflect`], which
//! folds out-of-range indices back into the image instead of clamping,
//! wrapping or zero-padding:
//!
//! ```text
//! index:   -3 -2 -1 | 0  1  2  3  4 | 5  6  7
//! maps to:  3  2  1 | 0  1  2  3  4 | 3  2  1
//! ```
//!
//! The edge sample itself is not repeated. The rule stays inside
//! `[0, extent)` as long as the offset magnitude is below `extent`, so the
//! 9-tap kernels (offsets up to 4) need extents of at least 5.

use crate::api::HalftoneError;

/// Smallest row or column count the filters accept.
///
/// The widest kernel reaches 4 samples past the centre, and the mirror rule
/// needs one more sample than that to stay in range.
pub const MIN_EXTENT: usize = 5;

/// Reflect `index` into `[0, extent)` about the first and last samples.
///
/// `i < 0` maps to `-i`; `i >= extent` maps to `2 * extent - i - 2`.
/// Offsets beyond `extent - 1` are out of contract.
#[inline]
pub fn reflect(index: isize, extent: usize) -> usize {
    let extent = extent as isize;
    let mirrored = if index < 0 {
        -index
    } else if index >= extent {
        2 * extent - index - 2
    } else {
        index
    };
    debug_assert!(
        (0..extent).contains(&mirrored),
        "offset {} too large for extent {}",
        index,
        extent
    );
    mirrored as usize
}

/// Reject image dimensions the filters cannot mirror.
pub(crate) fn check_extents(rows: usize, cols: usize) -> Result<(), HalftoneError> {
    if rows < MIN_EXTENT || cols < MIN_EXTENT {
        return Err(HalftoneError::ImageTooSmall { rows, cols });
    }
    Ok(())
}

/// Reserve a zeroed buffer of `len` samples, naming it on failure.
pub(crate) fn try_zeroed<T: Copy + Default>(
    len: usize,
    buffer: &'static str,
) -> Result<Vec<T>, HalftoneError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| HalftoneError::NoMemory { buffer })?;
    data.resize(len, T::default());
    Ok(data)
}

/// Row-major plane of `f32` samples.
///
/// Reads outside the plane go through [`FloatMatrix::mirrored`]; plain
/// [`FloatMatrix::get`] and [`FloatMatrix::set`] are for in-range indices.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatMatrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl FloatMatrix {
    /// Allocate a zero-initialised `rows x cols` plane.
    ///
    /// `buffer` names the allocation in the [`HalftoneError::NoMemory`]
    /// returned when the plane cannot be reserved.
    pub fn zeros(rows: usize, cols: usize, buffer: &'static str) -> Result<Self, HalftoneError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(HalftoneError::NoMemory { buffer })?;
        Ok(Self {
            data: try_zeroed(len, buffer)?,
            rows,
            cols,
        })
    }

    /// Convert an 8-bit image into a float plane, one sample per byte.
    pub fn from_bytes(
        pixels: &[u8],
        rows: usize,
        cols: usize,
        buffer: &'static str,
    ) -> Result<Self, HalftoneError> {
        let mut matrix = Self::zeros(rows, cols, buffer)?;
        if pixels.len() != matrix.data.len() {
            return Err(HalftoneError::SizeMismatch {
                expected: matrix.data.len(),
                actual: pixels.len(),
            });
        }
        for (dst, &src) in matrix.data.iter_mut().zip(pixels) {
            *dst = src as f32;
        }
        Ok(matrix)
    }

    /// Build a plane from existing samples.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(data: Vec<f32>, rows: usize, cols: usize) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "sample count ({}) must match {}x{}",
            data.len(),
            rows,
            cols
        );
        Self { data, rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.cols + col] = value;
    }

    /// Sample at a possibly out-of-range position, mirrored on both axes.
    #[inline]
    pub fn mirrored(&self, row: isize, col: isize) -> f32 {
        self.get(reflect(row, self.rows), reflect(col, self.cols))
    }

    /// One row as a slice.
    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// All samples in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Whether both planes have the same dimensions.
    #[inline]
    pub fn same_shape(&self, other: &FloatMatrix) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }
}
