//! Separable convolution with mirrored boundaries.
//!
//! Both variants run a row pass into a scratch plane and then a column pass
//! into the destination. The column pass divides by [`NORMALIZATION`] and
//! rounds half up, so every destination sample is a whole number.
//!
//! Accumulation order is fixed (centre tap first, then symmetric pairs from
//! the outside in). Reordering the float sums changes the rounding of some
//! samples.

use super::kernel::{Kernel, NORMALIZATION};
use crate::api::HalftoneError;
use crate::matrix::{reflect, FloatMatrix};

/// Half-up rounding of a normalised column sum.
///
/// The offset is added in double precision before truncating toward zero.
#[inline]
fn normalize_round(sum: f32) -> f32 {
    ((sum / NORMALIZATION) as f64 + 0.5) as i32 as f32
}

/// Symmetric multiply-accumulate around `center` along one axis.
///
/// `sample(offset)` must return the mirrored neighbour at a signed offset.
#[inline]
fn symmetric_sum(kernel: &Kernel, center: f32, sample: impl Fn(isize) -> f32) -> f32 {
    let radius = kernel.radius();
    let mut sum = kernel.center() as f32 * center;
    for (tap, &coeff) in kernel.half[..radius].iter().enumerate() {
        let offset = (radius - tap) as isize;
        sum += coeff as f32 * (sample(-offset) + sample(offset));
    }
    sum
}

/// Column pass shared by both variants: filter `scratch` down each column
/// and write normalised, rounded samples into `dest`.
fn column_pass(scratch: &FloatMatrix, kernel: &Kernel, dest: &mut FloatMatrix) {
    let rows = scratch.rows();
    for col in 0..scratch.cols() {
        for row in 0..rows {
            let sum = symmetric_sum(kernel, scratch.get(row, col), |offset| {
                scratch.get(reflect(row as isize + offset, rows), col)
            });
            dest.set(row, col, normalize_round(sum));
        }
    }
}

/// Low-pass filter a binary (zero / nonzero) plane.
///
/// The row pass only adds the coefficients of taps whose mirrored source
/// sample is nonzero and scales the row sum by 255. The column pass is an
/// ordinary convolution of that intermediate result.
pub fn convolve_binary(
    source: &FloatMatrix,
    kernel: &Kernel,
    dest: &mut FloatMatrix,
) -> Result<(), HalftoneError> {
    debug_assert!(source.same_shape(dest));
    let (rows, cols) = (source.rows(), source.cols());
    let radius = kernel.radius() as isize;
    let mut scratch = FloatMatrix::zeros(rows, cols, "row pass")?;

    for row in 0..rows {
        let line = source.row(row);
        for col in 0..cols {
            let mut sum = 0.0f32;
            for offset in -radius..=radius {
                if line[reflect(col as isize + offset, cols)] != 0.0 {
                    sum += kernel.at(offset) as f32;
                }
            }
            scratch.set(row, col, 255.0 * sum);
        }
    }

    column_pass(&scratch, kernel, dest);
    Ok(())
}

/// Low-pass filter a grey-valued plane with full multiply-accumulate in
/// both passes.
pub fn convolve_grey(
    source: &FloatMatrix,
    kernel: &Kernel,
    dest: &mut FloatMatrix,
) -> Result<(), HalftoneError> {
    debug_assert!(source.same_shape(dest));
    let (rows, cols) = (source.rows(), source.cols());
    let mut scratch = FloatMatrix::zeros(rows, cols, "row pass")?;

    for row in 0..rows {
        let line = source.row(row);
        for col in 0..cols {
            let sum = symmetric_sum(kernel, line[col], |offset| {
                line[reflect(col as isize + offset, cols)]
            });
            scratch.set(row, col, sum);
        }
    }

    column_pass(&scratch, kernel, dest);
    Ok(())
}
