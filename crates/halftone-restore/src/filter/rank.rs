//! Rank-order filters.
//!
//! The grey medians read their window through the mirror rule. The binary
//! majority filter does not: neighbours outside the image are simply left
//! out of the count, so border pixels vote over a smaller window while the
//! threshold stays at 13.

use super::select::select_kth;
use crate::api::HalftoneError;
use crate::matrix::{reflect, FloatMatrix};

/// Votes needed for the majority filter to report an edge.
pub const MAJORITY_THRESHOLD: usize = 13;

/// Exact median over a mirrored `size x size` window, `size` odd.
fn median_filter<const N: usize>(source: &FloatMatrix, size: usize, dest: &mut FloatMatrix) {
    debug_assert_eq!(size * size, N);
    debug_assert!(source.same_shape(dest));
    let (rows, cols) = (source.rows(), source.cols());
    let half = (size / 2) as isize;
    let mut window = [0.0f32; N];

    for row in 0..rows {
        for col in 0..cols {
            let mut n = 0;
            for dr in -half..=half {
                let r = reflect(row as isize + dr, rows);
                let line = source.row(r);
                for dc in -half..=half {
                    window[n] = line[reflect(col as isize + dc, cols)];
                    n += 1;
                }
            }
            dest.set(row, col, select_kth(&mut window, N / 2));
        }
    }
}

/// 3x3 median of a grey plane (5th smallest of 9).
pub fn median3x3(source: &FloatMatrix, dest: &mut FloatMatrix) {
    median_filter::<9>(source, 3, dest);
}

/// 5x5 median of a grey plane (13th smallest of 25).
pub fn median5x5(source: &FloatMatrix, dest: &mut FloatMatrix) {
    median_filter::<25>(source, 5, dest);
}

/// Majority vote of the binary plane at `(row, col)`.
///
/// The window covers rows `row-4..=row` and columns `col-4..=col`; samples
/// outside the image are skipped. Counting stops as soon as the threshold
/// is reached.
pub fn majority_at(source: &FloatMatrix, row: usize, col: usize) -> bool {
    let mut votes = 0;
    for r in row.saturating_sub(4)..=row {
        let line = source.row(r);
        for &sample in &line[col.saturating_sub(4)..=col] {
            if sample != 0.0 {
                votes += 1;
                if votes >= MAJORITY_THRESHOLD {
                    return true;
                }
            }
        }
    }
    false
}

/// 5x5 majority filter of a binary plane into a fresh `edge map` plane of
/// zeros and ones.
pub fn majority5x5(source: &FloatMatrix) -> Result<FloatMatrix, HalftoneError> {
    let (rows, cols) = (source.rows(), source.cols());
    let mut votes = FloatMatrix::zeros(rows, cols, "edge map")?;
    for row in 0..rows {
        for col in 0..cols {
            if majority_at(source, row, col) {
                votes.set(row, col, 1.0);
            }
        }
    }
    Ok(votes)
}
