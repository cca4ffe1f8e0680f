//! Edge detection on the difference of two low-pass estimates.

use crate::api::HalftoneError;
use crate::filter::majority5x5;
use crate::matrix::FloatMatrix;

/// Gate the difference `y2 - z` by a thresholded, majority-cleaned edge map.
///
/// A sample keeps its difference only when `|y2 - z| > threshold` at that
/// pixel and the 5x5 majority of those raw edge flags also votes for an
/// edge. Everything else becomes zero. `z` is reused to hold the raw flags.
pub fn edge_residual(
    y2: &FloatMatrix,
    mut z: FloatMatrix,
    threshold: u32,
    hie: &mut FloatMatrix,
) -> Result<(), HalftoneError> {
    debug_assert!(y2.same_shape(&z) && y2.same_shape(hie));
    let limit = threshold as f32;

    for ((diff_out, flag), &smooth) in hie
        .as_mut_slice()
        .iter_mut()
        .zip(z.as_mut_slice())
        .zip(y2.as_slice())
    {
        let diff = smooth - *flag;
        *flag = if diff <= limit && diff >= -limit { 0.0 } else { 1.0 };
        *diff_out = diff;
    }

    let edge_map = majority5x5(&z)?;

    for ((residual, &flag), &vote) in hie
        .as_mut_slice()
        .iter_mut()
        .zip(z.as_slice())
        .zip(edge_map.as_slice())
    {
        *residual *= flag * vote;
    }
    Ok(())
}
