//! Final recombination of the smooth estimate and the edge residual.

use crate::matrix::FloatMatrix;

/// Write `clip(round(gain * hie + y1))` for every pixel into `out`.
///
/// Rounding is half up (`+ 0.5` then truncation); the clip saturates to
/// `[0, 255]`.
pub fn composite(gain: u32, hie: &FloatMatrix, y1: &FloatMatrix, out: &mut [u8]) {
    debug_assert!(hie.same_shape(y1));
    debug_assert_eq!(out.len(), y1.as_slice().len());
    let gain = gain as f32;

    for ((pixel, &residual), &smooth) in out.iter_mut().zip(hie.as_slice()).zip(y1.as_slice()) {
        let value = 0.5f32 + (gain * residual + smooth);
        *pixel = if value < 0.0 {
            0
        } else if value > 255.0 {
            255
        } else {
            value as u8
        };
    }
}
