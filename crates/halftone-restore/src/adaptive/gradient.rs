//! Two-scale gradient estimators and the gradient-to-smoothing mapping.
//!
//! The 5x5 and 7x7 derivative kernels are quantised to signed bytes. Their
//! responses are multiplied as `t2 * t3^2` and rescaled by [`FILTSCALE`]
//! (`1 / (1024 * 2048 * 2048)`) before the cube-root approximation.

use super::window::{RowWindow, WINDOW_ROWS};

/// Undo the fixed-point scaling of the composite gradient.
pub const FILTSCALE: f32 = 2.328306436538696e-10;

/// Smoothing parameter for a flat neighbourhood.
pub const MAX_SMOOTHING: f32 = 3.33;

/// Smoothing parameter at and above [`SATURATION`].
pub const MIN_SMOOTHING: f32 = 1.95;

/// Composite gradient at which the mapping reaches [`MIN_SMOOTHING`].
pub const SATURATION: f64 = 0.0141909899;

/// Split between the two linear seeds of the cube-root iteration.
pub const SEED_BREAKPOINT: f64 = 0.001;

#[rustfmt::skip]
pub const F2X: [i8; 25] = [
    19,  32, 0,  -32, -19,
    55,  92, 0,  -92, -55,
    72, 120, 0, -120, -72,
    55,  92, 0,  -92, -55,
    19,  32, 0,  -32, -19,
];

// Not an exact transpose of F2X: the bottom row centre is -71.
#[rustfmt::skip]
pub const F2Y: [i8; 25] = [
     19,  55,   72,  55,  19,
     32,  92,  120,  92,  32,
      0,   0,    0,   0,   0,
    -32, -92, -120, -92, -32,
    -19, -55,  -71, -55, -19,
];

#[rustfmt::skip]
pub const F3X: [i8; 49] = [
    12,  27,  25, 0,  -25,  -27, -12,
    30,  68,  64, 0,  -64,  -68, -30,
    45, 103,  96, 0,  -96, -103, -45,
    54, 124, 114, 0, -114, -124, -54,
    45, 103,  96, 0,  -96, -103, -45,
    30,  68,  64, 0,  -64,  -68, -30,
    12,  27,  25, 0,  -25,  -27, -12,
];

#[rustfmt::skip]
pub const F3Y: [i8; 49] = [
     12,  30,  45,   54,  45,  30,  12,
     27,  68, 103,  124, 103,  68,  27,
     25,  64,  96,  114,  96,  64,  25,
      0,   0,   0,    0,   0,   0,   0,
    -25, -64, -96, -114, -96, -64, -25,
    -27, -68,-103, -124,-103, -68, -27,
    -12, -30, -45,  -54, -45, -30, -12,
];

/// Horizontal and vertical responses at the two scales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gradients {
    pub t2x: i32,
    pub t2y: i32,
    pub t3x: i32,
    pub t3y: i32,
}

impl Gradients {
    /// Sum kernel coefficients over the nonzero pixels of the 7x7 window
    /// whose left edge is padded column `col`.
    ///
    /// The 5x5 kernels cover the inner 5x5 of the same window.
    pub fn measure(window: &RowWindow, col: usize) -> Self {
        let mut g = Gradients::default();
        for r in 0..WINDOW_ROWS {
            let line = &window.row(r)[col..col + WINDOW_ROWS];
            for (c, &pixel) in line.iter().enumerate() {
                if pixel == 0 {
                    continue;
                }
                let k3 = r * 7 + c;
                g.t3x += F3X[k3] as i32;
                g.t3y += F3Y[k3] as i32;
                if (1..=5).contains(&r) && (1..=5).contains(&c) {
                    let k2 = (r - 1) * 5 + (c - 1);
                    g.t2x += F2X[k2] as i32;
                    g.t2y += F2Y[k2] as i32;
                }
            }
        }
        g
    }

    /// Composite horizontal gradient `t2x * t3x^2`, rescaled.
    pub fn horizontal(&self) -> f32 {
        composite_gradient(self.t2x, self.t3x)
    }

    /// Composite vertical gradient `t2y * t3y^2`, rescaled.
    pub fn vertical(&self) -> f32 {
        composite_gradient(self.t2y, self.t3y)
    }
}

#[inline]
fn composite_gradient(small: i32, large: i32) -> f32 {
    small as f32 * large as f32 * large as f32 * FILTSCALE
}

/// Map a composite gradient to a smoothing parameter in `[1.95, 3.33]`.
///
/// Computes `3.33 - 5.7 * cbrt(|g|)` with a two-segment linear seed and
/// exactly two Newton steps. Zero maps to [`MAX_SMOOTHING`], anything above
/// [`SATURATION`] to [`MIN_SMOOTHING`]. The seeds, the iteration count and
/// the mixed single/double precision are fixed; results must match bit for
/// bit.
pub fn smoothing_parameter(gradient: f32) -> f32 {
    if gradient == 0.0 {
        return MAX_SMOOTHING;
    }
    let g = gradient.abs();
    if g as f64 > SATURATION {
        return MIN_SMOOTHING;
    }

    let mut root = if g as f64 > SEED_BREAKPOINT {
        (9.6742 * g as f64 + 0.116165) as f32
    } else {
        (98.87505 * g as f64 + 0.027) as f32
    };
    let third = (g as f64 * 0.3333333333) as f32;
    for _ in 0..2 {
        root = (0.66666666 * root as f64 + (third / (root * root)) as f64) as f32;
    }
    (3.33 - 5.7 * root as f64) as f32
}
