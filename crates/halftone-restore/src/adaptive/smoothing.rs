//! Per-pixel synthesis of the adaptive 7-tap smoothing kernel.

/// Output scale `255 / (16 * 1024 * 1024)`.
///
/// The two factors of 1024 undo the fixed-point taps, 16 undoes the
/// separable gain of 4 per axis.
pub const FILTSCALE2: f32 = 1.519918441772461e-5;

/// Fixed centre tap (4.0 in 10-bit fixed point).
pub const CENTER_TAP: i32 = 4 * 1024;

/// A symmetric 7-tap kernel `[t0, t1, t2, 4096, t2, t1, t0]` and its
/// normaliser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveKernel {
    pub taps: [i32; 7],
    pub norm: f32,
}

impl AdaptiveKernel {
    /// Build the kernel for smoothing parameter `c1` in `[1.95, 3.33]`.
    ///
    /// The second parameter comes from a fixed cubic fit in `c1`; the taps
    /// are `1024 * (c2 + 2 - c1)`, `1024 * c2` and `1024 * c1`, truncated.
    /// The returned `norm` is `c2 + 2`.
    pub fn synthesize(c1: f32) -> Self {
        let c = c1 as f64;
        let mut c2 = (-3.611679 + c * (4.659894 + c * (-2.426115 + c * 0.4630577))) as f32;
        let t1 = (1024.0f32 * c2) as i32;
        c2 += 2.0;
        let t0 = (1024.0f32 * (c2 - c1)) as i32;
        let t2 = (1024.0f32 * c1) as i32;
        Self {
            taps: [t0, t1, t2, CENTER_TAP, t2, t1, t0],
            norm: c2,
        }
    }
}
