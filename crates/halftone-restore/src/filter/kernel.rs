//! Symmetric low-pass kernel definitions.
//!
//! Every smoothing stage uses an odd-length, symmetric, integer-valued 1D
//! kernel applied separably (rows, then columns). Only the outer side and
//! the centre are stored; the other side is the mirror image.
//!
//! The coefficients are Gaussian approximations scaled so that each 1D
//! kernel sums to roughly 10^4. The 2D response is therefore divided by
//! [`NORMALIZATION`] (10^8). The tables are part of the output contract:
//! changing a single coefficient changes restored images.

/// Divisor applied after the column pass of every separable filter.
pub const NORMALIZATION: f32 = 100_000_000.0;

/// A symmetric separable smoothing kernel.
///
/// `half` holds the taps from the outermost offset inwards, ending with
/// the centre tap:
///
/// ```text
/// half = [h0, h1, h2, h3, c]  ->  h0 h1 h2 h3 c h3 h2 h1 h0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// Outer-to-centre coefficients; the full kernel has `2 * half.len() - 1` taps.
    pub half: &'static [i32],
}

impl Kernel {
    /// Largest offset from the centre the kernel reaches.
    #[inline]
    pub const fn radius(&self) -> usize {
        self.half.len() - 1
    }

    /// Number of taps in the full kernel.
    #[inline]
    pub const fn taps(&self) -> usize {
        2 * self.half.len() - 1
    }

    /// Centre coefficient.
    #[inline]
    pub fn center(&self) -> i32 {
        self.half[self.radius()]
    }

    /// Coefficient at signed `offset` from the centre.
    ///
    /// # Panics
    ///
    /// Panics if `|offset| > radius()`.
    #[inline]
    pub fn at(&self, offset: isize) -> i32 {
        self.half[self.radius() - offset.unsigned_abs()]
    }

    /// Sum of all taps (the 1D DC gain before normalisation).
    pub fn sum(&self) -> i32 {
        2 * self.half.iter().sum::<i32>() - self.center()
    }
}

/// First-stage kernel for error-diffused halftones (9 taps).
///
/// ```text
/// 11 135 808 2359 3372 2359 808 135 11
/// ```
pub const ERROR_DIFFUSION_LOWPASS: Kernel = Kernel {
    half: &[11, 135, 808, 2359, 3372],
};

/// Second-stage kernel for error-diffused halftones (7 taps).
pub const ERROR_DIFFUSION_SMOOTH: Kernel = Kernel {
    half: &[44, 540, 2420, 3991],
};

/// Third-stage kernel for error-diffused halftones (7 taps, narrow).
pub const ERROR_DIFFUSION_NARROW: Kernel = Kernel {
    half: &[1, 103, 2075, 5641],
};

/// First-stage kernel for dispersed-dot dither (9 taps, wider).
pub const DISPERSED_DITHER_LOWPASS: Kernel = Kernel {
    half: &[103, 419, 1138, 2074, 2533],
};

/// First-stage kernel for clustered-dot dither (9 taps, nearly flat).
///
/// Clustered dots repeat with a long period, so the first stage is close
/// to a box filter.
pub const CLUSTERED_DITHER_LOWPASS: Kernel = Kernel {
    half: &[583, 903, 1234, 1488, 1584],
};

/// Second-stage kernel shared by both dither methods (9 taps).
pub const DITHER_SMOOTH: Kernel = Kernel {
    half: &[1, 44, 540, 2420, 3989],
};

/// Third-stage kernel shared by both dither methods (9 taps, narrow).
pub const DITHER_NARROW: Kernel = Kernel {
    half: &[0, 1, 103, 2075, 5641],
};
