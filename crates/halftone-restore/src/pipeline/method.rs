//! Halftoning method selection.

use std::fmt;
use std::str::FromStr;

use crate::api::HalftoneError;
use crate::filter::kernel::{
    Kernel, CLUSTERED_DITHER_LOWPASS, DISPERSED_DITHER_LOWPASS, DITHER_NARROW, DITHER_SMOOTH,
    ERROR_DIFFUSION_LOWPASS, ERROR_DIFFUSION_NARROW, ERROR_DIFFUSION_SMOOTH,
};

/// The halftoning process that produced the input image.
///
/// Each method has its own first-stage kernel; error diffusion uses a 3x3
/// median and 7-tap later stages, the two dither methods share a 5x5 median
/// and 9-tap later stages.
///
/// # Example
///
/// ```
/// use halftone_restore::HalftoneMethod;
///
/// let method: HalftoneMethod = "clustered".parse().unwrap();
/// assert_eq!(method, HalftoneMethod::ClusteredDither);
/// assert_eq!(HalftoneMethod::from_code(1).unwrap(), HalftoneMethod::ErrorDiffusion);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HalftoneMethod {
    #[default]
    ErrorDiffusion,
    DispersedDither,
    ClusteredDither,
}

/// Median window applied after the first low-pass stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedianWindow {
    ThreeByThree,
    FiveByFive,
}

/// Kernels and median window used for one method.
#[derive(Debug, Clone, Copy)]
pub struct FilterSet {
    pub lowpass: Kernel,
    pub median: MedianWindow,
    pub smooth: Kernel,
    pub narrow: Kernel,
}

impl HalftoneMethod {
    pub const ALL: [HalftoneMethod; 3] = [
        HalftoneMethod::ErrorDiffusion,
        HalftoneMethod::DispersedDither,
        HalftoneMethod::ClusteredDither,
    ];

    /// Map the numeric codes 1, 2 and 3 to a method.
    pub fn from_code(code: i64) -> Result<Self, HalftoneError> {
        match code {
            1 => Ok(HalftoneMethod::ErrorDiffusion),
            2 => Ok(HalftoneMethod::DispersedDither),
            3 => Ok(HalftoneMethod::ClusteredDither),
            other => Err(HalftoneError::BadMethod(other.to_string())),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            HalftoneMethod::ErrorDiffusion => 1,
            HalftoneMethod::DispersedDither => 2,
            HalftoneMethod::ClusteredDither => 3,
        }
    }

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            HalftoneMethod::ErrorDiffusion => "error-diffusion",
            HalftoneMethod::DispersedDither => "dispersed-dither",
            HalftoneMethod::ClusteredDither => "clustered-dither",
        }
    }

    pub fn filters(self) -> FilterSet {
        match self {
            HalftoneMethod::ErrorDiffusion => FilterSet {
                lowpass: ERROR_DIFFUSION_LOWPASS,
                median: MedianWindow::ThreeByThree,
                smooth: ERROR_DIFFUSION_SMOOTH,
                narrow: ERROR_DIFFUSION_NARROW,
            },
            HalftoneMethod::DispersedDither => FilterSet {
                lowpass: DISPERSED_DITHER_LOWPASS,
                median: MedianWindow::FiveByFive,
                smooth: DITHER_SMOOTH,
                narrow: DITHER_NARROW,
            },
            HalftoneMethod::ClusteredDither => FilterSet {
                lowpass: CLUSTERED_DITHER_LOWPASS,
                median: MedianWindow::FiveByFive,
                smooth: DITHER_SMOOTH,
                narrow: DITHER_NARROW,
            },
        }
    }
}

impl fmt::Display for HalftoneMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HalftoneMethod {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "error-diffusion" | "ed" | "1" => Ok(HalftoneMethod::ErrorDiffusion),
            "dispersed-dither" | "dispersed" | "2" => Ok(HalftoneMethod::DispersedDither),
            "clustered-dither" | "clustered" | "3" => Ok(HalftoneMethod::ClusteredDither),
            _ => Err(HalftoneError::BadMethod(trimmed.to_string())),
        }
    }
}
