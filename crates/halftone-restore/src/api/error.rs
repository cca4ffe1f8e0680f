//! Unified error type for the halftone-restore public API.
//!
//! [`HalftoneError`] covers every way a restoration call can fail. All
//! failures are terminal for the call: no partial output is produced.

use std::fmt;
use std::io;

/// Error returned by the inverse halftoning entry points.
///
/// # Example
///
/// ```
/// use halftone_restore::{HalftoneError, HalftoneMethod};
///
/// let err = HalftoneMethod::from_code(99).unwrap_err();
/// assert!(matches!(err, HalftoneError::BadMethod(_)));
/// ```
#[derive(Debug)]
pub enum HalftoneError {
    /// Unrecognised halftoning method (integer code or name as given)
    BadMethod(String),
    /// An intermediate buffer could not be allocated
    NoMemory {
        /// Name of the buffer whose allocation failed
        buffer: &'static str,
    },
    /// Image smaller than the 5x5 minimum the mirrored filters need
    ImageTooSmall { rows: usize, cols: usize },
    /// Pixel buffer length does not match `rows * cols`
    SizeMismatch { expected: usize, actual: usize },
    /// Reading rows from or writing bytes to a stream failed
    Io(io::Error),
}

impl fmt::Display for HalftoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalftoneError::BadMethod(method) => {
                write!(f, "invalid halftoning method {}", method)
            }
            HalftoneError::NoMemory { buffer } => {
                write!(f, "could not allocate the {} buffer", buffer)
            }
            HalftoneError::ImageTooSmall { rows, cols } => write!(
                f,
                "image of {}x{} is too small (both dimensions must be at least 5)",
                rows, cols
            ),
            HalftoneError::SizeMismatch { expected, actual } => write!(
                f,
                "pixel buffer holds {} bytes but the image needs {}",
                actual, expected
            ),
            HalftoneError::Io(err) => write!(f, "stream error: {}", err),
        }
    }
}

impl std::error::Error for HalftoneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HalftoneError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for HalftoneError {
    fn from(err: io::Error) -> Self {
        HalftoneError::Io(err)
    }
}
