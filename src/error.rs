use halftone_restore::HalftoneError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: color images are currently not supported", .path.display())]
    UnsupportedColor { path: PathBuf },

    #[error("Invalid image header: {0}")]
    InvalidHeader(String),

    #[error("Bad maximum gray value: {0} (expected 1..=255)")]
    BadMaxValue(u32),

    #[error("Truncated pixel data: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Interlaced PNG images cannot be read row by row")]
    InterlacedStream,
}

#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("Image I/O error: {0}")]
    Io(#[from] ImageIoError),

    #[error("Restoration error: {0}")]
    Halftone(#[from] HalftoneError),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_io_error_unsupported_color() {
        let error = ImageIoError::UnsupportedColor {
            path: PathBuf::from("lena.ppm"),
        };
        assert_eq!(
            error.to_string(),
            "lena.ppm: color images are currently not supported"
        );
    }

    #[test]
    fn test_image_io_error_invalid_header() {
        let error = ImageIoError::InvalidHeader("width is not a number".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid image header: width is not a number"
        );
    }

    #[test]
    fn test_image_io_error_bad_max_value() {
        let error = ImageIoError::BadMaxValue(256);
        assert_eq!(
            error.to_string(),
            "Bad maximum gray value: 256 (expected 1..=255)"
        );
    }

    #[test]
    fn test_image_io_error_truncated() {
        let error = ImageIoError::Truncated {
            expected: 262144,
            actual: 1000,
        };
        assert_eq!(
            error.to_string(),
            "Truncated pixel data: expected 262144 bytes, found 1000"
        );
    }

    #[test]
    fn test_image_io_error_png() {
        let error = ImageIoError::PngDecode("bad signature".to_string());
        assert_eq!(error.to_string(), "PNG decode error: bad signature");

        let error = ImageIoError::PngEncode("zero width".to_string());
        assert_eq!(error.to_string(), "PNG encode error: zero width");
    }

    #[test]
    fn test_image_io_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ImageIoError = io_error.into();
        assert!(matches!(error, ImageIoError::Io(_)));
        assert!(error.to_string().contains("IO error"));
    }

    #[test]
    fn test_restore_error_from_halftone() {
        let error: RestoreError = HalftoneError::BadMethod("7".to_string()).into();
        assert!(matches!(error, RestoreError::Halftone(_)));
        assert!(error.to_string().starts_with("Restoration error: "));
    }

    #[test]
    fn test_restore_error_from_image_io() {
        let error: RestoreError = ImageIoError::InterlacedStream.into();
        assert_eq!(
            error.to_string(),
            "Image I/O error: Interlaced PNG images cannot be read row by row"
        );
    }

    #[test]
    fn test_restore_error_config() {
        let error = RestoreError::Config("missing file".to_string());
        assert_eq!(error.to_string(), "Configuration error: missing file");
    }
}
