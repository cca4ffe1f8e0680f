use std::fmt;

/// Extent assumed for raw files when the caller gives none.
pub const DEFAULT_DIMENSION: usize = 512;

/// On-disk layout of a grayscale halftone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Headerless row-major bytes; dimensions come from the caller
    Raw,
    /// Binary PGM (`P5`)
    Pgm,
    /// Binary PPM (`P6`), recognised so it can be rejected
    Ppm,
    Png,
}

impl ImageFormat {
    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Raw => "raw",
            ImageFormat::Pgm => "pgm",
            ImageFormat::Ppm => "ppm",
            ImageFormat::Png => "png",
        }
    }

    pub fn is_color(self) -> bool {
        matches!(self, ImageFormat::Ppm)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Dimensions and layout of an image file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSpec {
    pub rows: usize,
    pub cols: usize,
    pub format: ImageFormat,
}

impl ImageSpec {
    pub fn new(rows: usize, cols: usize, format: ImageFormat) -> Self {
        Self { rows, cols, format }
    }

    /// Number of pixel bytes, or `None` if `rows * cols` overflows
    pub fn pixel_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }
}
