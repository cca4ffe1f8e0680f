//! Reading and writing grayscale halftones.
//!
//! Three layouts are understood, detected from the file content:
//!
//! | Format | Detected by | Dimensions from |
//! |--------|-------------|-----------------|
//! | PNG    | 8-byte signature | IHDR chunk |
//! | PGM    | `P5` + whitespace | header |
//! | raw    | anything else | caller |
//!
//! Binary PPM (`P6`) and colored PNG are recognised and rejected. Output
//! is always written in the same layout as the input.

pub mod png_io;
pub mod pnm;

use crate::error::ImageIoError;
use crate::models::{ImageFormat, ImageSpec};
use halftone_restore::{ReadRows, RowSource};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub use png_io::PngRows;
pub use pnm::PnmHeader;

/// An 8-bit grayscale image together with the layout it was stored in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    pub spec: ImageSpec,
    pub pixels: Vec<u8>,
}

impl GrayImage {
    pub fn new(spec: ImageSpec, pixels: Vec<u8>) -> Self {
        Self { spec, pixels }
    }

    pub fn rows(&self) -> usize {
        self.spec.rows
    }

    pub fn cols(&self) -> usize {
        self.spec.cols
    }

    pub fn format(&self) -> ImageFormat {
        self.spec.format
    }
}

/// Classify a file from its first bytes
pub fn detect_format(prefix: &[u8]) -> ImageFormat {
    if png_io::is_png(prefix) {
        ImageFormat::Png
    } else {
        pnm::sniff(prefix).unwrap_or(ImageFormat::Raw)
    }
}

fn reject_color(spec: &ImageSpec, path: &Path) -> Result<(), ImageIoError> {
    if spec.format.is_color() {
        return Err(ImageIoError::UnsupportedColor {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn pixel_count(spec: &ImageSpec) -> Result<usize, ImageIoError> {
    spec.pixel_count().ok_or_else(|| {
        ImageIoError::InvalidHeader(format!("{}x{} image is too large", spec.rows, spec.cols))
    })
}

/// Read a whole image into memory
///
/// `fallback_rows` and `fallback_cols` give the size of a headerless raw
/// file. Trailing bytes beyond `rows * cols` are ignored.
pub fn decode_file(
    path: &Path,
    fallback_rows: usize,
    fallback_cols: usize,
) -> Result<GrayImage, ImageIoError> {
    let data = std::fs::read(path)?;

    let (spec, pixel_data) = match detect_format(&data) {
        ImageFormat::Png => {
            let (spec, pixels) = png_io::decode_png(&data[..], path)?;
            return Ok(GrayImage::new(spec, pixels));
        }
        ImageFormat::Raw => (
            ImageSpec::new(fallback_rows, fallback_cols, ImageFormat::Raw),
            &data[..],
        ),
        ImageFormat::Pgm | ImageFormat::Ppm => {
            let mut cursor = &data[..];
            let header = pnm::read_header(&mut cursor)?;
            (ImageSpec::new(header.rows, header.cols, header.format), cursor)
        }
    };
    reject_color(&spec, path)?;

    let expected = pixel_count(&spec)?;
    if pixel_data.len() < expected {
        return Err(ImageIoError::Truncated {
            expected,
            actual: pixel_data.len(),
        });
    }

    tracing::debug!(
        path = %path.display(),
        format = %spec.format,
        rows = spec.rows,
        cols = spec.cols,
        "Decoded image"
    );
    Ok(GrayImage::new(spec, pixel_data[..expected].to_vec()))
}

/// Write an image in its own layout
pub fn encode_file(path: &Path, image: &GrayImage) -> Result<(), ImageIoError> {
    reject_color(&image.spec, path)?;
    let expected = pixel_count(&image.spec)?;
    if image.pixels.len() != expected {
        return Err(ImageIoError::Truncated {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut writer = BufWriter::new(File::create(path)?);
    match image.format() {
        ImageFormat::Png => png_io::encode_png(&mut writer, image.rows(), image.cols(), &image.pixels)?,
        ImageFormat::Pgm => {
            pnm::write_pgm_header(&mut writer, image.rows(), image.cols())?;
            writer.write_all(&image.pixels)?;
        }
        ImageFormat::Raw | ImageFormat::Ppm => writer.write_all(&image.pixels)?,
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), format = %image.format(), "Encoded image");
    Ok(())
}

/// Row-at-a-time pixel source over an image file
pub enum ImageRows {
    Bytes(ReadRows<BufReader<File>>),
    Png(PngRows<BufReader<File>>),
}

impl RowSource for ImageRows {
    fn next_row(&mut self, buf: &mut [u8]) -> io::Result<()> {
        match self {
            ImageRows::Bytes(rows) => rows.next_row(buf),
            ImageRows::Png(rows) => rows.next_row(buf),
        }
    }
}

/// Open an image for streaming, consuming only its header
pub fn open_row_source(
    path: &Path,
    fallback_rows: usize,
    fallback_cols: usize,
) -> Result<(ImageSpec, ImageRows), ImageIoError> {
    let mut reader = BufReader::new(File::open(path)?);

    let (spec, rows) = match detect_format(reader.fill_buf()?) {
        ImageFormat::Png => {
            let (spec, rows) = PngRows::open(reader, path)?;
            (spec, ImageRows::Png(rows))
        }
        ImageFormat::Raw => (
            ImageSpec::new(fallback_rows, fallback_cols, ImageFormat::Raw),
            ImageRows::Bytes(ReadRows::new(reader)),
        ),
        ImageFormat::Pgm | ImageFormat::Ppm => {
            let header = pnm::read_header(&mut reader)?;
            (
                ImageSpec::new(header.rows, header.cols, header.format),
                ImageRows::Bytes(ReadRows::new(reader)),
            )
        }
    };
    reject_color(&spec, path)?;
    pixel_count(&spec)?;

    tracing::debug!(
        path = %path.display(),
        format = %spec.format,
        rows = spec.rows,
        cols = spec.cols,
        "Opened image stream"
    );
    Ok((spec, rows))
}

/// Sequential output sink that has already written the image header
pub enum ByteSink {
    Plain(BufWriter<File>),
    Png(png::StreamWriter<'static, BufWriter<File>>),
}

impl ByteSink {
    /// Complete the file, writing any trailer
    pub fn finish(self) -> Result<(), ImageIoError> {
        match self {
            ByteSink::Plain(mut writer) => writer.flush()?,
            ByteSink::Png(writer) => writer
                .finish()
                .map_err(|e| ImageIoError::PngEncode(e.to_string()))?,
        }
        Ok(())
    }
}

impl Write for ByteSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ByteSink::Plain(writer) => writer.write(buf),
            ByteSink::Png(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ByteSink::Plain(writer) => writer.flush(),
            ByteSink::Png(writer) => writer.flush(),
        }
    }
}

/// Create `path` and write the header for `spec`
pub fn create_byte_sink(path: &Path, spec: &ImageSpec) -> Result<ByteSink, ImageIoError> {
    reject_color(spec, path)?;
    let mut writer = BufWriter::new(File::create(path)?);

    let sink = match spec.format {
        ImageFormat::Png => ByteSink::Png(png_io::stream_png(writer, spec.rows, spec.cols)?),
        ImageFormat::Pgm => {
            pnm::write_pgm_header(&mut writer, spec.rows, spec.cols)?;
            ByteSink::Plain(writer)
        }
        ImageFormat::Raw | ImageFormat::Ppm => ByteSink::Plain(writer),
    };
    Ok(sink)
}
