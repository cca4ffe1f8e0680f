//! 8-bit grayscale PNG decoding and encoding.

use crate::error::ImageIoError;
use crate::models::{ImageFormat, ImageSpec};
use halftone_restore::RowSource;
use std::io::{self, Read, Write};
use std::path::Path;

/// The eight signature bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

pub fn is_png(prefix: &[u8]) -> bool {
    prefix.starts_with(&PNG_SIGNATURE)
}

/// Number of interleaved samples per pixel, rejecting anything colored.
fn gray_channels(color_type: png::ColorType, path: &Path) -> Result<usize, ImageIoError> {
    match color_type {
        png::ColorType::Grayscale => Ok(1),
        // Alpha is ignored; halftones are opaque.
        png::ColorType::GrayscaleAlpha => Ok(2),
        _ => Err(ImageIoError::UnsupportedColor {
            path: path.to_path_buf(),
        }),
    }
}

fn open_reader<R: Read>(reader: R) -> Result<png::Reader<R>, ImageIoError> {
    let mut decoder = png::Decoder::new(reader);
    // Expand low bit depths and palettes, strip 16-bit down to 8.
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    decoder
        .read_info()
        .map_err(|e| ImageIoError::PngDecode(e.to_string()))
}

/// Decode a whole PNG into 8-bit gray pixels
pub fn decode_png<R: Read>(
    reader: R,
    path: &Path,
) -> Result<(ImageSpec, Vec<u8>), ImageIoError> {
    let mut reader = open_reader(reader)?;
    let (color_type, _) = reader.output_color_type();
    let channels = gray_channels(color_type, path)?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageIoError::PngDecode(e.to_string()))?;

    let rows = info.height as usize;
    let cols = info.width as usize;
    let mut pixels = Vec::with_capacity(rows * cols);
    for line in buf.chunks_exact(info.line_size).take(rows) {
        pixels.extend(line.iter().step_by(channels).take(cols));
    }

    tracing::debug!(rows, cols, channels, "Decoded PNG");
    Ok((ImageSpec::new(rows, cols, ImageFormat::Png), pixels))
}

/// Encode 8-bit gray pixels as a PNG
pub fn encode_png<W: Write>(
    writer: W,
    rows: usize,
    cols: usize,
    pixels: &[u8],
) -> Result<(), ImageIoError> {
    let mut writer = gray_encoder(writer, rows, cols)
        .write_header()
        .map_err(|e| ImageIoError::PngEncode(e.to_string()))?;

    writer
        .write_image_data(pixels)
        .map_err(|e| ImageIoError::PngEncode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| ImageIoError::PngEncode(e.to_string()))
}

fn gray_encoder<W: Write>(writer: W, rows: usize, cols: usize) -> png::Encoder<'static, W> {
    let mut encoder = png::Encoder::new(writer, cols as u32, rows as u32);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder
}

/// Start a PNG whose pixel rows are written incrementally
pub fn stream_png<W: Write + 'static>(
    writer: W,
    rows: usize,
    cols: usize,
) -> Result<png::StreamWriter<'static, W>, ImageIoError> {
    gray_encoder(writer, rows, cols)
        .write_header()
        .and_then(|w| w.into_stream_writer())
        .map_err(|e| ImageIoError::PngEncode(e.to_string()))
}

/// Row-at-a-time gray pixels from a non-interlaced PNG
pub struct PngRows<R: Read> {
    reader: png::Reader<R>,
    channels: usize,
}

impl<R: Read> PngRows<R> {
    pub fn open(reader: R, path: &Path) -> Result<(ImageSpec, Self), ImageIoError> {
        let reader = open_reader(reader)?;
        let info = reader.info();
        if info.interlaced {
            return Err(ImageIoError::InterlacedStream);
        }
        let spec = ImageSpec::new(info.height as usize, info.width as usize, ImageFormat::Png);

        let (color_type, _) = reader.output_color_type();
        let channels = gray_channels(color_type, path)?;

        tracing::debug!(rows = spec.rows, cols = spec.cols, channels, "Opened PNG row stream");
        Ok((spec, Self { reader, channels }))
    }
}

impl<R: Read> RowSource for PngRows<R> {
    fn next_row(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let row = self
            .reader
            .next_row()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;

        let samples = row.data().iter().step_by(self.channels);
        let mut filled = 0;
        for (dst, &src) in buf.iter_mut().zip(samples) {
            *dst = src;
            filled += 1;
        }
        if filled < buf.len() {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(rows: usize, cols: usize, pixels: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_png(&mut buf, rows, cols, pixels).unwrap();
        buf
    }

    #[test]
    fn test_signature_detection() {
        let data = encode(2, 2, &[0, 255, 255, 0]);
        assert!(is_png(&data));
        assert!(!is_png(b"P5\n2 2\n255\n"));
        assert!(!is_png(&PNG_SIGNATURE[..4]));
    }

    #[test]
    fn test_decode_gray() {
        let pixels: Vec<u8> = (0..12).map(|i| (i * 20) as u8).collect();
        let data = encode(3, 4, &pixels);

        let (spec, decoded) = decode_png(&data[..], Path::new("t.png")).unwrap();
        assert_eq!((spec.rows, spec.cols), (3, 4));
        assert_eq!(spec.format, ImageFormat::Png);
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn test_decode_rgb_rejected() {
        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, 2, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[255, 0, 0, 0, 255, 0]).unwrap();
        }

        let result = decode_png(&data[..], Path::new("color.png"));
        assert!(matches!(result, Err(ImageIoError::UnsupportedColor { .. })));
    }

    #[test]
    fn test_decode_one_bit_expands() {
        let mut data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut data, 8, 1);
            encoder.set_color(png::ColorType::Grayscale);
            encoder.set_depth(png::BitDepth::One);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0b1010_0000]).unwrap();
        }

        let (_, decoded) = decode_png(&data[..], Path::new("bilevel.png")).unwrap();
        assert_eq!(decoded, vec![255, 0, 255, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_garbage_rejected() {
        let result = decode_png(&b"not a png at all"[..], Path::new("x.png"));
        assert!(matches!(result, Err(ImageIoError::PngDecode(_))));
    }

    #[test]
    fn test_row_stream() {
        let pixels: Vec<u8> = (0..15).map(|i| (i * 10) as u8).collect();
        let data = encode(3, 5, &pixels);

        let (spec, mut rows) = PngRows::open(&data[..], Path::new("t.png")).unwrap();
        assert_eq!((spec.rows, spec.cols), (3, 5));

        let mut row = [0u8; 5];
        for r in 0..3 {
            rows.next_row(&mut row).unwrap();
            assert_eq!(&row[..], &pixels[r * 5..(r + 1) * 5]);
        }
        let err = rows.next_row(&mut row).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_stream_writer_produces_decodable_png() {
        use std::io::{Seek, SeekFrom};

        let pixels: Vec<u8> = (0..20).map(|i| (255 - i * 12) as u8).collect();
        let mut file = tempfile::tempfile().unwrap();

        let mut stream = stream_png(file.try_clone().unwrap(), 4, 5).unwrap();
        for row in pixels.chunks(5) {
            stream.write_all(row).unwrap();
        }
        stream.finish().unwrap();

        file.seek(SeekFrom::Start(0)).unwrap();
        let (_, decoded) = decode_png(file, Path::new("s.png")).unwrap();
        assert_eq!(decoded, pixels);
    }
}
