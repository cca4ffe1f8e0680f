//! Binary PNM (`P5`/`P6`) headers.

use crate::error::ImageIoError;
use crate::models::ImageFormat;
use std::io::{Read, Write};

/// Largest gray value an 8-bit PNM may declare.
pub const MAX_GRAY: u32 = 255;

/// Parsed `P5`/`P6` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PnmHeader {
    pub format: ImageFormat,
    pub cols: usize,
    pub rows: usize,
    pub max_value: u32,
}

/// Whether `prefix` starts with a binary PNM magic followed by whitespace
pub fn sniff(prefix: &[u8]) -> Option<ImageFormat> {
    match prefix {
        [b'P', b'5', ws, ..] if ws.is_ascii_whitespace() => Some(ImageFormat::Pgm),
        [b'P', b'6', ws, ..] if ws.is_ascii_whitespace() => Some(ImageFormat::Ppm),
        _ => None,
    }
}

fn next_byte<R: Read + ?Sized>(reader: &mut R) -> Result<Option<u8>, ImageIoError> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

fn require_byte<R: Read + ?Sized>(reader: &mut R) -> Result<u8, ImageIoError> {
    next_byte(reader)?.ok_or_else(|| ImageIoError::InvalidHeader("unexpected end of header".into()))
}

/// Read the four header fields: magic, width, height, maxval.
///
/// Fields are separated by whitespace and `#` starts a comment running to
/// the end of the line. Exactly one whitespace byte after maxval is
/// consumed, so the reader is left at the first pixel byte.
fn read_fields<R: Read + ?Sized>(reader: &mut R) -> Result<[String; 4], ImageIoError> {
    let mut fields: [String; 4] = Default::default();
    let mut byte = require_byte(reader)?;

    for (index, field) in fields.iter_mut().enumerate() {
        loop {
            while byte.is_ascii_whitespace() {
                byte = require_byte(reader)?;
            }
            if byte != b'#' {
                break;
            }
            while byte != b'\n' {
                byte = require_byte(reader)?;
            }
        }

        loop {
            field.push(char::from(byte));
            match next_byte(reader)? {
                Some(b) if b.is_ascii_whitespace() => {
                    byte = b;
                    break;
                }
                Some(b) => byte = b,
                // A header that ends right after maxval has no pixel data,
                // which the caller reports as truncation.
                None if index == 3 => break,
                None => {
                    return Err(ImageIoError::InvalidHeader(
                        "unexpected end of header".into(),
                    ))
                }
            }
        }
    }

    Ok(fields)
}

fn parse_extent(field: &str, name: &str) -> Result<usize, ImageIoError> {
    match field.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ImageIoError::InvalidHeader(format!(
            "bad {name} '{field}'"
        ))),
    }
}

/// Parse a `P5`/`P6` header, leaving `reader` at the start of the pixels
pub fn read_header<R: Read + ?Sized>(reader: &mut R) -> Result<PnmHeader, ImageIoError> {
    let [magic, width, height, max_value] = read_fields(reader)?;

    let format = match magic.as_str() {
        "P5" => ImageFormat::Pgm,
        "P6" => ImageFormat::Ppm,
        other => {
            return Err(ImageIoError::InvalidHeader(format!(
                "unknown magic '{other}'"
            )))
        }
    };
    let cols = parse_extent(&width, "width")?;
    let rows = parse_extent(&height, "height")?;
    let max_value = max_value
        .parse::<u32>()
        .map_err(|_| ImageIoError::InvalidHeader(format!("bad maxval '{max_value}'")))?;
    if max_value == 0 || max_value > MAX_GRAY {
        return Err(ImageIoError::BadMaxValue(max_value));
    }

    Ok(PnmHeader {
        format,
        cols,
        rows,
        max_value,
    })
}

/// Write an 8-bit `P5` header for a `rows x cols` image
pub fn write_pgm_header<W: Write + ?Sized>(
    writer: &mut W,
    rows: usize,
    cols: usize,
) -> Result<(), ImageIoError> {
    write!(writer, "P5\n{cols} {rows}\n{MAX_GRAY}\n")?;
    Ok(())
}
