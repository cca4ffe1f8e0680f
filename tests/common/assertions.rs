//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::path::Path;

/// Assert `path` holds a `rows x cols` binary PGM and return its pixels
pub fn assert_pgm_file(path: &Path, rows: usize, cols: usize) -> Vec<u8> {
    let data = std::fs::read(path).unwrap();
    let header = format!("P5\n{cols} {rows}\n255\n");

    assert!(
        data.starts_with(header.as_bytes()),
        "Expected PGM header {:?}, file starts with {:?}",
        header,
        String::from_utf8_lossy(&data[..header.len().min(data.len())])
    );
    let pixels = data[header.len()..].to_vec();
    assert_eq!(pixels.len(), rows * cols, "PGM pixel count");
    pixels
}

/// Assert `path` holds a `rows x cols` 8-bit grayscale PNG and return its pixels
pub fn assert_png_file(path: &Path, rows: usize, cols: usize) -> Vec<u8> {
    let file = std::fs::File::open(path).unwrap();
    let mut reader = png::Decoder::new(file).read_info().unwrap();
    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();

    assert_eq!(info.color_type, png::ColorType::Grayscale);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    assert_eq!((info.height as usize, info.width as usize), (rows, cols));
    buf.truncate(rows * cols);
    buf
}

/// Assert every pixel equals `value`
pub fn assert_all(pixels: &[u8], value: u8) {
    let stray: Vec<(usize, u8)> = pixels
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, p)| p != value)
        .take(5)
        .collect();
    assert!(
        stray.is_empty(),
        "Expected every pixel to be {value}, first mismatches (index, value): {stray:?}"
    );
}

/// Mean absolute error against a horizontal ramp, ignoring a border of `margin`
pub fn ramp_error(pixels: &[u8], rows: usize, cols: usize, margin: usize) -> f64 {
    let mut total = 0i64;
    let mut count = 0i64;
    for row in margin..rows - margin {
        for col in margin..cols - margin {
            let expected = super::fixtures::ramp_level(col, cols);
            total += (i32::from(pixels[row * cols + col]) - expected).abs() as i64;
            count += 1;
        }
    }
    total as f64 / count as f64
}
