//! Synthetic halftones and helpers for writing them to disk.

use std::path::{Path, PathBuf};

/// Fixture dimensions used across tests
pub mod sizes {
    pub const ROWS: usize = 32;
    pub const COLS: usize = 48;
}

/// Alternating black and white pixels, the finest possible 50% halftone
pub fn checkerboard(rows: usize, cols: usize) -> Vec<u8> {
    (0..rows * cols)
        .map(|i| if (i / cols + i % cols) % 2 == 1 { 255 } else { 0 })
        .collect()
}

/// Every pixel set to `value`
pub fn flat(rows: usize, cols: usize, value: u8) -> Vec<u8> {
    vec![value; rows * cols]
}

/// Gray level of the horizontal ramp at column `col`
pub fn ramp_level(col: usize, cols: usize) -> i32 {
    (col * 255 / (cols - 1)) as i32
}

/// Floyd-Steinberg error diffusion of a left-to-right black-to-white ramp
pub fn error_diffused_ramp(rows: usize, cols: usize) -> Vec<u8> {
    // One column of padding on each side and one spare row at the bottom.
    let stride = cols + 2;
    let mut error = vec![0i32; (rows + 1) * stride];
    let mut pixels = vec![0u8; rows * cols];

    for row in 0..rows {
        for col in 0..cols {
            let here = row * stride + col + 1;
            let value = ramp_level(col, cols) + error[here];
            let out = if value >= 128 { 255 } else { 0 };
            pixels[row * cols + col] = out as u8;

            let e = value - out;
            error[here + 1] += e * 7 / 16;
            error[here + stride - 1] += e * 3 / 16;
            error[here + stride] += e * 5 / 16;
            error[here + stride + 1] += e / 16;
        }
    }
    pixels
}

/// Black left half, white right half
pub fn vertical_edge(rows: usize, cols: usize) -> Vec<u8> {
    (0..rows * cols)
        .map(|i| if i % cols >= cols / 2 { 255 } else { 0 })
        .collect()
}

/// Write headerless bytes to `dir/name`
pub fn write_raw(dir: &Path, name: &str, pixels: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pixels).unwrap();
    path
}

/// Write a binary PGM to `dir/name`
pub fn write_pgm(dir: &Path, name: &str, rows: usize, cols: usize, pixels: &[u8]) -> PathBuf {
    let mut data = format!("P5\n{cols} {rows}\n255\n").into_bytes();
    data.extend_from_slice(pixels);
    write_raw(dir, name, &data)
}

/// Write an 8-bit grayscale PNG to `dir/name`
pub fn write_png(dir: &Path, name: &str, rows: usize, cols: usize, pixels: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), cols as u32, rows as u32);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(pixels).unwrap();
    writer.finish().unwrap();
    path
}

/// Write a YAML config file to `dir/restore.yaml`
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("restore.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}
