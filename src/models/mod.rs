pub mod config;
pub mod image_spec;

pub use config::RestoreConfig;
pub use image_spec::{ImageFormat, ImageSpec, DEFAULT_DIMENSION};
