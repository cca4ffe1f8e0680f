//! Output types for the restoration pipeline.
//!
//! [`RestoredImage`] carries the reconstructed 8-bit grey plane together
//! with its dimensions and the time spent computing it.

mod restored_image;

pub use restored_image::RestoredImage;
