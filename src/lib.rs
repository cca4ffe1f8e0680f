//! Inverse halftoning for grayscale images
//!
//! File handling, configuration and services around the
//! [`halftone_restore`] core. This library exposes modules for integration
//! testing.

pub mod error;
pub mod imageio;
pub mod models;
pub mod services;
