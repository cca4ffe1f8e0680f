//! Public API for the halftone-restore crate.
//!
//! This module provides the high-level API: the [`InverseHalftoner`]
//! builder and the [`HalftoneError`] error type.

mod builder;
mod error;

pub use builder::InverseHalftoner;
pub use error::HalftoneError;
