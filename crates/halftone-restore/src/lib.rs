#![allow(
    clippy::excessive_precision,
    clippy::needless_range_loop,
    clippy::manual_range_contains
)]

//! halftone-restore: inverse halftoning of binary images
//!
//! Estimates the continuous-tone grey image behind a halftone produced by
//! error diffusion, dispersed-dot dither or clustered-dot dither.
//!
//! # Quick Start
//!
//! The [`InverseHalftoner`] builder is the primary entry point:
//!
//! ```
//! use halftone_restore::{HalftoneMethod, InverseHalftoner};
//!
//! let halftone: Vec<u8> = (0..16 * 16)
//!     .map(|i| if (i / 16 + i % 16) % 2 == 0 { 0 } else { 255 })
//!     .collect();
//!
//! let restored = InverseHalftoner::new(HalftoneMethod::ErrorDiffusion)
//!     .restore(&halftone, 16, 16)
//!     .unwrap();
//! assert!(restored.pixels().iter().all(|&p| (120..=135).contains(&p)));
//! ```
//!
//! # Two Engines
//!
//! | Engine | Methods | Memory | Entry point |
//! |--------|---------|--------|-------------|
//! | General pipeline | all three | six `rows x cols` float planes | [`inverse_halftone`] |
//! | Adaptive stream | error diffusion | seven padded rows | [`adaptive::adaptive_inverse_halftone_stream`] |
//!
//! The general pipeline smooths the halftone with a fixed low-pass kernel,
//! removes residual texture with an exact median, and adds back edge
//! detail found as the difference between two further low-pass estimates:
//!
//! ```text
//! halftone ──> lowpass ──> median (y1) ──> smooth (y2) ──> narrow (z)
//!                               │                 │           │
//!                               │                 └── y2 - z ─┘
//!                               │                       │
//!                               │          threshold + 5x5 majority
//!                               │                       │
//!                               └───── y1 + gain * edges ──> output
//! ```
//!
//! The adaptive engine instead picks a smoothing kernel per pixel from two
//! scales of gradient estimate, so flat areas are smoothed hard and edges
//! barely at all, without any median or whole-image buffers.
//!
//! # Boundaries
//!
//! Every convolution and median reads outside the image through the mirror
//! rule in [`matrix::reflect`]. Images must be at least 5x5.
//!
//! # Numeric Reproducibility
//!
//! Kernel tables, scale factors and the mix of single and double precision
//! arithmetic are fixed so that results are identical from run to run and
//! across platforms with IEEE-754 floats.

pub mod adaptive;
pub mod api;
pub mod filter;
pub mod matrix;
pub mod output;
pub mod pipeline;


pub use adaptive::{adaptive_inverse_halftone, adaptive_inverse_halftone_stream, ReadRows, RowSource};
pub use api::{HalftoneError, InverseHalftoner};
pub use matrix::{FloatMatrix, MIN_EXTENT};
pub use output::RestoredImage;
pub use pipeline::{inverse_halftone, HalftoneMethod, PipelineOptions};
