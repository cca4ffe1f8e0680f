//! Filtering primitives shared by the restoration pipeline.
//!
//! - [`kernel`]: the fixed symmetric low-pass tables
//! - [`separable`]: mirrored separable convolution (binary and grey sources)
//! - [`rank`]: exact medians and the binary majority vote
//! - [`select`]: in-place k-th smallest selection used by the medians

pub mod kernel;
pub mod rank;
pub mod select;
pub mod separable;

pub use kernel::Kernel;
pub use rank::{majority5x5, median3x3, median5x5};
pub use select::select_kth;
pub use separable::{convolve_binary, convolve_grey};
