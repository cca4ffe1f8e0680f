pub mod restore_service;
pub mod stream_service;

pub use restore_service::{RestoreReport, RestoreService};
pub use stream_service::StreamService;
