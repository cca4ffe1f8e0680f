use crate::error::RestoreError;
use crate::imageio;
use crate::models::DEFAULT_DIMENSION;
use crate::services::RestoreReport;
use halftone_restore::adaptive_inverse_halftone_stream;
use std::path::Path;
use std::time::Instant;

/// File-to-file restoration of error-diffused halftones with the adaptive
/// streaming engine
///
/// Only a seven-row window of the input is held in memory, so images of any
/// height can be processed.
pub struct StreamService {
    raw_rows: usize,
    raw_cols: usize,
}

impl Default for StreamService {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION, DEFAULT_DIMENSION)
    }
}

impl StreamService {
    /// `rows` and `cols` are used for headerless input files
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            raw_rows: rows,
            raw_cols: cols,
        }
    }

    pub fn restore_file(&self, input: &Path, output: &Path) -> Result<RestoreReport, RestoreError> {
        let (spec, mut rows) = imageio::open_row_source(input, self.raw_rows, self.raw_cols)?;
        let mut sink = imageio::create_byte_sink(output, &spec)?;

        let start = Instant::now();
        let restored = adaptive_inverse_halftone_stream(&mut rows, &mut sink, spec.rows, spec.cols);
        let streamed = match restored {
            Ok(()) => sink.finish().map_err(RestoreError::from),
            Err(err) => {
                drop(sink);
                Err(RestoreError::from(err))
            }
        };
        let elapsed = start.elapsed();
        if let Err(err) = streamed {
            discard_partial(output);
            return Err(err);
        }

        tracing::info!(
            rows = spec.rows,
            cols = spec.cols,
            method = "adaptive",
            elapsed_ms = elapsed.as_millis() as u64,
            "Restored image"
        );

        Ok(RestoreReport {
            rows: spec.rows,
            cols: spec.cols,
            format: spec.format,
            elapsed,
        })
    }
}

/// Remove an output file left incomplete by a failed stream
fn discard_partial(output: &Path) {
    if let Err(err) = std::fs::remove_file(output) {
        tracing::warn!(path = %output.display(), error = %err, "Failed to remove partial output");
    }
}
