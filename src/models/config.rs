use crate::error::RestoreError;
use crate::models::image_spec::DEFAULT_DIMENSION;
use halftone_restore::{HalftoneError, HalftoneMethod, PipelineOptions};
use serde::Deserialize;
use std::path::Path;

/// Restoration settings loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RestoreConfig {
    /// Halftoning method name or legacy code ("error-diffusion", "2", ...)
    #[serde(default = "default_method")]
    pub method: String,

    /// Edge gain for the general pipeline
    #[serde(default = "default_gain")]
    pub gain: u32,

    /// Edge noise threshold for the general pipeline
    #[serde(default)]
    pub threshold: u32,

    /// Rows of a raw input file
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Columns of a raw input file (defaults to `rows`)
    #[serde(default)]
    pub cols: Option<usize>,
}

fn default_method() -> String {
    HalftoneMethod::default().name().to_string()
}

fn default_gain() -> u32 {
    PipelineOptions::default().gain
}

fn default_rows() -> usize {
    DEFAULT_DIMENSION
}

impl RestoreConfig {
    /// Load configuration from a YAML file
    ///
    /// An unreadable or malformed file is an error. An empty file yields
    /// the defaults.
    pub fn load(path: &Path) -> Result<Self, RestoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RestoreError::Config(format!("{}: {e}", path.display())))?;

        if content.trim().is_empty() {
            tracing::warn!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| RestoreError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(
            method = %config.method,
            gain = config.gain,
            threshold = config.threshold,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Fallback `(rows, cols)` for headerless input
    pub fn raw_dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols.unwrap_or(self.rows))
    }

    /// Resolve the method name and build the pipeline options
    pub fn pipeline_options(&self) -> Result<PipelineOptions, HalftoneError> {
        let method: HalftoneMethod = self.method.parse()?;
        Ok(PipelineOptions::new(method)
            .gain(self.gain)
            .threshold(self.threshold))
    }
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            gain: default_gain(),
            threshold: 0,
            rows: DEFAULT_DIMENSION,
            cols: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RestoreConfig::default();

        assert_eq!(config.method, "error-diffusion");
        assert_eq!(config.gain, 4);
        assert_eq!(config.threshold, 0);
        assert_eq!(config.raw_dimensions(), (512, 512));
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
method: clustered
gain: 2
rows: 256
"#;
        let config: RestoreConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.method, "clustered");
        assert_eq!(config.gain, 2);
        assert_eq!(config.threshold, 0);
        assert_eq!(config.raw_dimensions(), (256, 256));
    }

    #[test]
    fn test_cols_override_rows() {
        let yaml = "rows: 480\ncols: 800\n";
        let config: RestoreConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.raw_dimensions(), (480, 800));
    }

    #[test]
    fn test_pipeline_options_from_legacy_code() {
        let config = RestoreConfig {
            method: "2".to_string(),
            threshold: 5,
            ..RestoreConfig::default()
        };
        let options = config.pipeline_options().unwrap();

        assert_eq!(options.method, HalftoneMethod::DispersedDither);
        assert_eq!(options.gain, 4);
        assert_eq!(options.threshold, 5);
    }

    #[test]
    fn test_pipeline_options_bad_method() {
        let config = RestoreConfig {
            method: "stochastic".to_string(),
            ..RestoreConfig::default()
        };

        assert!(matches!(
            config.pipeline_options(),
            Err(HalftoneError::BadMethod(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = RestoreConfig::load(Path::new("/nonexistent/restore.yaml"));
        assert!(matches!(result, Err(RestoreError::Config(_))));
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = RestoreConfig::load(file.path()).unwrap();
        assert_eq!(config, RestoreConfig::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gain: [not, a, number]").unwrap();

        let result = RestoreConfig::load(file.path());
        assert!(matches!(result, Err(RestoreError::Config(_))));
    }
}
