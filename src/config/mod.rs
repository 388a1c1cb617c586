//! Runtime configuration for the parser and batch pipeline.
//!
//! Grounded on the teacher's option-application pattern (parser settings
//! built once, defaults set up front, overrides applied in order, no global
//! state). Unknown/invalid settings are rejected at construction time rather
//! than deferred to first use.

use thiserror::Error;

/// Output rendering format requested by the caller. Rendering itself lives
/// outside the core (see `spec.md` §1); this only selects which mechanical
/// projection a downstream renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Csv,
    Compact,
    Pretty,
}

impl std::str::FromStr for Format {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Format::Csv),
            "compact" => Ok(Format::Compact),
            "pretty" => Ok(Format::Pretty),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown output format: {0:?}")]
    UnknownFormat(String),
    #[error("jobs_num must be at least 1")]
    ZeroJobs,
    #[error("batch_size must be at least 1")]
    ZeroBatchSize,
}

/// Fully resolved parser configuration. Constructed via [`ConfigBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub format: Format,
    pub jobs_num: usize,
    pub batch_size: usize,
    pub keep_html_tags: bool,
    pub with_details: bool,
    pub with_stream: bool,
    pub with_no_order: bool,
    pub with_capitalize: bool,
    pub with_cultivars: bool,
    pub with_preserve_diaereses: bool,
    pub port: u16,
    pub is_test: bool,
}

/// Default batch size, matching `spec.md` §6.
pub const DEFAULT_BATCH_SIZE: usize = 50_000;

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            format: Format::default(),
            jobs_num: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            batch_size: DEFAULT_BATCH_SIZE,
            keep_html_tags: false,
            with_details: false,
            with_stream: false,
            with_no_order: false,
            with_capitalize: false,
            with_cultivars: false,
            with_preserve_diaereses: false,
            port: 0,
            is_test: false,
        }
    }
}

/// Builder applying overrides to [`ParserConfig::default()`] in order, then
/// validating the result. Mirrors the option-application pattern the teacher
/// uses for its own parser settings.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    cfg: ParserConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: ParserConfig::default(),
        }
    }

    pub fn format(mut self, format: Format) -> Self {
        self.cfg.format = format;
        self
    }

    pub fn format_str(mut self, format: &str) -> Result<Self, ConfigError> {
        self.cfg.format = format.parse()?;
        Ok(self)
    }

    pub fn jobs_num(mut self, n: usize) -> Self {
        self.cfg.jobs_num = n;
        self
    }

    pub fn batch_size(mut self, n: usize) -> Self {
        self.cfg.batch_size = n;
        self
    }

    pub fn keep_html_tags(mut self, v: bool) -> Self {
        self.cfg.keep_html_tags = v;
        self
    }

    pub fn with_details(mut self, v: bool) -> Self {
        self.cfg.with_details = v;
        self
    }

    pub fn with_stream(mut self, v: bool) -> Self {
        self.cfg.with_stream = v;
        self
    }

    pub fn with_no_order(mut self, v: bool) -> Self {
        self.cfg.with_no_order = v;
        self
    }

    pub fn with_capitalize(mut self, v: bool) -> Self {
        self.cfg.with_capitalize = v;
        self
    }

    pub fn with_cultivars(mut self, v: bool) -> Self {
        self.cfg.with_cultivars = v;
        self
    }

    pub fn with_preserve_diaereses(mut self, v: bool) -> Self {
        self.cfg.with_preserve_diaereses = v;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.port = port;
        self
    }

    pub fn is_test(mut self, v: bool) -> Self {
        self.cfg.is_test = v;
        self
    }

    pub fn build(self) -> Result<ParserConfig, ConfigError> {
        if self.cfg.jobs_num == 0 {
            return Err(ConfigError::ZeroJobs);
        }
        if self.cfg.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(self.cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ConfigBuilder::new().build().unwrap();
        assert_eq!(cfg.format, Format::Csv);
        assert_eq!(cfg.batch_size, DEFAULT_BATCH_SIZE);
        assert!(cfg.jobs_num >= 1);
    }

    #[test]
    fn rejects_zero_jobs() {
        let err = ConfigBuilder::new().jobs_num(0).build().unwrap_err();
        assert_eq!(err, ConfigError::ZeroJobs);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = ConfigBuilder::new().format_str("xml").unwrap_err();
        assert_eq!(err, ConfigError::UnknownFormat("xml".to_string()));
    }

    #[test]
    fn capitalize_toggle() {
        let cfg = ConfigBuilder::new().with_capitalize(true).build().unwrap();
        assert!(cfg.with_capitalize);
    }
}
