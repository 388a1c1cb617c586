//! # sciname-parser
//!
//! Grammar-driven parser for scientific (taxonomic) biological names.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! batch     → parallel pipeline over C1+C2+C3 (rayon workers)
//!   ↓
//! semantic  → C2, the semantic lifter: parse tree -> ParsedName
//!   ↓
//! normalize → C3, diacritics/stemming/html, pure functions
//!   ↓
//! grammar   → C1, the recognizer: input text -> parse tree (private)
//!   ↓
//! config    → ParserConfig / ConfigBuilder
//!   ↓
//! base      → primitives (CharSpan)
//! ```
//!
//! The top-level entry points are [`parse`] for a single name and
//! [`GnParser`] for reuse across many names in one thread; [`batch::run`]
//! parallelizes the latter across a configurable worker pool.

/// Foundation types: CharSpan.
pub mod base;

/// Parallel batch pipeline (C4).
pub mod batch;

/// Runtime configuration: `ParserConfig`, `ConfigBuilder`.
pub mod config;

/// Crate-wide error types.
pub mod error;

/// C1: the grammar recognizer. Internal; its parse tree is consumed
/// entirely by `semantic::lift` and never exposed to callers.
mod grammar;

/// C3: diacritic transliteration, Latin epithet stemming, HTML stripping.
pub mod normalize;

/// Mechanical output-row projections (CSV).
pub mod render;

/// C2: the semantic lifter and output data model.
pub mod semantic;

pub use config::{ConfigBuilder, ConfigError, ParserConfig};
pub use semantic::{Authorship, Canonical, Details, ParsedName, Warning};

/// Parse one verbatim name through the full C1 + C2 + C3 pipeline.
///
/// HTML tags/entities are stripped before the grammar ever sees the input
/// (unless `keep_html_tags` is set), so an HTML-wrapped name parses instead
/// of failing on the first `<`; `verbatim` on the result is always the exact
/// string passed in here, regardless of what preprocessing ran.
///
/// Never fails: input the grammar cannot match at all comes back as a
/// `ParsedName` with `quality == 0` and `canonical == None`.
pub fn parse(input: &str, cfg: &ParserConfig) -> ParsedName {
    let (clean, html_stripped) = normalize::strip_html_if_enabled(input, cfg.keep_html_tags);
    let recognized = grammar::recognize(&clean, cfg);
    semantic::lift(input, &clean, html_stripped, recognized, cfg)
}

/// A reusable single-thread parser: owns one `ParserConfig` across many
/// calls to [`GnParser::parse`], mirroring the one-parser-per-worker reuse
/// pattern (each worker owns its recognizer and arena, allocated once and
/// reused across inputs via `reset()`).
///
/// Every call already allocates its own parse-tree arena and cursor, so
/// there is no heap state `reset()` needs to release; it exists to keep the
/// reuse contract explicit for callers migrating from a stateful parser
/// API.
#[derive(Debug, Clone)]
pub struct GnParser {
    cfg: ParserConfig,
}

impl GnParser {
    pub fn new(cfg: ParserConfig) -> Self {
        Self { cfg }
    }

    /// Parse one name using this parser's configuration.
    pub fn parse(&self, input: &str) -> ParsedName {
        parse(input, &self.cfg)
    }

    /// Clear any per-input state before parsing the next name. A no-op
    /// today: see the struct's documentation.
    pub fn reset(&mut self) {}

    pub fn config(&self) -> &ParserConfig {
        &self.cfg
    }
}

impl Default for GnParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

/// The crate's semantic version, matching `Cargo.toml`.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbatim_round_trips() {
        let cfg = ParserConfig::default();
        let name = parse("Pardosa moesta Banks, 1892", &cfg);
        assert_eq!(name.verbatim, "Pardosa moesta Banks, 1892");
    }

    #[test]
    fn unparseable_input_has_zero_quality() {
        let cfg = ParserConfig::default();
        let name = parse("   ", &cfg);
        assert_eq!(name.quality, 0);
        assert!(name.canonical.is_none());
    }

    #[test]
    fn reusable_parser_yields_same_result_as_free_function() {
        let cfg = ParserConfig::default();
        let mut parser = GnParser::new(cfg.clone());
        let via_parser = parser.parse("Homo sapiens Linnaeus, 1758");
        parser.reset();
        let via_free_fn = parse("Homo sapiens Linnaeus, 1758", &cfg);
        assert_eq!(via_parser.canonical, via_free_fn.canonical);
    }

    #[test]
    fn version_matches_cargo_toml() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
