//! Configuration settings for exports.
//!
//! Settings are loaded from environment variables or constructed
//! programmatically; command line flags override them in the front end.

use anyhow::Error;
use core::time::Duration;
use poison::UrlWordSource;
use std::env;
use std::path::PathBuf;

/// Default word list location, resolved against the working directory.
pub const DEFAULT_WORDS_LOCATION: &str = "words.txt";
/// Default word list fetch timeout in milliseconds.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

/// Runtime configuration for the export front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportConfig {
    /// URL or path of the newline-delimited filler word list
    pub words_location: String,
    /// Word list fetch timeout in milliseconds
    pub fetch_timeout_ms: u64,
    /// Directory `content.html` and `skin.css` are written to
    pub out_dir: PathBuf,
    /// Directory of the JSON work store
    pub works_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_WORDS_LOCATION.to_owned(),
            DEFAULT_FETCH_TIMEOUT_MS,
            PathBuf::from("."),
            PathBuf::from("works"),
        )
    }
}

impl ExportConfig {
    /// Construct a new `ExportConfig` with explicit values.
    ///
    /// # Arguments
    ///
    /// * `words_location` - URL or path of the word list
    /// * `fetch_timeout_ms` - Word list timeout in milliseconds (minimum 1ms)
    /// * `out_dir` - Artifact output directory
    /// * `works_dir` - Work store directory
    #[must_use]
    pub fn new(
        words_location: String,
        fetch_timeout_ms: u64,
        out_dir: PathBuf,
        works_dir: PathBuf,
    ) -> Self {
        Self {
            words_location,
            fetch_timeout_ms: fetch_timeout_ms.max(1),
            out_dir,
            works_dir,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `WORKSKIN_WORDS_URL`: Word list URL or path (default: `words.txt`)
    /// - `WORKSKIN_FETCH_TIMEOUT_MS`: Word list timeout (default: 5000)
    /// - `WORKSKIN_OUT_DIR`: Artifact output directory (default: `.`)
    /// - `WORKSKIN_WORKS_DIR`: Work store directory (default: `works`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; unset or unparsable values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let words_location = lookup("WORKSKIN_WORDS_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.words_location);
        let fetch_timeout_ms = lookup("WORKSKIN_FETCH_TIMEOUT_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(defaults.fetch_timeout_ms);
        let out_dir = lookup("WORKSKIN_OUT_DIR").map_or(defaults.out_dir, PathBuf::from);
        let works_dir = lookup("WORKSKIN_WORKS_DIR").map_or(defaults.works_dir, PathBuf::from);
        Self::new(words_location, fetch_timeout_ms, out_dir, works_dir)
    }

    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// The configured word list as a [`UrlWordSource`].
    ///
    /// # Errors
    ///
    /// Returns an error when the location is neither a URL nor a path.
    pub fn word_source(&self) -> Result<UrlWordSource, Error> {
        UrlWordSource::from_location(&self.words_location, self.fetch_timeout())
    }
}
