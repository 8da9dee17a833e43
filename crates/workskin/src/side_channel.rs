//! Delivery of finished artifacts: files on disk and the system clipboard.

use anyhow::Error;
use clap::ValueEnum;
use exporter::ArtifactPair;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONTENT_FILE_NAME: &str = "content.html";
pub const SKIN_FILE_NAME: &str = "skin.css";

/// One of the two export artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Artifact {
    Content,
    Skin,
}

impl Artifact {
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Content => CONTENT_FILE_NAME,
            Self::Skin => SKIN_FILE_NAME,
        }
    }

    pub fn text(self, pair: &ArtifactPair) -> &str {
        match self {
            Self::Content => &pair.html,
            Self::Skin => &pair.css,
        }
    }
}

/// Write the selected artifacts (both when `only` is `None`) into `dir`.
///
/// # Errors
///
/// Returns an error when the directory or a file cannot be written.
pub fn write_artifacts(
    dir: &Path,
    pair: &ArtifactPair,
    only: Option<Artifact>,
) -> Result<Vec<PathBuf>, Error> {
    fs::create_dir_all(dir)?;
    let selected = only.map_or_else(|| vec![Artifact::Content, Artifact::Skin], |artifact| vec![artifact]);
    let mut written = Vec::with_capacity(selected.len());
    for artifact in selected {
        let path = dir.join(artifact.file_name());
        fs::write(&path, artifact.text(pair))?;
        info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Put `text` on the system clipboard.
///
/// # Errors
///
/// Returns an error when no clipboard is available.
#[cfg(feature = "clipboard")]
pub fn copy_to_clipboard(text: &str) -> Result<(), Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// Put `text` on the system clipboard.
///
/// # Errors
///
/// Always fails: this build has no clipboard support.
#[cfg(not(feature = "clipboard"))]
pub fn copy_to_clipboard(_text: &str) -> Result<(), Error> {
    Err(anyhow::anyhow!(
        "Clipboard support is disabled; rebuild with the `clipboard` feature"
    ))
}
