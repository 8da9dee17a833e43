//! Saved works: a small get/put/list/delete store of editor documents.

use anyhow::{Error, anyhow, bail};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// One saved document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: String,
    pub name: String,
    /// Editor HTML.
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    pub updated_at: u64,
}

impl Work {
    /// A new work stamped with the current time; the id is that timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error when the system clock is before the Unix epoch.
    pub fn new(name: String, content: String) -> Result<Self, Error> {
        let now = now_millis()?;
        Ok(Self {
            id: now.to_string(),
            name,
            content,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the content and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns an error when the system clock is before the Unix epoch.
    pub fn update_content(&mut self, content: String) -> Result<(), Error> {
        self.content = content;
        self.updated_at = now_millis()?.max(self.updated_at);
        Ok(())
    }
}

fn now_millis() -> Result<u64, Error> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)?;
    Ok(u64::try_from(elapsed.as_millis())?)
}

/// Storage for saved works.
pub trait WorkStore {
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    fn get(&self, id: &str) -> Result<Option<Work>, Error>;

    /// Insert or replace a work.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be written.
    fn put(&self, work: &Work) -> Result<(), Error>;

    /// Every work, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read.
    fn list(&self) -> Result<Vec<Work>, Error>;

    /// Returns whether a work was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be written.
    fn delete(&self, id: &str) -> Result<bool, Error>;
}

/// One `<id>.json` file per work in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, Error> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'));
        if !valid {
            bail!("Invalid work id {id:?}");
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}

impl WorkStore for JsonDirStore {
    fn get(&self, id: &str) -> Result<Option<Work>, Error> {
        let path = self.path_for(id)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text).map_err(|err| {
                anyhow!("Corrupt work file {}: {err}", path.display())
            })?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, work: &Work) -> Result<(), Error> {
        let path = self.path_for(&work.id)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, serde_json::to_string_pretty(work)?)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<Work>, Error> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut works = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|extension| extension != "json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(Error::from)
                .and_then(|text| serde_json::from_str::<Work>(&text).map_err(Error::from))
            {
                Ok(work) => works.push(work),
                Err(err) => warn!("Skipping unreadable work file {}: {err}", path.display()),
            }
        }
        works.sort_by(|left, right| {
            right
                .updated_at
                .cmp(&left.updated_at)
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(works)
    }

    fn delete(&self, id: &str) -> Result<bool, Error> {
        match fs::remove_file(self.path_for(id)?) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
