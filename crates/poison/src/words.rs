//! Dictionary words for filler paragraphs.

use anyhow::{Error, anyhow};
use core::future::Future;
use core::pin::Pin;
use core::time::Duration;
use std::env;
use std::path::Path;
use tokio::fs::read_to_string as tokio_fs_read_to_string;
use tokio::time::timeout;
use url::Url;

/// Future returned by [`WordSource::fetch_words`].
pub type WordsFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<String>, Error>> + Send + 'a>>;

/// Where filler words come from.
pub trait WordSource: Send + Sync {
    fn fetch_words(&self) -> WordsFuture<'_>;
}

/// Split a newline-delimited word list, dropping blank lines.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A fixed in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticWords(pub Vec<String>);

impl StaticWords {
    pub fn from_text(text: &str) -> Self {
        Self(parse_word_list(text))
    }
}

impl WordSource for StaticWords {
    fn fetch_words(&self) -> WordsFuture<'_> {
        Box::pin(async move { Ok::<_, Error>(self.0.clone()) })
    }
}

/// A word list read from a `file`, `http` or `https` URL.
#[derive(Debug, Clone)]
pub struct UrlWordSource {
    url: Url,
    timeout: Duration,
}

impl UrlWordSource {
    pub const fn new(url: Url, timeout: Duration) -> Self {
        Self { url, timeout }
    }

    /// Accept either a URL or a filesystem path (relative paths resolve
    /// against the working directory).
    ///
    /// # Errors
    ///
    /// Returns an error when `location` is neither a URL nor a usable path.
    pub fn from_location(location: &str, timeout: Duration) -> Result<Self, Error> {
        Ok(Self::new(resolve_location(location)?, timeout))
    }

    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl WordSource for UrlWordSource {
    fn fetch_words(&self) -> WordsFuture<'_> {
        Box::pin(async move {
            let text = timeout(self.timeout, read_url(&self.url))
                .await
                .map_err(|_elapsed| {
                    anyhow!("Timed out after {:?} fetching {}", self.timeout, self.url)
                })??;
            Ok::<_, Error>(parse_word_list(&text))
        })
    }
}

fn resolve_location(location: &str) -> Result<Url, Error> {
    // Single letter schemes are Windows drive letters.
    match Url::parse(location) {
        Ok(url) if url.scheme().len() > 1 => return Ok(url),
        _ => {}
    }
    let path = Path::new(location);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    Url::from_file_path(&absolute)
        .map_err(|()| anyhow!("Invalid word list location: {}", absolute.display()))
}

async fn read_url(url: &Url) -> Result<String, Error> {
    match url.scheme() {
        "http" | "https" => {
            let response = reqwest::get(url.clone())
                .await
                .map_err(|err| anyhow!("Failed to fetch URL {url}: {err}"))?;
            if !response.status().is_success() {
                return Err(anyhow!(
                    "Failed to fetch URL: {} (Status: {})",
                    url,
                    response.status()
                ));
            }
            Ok(response.text().await?)
        }
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| anyhow!("Invalid file path for file url: {url}"))?;
            Ok(tokio_fs_read_to_string(path).await?)
        }
        _ => Err(anyhow!("Unsupported url scheme {}", url.scheme())),
    }
}
