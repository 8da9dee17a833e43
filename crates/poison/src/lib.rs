//! Anti-scraping content poisoning.
//!
//! Hides filler text in exported HTML so scrapers pick up noise that a human
//! reader never sees. Runs on its own parsed copy of the markup, before the
//! export pipeline cleans it, so the filler's inline styles are extracted
//! like the author's.

#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]
#![forbid(unsafe_code)]

pub mod level;
pub mod words;

pub use level::ProtectionLevel;
pub use words::{StaticWords, UrlWordSource, WordSource, WordsFuture, parse_word_list};

use anyhow::{Error, anyhow};
use html::Document;
use indextree::NodeId;
use log::{debug, warn};
use rand::Rng;
use tokio::task;

/// Letters the level 3 marker is drawn from.
pub const MARKER_LETTERS: &str = "abcegnopqsuvxyz";
/// Inclusive bounds of the word count of one filler paragraph.
pub const FILLER_WORDS_MIN: usize = 20;
pub const FILLER_WORDS_MAX: usize = 30;

const MODERATE_FILLER_STYLE: &str = "color:#000000;font-size:0px";
const STRONG_FILLER_STYLE: &str = "color:#ffffff;font-size:1px";
const MARKER_STYLE: &str = "color:#ffffff;font-size:5px";

/// Poison `html` at `level`, fetching filler words from `source`.
///
/// Level [`ProtectionLevel::Off`] returns the input unchanged. An unavailable
/// word list is logged and skips the filler paragraphs; the marker pass still
/// runs.
///
/// # Errors
///
/// Returns an error when the poisoning task itself fails.
pub async fn poison_html(
    html: &str,
    level: ProtectionLevel,
    source: &dyn WordSource,
) -> Result<String, Error> {
    if level == ProtectionLevel::Off {
        return Ok(html.to_owned());
    }
    let words = match source.fetch_words().await {
        Ok(words) => words,
        Err(err) => {
            warn!("Failed to load words, skipping filler paragraphs: {err:#}");
            Vec::new()
        }
    };
    let html = html.to_owned();
    task::spawn_blocking(move || {
        let mut rng = rand::rng();
        poison_with_words(&html, level, &words, &mut rng)
    })
    .await
    .map_err(|err| anyhow!("Poisoning task failed: {err}"))
}

/// Poison `html` with an explicit word list and random source.
pub fn poison_with_words<R: Rng + ?Sized>(
    html: &str,
    level: ProtectionLevel,
    words: &[String],
    rng: &mut R,
) -> String {
    if level == ProtectionLevel::Off {
        return html.to_owned();
    }
    let marker = char::from(MARKER_LETTERS.as_bytes()[rng.random_range(0..MARKER_LETTERS.len())]);

    let mut document = Document::parse(html);
    let paragraphs = document.elements_by_tag("p");
    let pairs = adjacent_top_level_pairs(&document);

    if level.includes(ProtectionLevel::Maximum) {
        for &paragraph in &paragraphs {
            insert_markers(&mut document, paragraph, marker);
        }
    }
    if words.is_empty() {
        debug!("no filler words available");
    } else {
        if level.includes(ProtectionLevel::Moderate) {
            insert_fillers(&mut document, &pairs, MODERATE_FILLER_STYLE, words, rng);
        }
        if level.includes(ProtectionLevel::Strong) {
            insert_fillers(&mut document, &pairs, STRONG_FILLER_STYLE, words, rng);
        }
    }
    document.to_html()
}

/// Top-level paragraphs whose next element sibling is the next top-level
/// paragraph, computed before anything is inserted.
fn adjacent_top_level_pairs(document: &Document) -> Vec<(NodeId, NodeId)> {
    let top_level: Vec<NodeId> = document
        .element_children(document.root())
        .into_iter()
        .filter(|&node| document.is_tag(node, "p"))
        .collect();
    top_level
        .windows(2)
        .filter_map(|window| match *window {
            [current, next] => (document.next_element_sibling(current) == Some(next))
                .then_some((current, next)),
            _ => None,
        })
        .collect()
}

/// Insert one filler paragraph before the second paragraph of every pair.
fn insert_fillers<R: Rng + ?Sized>(
    document: &mut Document,
    pairs: &[(NodeId, NodeId)],
    style: &str,
    words: &[String],
    rng: &mut R,
) {
    for &(_, next) in pairs {
        let count = rng.random_range(FILLER_WORDS_MIN..=FILLER_WORDS_MAX);
        let text = (0..count)
            .map(|_| words[rng.random_range(0..words.len())].as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let filler = document.create_element("p");
        document.set_attr(filler, "style", style);
        let text_node = document.create_text(&text);
        document.append_child(filler, text_node);
        document.insert_before(next, filler);
    }
}

/// Replace every space in the paragraph's text with a hidden marker span.
fn insert_markers(document: &mut Document, paragraph: NodeId, marker: char) {
    let text_nodes: Vec<NodeId> = document
        .descendants(paragraph)
        .into_iter()
        .filter(|&node| document.text(node).is_some_and(|text| text.contains(' ')))
        .collect();
    for text_node in text_nodes {
        let Some(text) = document.text(text_node).map(str::to_owned) else {
            continue;
        };
        for (index, part) in text.split(' ').enumerate() {
            if index > 0 {
                let span = document.create_element("span");
                document.set_attr(span, "style", MARKER_STYLE);
                let letter = document.create_text(marker.encode_utf8(&mut [0; 4]));
                document.append_child(span, letter);
                document.insert_before(text_node, span);
            }
            if !part.is_empty() {
                let piece = document.create_text(part);
                document.insert_before(text_node, piece);
            }
        }
        document.remove(text_node);
    }
}
