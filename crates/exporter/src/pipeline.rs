//! The export orchestrator.

use crate::extract::{DeclarationBuckets, extract_styles};
use crate::images::align_images;
use crate::sanitize::sanitize_paragraphs;
use crate::stylesheet::assemble_skin;
use crate::widgets::reinflate;
use anyhow::Error;
use html::Document;
use log::info;
use poison::{ProtectionLevel, WordSource, poison_html};

/// The two artifacts of one export.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtifactPair {
    /// Cleaned fragment markup (`content.html`).
    pub html: String,
    /// Base skin plus generated rules (`skin.css`).
    pub css: String,
}

/// Run the whole pipeline on the editor's serialized HTML.
///
/// Poisoning (when `level` is above zero) works on the string; every later
/// pass works on a private parsed copy with its own declaration buckets.
///
/// # Errors
///
/// Only a failure of the poisoning pass is reported. Callers usually retry
/// with [`ProtectionLevel::Off`].
pub async fn export_document(
    html: &str,
    level: ProtectionLevel,
    words: &dyn WordSource,
) -> Result<ArtifactPair, Error> {
    let poisoned = poison_html(html, level, words).await?;
    Ok(clean_document(&poisoned))
}

/// The synchronous part of the pipeline, from parsing to skin assembly.
pub fn clean_document(html: &str) -> ArtifactPair {
    let mut document = Document::parse(html);
    let widgets = reinflate(&mut document);
    let images = align_images(&mut document);
    sanitize_paragraphs(&mut document);
    let mut buckets = DeclarationBuckets::new();
    let rewritten = extract_styles(&mut document, &mut buckets);
    info!(
        "Exported document: {widgets} widgets reinflated, {images} images aligned, {rewritten} styles extracted into {} classes",
        buckets.len()
    );
    ArtifactPair {
        html: document.to_html(),
        css: assemble_skin(&buckets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::BASE_SKIN;
    use poison::StaticWords;

    #[tokio::test]
    async fn level_zero_export_is_deterministic() -> anyhow::Result<()> {
        let html = r#"<p style="color:#FF0000;font-weight:bold">Hi</p><p></p><p style="font-size:12px">x</p>"#;
        let words = StaticWords::default();
        let first = export_document(html, ProtectionLevel::Off, &words).await?;
        let second = export_document(html, ProtectionLevel::Off, &words).await?;
        assert_eq!(first, second);
        assert_eq!(
            first.html,
            r#"<p class="c-ff0000" style="font-weight:bold">Hi</p><p class="fs-12">x</p>"#
        );
        assert!(first.css.starts_with(BASE_SKIN.trim_end()));
        assert!(first.css.ends_with("\n\n.c-ff0000{color:#ff0000;}\n.fs-12{font-size:12px;}"));
        Ok(())
    }

    #[test]
    fn widget_bodies_are_cleaned_with_the_rest() {
        let pair = clean_document(
            r#"<div class="email-wrapper receive" body="<p style=&quot;color:#0f0&quot;>hello</p><p></p>"><div class="email-body"></div></div>"#,
        );
        assert_eq!(
            pair.html,
            r#"<div class="email-wrapper receive"><div class="email-body"><p class="c-00ff00">hello</p></div></div>"#
        );
        assert!(pair.css.ends_with(".c-00ff00{color:#00ff00;}"));
    }

    #[test]
    fn aligned_images_leave_their_paragraph() {
        let pair = clean_document(r#"<p><img src="a.png" style="text-align:center;width:50%"></p>"#);
        assert_eq!(
            pair.html,
            r#"<div class="img-align-center"><img src="a.png" class="w-50p"></div>"#
        );
    }
}
