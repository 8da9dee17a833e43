use anyhow::Error;
use core::time::Duration;
use exporter::{
    ArtifactPair, BASE_SKIN, ExportConfig, ProtectionLevel, clean_document, export_document,
    extract_styles_to_pair,
};
use html::Document;
use poison::{StaticWords, UrlWordSource, WordSource, WordsFuture};
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn generated_rules(pair: &ArtifactPair) -> Vec<&str> {
    pair.css
        .strip_prefix(BASE_SKIN.trim_end())
        .and_then(|rest| rest.strip_prefix("\n\n"))
        .map(|rules| rules.lines().collect())
        .unwrap_or_default()
}

struct UnavailableWords;

impl WordSource for UnavailableWords {
    fn fetch_words(&self) -> WordsFuture<'_> {
        Box::pin(async { Err::<Vec<String>, Error>(anyhow::anyhow!("offline")) })
    }
}

#[tokio::test]
async fn scenario_a_inline_color_becomes_a_class() -> Result<(), Error> {
    let _ = env_logger::builder().is_test(true).try_init();
    let pair = export_document(
        r#"<p style="color:#FF0000;font-weight:bold">Hi</p>"#,
        ProtectionLevel::Off,
        &StaticWords::default(),
    )
    .await?;
    assert_eq!(pair.html, r#"<p class="c-ff0000" style="font-weight:bold">Hi</p>"#);
    assert_eq!(generated_rules(&pair), [".c-ff0000{color:#ff0000;}"]);
    Ok(())
}

#[test]
fn scenario_b_and_c_degenerate_paragraphs() {
    assert_eq!(clean_document("<p></p><p><br></p>").html, "");
    assert_eq!(clean_document("<p><div>block</div></p>").html, "<div>block</div>");
}

#[tokio::test]
async fn scenario_e_filler_between_two_paragraphs() -> Result<(), Error> {
    let words = StaticWords::from_text("alpha\nbeta\ngamma\n");
    let pair = export_document("<p>A</p><p>B</p>", ProtectionLevel::Moderate, &words).await?;
    let document = Document::parse(&pair.html);
    let paragraphs = document.elements_by_tag("p");
    assert_eq!(paragraphs.len(), 3);
    assert_eq!(document.text_content(paragraphs[0]), "A");
    assert_eq!(document.text_content(paragraphs[2]), "B");
    let filler = paragraphs[1];
    assert_eq!(document.attr(filler, "class"), Some("c-000000 fs-0"));
    let filler_text = document.text_content(filler);
    let filler_words: Vec<&str> = filler_text.split(' ').collect();
    assert!((20..=30).contains(&filler_words.len()), "{filler_text}");
    assert!(
        filler_words
            .iter()
            .all(|word| ["alpha", "beta", "gamma"].contains(word))
    );
    assert_eq!(
        generated_rules(&pair),
        [".c-000000{color:#000000;}", ".fs-0{font-size:0px;}"]
    );
    Ok(())
}

#[tokio::test]
async fn missing_word_list_still_applies_markers() -> Result<(), Error> {
    let pair = export_document("<p>a b</p><p>c</p>", ProtectionLevel::Maximum, &UnavailableWords).await?;
    let document = Document::parse(&pair.html);
    assert_eq!(document.elements_by_tag("p").len(), 2);
    let spans = document.elements_by_tag("span");
    assert_eq!(spans.len(), 1);
    assert_eq!(document.attr(spans[0], "class"), Some("c-ffffff fs-5"));
    Ok(())
}

#[tokio::test]
async fn word_list_is_read_from_a_file_url() -> Result<(), Error> {
    let source = UrlWordSource::from_location(
        &fixture("words.txt").to_string_lossy(),
        Duration::from_secs(5),
    )?;
    let pair = export_document("<p>A</p><p>B</p><p>C</p>", ProtectionLevel::Strong, &source).await?;
    let document = Document::parse(&pair.html);
    assert_eq!(document.elements_by_tag("p").len(), 7);
    assert!(pair.css.contains(".fs-1{font-size:1px;}"));
    Ok(())
}

#[test]
fn full_page_with_widgets() -> Result<(), Error> {
    let _ = env_logger::builder().is_test(true).try_init();
    let html = fs::read_to_string(fixture("widgets_page.html"))?;
    let pair = clean_document(&html);

    assert!(
        pair.html
            .contains(r#"<h1 class="ta-center c-1a1a1a">Chapter One</h1>"#),
        "{}",
        pair.html
    );
    assert!(pair.html.contains(r#"<p class="c-ff0000" style="font-weight:bold">Hi</p>"#));
    assert!(
        pair.html
            .contains(r#"<div class="email-body"><p class="c-222222 fs-14">Meet me at noon.</p></div>"#),
        "{}",
        pair.html
    );
    assert!(pair.html.contains(
        r#"<div class="img-align-center"><div class="resizable-image-wrapper"><img src="https://example.com/a.png" class="w-50p"></div></div>"#
    ));
    assert!(pair.html.contains(
        r#"<h2 class="news-subheadline c-666666 bc-f86182 bg-f8f9fa">Sub</h2>"#
    ));
    assert!(pair.html.contains(
        r#"<p class="c-ff0000 ta-justify">Tail <span style="color: hsl(0, 0%, 50%)">grey</span></p>"#
    ));
    assert!(!pair.html.contains("<p></p>"));
    assert!(!pair.html.contains(" body="));

    assert_eq!(
        generated_rules(&pair),
        [
            ".c-1a1a1a{color:#1a1a1a;}",
            ".c-ff0000{color:#ff0000;}",
            ".c-222222{color:#222222;}",
            ".c-ffffff{color:#ffffff;}",
            ".c-666666{color:#666666;}",
            ".c-333333{color:#333333;}",
            ".bg-0b57d0{background-color:#0b57d0;}",
            ".bg-f8f9fa{background-color:#f8f9fa;}",
            ".bc-0b57d0{border-color:#0b57d0 !important;border-style:solid !important;}",
            ".bc-f86182{border-color:#f86182 !important;border-style:solid !important;}",
            ".fs-14{font-size:14px;}",
            ".ta-center{text-align:center;}",
            ".ta-justify{text-align:justify;}",
            ".w-50p{width:50%;}",
        ]
    );
    Ok(())
}

#[test]
fn exporting_clean_output_is_stable() -> Result<(), Error> {
    let html = fs::read_to_string(fixture("widgets_page.html"))?;
    let first = clean_document(&html);
    let second = clean_document(&first.html);
    assert_eq!(second.html, first.html);
    assert!(generated_rules(&second).is_empty());

    let mut document = Document::parse(&first.html);
    let pair = extract_styles_to_pair(&mut document);
    assert!(pair.css.is_empty());
    Ok(())
}

#[test]
fn default_config_points_at_a_local_word_list() -> Result<(), Error> {
    let source = ExportConfig::default().word_source()?;
    assert_eq!(source.url().scheme(), "file");
    Ok(())
}
