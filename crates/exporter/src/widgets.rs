//! Reinflation of widget content stored out of line.
//!
//! Some widgets are edited as atomic nodes and keep their rich body as an
//! HTML string in an attribute. On the export copy that string is parsed back
//! into the widget's placeholder so the later passes clean it like any other
//! content.

use html::Document;
use log::{debug, warn};

/// Widgets whose body lives in an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Email,
    NewsArticle,
}

impl WidgetKind {
    pub const ALL: [Self; 2] = [Self::Email, Self::NewsArticle];

    /// Class carried by the widget's outer element.
    pub const fn wrapper_class(self) -> &'static str {
        match self {
            Self::Email => "email-wrapper",
            Self::NewsArticle => "news-website-wrapper",
        }
    }

    /// Attribute of the outer element holding the serialized body.
    pub const fn content_attribute(self) -> &'static str {
        match self {
            Self::Email => "body",
            Self::NewsArticle => "content",
        }
    }

    /// Classes of the element the body is rendered into; the first one found
    /// wins. The email widget has a receive and a compose layout.
    pub const fn placeholder_classes(self) -> &'static [&'static str] {
        match self {
            Self::Email => &["email-body", "ec-body"],
            Self::NewsArticle => &["news-article-content"],
        }
    }
}

/// Expand every stored widget body into its placeholder.
///
/// Returns the number of widgets that were reinflated. Widgets without a
/// stored body or without a placeholder are left alone.
pub fn reinflate(document: &mut Document) -> usize {
    let mut reinflated = 0;
    for kind in WidgetKind::ALL {
        for wrapper in document.elements_by_class(kind.wrapper_class()) {
            let Some(content) = document.attr(wrapper, kind.content_attribute()) else {
                continue;
            };
            let content = content.to_owned();
            let placeholder = kind
                .placeholder_classes()
                .iter()
                .find_map(|class| document.find_descendant_by_class(wrapper, class));
            let Some(placeholder) = placeholder else {
                warn!("{kind:?} widget has stored content but no placeholder");
                continue;
            };
            document.clear_children(placeholder);
            document.append_html(placeholder, &content);
            document.remove_attr(wrapper, kind.content_attribute());
            reinflated += 1;
        }
    }
    debug!("reinflated {reinflated} widgets");
    reinflated
}
