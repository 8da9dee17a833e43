//! Image alignment.
//!
//! `text-align` has no effect on an image itself once the destination
//! platform has cleaned the markup, so an aligned image is moved into a flex
//! container (`img-align-*`, styled by the base skin) and the alignment signal
//! is removed from the image and its wrapper.

use css_style_attr::{parse_style_attribute, serialize_declarations};
use html::Document;
use indextree::NodeId;
use log::trace;

const CONTAINER_PREFIX: &str = "img-align-";
const RESIZABLE_WRAPPER_CLASS: &str = "resizable-image-wrapper";

/// Horizontal placement of an aligned image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAlignment {
    Left,
    Center,
    Right,
}

impl ImageAlignment {
    /// Map a `text-align` keyword; `start` and `justify` read as left.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "left" | "start" | "justify" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            _ => None,
        }
    }

    pub const fn container_class(self) -> &'static str {
        match self {
            Self::Left => "img-align-left",
            Self::Center => "img-align-center",
            Self::Right => "img-align-right",
        }
    }
}

/// Wrap every aligned image in an alignment container.
///
/// Returns the number of containers created.
pub fn align_images(document: &mut Document) -> usize {
    let mut wrapped = 0;
    for image in document.elements_by_tag("img") {
        let wrapper = image_wrapper(document, image);
        let alignment = alignment_signal(document, image)
            .or_else(|| wrapper.and_then(|node| alignment_signal(document, node)));
        let Some(alignment) = alignment else {
            continue;
        };
        clear_alignment_signal(document, image);
        let mut target = match wrapper {
            Some(node) => {
                clear_alignment_signal(document, node);
                node
            }
            None => image,
        };
        if let Some(paragraph) = text_paragraph(document, target) {
            target = paragraph;
        }
        let already_contained = document.parent(target).is_some_and(|parent| {
            document
                .classes(parent)
                .iter()
                .any(|class| class.starts_with(CONTAINER_PREFIX))
        });
        if already_contained {
            continue;
        }
        trace!("wrapping image in {}", alignment.container_class());
        let container = document.create_element("div");
        document.set_attr(container, "class", alignment.container_class());
        document.wrap(target, container);
        wrapped += 1;
    }
    wrapped
}

/// The editor's wrapper around a resizable image, if `image` has one.
fn image_wrapper(document: &Document, image: NodeId) -> Option<NodeId> {
    let parent = document.parent(image)?;
    let is_wrapper = document.has_class(parent, RESIZABLE_WRAPPER_CLASS)
        || document.has_attr(parent, "data-text-align");
    let only_child = document.element_children(parent) == [image];
    (is_wrapper && only_child).then_some(parent)
}

/// The paragraph around `node` when it also holds text; a container `div`
/// inside it would split the paragraph on the destination.
fn text_paragraph(document: &Document, node: NodeId) -> Option<NodeId> {
    let parent = document.parent(node)?;
    (document.is_tag(parent, "p") && !document.text_content(parent).trim().is_empty())
        .then_some(parent)
}

fn alignment_signal(document: &Document, node: NodeId) -> Option<ImageAlignment> {
    if let Some(alignment) = ["data-text-align", "align"]
        .iter()
        .filter_map(|name| document.attr(node, name))
        .find_map(ImageAlignment::from_keyword)
    {
        return Some(alignment);
    }
    if let Some(style) = document.attr(node, "style") {
        let inline = parse_style_attribute(style)
            .into_iter()
            .rev()
            .find(|declaration| declaration.is_valid() && declaration.property == "text-align");
        if let Some(alignment) = inline.and_then(|declaration| ImageAlignment::from_keyword(&declaration.value)) {
            return Some(alignment);
        }
    }
    document
        .classes(node)
        .into_iter()
        .filter_map(|class| class.strip_prefix("ta-"))
        .find_map(ImageAlignment::from_keyword)
}

fn clear_alignment_signal(document: &mut Document, node: NodeId) {
    document.remove_attr(node, "data-text-align");
    document.remove_attr(node, "align");
    document.remove_classes(node, |class| class.starts_with("ta-"));
    let Some(style) = document.attr(node, "style") else {
        return;
    };
    let declarations = parse_style_attribute(style);
    if declarations
        .iter()
        .all(|declaration| declaration.property != "text-align")
    {
        return;
    }
    let kept: Vec<_> = declarations
        .into_iter()
        .filter(|declaration| declaration.property != "text-align")
        .collect();
    if kept.is_empty() {
        document.remove_attr(node, "style");
    } else {
        document.set_attr(node, "style", &serialize_declarations(&kept));
    }
}
