//! Fragment serialization through html5ever's HTML serializer.
//! Spec: <https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments>

use super::{Document, NodeKind};
use html5ever::serialize::{
    Serialize as HtmlSerialize, SerializeOpts, Serializer, TraversalScope, serialize,
};
use html5ever::{LocalName, QualName, ns};
use indextree::NodeId;
use log::warn;
use std::io;

/// A node of a [`Document`] seen through html5ever's `Serialize` trait.
struct SerializableNode<'doc> {
    document: &'doc Document,
    id: NodeId,
}

impl HtmlSerialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match traversal_scope {
            TraversalScope::IncludeNode => self.document.serialize_node(self.id, serializer),
            TraversalScope::ChildrenOnly(_) => self
                .document
                .children(self.id)
                .into_iter()
                .try_for_each(|child| self.document.serialize_node(child, serializer)),
        }
    }
}

fn element_name(tag: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(tag))
}

fn attribute_name(name: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(name))
}

impl Document {
    /// Serialize the whole fragment (children of the root).
    pub fn to_html(&self) -> String {
        self.inner_html(self.root)
    }

    /// Serialize the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        let opts = SerializeOpts {
            scripting_enabled: false,
            traversal_scope: TraversalScope::ChildrenOnly(self.tag(id).map(element_name)),
            create_missing_parent: false,
        };
        let mut out = Vec::new();
        let node = SerializableNode { document: self, id };
        if let Err(err) = serialize(&mut out, &node, opts) {
            warn!("fragment serialization stopped early: {err}");
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    fn serialize_node<S>(&self, id: NodeId, serializer: &mut S) -> io::Result<()>
    where
        S: Serializer,
    {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        match &node.kind {
            NodeKind::Fragment => {
                for child in self.children(id) {
                    self.serialize_node(child, serializer)?;
                }
            }
            NodeKind::Element { tag } => {
                let name = element_name(tag);
                let attrs: Vec<(QualName, &str)> = node
                    .attrs
                    .iter()
                    .map(|(attr, value)| (attribute_name(attr), value.as_str()))
                    .collect();
                serializer.start_elem(name.clone(), attrs.iter().map(|(attr, value)| (attr, *value)))?;
                for child in self.children(id) {
                    self.serialize_node(child, serializer)?;
                }
                serializer.end_elem(name)?;
            }
            NodeKind::Text { text } => serializer.write_text(text)?,
            NodeKind::Comment { text } => serializer.write_comment(text)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let doc = Document::parse("<p title=\"a &quot;b&quot; &amp; c\">1 &lt; 2 &amp;&nbsp;3</p>");
        assert_eq!(
            doc.to_html(),
            "<p title=\"a &quot;b&quot; &amp; c\">1 &lt; 2 &amp;&nbsp;3</p>"
        );
    }

    #[test]
    fn void_elements_have_no_end_tag() {
        let doc = Document::parse("<p>a<br/>b<img src=x></p><hr>");
        assert_eq!(doc.to_html(), "<p>a<br>b<img src=\"x\"></p><hr>");
    }

    #[test]
    fn raw_text_is_not_escaped() {
        let doc = Document::parse("<div><style>p > b { color: red }</style></div>");
        assert_eq!(
            doc.to_html(),
            "<div><style>p > b { color: red }</style></div>"
        );
        let style = doc.elements_by_tag("style")[0];
        assert_eq!(doc.inner_html(style), "p > b { color: red }");
    }

    #[test]
    fn comments_round_trip() {
        let doc = Document::parse("<p>a<!-- note -->b</p>");
        assert_eq!(doc.to_html(), "<p>a<!-- note -->b</p>");
        let paragraph = doc.elements_by_tag("p")[0];
        assert_eq!(doc.inner_html(paragraph), "a<!-- note -->b");
    }

    #[test]
    fn built_elements_serialize_like_parsed_ones() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.create_element("div");
        doc.set_attr(div, "data-note", "<b> & \"q\"");
        doc.append_child(root, div);
        let text = doc.create_text("x < y");
        doc.append_child(div, text);
        assert_eq!(
            doc.to_html(),
            "<div data-note=\"<b> &amp; &quot;q&quot;\">x &lt; y</div>"
        );
    }
}
