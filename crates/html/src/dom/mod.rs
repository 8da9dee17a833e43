use indextree::{Arena, NodeId};
use smallvec::SmallVec;

pub mod printing;
pub mod serialize;

/// Attribute list of an element, in source order.
pub type Attributes = SmallVec<(String, String), 4>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a parsed fragment; never serialized itself.
    #[default]
    Fragment,
    Element { tag: String },
    Text { text: String },
    Comment { text: String },
}

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub attrs: Attributes,
}

/// An owned, mutable HTML fragment.
///
/// Nodes live in an arena and are addressed by `NodeId`. Ids of removed
/// nodes stay valid as keys but every accessor treats them as absent, so a
/// list of ids collected before a mutation can be walked safely afterwards.
pub struct Document {
    pub(crate) arena: Arena<DOMNode>,
    pub(crate) root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty fragment.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DOMNode::default());
        Self { arena, root }
    }

    /// Parse an HTML fragment leniently; see [`crate::parser::parse_fragment`].
    pub fn parse(html: &str) -> Self {
        crate::parser::parse_fragment(html)
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&DOMNode> {
        self.arena
            .get(id)
            .filter(|node| !node.is_removed())
            .map(indextree::Node::get)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut DOMNode> {
        self.arena
            .get_mut(id)
            .filter(|node| !node.is_removed())
            .map(indextree::Node::get_mut)
    }

    /// Whether `id` is still reachable from the fragment root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.node(id).is_some() && id.ancestors(&self.arena).last() == Some(self.root)
    }

    // -----------------------
    // Node data
    // -----------------------

    /// Tag name of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.kind {
            NodeKind::Element { tag } => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.tag(id).is_some()
    }

    /// Whether `id` is an element with the given (lowercase) tag name.
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tag(id).is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    /// Character data of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id)?.kind {
            NodeKind::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Concatenated character data of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if self.node(id).is_none() {
            return out;
        }
        for descendant in id.descendants(&self.arena) {
            if let Some(text) = self.text(descendant) {
                out.push_str(text);
            }
        }
        out
    }

    // -----------------------
    // Attributes
    // -----------------------

    pub fn attrs(&self, id: NodeId) -> &[(String, String)] {
        match self.node(id) {
            Some(node) => &node.attrs,
            None => &[],
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// Set an attribute, replacing the value in place when it already exists.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if let Some(entry) = node.attrs.iter_mut().find(|(key, _)| key == name) {
            value.clone_into(&mut entry.1);
        } else {
            node.attrs.push((name.to_owned(), value.to_owned()));
        }
    }

    /// Set an attribute; a new attribute is placed just before `before`, or
    /// last when `before` is absent.
    pub fn set_attr_before(&mut self, id: NodeId, name: &str, value: &str, before: &str) {
        if self.has_attr(id, name) {
            self.set_attr(id, name, value);
            return;
        }
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let entry = (name.to_owned(), value.to_owned());
        match node.attrs.iter().position(|(key, _)| key == before) {
            Some(index) => node.attrs.insert(index, entry),
            None => node.attrs.push(entry),
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        let node = self.node_mut(id)?;
        let index = node.attrs.iter().position(|(key, _)| key == name)?;
        Some(node.attrs.remove(index).1)
    }

    /// Class list of an element, in attribute order.
    pub fn classes(&self, id: NodeId) -> Vec<&str> {
        self.attr(id, "class")
            .map(|value| value.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.classes(id).contains(&class)
    }

    /// Append a class unless the element already has it.
    ///
    /// A missing `class` attribute is created ahead of the `style` attribute.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let current = self.classes(id);
        if current.contains(&class) {
            return;
        }
        let mut joined = current.join(" ");
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(class);
        self.set_attr_before(id, "class", &joined, "style");
    }

    /// Drop every class matching `predicate`, removing the attribute when the
    /// list becomes empty. Returns the removed classes.
    pub fn remove_classes<F>(&mut self, id: NodeId, predicate: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let (removed, kept): (Vec<&str>, Vec<&str>) =
            self.classes(id).into_iter().partition(|class| predicate(class));
        if removed.is_empty() {
            return Vec::new();
        }
        let removed: Vec<String> = removed.into_iter().map(str::to_owned).collect();
        let kept = kept.join(" ");
        if kept.is_empty() {
            self.remove_attr(id, "class");
        } else {
            self.set_attr(id, "class", &kept);
        }
        removed
    }

    // -----------------------
    // Navigation
    // -----------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?;
        id.parent(&self.arena)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        if self.node(id).is_none() {
            return Vec::new();
        }
        id.children(&self.arena).collect()
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .into_iter()
            .filter(|child| self.is_element(*child))
            .collect()
    }

    /// The next sibling that is an element, skipping text and comments.
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?;
        id.following_siblings(&self.arena)
            .skip(1)
            .find(|sibling| self.is_element(*sibling))
    }

    /// `id` and every node below it, in pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        if self.node(id).is_none() {
            return Vec::new();
        }
        id.descendants(&self.arena).collect()
    }

    /// All elements with the given tag, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| self.is_tag(*id, tag))
            .collect()
    }

    /// All elements carrying `class`, in document order.
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// First element strictly below `scope` carrying `class`.
    pub fn find_descendant_by_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .skip(1)
            .find(|id| self.has_class(*id, class))
    }

    // -----------------------
    // Construction and mutation
    // -----------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(DOMNode {
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
            },
            attrs: Attributes::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(DOMNode {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            attrs: Attributes::new(),
        })
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.arena.new_node(DOMNode {
            kind: NodeKind::Comment {
                text: text.to_owned(),
            },
            attrs: Attributes::new(),
        })
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        child.detach(&mut self.arena);
        parent.append(child, &mut self.arena);
    }

    /// Insert `new_node` as the previous sibling of `reference`.
    pub fn insert_before(&mut self, reference: NodeId, new_node: NodeId) {
        if self.parent(reference).is_none() || self.node(new_node).is_none() {
            return;
        }
        new_node.detach(&mut self.arena);
        reference.insert_before(new_node, &mut self.arena);
    }

    /// Put `wrapper` where `target` is and move `target` inside it.
    pub fn wrap(&mut self, target: NodeId, wrapper: NodeId) {
        if self.parent(target).is_none() {
            return;
        }
        self.insert_before(target, wrapper);
        self.append_child(wrapper, target);
    }

    /// Remove a node together with its subtree.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root || self.node(id).is_none() {
            return;
        }
        id.remove_subtree(&mut self.arena);
    }

    /// Remove a node but keep its children, spliced into the parent at the
    /// node's position in their original order.
    pub fn unwrap(&mut self, id: NodeId) {
        if id == self.root || self.parent(id).is_none() {
            return;
        }
        id.remove(&mut self.arena);
    }

    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.children(id) {
            self.remove(child);
        }
    }

    /// Parse `html` as a fragment and append its nodes to `parent`.
    pub fn append_html(&mut self, parent: NodeId, html: &str) {
        if self.node(parent).is_none() {
            return;
        }
        let fragment = Self::parse(html);
        for child in fragment.children(fragment.root) {
            self.import(&fragment, child, parent);
        }
    }

    /// Deep-copy `source_id` from another document under `parent`.
    fn import(&mut self, source: &Self, source_id: NodeId, parent: NodeId) {
        let Some(data) = source.node(source_id) else {
            return;
        };
        let node = self.arena.new_node(data.clone());
        parent.append(node, &mut self.arena);
        for child in source.children(source_id) {
            self.import(source, child, node);
        }
    }
}
