use core::fmt;

use super::{DOMNode, Document, NodeKind};
use indextree::NodeId;

// -----------------------
// Module-scope helpers
// -----------------------

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("  ")?;
    }
    Ok(())
}

fn fmt_node(dom: &Document, id: NodeId, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    let Some(DOMNode { kind, attrs }) = dom.node(id) else {
        return Ok(());
    };
    write_indent(f, depth)?;
    match kind {
        NodeKind::Fragment => writeln!(f, "#fragment")?,
        NodeKind::Element { tag } => {
            write!(f, "<{tag}")?;
            for (key, value) in attrs.iter() {
                write!(f, " {}=\"{}\"", key, escape_text(value))?;
            }
            writeln!(f, ">")?;
        }
        NodeKind::Text { text } => writeln!(f, "\"{}\"", escape_text(text))?,
        NodeKind::Comment { text } => writeln!(f, "<!--{}-->", escape_text(text))?,
    }
    for child in dom.children(id) {
        fmt_node(dom, child, f, depth + 1)?;
    }
    Ok(())
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Document")?;
        fmt_node(self, self.root, f, 0)
    }
}
