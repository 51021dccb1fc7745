//! Terminal rendering of a laid-out pedigree.

use super::tree::PedigreeBox;

/// Render the tree as indented lines, the sire slot before the dam slot.
pub fn render_text(root: Option<&PedigreeBox>) -> String {
    let mut out = String::new();
    if let Some(b) = root {
        write_node(&mut out, b, None, 0);
    }
    out
}

fn write_node(out: &mut String, node: &PedigreeBox, slot: Option<&str>, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
    if let Some(slot) = slot {
        out.push_str(slot);
        out.push_str(": ");
    }
    out.push_str(&node.label);
    out.push('\n');

    if let Some(sire) = &node.sire {
        write_node(out, sire, Some("sire"), indent + 1);
    }
    if let Some(dam) = &node.dam {
        write_node(out, dam, Some("dam"), indent + 1);
    }
}
