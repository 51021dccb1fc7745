//! Depth-bounded pedigree layout.
//!
//! The ancestry structure comes straight off the wire and is data-controlled,
//! so the layout enforces its own depth bound instead of trusting the service
//! to have truncated.

use crate::model::AncestryNode;
use serde::Serialize;

/// Generations expanded below the root. Fixed, not user-configurable.
pub const PEDIGREE_DEPTH: usize = 3;

/// A laid-out pedigree node: label plus the two ancestor slots, already
/// truncated to the render depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PedigreeBox {
    pub label: String,
    pub sire: Option<Box<PedigreeBox>>,
    pub dam: Option<Box<PedigreeBox>>,
}

/// Lay out `root` down to `max_depth` generations below it.
///
/// The root box is always produced when a root exists; the bound only gates
/// expansion of the sire/dam slots. Ancestors deeper than `max_depth` are
/// dropped silently even when present in the data. Pure: no I/O, identical
/// input yields identical output.
pub fn layout(root: Option<&AncestryNode>, max_depth: usize) -> Option<PedigreeBox> {
    root.map(|node| layout_node(node, 0, max_depth))
}

fn layout_node(node: &AncestryNode, depth: usize, max_depth: usize) -> PedigreeBox {
    let slot = |ancestor: &Option<Box<AncestryNode>>| {
        if depth >= max_depth {
            return None;
        }
        ancestor
            .as_deref()
            .map(|a| Box::new(layout_node(a, depth + 1, max_depth)))
    };

    PedigreeBox {
        label: node.name.clone(),
        sire: slot(&node.sire),
        dam: slot(&node.dam),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(name: &str, sire: Option<AncestryNode>, dam: Option<AncestryNode>) -> AncestryNode {
        AncestryNode {
            name: name.to_string(),
            sire: sire.map(Box::new),
            dam: dam.map(Box::new),
        }
    }

    /// Single-sire chain of `generations` nodes (root included).
    fn sire_chain(generations: usize) -> AncestryNode {
        let mut current = node("gen-last", None, None);
        for i in (0..generations - 1).rev() {
            current = node(&format!("gen-{}", i), Some(current), None);
        }
        current
    }

    fn count_boxes(b: &PedigreeBox) -> usize {
        1 + b.sire.as_deref().map_or(0, count_boxes) + b.dam.as_deref().map_or(0, count_boxes)
    }

    fn chain_depth(b: &PedigreeBox) -> usize {
        let below = b
            .sire
            .as_deref()
            .map(chain_depth)
            .max(b.dam.as_deref().map(chain_depth));
        below.map_or(0, |d| d + 1)
    }

    #[test]
    fn absent_root_yields_no_output() {
        assert_eq!(layout(None, PEDIGREE_DEPTH), None);
    }

    #[test]
    fn lone_node_renders_one_box() {
        let root = node("Rex", None, None);
        let b = layout(Some(&root), PEDIGREE_DEPTH).unwrap();
        assert_eq!(b.label, "Rex");
        assert_eq!(b.sire, None);
        assert_eq!(b.dam, None);
    }

    #[test]
    fn sire_only_node_fills_one_slot() {
        let root = node("Rex", Some(node("Max", None, None)), None);
        let b = layout(Some(&root), PEDIGREE_DEPTH).unwrap();
        assert_eq!(b.sire.as_ref().unwrap().label, "Max");
        assert_eq!(b.dam, None);
    }

    #[test]
    fn chain_deeper_than_bound_is_truncated() {
        // Five generations, bound 3: boxes at depths 0..=3, fifth dropped.
        let root = sire_chain(5);
        let b = layout(Some(&root), 3).unwrap();
        assert_eq!(count_boxes(&b), 4);
        assert_eq!(chain_depth(&b), 3);
    }

    #[test]
    fn depth_zero_never_expands_ancestors() {
        let root = node(
            "Rex",
            Some(node("Max", None, None)),
            Some(node("Bella", None, None)),
        );
        let b = layout(Some(&root), 0).unwrap();
        assert_eq!(b.label, "Rex");
        assert_eq!(b.sire, None);
        assert_eq!(b.dam, None);
    }

    #[test]
    fn full_two_generation_tree_keeps_slot_order() {
        let root = node(
            "Rex",
            Some(node("Max", None, Some(node("Luna", None, None)))),
            Some(node("Bella", None, None)),
        );
        let b = layout(Some(&root), PEDIGREE_DEPTH).unwrap();
        let sire = b.sire.as_deref().unwrap();
        assert_eq!(sire.label, "Max");
        assert_eq!(sire.dam.as_ref().unwrap().label, "Luna");
        assert_eq!(sire.sire, None);
        assert_eq!(b.dam.as_ref().unwrap().label, "Bella");
    }

    #[test]
    fn layout_is_deterministic() {
        let root = sire_chain(4);
        assert_eq!(layout(Some(&root), 2), layout(Some(&root), 2));
    }
}
