// src/formatting/traverse.rs
//! Pure traversal utilities over materialized sibling lists: list grouping
//! and depth annotation. Both are idempotent and never mutate their input.

use crate::model::Block;

/// The kind of list a group renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bulleted,
    Numbered,
}

/// The list kind of a block, if it is a list item at all.
pub fn list_kind(block: &Block) -> Option<ListKind> {
    match block {
        Block::BulletedListItem(_) => Some(ListKind::Bulleted),
        Block::NumberedListItem(_) => Some(ListKind::Numbered),
        _ => None,
    }
}

/// A rendering-time node: either a plain block or a group of consecutive
/// same-kind list items. Groups exist only during rendering; the block tree
/// itself never contains them.
#[derive(Debug)]
pub enum RenderNode<'a> {
    Block(&'a Block),
    ListGroup {
        kind: ListKind,
        items: Vec<&'a Block>,
    },
}

/// Groups maximal runs of consecutive same-kind sibling list items.
///
/// A kind switch (bulleted → numbered) starts a new group; any non-list
/// sibling passes through unchanged and terminates the open run.
pub fn group_list_items(siblings: &[Block]) -> Vec<RenderNode<'_>> {
    let mut nodes = Vec::new();
    let mut index = 0;

    while index < siblings.len() {
        let block = &siblings[index];
        match list_kind(block) {
            Some(kind) => {
                let mut items = vec![block];
                let mut end = index + 1;
                while end < siblings.len() && list_kind(&siblings[end]) == Some(kind) {
                    items.push(&siblings[end]);
                    end += 1;
                }
                nodes.push(RenderNode::ListGroup { kind, items });
                index = end;
            }
            None => {
                nodes.push(RenderNode::Block(block));
                index += 1;
            }
        }
    }

    nodes
}

/// Pre-order walk assigning depth 0 to top-level blocks and
/// `parent depth + 1` to each child. For renderers that need indentation
/// rather than nested containers (e.g. flat heading indexes).
pub fn annotate_depth(blocks: &[Block]) -> Vec<(&Block, usize)> {
    fn walk<'a>(blocks: &'a [Block], depth: usize, out: &mut Vec<(&'a Block, usize)>) {
        for block in blocks {
            out.push((block, depth));
            if let Some(children) = block.children() {
                walk(children, depth + 1, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(blocks, 0, &mut out);
    out
}
