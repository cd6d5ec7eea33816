//! N-ary trees and their interchange forms.
//!
//! The canonical form is a pre-order listing with end-of-children markers. A
//! node is written as its value, followed by each of its children in order,
//! followed by a `None` that closes its list of children. The root is closed
//! like any other node:
//!
//! ```text
//!        1
//!     /  |  \          [1, 3, 5, null, 6, null, null, 2, null, 4, null, null]
//!    3   2   4
//!   / \
//!  5   6
//! ```
//!
//! Exercise corpora frequently list n-ary trees in level order instead: the
//! root, a separator, and then the children of every node in breadth-first
//! order with each group followed by a separator. The same tree reads
//! `[1, null, 3, 2, 4, null, 5, 6]` in that form. See [`build_level_order`].
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::Error;

/// A node of an n-ary tree with an ordered list of children.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NaryNode {
    pub val: i32,
    pub children: Vec<NaryNode>,
}

impl NaryNode {
    /// Creates a leaf.
    #[inline]
    pub fn new(val: i32) -> Self {
        Self {
            val,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn with_children(val: i32, children: Vec<NaryNode>) -> Self {
        Self { val, children }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of nodes in the subtree rooted at this node.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }
}

impl Clone for NaryNode {
    fn clone(&self) -> Self {
        let mut root = NaryNode::new(self.val);
        let mut stack = vec![(self, &mut root)];

        while let Some((source, target)) = stack.pop() {
            target.children = source
                .children
                .iter()
                .map(|child| NaryNode::new(child.val))
                .collect();
            stack.extend(source.children.iter().zip(target.children.iter_mut()));
        }

        root
    }
}

impl PartialEq for NaryNode {
    fn eq(&self, other: &Self) -> bool {
        flatten(Some(self)) == flatten(Some(other))
    }
}

impl Eq for NaryNode {}

impl Hash for NaryNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        flatten(Some(self)).hash(state);
    }
}

impl Drop for NaryNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Builds an n-ary tree from its pre-order listing with end-of-children
/// markers.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when a marker closes no open node, when
/// the listing ends with open nodes, or when entries follow the closed root.
///
/// # Examples
///
/// ```
/// # use nodeshapes::nary;
/// let root = nary::build(&[Some(1), Some(2), None, Some(3), None, None])
///     .unwrap()
///     .unwrap();
/// assert_eq!(root.children.len(), 2);
/// assert_eq!(root.children[1].val, 3);
/// ```
#[instrument(level = "trace", skip_all, fields(len = serialized.len()))]
pub fn build(serialized: &[Option<i32>]) -> Result<Option<NaryNode>, Error> {
    if serialized.is_empty() {
        return Ok(None);
    }

    // Nodes whose children are still being read, innermost last.
    let mut open: Vec<NaryNode> = Vec::new();
    let mut root = None;

    for (position, entry) in serialized.iter().enumerate() {
        if root.is_some() {
            debug!(position, "pre-order listing continues after the root");
            return Err(Error::invalid(position, "entry follows the closed root"));
        }

        match *entry {
            Some(val) => open.push(NaryNode::new(val)),
            None => {
                let Some(node) = open.pop() else {
                    debug!(position, "end-of-children marker without open node");
                    return Err(Error::invalid(position, "end-of-children marker closes no node"));
                };

                match open.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root = Some(node),
                }
            }
        }
    }

    match root {
        Some(root) => Ok(Some(root)),
        None => {
            debug!(open = open.len(), "pre-order listing ends with open nodes");
            Err(Error::invalid(serialized.len(), "listing ends with open nodes"))
        }
    }
}

/// Lists an n-ary tree in pre-order with end-of-children markers.
///
/// An absent root produces an empty listing.
pub fn flatten(root: Option<&NaryNode>) -> Vec<Option<i32>> {
    enum Visit<'a> {
        Open(&'a NaryNode),
        Close,
    }

    let mut serialized = Vec::new();
    let mut stack: Vec<Visit> = root.map(Visit::Open).into_iter().collect();

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Open(node) => {
                serialized.push(Some(node.val));
                stack.push(Visit::Close);
                stack.extend(node.children.iter().rev().map(Visit::Open));
            }
            Visit::Close => serialized.push(None),
        }
    }

    serialized
}

/// A node laid out in breadth-first order while the tree is being built.
#[derive(Debug, Clone)]
struct Layout {
    val: i32,
    children: Vec<usize>,
}

/// Builds an n-ary tree from its level-order listing with group separators.
///
/// Trailing separators may be omitted.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the listing starts with a separator,
/// when the root is not followed by a separator, or when an entry is left
/// over after every node has received its group of children.
///
/// # Examples
///
/// ```
/// # use nodeshapes::nary;
/// let listing = [Some(1), None, Some(3), Some(2), Some(4), None, Some(5), Some(6)];
/// let root = nary::build_level_order(&listing).unwrap().unwrap();
/// assert_eq!(root.children[0].children.len(), 2);
/// assert_eq!(nary::flatten_level_order(Some(&root)), listing);
/// ```
#[instrument(level = "trace", skip_all, fields(len = level_order.len()))]
pub fn build_level_order(level_order: &[Option<i32>]) -> Result<Option<NaryNode>, Error> {
    let Some((&root, rest)) = level_order.split_first() else {
        return Ok(None);
    };

    let Some(root) = root else {
        debug!("level-order listing starts with a separator");
        return Err(Error::invalid(0, "listing starts with a separator"));
    };

    if let Some(Some(_)) = rest.first() {
        debug!("level-order root is not followed by a separator");
        return Err(Error::invalid(1, "root must be followed by a separator"));
    }

    let mut nodes = vec![Layout {
        val: root,
        children: Vec::new(),
    }];
    // Nodes whose group of children has not been started yet.
    let mut pending = VecDeque::new();
    let mut current = Some(0);

    for (position, entry) in level_order.iter().enumerate().skip(2) {
        let Some(parent) = current else {
            debug!(position, "level-order entry has no parent left");
            return Err(Error::invalid(position, "no node left to own this entry"));
        };

        match *entry {
            Some(val) => {
                let index = nodes.len();
                nodes.push(Layout {
                    val,
                    children: Vec::new(),
                });
                nodes[parent].children.push(index);
                pending.push_back(index);
            }
            None => current = pending.pop_front(),
        }
    }

    Ok(assemble(nodes))
}

/// Turns the breadth-first layout into owned nodes, deepest nodes first.
fn assemble(layout: Vec<Layout>) -> Option<NaryNode> {
    let mut built: Vec<Option<NaryNode>> = Vec::with_capacity(layout.len());
    built.resize_with(layout.len(), || None);

    for (index, node) in layout.into_iter().enumerate().rev() {
        let children = node
            .children
            .into_iter()
            .filter_map(|child| built[child].take())
            .collect();
        built[index] = Some(NaryNode::with_children(node.val, children));
    }

    built.first_mut().and_then(Option::take)
}

/// Lists an n-ary tree in level order with group separators, omitting the
/// trailing separators.
pub fn flatten_level_order(root: Option<&NaryNode>) -> Vec<Option<i32>> {
    let Some(root) = root else {
        return Vec::new();
    };

    let mut level_order = vec![Some(root.val), None];
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        for child in &node.children {
            level_order.push(Some(child.val));
            queue.push_back(child);
        }
        level_order.push(None);
    }

    let len = level_order
        .iter()
        .rposition(Option::is_some)
        .map_or(0, |last| last + 1);
    level_order.truncate(len);
    level_order
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::{fixture, rstest};

    /// `1 -> [3 -> [5, 6], 2, 4]`
    #[fixture]
    fn example() -> NaryNode {
        NaryNode::with_children(
            1,
            vec![
                NaryNode::with_children(3, vec![NaryNode::new(5), NaryNode::new(6)]),
                NaryNode::new(2),
                NaryNode::new(4),
            ],
        )
    }

    fn listing(entries: &[i32]) -> Vec<Option<i32>> {
        // -1 stands in for a marker to keep the tables short.
        entries
            .iter()
            .map(|&entry| (entry >= 0).then_some(entry))
            .collect()
    }

    #[rstest]
    fn pre_order(example: NaryNode) {
        let serialized = listing(&[1, 3, 5, -1, 6, -1, -1, 2, -1, 4, -1, -1]);
        assert_eq!(flatten(Some(&example)), serialized);
        assert_eq!(build(&serialized), Ok(Some(example)));
    }

    #[rstest]
    fn level_order(example: NaryNode) {
        let serialized = listing(&[1, -1, 3, 2, 4, -1, 5, 6]);
        assert_eq!(flatten_level_order(Some(&example)), serialized);
        assert_eq!(build_level_order(&serialized), Ok(Some(example)));
    }

    #[test]
    fn level_order_with_empty_groups() {
        let serialized = listing(&[
            1, -1, 2, 3, 4, 5, -1, -1, 6, 7, -1, 8, -1, 9, 10, -1, -1, 11, -1, 12, -1, 13, -1, -1,
            14,
        ]);
        let root = build_level_order(&serialized).unwrap().unwrap();
        assert_eq!(root.len(), 14);
        assert!(root.children[0].is_leaf());
        assert_eq!(root.children[1].children[1].children[0].children[0].val, 14);
        assert_eq!(flatten_level_order(Some(&root)), serialized);
    }

    #[test]
    fn single_node() {
        let leaf = NaryNode::new(0);
        assert_eq!(flatten(Some(&leaf)), [Some(0), None]);
        assert_eq!(build(&[Some(0), None]), Ok(Some(leaf.clone())));
        assert_eq!(flatten_level_order(Some(&leaf)), [Some(0)]);
        assert_eq!(build_level_order(&[Some(0), None]), Ok(Some(leaf)));
    }

    #[test]
    fn empty_listing() {
        assert_eq!(build(&[]), Ok(None));
        assert_eq!(build_level_order(&[]), Ok(None));
        assert!(flatten(None).is_empty());
        assert!(flatten_level_order(None).is_empty());
    }

    #[rstest]
    #[case(&[-1], 0, "end-of-children marker closes no node")]
    #[case(&[1, -1, -1], 2, "entry follows the closed root")]
    #[case(&[1, -1, 2, -1], 2, "entry follows the closed root")]
    #[case(&[1, 2, -1], 3, "listing ends with open nodes")]
    #[case(&[1], 1, "listing ends with open nodes")]
    fn unbalanced_markers(
        #[case] entries: &[i32],
        #[case] position: usize,
        #[case] reason: &'static str,
    ) {
        assert_eq!(build(&listing(entries)), Err(Error::invalid(position, reason)));
    }

    #[rstest]
    #[case(&[-1, 1], 0, "listing starts with a separator")]
    #[case(&[1, 2], 1, "root must be followed by a separator")]
    #[case(&[1, -1, -1, 2], 3, "no node left to own this entry")]
    #[case(&[1, -1, 2, -1, -1, -1], 5, "no node left to own this entry")]
    fn malformed_level_order(
        #[case] entries: &[i32],
        #[case] position: usize,
        #[case] reason: &'static str,
    ) {
        assert_eq!(
            build_level_order(&listing(entries)),
            Err(Error::invalid(position, reason))
        );
    }

    #[rstest]
    fn clone_keeps_child_order(example: NaryNode) {
        let mut copy = example.clone();
        assert_eq!(copy, example);

        copy.children.swap(1, 2);
        assert_ne!(copy, example);
        assert_eq!(copy.len(), example.len());
    }

    #[test]
    fn deep_tree_clones_and_compares() {
        let mut serialized = vec![Some(0); 200_000];
        serialized.resize(400_000, None);
        let root = build(&serialized).unwrap().unwrap();

        let copy = root.clone();
        assert_eq!(copy.len(), 200_000);
        assert_eq!(copy, root);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serde_round_trip(example: NaryNode) {
        let pair = NaryNode::with_children(1, vec![NaryNode::new(2)]);
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, r#"{"val":1,"children":[{"val":2,"children":[]}]}"#);

        let json = serde_json::to_string(&example).unwrap();
        let restored: NaryNode = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, example);
    }

    #[test]
    fn wide_and_deep_trees_drop() {
        let mut root = NaryNode::new(0);
        for val in 1..100_000 {
            root = NaryNode::with_children(val, vec![root, NaryNode::new(-val)]);
        }
        assert_eq!(root.len(), 199_999);

        let serialized = flatten(Some(&root));
        assert_eq!(build(&serialized).unwrap().map(|root| root.len()), Some(199_999));
    }
}
