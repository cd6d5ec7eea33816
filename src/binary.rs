//! Binary trees and their level-order interchange form.
//!
//! A tree is listed breadth first, left to right, with `None` marking a
//! position that holds no node:
//!
//! ```text
//!     3
//!    / \          [3, 9, 20, null, null, 15, 7]
//!   9  20
//!     /  \
//!    15   7
//! ```
//!
//! Trailing missing markers carry no information and are trimmed by
//! [`flatten`], so trees compare equal exactly when their flattened forms do.
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::Error;

/// A node of a binary tree.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeNode {
    pub val: i32,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    /// Creates a leaf.
    #[inline]
    pub fn new(val: i32) -> Self {
        Self {
            val,
            left: None,
            right: None,
        }
    }

    /// Creates a node with the given children.
    pub fn with_children(val: i32, left: Option<TreeNode>, right: Option<TreeNode>) -> Self {
        Self {
            val,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    /// Whether the node has neither a left nor a right child.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns the number of nodes in the subtree rooted at this node.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        count
    }
}

impl Clone for TreeNode {
    fn clone(&self) -> Self {
        let mut root = TreeNode::new(self.val);
        let mut stack = vec![(self, &mut root)];

        while let Some((source, target)) = stack.pop() {
            let TreeNode { left, right, .. } = target;
            for (from, to) in [(&source.left, left), (&source.right, right)] {
                if let Some(from) = from.as_deref() {
                    let to = to.insert(Box::new(TreeNode::new(from.val)));
                    stack.push((from, &mut **to));
                }
            }
        }

        root
    }
}

// Equality and hashing go through the level-order listing, which identifies
// a tree uniquely and is built without recursion.
impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        flatten(Some(self)) == flatten(Some(other))
    }
}

impl Eq for TreeNode {}

impl Hash for TreeNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        flatten(Some(self)).hash(state);
    }
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack: Vec<Box<TreeNode>> =
            self.left.take().into_iter().chain(self.right.take()).collect();

        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// A node laid out in breadth-first order while the tree is being built.
///
/// Children always have a larger index than their parent.
#[derive(Debug, Clone)]
struct Layout {
    val: i32,
    children: [Option<usize>; 2],
}

/// Builds a binary tree from its level-order listing.
///
/// Every present value fills the next free child slot, left before right,
/// of the earliest node that still has one. A missing marker consumes a slot
/// without creating a node. An empty listing, as well as a listing that only
/// consists of a missing root, produces an absent root.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an entry that has no free slot left to
/// fill, e.g. anything following a missing root.
///
/// # Examples
///
/// ```
/// # use nodeshapes::binary;
/// let root = binary::build(&[Some(1), None, Some(2), Some(3)]).unwrap().unwrap();
/// assert!(root.left.is_none());
///
/// let right = root.right.as_deref().unwrap();
/// assert_eq!(right.left.as_deref().map(|n| n.val), Some(3));
/// ```
#[instrument(level = "trace", skip_all, fields(len = level_order.len()))]
pub fn build(level_order: &[Option<i32>]) -> Result<Option<Box<TreeNode>>, Error> {
    let Some((&root, rest)) = level_order.split_first() else {
        return Ok(None);
    };

    let Some(root) = root else {
        if !rest.is_empty() {
            debug!("level-order listing continues after a missing root");
            return Err(Error::invalid(1, "no parent slot left for this entry"));
        }
        return Ok(None);
    };

    let mut nodes = vec![Layout {
        val: root,
        children: [None; 2],
    }];
    let mut slots = VecDeque::from([(0, 0), (0, 1)]);

    for (position, entry) in level_order.iter().enumerate().skip(1) {
        let Some((parent, side)) = slots.pop_front() else {
            debug!(position, "level-order entry has no parent slot");
            return Err(Error::invalid(position, "no parent slot left for this entry"));
        };

        if let Some(val) = *entry {
            let index = nodes.len();
            nodes.push(Layout {
                val,
                children: [None; 2],
            });
            nodes[parent].children[side] = Some(index);
            slots.push_back((index, 0));
            slots.push_back((index, 1));
        }
    }

    Ok(assemble(&nodes))
}

/// Turns the breadth-first layout into owned boxes, deepest nodes first.
fn assemble(layout: &[Layout]) -> Option<Box<TreeNode>> {
    let mut built: Vec<Option<Box<TreeNode>>> = Vec::with_capacity(layout.len());
    built.resize_with(layout.len(), || None);

    for (index, node) in layout.iter().enumerate().rev() {
        let [left, right] = node
            .children
            .map(|child| child.and_then(|child| built[child].take()));

        built[index] = Some(Box::new(TreeNode {
            val: node.val,
            left,
            right,
        }));
    }

    built.first_mut().and_then(Option::take)
}

/// Lists a binary tree in level order.
///
/// Absent children of present nodes are emitted as `None`, except for the
/// trailing ones. An absent root produces an empty listing.
///
/// # Examples
///
/// ```
/// # use nodeshapes::binary::{self, TreeNode};
/// let root = TreeNode::with_children(1, None, Some(TreeNode::new(2)));
/// assert_eq!(binary::flatten(Some(&root)), [Some(1), None, Some(2)]);
/// ```
pub fn flatten(root: Option<&TreeNode>) -> Vec<Option<i32>> {
    let mut level_order = Vec::new();
    let mut queue = VecDeque::from([root]);

    while let Some(slot) = queue.pop_front() {
        match slot {
            Some(node) => {
                level_order.push(Some(node.val));
                queue.push_back(node.left.as_deref());
                queue.push_back(node.right.as_deref());
            }
            None => level_order.push(None),
        }
    }

    let len = level_order
        .iter()
        .rposition(Option::is_some)
        .map_or(0, |last| last + 1);
    level_order.truncate(len);
    level_order
}
