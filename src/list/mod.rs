//! Singly linked lists.
//!
//! A [`ListNode`] exclusively owns its successor, so a chain built from
//! boxes is always finite and acyclic. Exercises that need a cycle on
//! purpose use the arena backed [`CyclicList`] instead, where `next` links
//! are plain indices.
mod cyclic;

pub use cyclic::{CyclicList, ListIndex};

use std::fmt;
use std::iter::FusedIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::Error;

/// A node of a singly linked list.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListNode {
    pub val: i32,
    pub next: Option<Box<ListNode>>,
}

impl ListNode {
    /// Creates a node without a successor.
    #[inline]
    pub fn new(val: i32) -> Self {
        Self { val, next: None }
    }

    /// Iterates over the values of this node and all of its successors.
    #[inline]
    pub fn iter(&self) -> Values<'_> {
        Values { next: Some(self) }
    }

    /// Returns the number of nodes in the chain starting at this node.
    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

impl Drop for ListNode {
    // Unlink the suffix one node at a time so that long chains do not
    // overflow the stack through recursive drops.
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl Clone for ListNode {
    fn clone(&self) -> Self {
        Self {
            val: self.val,
            next: self.next.as_deref().and_then(|next| from_values(next.iter())),
        }
    }
}

impl PartialEq for ListNode {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for ListNode {}

impl fmt::Debug for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = self.iter();
        if let Some(first) = values.next() {
            write!(f, "{}", first)?;
        }
        for val in values {
            write!(f, " -> {}", val)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ListNode {
    type Item = i32;
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds a list from its values, returning the head.
///
/// An empty slice produces an absent head.
///
/// # Examples
///
/// ```
/// # use nodeshapes::list;
/// let head = list::build(&[1, 2, 3]).unwrap();
/// assert_eq!(head.val, 1);
/// assert_eq!(head.to_string(), "1 -> 2 -> 3");
/// assert!(list::build(&[]).is_none());
/// ```
#[instrument(level = "trace", skip_all, fields(len = values.len()))]
pub fn build(values: &[i32]) -> Option<Box<ListNode>> {
    from_values(values.iter().copied())
}

/// Builds a list from an iterator of values, returning the head.
pub fn from_values<I>(values: I) -> Option<Box<ListNode>>
where
    I: IntoIterator<Item = i32>,
{
    let mut head = None;
    let mut tail = &mut head;

    for val in values {
        tail = &mut tail.insert(Box::new(ListNode::new(val))).next;
    }

    head
}

/// Collects the values of a list by following `next` links.
///
/// # Errors
///
/// Returns [`Error::CycleDetected`] when the list has more than `max_steps`
/// nodes.
///
/// # Examples
///
/// ```
/// # use nodeshapes::{list, Error};
/// let head = list::build(&[1, 2, 3]);
/// assert_eq!(list::flatten(head.as_deref(), 3), Ok(vec![1, 2, 3]));
/// assert_eq!(
///     list::flatten(head.as_deref(), 2),
///     Err(Error::CycleDetected { max_steps: 2 })
/// );
/// ```
pub fn flatten(head: Option<&ListNode>, max_steps: usize) -> Result<Vec<i32>, Error> {
    let mut values = Vec::new();
    let mut next = head;

    while let Some(node) = next {
        if values.len() == max_steps {
            debug!(max_steps, "list traversal exceeded its step bound");
            return Err(Error::CycleDetected { max_steps });
        }

        values.push(node.val);
        next = node.next.as_deref();
    }

    Ok(values)
}

/// Collects the values of a list without a step bound.
pub fn flatten_all(head: Option<&ListNode>) -> Vec<i32> {
    head.map(|node| node.iter().collect()).unwrap_or_default()
}

/// Iterator created by [`ListNode::iter`].
#[derive(Debug, Clone)]
pub struct Values<'a> {
    next: Option<&'a ListNode>,
}

impl<'a> Iterator for Values<'a> {
    type Item = i32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(node.val)
    }
}

impl<'a> FusedIterator for Values<'a> {}
