use bitvec::vec::BitVec;
use tracing::{debug, instrument};

use super::ListNode;
use crate::Error;

/// Index of a node within a [`CyclicList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListIndex(u32);

impl ListIndex {
    /// # Panics
    ///
    /// Panics when `index` does not fit into a `u32`.
    #[inline]
    fn new(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "list index out of range");
        Self(index as u32)
    }

    /// Returns the position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A singly linked list whose links may form a cycle.
///
/// Nodes live in an arena and refer to their successor by [`ListIndex`].
/// Every node has at most one successor but several nodes may link to the
/// same node, which is how a tail can point back into the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclicList {
    nodes: Vec<NodeData>,
    head: Option<ListIndex>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    val: i32,
    next: Option<ListIndex>,
}

impl Default for CyclicList {
    fn default() -> Self {
        Self::new()
    }
}

impl CyclicList {
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
        }
    }

    /// Creates a new empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
        }
    }

    /// Creates an acyclic chain of the given values.
    pub fn from_values(values: &[i32]) -> Self {
        let mut list = Self::with_capacity(values.len());
        let mut prev: Option<ListIndex> = None;

        for &val in values {
            let node = list.push(val);
            match prev {
                Some(prev) => list.nodes[prev.index()].next = Some(node),
                None => list.head = Some(node),
            }
            prev = Some(node);
        }

        list
    }

    /// Creates a chain of the given values whose tail links back to the node
    /// at position `pos`. With `pos` set to `None` the chain is acyclic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `pos` is not a position within
    /// `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nodeshapes::CyclicList;
    /// let list = CyclicList::with_cycle(&[3, 2, 0, -4], Some(1)).unwrap();
    /// let entry = list.cycle_entry().unwrap();
    /// assert_eq!(list.value(entry), Some(2));
    /// assert!(list.flatten(10).is_err());
    /// ```
    #[instrument(level = "trace", skip(values), fields(len = values.len()))]
    pub fn with_cycle(values: &[i32], pos: Option<usize>) -> Result<Self, Error> {
        let mut list = Self::from_values(values);

        if let Some(pos) = pos {
            if pos >= values.len() {
                debug!(pos, "cycle position is outside of the list");
                return Err(Error::invalid(pos, "cycle position is outside of the list"));
            }

            let tail = ListIndex::new(values.len() - 1);
            list.set_next(tail, Some(ListIndex::new(pos)));
        }

        Ok(list)
    }

    /// Copies a boxed chain into a new arena list.
    pub fn from_list(head: Option<&ListNode>) -> Self {
        let values: Vec<i32> = head.map(|node| node.iter().collect()).unwrap_or_default();
        Self::from_values(&values)
    }

    /// Converts the list reachable from the head into a boxed chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] when the list contains a cycle.
    pub fn to_list(&self) -> Result<Option<Box<ListNode>>, Error> {
        // An acyclic walk can not visit more nodes than the arena holds.
        let values = self.flatten(self.nodes.len())?;
        Ok(super::build(&values))
    }

    /// Adds a node without successor. The node is not linked into the list.
    ///
    /// # Panics
    ///
    /// Panics when the list would hold more than `u32::MAX` nodes.
    pub fn push(&mut self, val: i32) -> ListIndex {
        let index = ListIndex::new(self.nodes.len());
        self.nodes.push(NodeData { val, next: None });
        index
    }

    /// Sets the successor of a node, returning the previous one.
    ///
    /// # Panics
    ///
    /// Panics when either node is not part of the list.
    pub fn set_next(&mut self, node: ListIndex, next: Option<ListIndex>) -> Option<ListIndex> {
        if let Some(next) = next {
            assert!(next.index() < self.nodes.len(), "unknown list node");
        }
        std::mem::replace(&mut self.nodes[node.index()].next, next)
    }

    /// Sets the head of the list, returning the previous one.
    ///
    /// # Panics
    ///
    /// Panics when the node is not part of the list.
    pub fn set_head(&mut self, head: Option<ListIndex>) -> Option<ListIndex> {
        if let Some(head) = head {
            assert!(head.index() < self.nodes.len(), "unknown list node");
        }
        std::mem::replace(&mut self.head, head)
    }

    /// Returns the first node of the list.
    #[inline]
    pub fn head(&self) -> Option<ListIndex> {
        self.head
    }

    /// Returns the value stored at a node.
    #[inline]
    pub fn value(&self, node: ListIndex) -> Option<i32> {
        self.nodes.get(node.index()).map(|data| data.val)
    }

    /// Mutably borrows the value stored at a node.
    #[inline]
    pub fn value_mut(&mut self, node: ListIndex) -> Option<&mut i32> {
        self.nodes.get_mut(node.index()).map(|data| &mut data.val)
    }

    /// Returns the successor of a node.
    #[inline]
    pub fn next(&self, node: ListIndex) -> Option<ListIndex> {
        self.nodes.get(node.index())?.next
    }

    /// Returns the number of nodes in the arena, linked or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Collects the values reachable from the head.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CycleDetected`] when more than `max_steps` nodes are
    /// visited, which always happens eventually when the walk enters a
    /// cycle.
    pub fn flatten(&self, max_steps: usize) -> Result<Vec<i32>, Error> {
        let mut values = Vec::new();
        let mut next = self.head;

        while let Some(node) = next {
            if values.len() == max_steps {
                debug!(max_steps, "list traversal exceeded its step bound");
                return Err(Error::CycleDetected { max_steps });
            }

            let data = &self.nodes[node.index()];
            values.push(data.val);
            next = data.next;
        }

        Ok(values)
    }

    /// Returns the first node of the cycle reachable from the head, if any.
    pub fn cycle_entry(&self) -> Option<ListIndex> {
        let mut visited: BitVec = BitVec::repeat(false, self.nodes.len());
        let mut next = self.head;

        while let Some(node) = next {
            if visited.replace(node.index(), true) {
                return Some(node);
            }
            next = self.nodes[node.index()].next;
        }

        None
    }

    /// Whether a cycle is reachable from the head.
    #[inline]
    pub fn has_cycle(&self) -> bool {
        self.cycle_entry().is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_lists() {
        let list = CyclicList::default();
        assert_eq!(list, CyclicList::new());
        assert_eq!(list, CyclicList::with_capacity(8));
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.flatten(0), Ok(vec![]));
    }

    #[test]
    fn acyclic_chain() {
        let list = CyclicList::from_values(&[1, 2, 3]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.flatten(3), Ok(vec![1, 2, 3]));
        assert_eq!(list.cycle_entry(), None);

        let boxed = list.to_list().unwrap();
        assert_eq!(boxed.unwrap().to_string(), "1 -> 2 -> 3");
    }

    #[rstest]
    #[case(&[3, 2, 0, -4], 1, 2)]
    #[case(&[1, 2], 0, 1)]
    #[case(&[1], 0, 1)]
    fn cycle_position(#[case] values: &[i32], #[case] pos: usize, #[case] entry_value: i32) {
        let list = CyclicList::with_cycle(values, Some(pos)).unwrap();
        let entry = list.cycle_entry().unwrap();
        assert_eq!(entry.index(), pos);
        assert_eq!(list.value(entry), Some(entry_value));
        assert!(list.has_cycle());
    }

    #[test]
    fn bounded_walk_reports_cycle() {
        let list = CyclicList::with_cycle(&[3, 2, 0, -4], Some(1)).unwrap();
        assert_eq!(list.flatten(2), Err(Error::CycleDetected { max_steps: 2 }));
        assert_eq!(list.flatten(1000), Err(Error::CycleDetected { max_steps: 1000 }));
        assert_eq!(list.to_list(), Err(Error::CycleDetected { max_steps: 4 }));
    }

    #[test]
    fn cycle_position_out_of_range() {
        assert_eq!(
            CyclicList::with_cycle(&[1, 2], Some(2)),
            Err(Error::invalid(2, "cycle position is outside of the list"))
        );
        assert!(CyclicList::with_cycle(&[], Some(0)).is_err());
        assert_eq!(CyclicList::with_cycle(&[], None).unwrap().head(), None);
    }

    #[test]
    fn manual_linking() {
        let mut list = CyclicList::new();
        let a = list.push(1);
        let b = list.push(2);
        let c = list.push(3);

        list.set_head(Some(a));
        list.set_next(a, Some(b));
        list.set_next(b, Some(c));
        assert_eq!(list.flatten(10), Ok(vec![1, 2, 3]));

        assert_eq!(list.set_next(c, Some(c)), None);
        assert_eq!(list.cycle_entry(), Some(c));

        *list.value_mut(c).unwrap() = 30;
        assert_eq!(list.set_next(c, None), Some(c));
        assert_eq!(list.flatten(10), Ok(vec![1, 2, 30]));
        assert_eq!(list.next(b), Some(c));
    }

    #[test]
    fn round_trip_through_boxes() {
        let head = super::super::build(&[4, 5, 6]);
        let list = CyclicList::from_list(head.as_deref());
        assert_eq!(list.to_list().unwrap(), head);
    }
}
