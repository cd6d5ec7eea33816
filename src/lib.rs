//! Node shapes shared by algorithm exercises.
//!
//! The crate provides the three structures that exercise solutions operate
//! on, together with the conventions used to build them from flat sequences
//! and to flatten them back for comparison:
//!
//!  - [`ListNode`]: a singly linked list built from `[1, 2, 3]`.
//!  - [`TreeNode`]: a binary tree built from a level-order sequence with
//!    missing markers, e.g. `[3, 9, 20, null, null, 15, 7]`.
//!  - [`NaryNode`]: an n-ary tree built from a pre-order sequence with
//!    end-of-children markers.
//!
//! Missing markers are modelled as `None` in a `[Option<i32>]` sequence so a
//! zero value can never be confused with an absent node. Every reference in
//! these structures has exactly one owner; the only way to construct a cycle
//! is through the arena backed [`CyclicList`].
//!
//! # Example
//!
//! ```
//! use nodeshapes::{binary, interchange};
//!
//! let slots = interchange::parse_slots("[3,9,20,null,null,15,7]").unwrap();
//! let root = binary::build(&slots).unwrap().unwrap();
//! assert_eq!(root.val, 3);
//! assert_eq!(root.right.as_ref().unwrap().val, 20);
//! assert_eq!(binary::flatten(Some(&root)), slots);
//! ```
pub mod binary;
pub mod error;
pub mod interchange;
pub mod list;
pub mod nary;

pub use binary::TreeNode;
pub use error::Error;
pub use list::{CyclicList, ListIndex, ListNode};
pub use nary::NaryNode;
