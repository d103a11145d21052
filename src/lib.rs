//! This crate exposes a linked Binary Search Tree (BST) over a set of keys, with ordered queries
//! and on-demand rebalancing.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert and find stored
//! records. BSTs are typically defined recursively using the notion of a `Node`. A `Node` stores
//! a key and will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a key less than its
//!    own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a key greater than
//!    its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is the longest path from the root
//! `Node` to a leaf `Node`). The same invariants answer "what is the next key after `k`?" in
//! `O(height)` and give sorted iteration by visiting the left subtree, then the subtree root,
//! then the right subtree.
//!
//! Inserting keys in sorted order degrades a plain BST into a list with a height of `N`. The
//! [`linked::Tree`] doesn't fight this on every insert. Instead, calling
//! [`rebalance`][linked::Tree::rebalance] rebuilds it with a height of `O(lg N)`.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod linked;
