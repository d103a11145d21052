//! A linked BST. Every node exclusively owns its children through a `Box` and there are no
//! parent pointers, so the tree is a strict ownership hierarchy. Walks that would naturally be
//! recursive (traversal, dropping, measuring height) use an explicit stack instead so that a
//! degenerate tree built from sorted input cannot overflow the call stack.
//!
//! The tree does not balance itself on insertion. Instead, [`Tree::rebalance`] rebuilds a
//! balanced tree from the current set of keys on demand.
//!
//! # Examples
//!
//! ```
//! use bst::linked::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&123), None);
//!
//! for key in [123, 34, 11, 678, 100] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.find(&123), Some(&123));
//! assert_eq!(tree.len(), 5);
//!
//! // Inserting a key that is already present changes nothing.
//! assert!(!tree.insert(34));
//! assert_eq!(tree.len(), 5);
//!
//! // Range queries report keys in preorder.
//! assert_eq!(tree.range_find(&11, &112), vec![&34, &11, &100]);
//!
//! // Rebalancing keeps the keys but flattens the tree.
//! tree.rebalance();
//! assert_eq!(tree.preorder().next(), Some(&100));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [11, 34, 100, 123, 678]);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

type Link<K> = Option<Box<Node<K>>>;

/// A Binary Search Tree over a set of keys. It supports inserting keys, looking them up,
/// ordered queries (ranges, successors, and predecessors), and explicit rebalancing. Keys
/// are unique: inserting a key that is already present leaves the tree untouched.
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

/// Rebuilds the tree by inserting its preorder sequence into an empty tree. Parents are always
/// inserted before their children, so the copy has exactly the same shape.
impl<K> Clone for Tree<K>
where
    K: Clone + Ord,
{
    fn clone(&self) -> Self {
        self.preorder().cloned().collect()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Two trees are equal when they hold the same keys, regardless of shape.
impl<K> PartialEq for Tree<K>
where
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K> Eq for Tree<K> where K: Eq {}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Preorder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.preorder()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty tree has a
    /// height of 0 and a tree with only a root has a height of 1.
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut stack: Vec<(&Node<K>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            tallest = tallest.max(depth);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }

        tallest
    }

    /// Inserts the given key into the tree. Returns `false`, leaving the tree untouched, if an
    /// equal key is already stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return false,
                Ordering::Greater => &mut node.right,
            };
        }

        *slot = Some(Node::new_boxed(key));
        self.len += 1;
        true
    }

    /// Whether a key equal to the given one is stored in the tree.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// Potentially finds the stored key equal to the given key. If no node has a matching key,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::linked::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(123);
    ///
    /// assert_eq!(tree.find(&123), Some(&123));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    /// Overwrites the stored key equal to `key` with `new_key` and returns the old key. Returns
    /// `None`, dropping `new_key`, if no such key is stored.
    ///
    /// The node is not moved, so `new_key` must order the same way relative to every other key
    /// in the tree as `key` did. Otherwise later lookups may miss keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::linked::Tree;
    ///
    /// let mut tree: Tree<String> = ["m", "c", "x"].iter().map(|s| s.to_string()).collect();
    ///
    /// assert_eq!(tree.replace(&"c".to_string(), "d".to_string()), Some("c".to_string()));
    /// assert!(tree.contains(&"d".to_string()));
    /// assert!(!tree.contains(&"c".to_string()));
    /// assert_eq!(tree.replace(&"q".to_string(), "r".to_string()), None);
    /// ```
    pub fn replace(&mut self, key: &K, new_key: K) -> Option<K>
    where
        K: Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Equal => return Some(mem::replace(&mut node.key, new_key)),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }

        None
    }

    /// Returns every key `k` with `low <= k <= high`, in the order a preorder traversal visits
    /// them. Subtrees that cannot hold such keys are skipped entirely, which doesn't change the
    /// relative order of the keys that are reported.
    pub fn range_find(&self, low: &K, high: &K) -> Vec<&K>
    where
        K: Ord,
    {
        let mut found = Vec::new();
        if low > high {
            return found;
        }

        let mut stack: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            let key = &node.key;
            if low <= key && key <= high {
                found.push(key);
            }

            // Right is pushed first so the left subtree is visited first.
            if key < high {
                stack.extend(node.right());
            }
            if key > low {
                stack.extend(node.left());
            }
        }

        found
    }

    /// Returns the smallest stored key strictly greater than `key`. `key` itself doesn't need to
    /// be in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::linked::Tree;
    ///
    /// let tree: Tree<_> = [11, 678, 100].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&90), Some(&100));
    /// assert_eq!(tree.successor(&100), Some(&678));
    /// assert_eq!(tree.successor(&678), None);
    /// ```
    pub fn successor(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.key > *key {
                best = Some(&node.key);
                current = node.left();
            } else {
                current = node.right();
            }
        }

        best
    }

    /// Returns the largest stored key strictly less than `key`. `key` itself doesn't need to be
    /// in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::linked::Tree;
    ///
    /// let tree: Tree<_> = [11, 678, 100, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&11), Some(&9));
    /// assert_eq!(tree.predecessor(&678), Some(&100));
    /// assert_eq!(tree.predecessor(&9), None);
    /// ```
    pub fn predecessor(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.key < *key {
                best = Some(&node.key);
                current = node.right();
            } else {
                current = node.left();
            }
        }

        best
    }

    /// Rebuilds the tree so that its height is as small as possible for the keys it holds.
    ///
    /// The keys are sorted and then reinserted median first. The sorted keys are split into
    /// partitions which are processed breadth-first: each partition inserts its middle key and
    /// queues its left and right halves. The first median becomes the new root and every
    /// partition ends up as the subtree under its own median.
    pub fn rebalance(&mut self)
    where
        K: Ord,
    {
        let height_before = self.height();
        let mut keys = take_keys(self.root.take());
        self.len = 0;
        keys.sort_unstable();

        let mut keys: Vec<Option<K>> = keys.into_iter().map(Some).collect();
        let mut partitions = VecDeque::from([0..keys.len()]);
        while let Some(partition) = partitions.pop_front() {
            if partition.is_empty() {
                continue;
            }

            let mid = partition.start + partition.len() / 2;
            if let Some(key) = keys[mid].take() {
                self.insert(key);
            }
            partitions.push_back(partition.start..mid);
            partitions.push_back(mid + 1..partition.end);
        }

        log::debug!(
            "rebalanced {} keys from height {} to height {}",
            self.len,
            height_before,
            self.height()
        );
    }

    /// Removes every key from the tree.
    pub fn clear(&mut self) {
        release(self.root.take());
        log::trace!("cleared {} keys", self.len);
        self.len = 0;
    }

    /// Iterates over the keys in preorder: each node is visited before its children and a left
    /// subtree is visited before the right one. Each call starts a fresh traversal.
    pub fn preorder(&self) -> Preorder<'_, K> {
        Preorder {
            stack: self.root.as_deref().into_iter().collect(),
            remaining: self.len,
        }
    }

    /// Iterates over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst::linked::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &3, &5, &8]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }
}

/// Drops a subtree one node at a time. Letting the `Box`es drop on their own would recurse once
/// per level.
fn release<K>(root: Link<K>) {
    let mut stack: Vec<Box<Node<K>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

/// Tears down a subtree, returning its keys in preorder.
fn take_keys<K>(root: Link<K>) -> Vec<K> {
    let mut keys = Vec::new();
    let mut stack: Vec<Box<Node<K>>> = root.into_iter().collect();
    while let Some(node) = stack.pop() {
        let Node { key, left, right } = *node;
        keys.push(key);
        stack.extend(right);
        stack.extend(left);
    }

    keys
}

struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
        })
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// A preorder iterator over the keys of a [`Tree`], created by [`Tree::preorder`].
pub struct Preorder<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Iterator for Preorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Preorder<'_, K> {}

impl<K> FusedIterator for Preorder<'_, K> {}

/// An ascending iterator over the keys of a [`Tree`], created by [`Tree::iter`].
pub struct Iter<'a, K> {
    /// Nodes whose key hasn't been yielded yet but whose left subtree is already queued up.
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut link: Option<&'a Node<K>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
