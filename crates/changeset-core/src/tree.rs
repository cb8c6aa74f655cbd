//! Tree-shaped collections addressed by [`IndexPath`].
//!
//! A [`TreeArray`] is a root-less forest: path `[i]` is its `i`-th top-level
//! node, `[i, j]` the `j`-th child of that node, and so on. A [`TreeNode`]
//! addresses its descendants the same way, relative to itself. Operations
//! on trees move whole subtrees: inserting a node inserts its children with
//! it, and deleting a node drops everything below it.

use changeset_index_path::IndexPath;
use serde::{Deserialize, Serialize};

use crate::apply::ApplyOperation;
use crate::operation::Operation;

// ── Node types ────────────────────────────────────────────────────────────

/// A value with an ordered list of child subtrees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeNode<V> {
    /// The node's own payload.
    pub value: V,
    /// Subtrees in order; `[i]` relative to this node.
    pub children: Vec<TreeNode<V>>,
}

impl<V> TreeNode<V> {
    /// A node with the given children.
    pub fn new(value: V, children: Vec<TreeNode<V>>) -> Self {
        Self { value, children }
    }

    /// A node without children.
    pub fn leaf(value: V) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    /// True when the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A forest of top-level nodes with no root value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeArray<V> {
    /// Top-level nodes; in a sectioned collection, the sections.
    pub children: Vec<TreeNode<V>>,
}

impl<V> TreeArray<V> {
    /// A forest with the given top-level nodes.
    pub fn new(children: Vec<TreeNode<V>>) -> Self {
        Self { children }
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<V> Default for TreeArray<V> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
        }
    }
}

impl<V> FromIterator<TreeNode<V>> for TreeArray<V> {
    fn from_iter<T: IntoIterator<Item = TreeNode<V>>>(iter: T) -> Self {
        Self {
            children: iter.into_iter().collect(),
        }
    }
}

// ── TreeCollection ────────────────────────────────────────────────────────

/// Path-addressed access to a list of child subtrees.
///
/// The empty path never names a node: it is the container itself.
pub trait TreeCollection {
    type Value;

    fn children(&self) -> &[TreeNode<Self::Value>];

    fn children_mut(&mut self) -> &mut Vec<TreeNode<Self::Value>>;

    /// The node at `at`, or `None` if the path leaves the tree.
    fn node(&self, at: &IndexPath) -> Option<&TreeNode<Self::Value>> {
        let (first, rest) = at.as_slice().split_first()?;
        let mut node = self.children().get(*first)?;
        for &index in rest {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    fn node_mut(&mut self, at: &IndexPath) -> Option<&mut TreeNode<Self::Value>> {
        let (first, rest) = at.as_slice().split_first()?;
        let mut node = self.children_mut().get_mut(*first)?;
        for &index in rest {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }

    /// Inserts `node` so that it ends up at `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is empty, if its parent does not exist, or if its last
    /// component is greater than the parent's child count.
    fn insert(&mut self, node: TreeNode<Self::Value>, at: &IndexPath) {
        let (index, parent) = split_target(at);
        siblings_mut(self.children_mut(), parent).insert(index, node);
    }

    /// Removes and returns the subtree at `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` does not name an existing node.
    fn remove(&mut self, at: &IndexPath) -> TreeNode<Self::Value> {
        let (index, parent) = split_target(at);
        siblings_mut(self.children_mut(), parent).remove(index)
    }

    /// Replaces the subtree at `at`, returning the old one. The new node's
    /// children replace the old node's children.
    ///
    /// # Panics
    ///
    /// Panics if `at` does not name an existing node.
    fn update(&mut self, at: &IndexPath, node: TreeNode<Self::Value>) -> TreeNode<Self::Value> {
        let (index, parent) = split_target(at);
        std::mem::replace(&mut siblings_mut(self.children_mut(), parent)[index], node)
    }

    /// Total number of nodes below the container.
    fn count(&self) -> usize {
        fn count_nodes<V>(nodes: &[TreeNode<V>]) -> usize {
            nodes.iter().map(|n| 1 + count_nodes(&n.children)).sum()
        }
        count_nodes(self.children())
    }

    /// Pre-order traversal yielding every node with its path.
    fn depth_first(&self) -> DepthFirst<'_, Self::Value> {
        DepthFirst::new(self.children())
    }
}

impl<V> TreeCollection for TreeNode<V> {
    type Value = V;

    fn children(&self) -> &[TreeNode<V>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<TreeNode<V>> {
        &mut self.children
    }
}

impl<V> TreeCollection for TreeArray<V> {
    type Value = V;

    fn children(&self) -> &[TreeNode<V>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<TreeNode<V>> {
        &mut self.children
    }
}

fn split_target(at: &IndexPath) -> (usize, &[usize]) {
    match at.as_slice().split_last() {
        Some((index, parent)) => (*index, parent),
        None => panic!("the empty index path does not address a node"),
    }
}

fn siblings_mut<'a, V>(
    mut children: &'a mut Vec<TreeNode<V>>,
    parent: &[usize],
) -> &'a mut Vec<TreeNode<V>> {
    for &index in parent {
        let len = children.len();
        children = match children.get_mut(index) {
            Some(node) => &mut node.children,
            None => panic!("index path component {index} out of range for {len} nodes"),
        };
    }
    children
}

// ── Traversal ─────────────────────────────────────────────────────────────

pub struct DepthFirst<'a, V> {
    stack: Vec<(IndexPath, &'a TreeNode<V>)>,
}

impl<'a, V> DepthFirst<'a, V> {
    fn new(roots: &'a [TreeNode<V>]) -> Self {
        let stack = roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (IndexPath::section(i), node))
            .collect();
        Self { stack }
    }
}

impl<'a, V> Iterator for DepthFirst<'a, V> {
    type Item = (IndexPath, &'a TreeNode<V>);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        for (i, child) in node.children.iter().enumerate().rev() {
            self.stack.push((path.appending(i), child));
        }
        Some((path, node))
    }
}

// ── Applicator ────────────────────────────────────────────────────────────

/// Applies one operation to a tree. Elements are whole subtrees.
///
/// # Panics
///
/// Panics when a path does not address a valid position at the moment it
/// is used.
pub fn apply_to_tree<T>(tree: &mut T, operation: Operation<TreeNode<T::Value>, IndexPath>)
where
    T: TreeCollection + ?Sized,
{
    match operation {
        Operation::Insert { element, at } => tree.insert(element, &at),
        Operation::Delete { at } => {
            tree.remove(&at);
        }
        Operation::Update { at, element } => {
            tree.update(&at, element);
        }
        Operation::Move { from, to } => {
            let node = tree.remove(&from);
            tree.insert(node, &to);
        }
    }
}

impl<V> ApplyOperation for TreeNode<V> {
    type Element = TreeNode<V>;
    type Index = IndexPath;

    fn apply(&mut self, operation: Operation<TreeNode<V>, IndexPath>) {
        apply_to_tree(self, operation);
    }
}

impl<V> ApplyOperation for TreeArray<V> {
    type Element = TreeNode<V>;
    type Index = IndexPath;

    fn apply(&mut self, operation: Operation<TreeNode<V>, IndexPath>) {
        apply_to_tree(self, operation);
    }
}
