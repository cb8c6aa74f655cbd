//! The `IndexPath` value type.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// A position inside a tree or a sectioned collection.
///
/// Each component is an offset among siblings. A path of depth 1 addresses a
/// section (a top-level node), a path of depth 2 addresses an item inside
/// that section, and so on. Paths order lexicographically, so sorting a set
/// of paths yields pre-order (parents before their children).
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexPath(Vec<usize>);

impl IndexPath {
    /// Wraps raw components, outermost first.
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path of a section (depth 1).
    pub fn section(section: usize) -> Self {
        Self(vec![section])
    }

    /// Path of an item inside a section (depth 2).
    pub fn item(section: usize, item: usize) -> Self {
        Self(vec![section, item])
    }

    /// Number of components.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// True for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Outermost component.
    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// Innermost component.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Section component (first index), if any.
    pub fn section_index(&self) -> Option<usize> {
        self.first()
    }

    /// Item component (second index), if any.
    pub fn item_index(&self) -> Option<usize> {
        self.0.get(1).copied()
    }

    /// The path with its last component dropped, or `None` for the empty path.
    pub fn parent(&self) -> Option<IndexPath> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Returns a new path with `index` appended.
    pub fn appending(&self, index: usize) -> IndexPath {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Descends one level to child `index`.
    pub fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    /// Climbs one level, returning the dropped component.
    pub fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl fmt::Debug for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl Index<usize> for IndexPath {
    type Output = usize;

    fn index(&self, position: usize) -> &usize {
        &self.0[position]
    }
}

impl From<Vec<usize>> for IndexPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl<const N: usize> From<[usize; N]> for IndexPath {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl From<&[usize]> for IndexPath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl From<usize> for IndexPath {
    fn from(index: usize) -> Self {
        Self(vec![index])
    }
}

impl FromIterator<usize> for IndexPath {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a IndexPath {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_and_item_accessors() {
        let path = IndexPath::item(2, 5);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.section_index(), Some(2));
        assert_eq!(path.item_index(), Some(5));
        assert_eq!(IndexPath::section(3).item_index(), None);
    }

    #[test]
    fn test_parent_and_appending() {
        let path = IndexPath::from([1, 4, 2]);
        assert_eq!(path.parent(), Some(IndexPath::from([1, 4])));
        assert_eq!(IndexPath::default().parent(), None);
        assert_eq!(IndexPath::section(1).appending(0), IndexPath::item(1, 0));
    }

    #[test]
    fn test_ordering_is_pre_order() {
        let mut paths = vec![
            IndexPath::item(1, 0),
            IndexPath::section(1),
            IndexPath::item(0, 2),
            IndexPath::section(0),
        ];
        paths.sort();
        assert_eq!(
            paths,
            vec![
                IndexPath::section(0),
                IndexPath::item(0, 2),
                IndexPath::section(1),
                IndexPath::item(1, 0),
            ]
        );
    }

    #[test]
    fn test_debug_and_display() {
        let path = IndexPath::item(0, 1);
        assert_eq!(format!("{path:?}"), "[0, 1]");
        assert_eq!(path.to_string(), "/0/1");
        assert_eq!(IndexPath::default().to_string(), "");
    }
}
