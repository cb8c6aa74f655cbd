//! Sectioned data sources.
//!
//! A data source is anything that can report how many sections it has, how
//! many items each section holds, and hand out the item at a depth-2 index
//! path. The count half is split into [`SectionCounts`] so views can query
//! it through a trait object without knowing the item type.

use changeset_core::{IndexPath, TreeArray};

pub trait SectionCounts {
    fn number_of_sections(&self) -> usize;

    fn number_of_items(&self, section: usize) -> usize;

    /// True when `path` names an existing section (depth 1) or item
    /// (depth 2). Other depths never match.
    fn contains_position(&self, path: &IndexPath) -> bool {
        match path.as_slice() {
            [section] => *section < self.number_of_sections(),
            [section, item] => {
                *section < self.number_of_sections() && *item < self.number_of_items(*section)
            }
            _ => false,
        }
    }
}

pub trait SectionedDataSource: SectionCounts {
    type Item;

    /// The item at a depth-2 path.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid item position.
    fn item(&self, path: &IndexPath) -> &Self::Item;
}

/// A flat array is a data source with exactly one section.
impl<T> SectionCounts for Vec<T> {
    fn number_of_sections(&self) -> usize {
        1
    }

    fn number_of_items(&self, section: usize) -> usize {
        debug_assert_eq!(section, 0, "a flat array has a single section");
        self.len()
    }
}

impl<T> SectionedDataSource for Vec<T> {
    type Item = T;

    fn item(&self, path: &IndexPath) -> &T {
        debug_assert_eq!(path.section_index(), Some(0), "a flat array has a single section");
        &self[path[1]]
    }
}

/// Top-level nodes are sections, their children are items.
impl<V> SectionCounts for TreeArray<V> {
    fn number_of_sections(&self) -> usize {
        self.children.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.children[section].children.len()
    }
}

impl<V> SectionedDataSource for TreeArray<V> {
    type Item = V;

    fn item(&self, path: &IndexPath) -> &V {
        &self.children[path[0]].children[path[1]].value
    }
}

/// The counts of a data source that does not exist yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptySource;

impl SectionCounts for EmptySource {
    fn number_of_sections(&self) -> usize {
        0
    }

    fn number_of_items(&self, _section: usize) -> usize {
        0
    }
}
