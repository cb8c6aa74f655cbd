//! The view side of a binding.
//!
//! A [`SectionedView`] is a live list or table that understands grouped
//! section and item edits. Within one `begin_updates`/`end_updates` pair,
//! deletes and move sources address the layout before the batch; inserts,
//! reloads and move destinations address the layout after it.

use std::collections::BTreeSet;

use changeset_core::IndexPath;

use crate::data_source::SectionCounts;

/// A live list or table driven by a binder.
pub trait SectionedView {
    /// Opens a batch of grouped edits.
    fn begin_updates(&mut self);

    /// Closes the batch. `source` already holds the new snapshot, so a view
    /// that re-queries counts here sees the post-batch layout.
    fn end_updates(&mut self, source: &dyn SectionCounts);

    /// Adds whole sections at positions of the new layout.
    fn insert_sections(&mut self, sections: &BTreeSet<usize>);

    /// Adds items at positions of the new layout, sorted ascending.
    fn insert_items(&mut self, paths: &[IndexPath]);

    /// Removes whole sections at positions of the old layout.
    fn delete_sections(&mut self, sections: &BTreeSet<usize>);

    /// Removes items at positions of the old layout, sorted ascending.
    fn delete_items(&mut self, paths: &[IndexPath]);

    /// Redraws sections in place.
    fn reload_sections(&mut self, sections: &BTreeSet<usize>);

    /// Redraws items in place.
    fn reload_items(&mut self, paths: &[IndexPath]);

    /// Moves one section from its old position to its new one.
    fn move_section(&mut self, from: usize, to: usize);

    /// Moves one item from its old position to its new one.
    fn move_item(&mut self, from: &IndexPath, to: &IndexPath);

    /// Discards everything and redraws from `source`.
    fn reload_data(&mut self, source: &dyn SectionCounts);

    /// Forces the view to settle its layout. Called after every applied diff.
    fn number_of_sections(&self) -> usize;
}
