#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeSet;

use changeset::{BatchEdit, IndexPath, SectionCounts, SectionedView};

pub fn counts(source: &dyn SectionCounts) -> Vec<usize> {
    (0..source.number_of_sections())
        .map(|section| source.number_of_items(section))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    BeginUpdates,
    Edit(BatchEdit),
    /// Item counts per section as seen when the batch closed.
    EndUpdates(Vec<usize>),
    ReloadData(Vec<usize>),
}

/// Records every call it receives.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub sync_probes: Cell<usize>,
}

impl RecordingView {
    pub fn edits(&self) -> Vec<BatchEdit> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ViewCall::Edit(edit) => Some(edit.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.sync_probes.set(0);
    }
}

impl SectionedView for RecordingView {
    fn begin_updates(&mut self) {
        self.calls.push(ViewCall::BeginUpdates);
    }

    fn end_updates(&mut self, source: &dyn SectionCounts) {
        self.calls.push(ViewCall::EndUpdates(counts(source)));
    }

    fn insert_sections(&mut self, sections: &BTreeSet<usize>) {
        self.calls
            .push(ViewCall::Edit(BatchEdit::InsertSections(sections.clone())));
    }

    fn insert_items(&mut self, paths: &[IndexPath]) {
        self.calls
            .push(ViewCall::Edit(BatchEdit::InsertItems(paths.to_vec())));
    }

    fn delete_sections(&mut self, sections: &BTreeSet<usize>) {
        self.calls
            .push(ViewCall::Edit(BatchEdit::DeleteSections(sections.clone())));
    }

    fn delete_items(&mut self, paths: &[IndexPath]) {
        self.calls
            .push(ViewCall::Edit(BatchEdit::DeleteItems(paths.to_vec())));
    }

    fn reload_sections(&mut self, sections: &BTreeSet<usize>) {
        self.calls
            .push(ViewCall::Edit(BatchEdit::ReloadSections(sections.clone())));
    }

    fn reload_items(&mut self, paths: &[IndexPath]) {
        self.calls
            .push(ViewCall::Edit(BatchEdit::ReloadItems(paths.to_vec())));
    }

    fn move_section(&mut self, from: usize, to: usize) {
        self.calls
            .push(ViewCall::Edit(BatchEdit::MoveSection { from, to }));
    }

    fn move_item(&mut self, from: &IndexPath, to: &IndexPath) {
        self.calls.push(ViewCall::Edit(BatchEdit::MoveItem {
            from: from.clone(),
            to: to.clone(),
        }));
    }

    fn reload_data(&mut self, source: &dyn SectionCounts) {
        self.calls.push(ViewCall::ReloadData(counts(source)));
    }

    fn number_of_sections(&self) -> usize {
        self.sync_probes.set(self.sync_probes.get() + 1);
        0
    }
}

/// Tracks item counts per section by replaying edits, and checks them
/// against the data source when each batch closes, the way a table view
/// validates a batch. Only exact for batches that describe one change.
#[derive(Debug, Default)]
pub struct ShadowView {
    pub sections: Vec<usize>,
    pending: Vec<BatchEdit>,
    pub batches: usize,
    pub reloads: usize,
}

impl ShadowView {
    fn replay(&mut self, edit: BatchEdit, source: &dyn SectionCounts) {
        match edit {
            BatchEdit::InsertSections(sections) => {
                for s in sections {
                    self.sections.insert(s, source.number_of_items(s));
                }
            }
            BatchEdit::InsertItems(paths) => {
                for path in paths {
                    self.sections[path[0]] += 1;
                }
            }
            BatchEdit::DeleteSections(sections) => {
                for s in sections.into_iter().rev() {
                    self.sections.remove(s);
                }
            }
            BatchEdit::DeleteItems(paths) => {
                for path in paths {
                    self.sections[path[0]] -= 1;
                }
            }
            BatchEdit::ReloadSections(sections) => {
                for s in sections {
                    self.sections[s] = source.number_of_items(s);
                }
            }
            BatchEdit::ReloadItems(_) => {}
            BatchEdit::MoveSection { from, to } => {
                let items = self.sections.remove(from);
                self.sections.insert(to, items);
            }
            BatchEdit::MoveItem { from, to } => {
                self.sections[from[0]] -= 1;
                self.sections[to[0]] += 1;
            }
        }
    }
}

impl SectionedView for ShadowView {
    fn begin_updates(&mut self) {
        assert!(self.pending.is_empty(), "nested batch");
        self.batches += 1;
    }

    fn end_updates(&mut self, source: &dyn SectionCounts) {
        for edit in std::mem::take(&mut self.pending) {
            self.replay(edit, source);
        }
        assert_eq!(
            self.sections,
            counts(source),
            "view counts diverged from the data source"
        );
    }

    fn insert_sections(&mut self, sections: &BTreeSet<usize>) {
        self.pending.push(BatchEdit::InsertSections(sections.clone()));
    }

    fn insert_items(&mut self, paths: &[IndexPath]) {
        self.pending.push(BatchEdit::InsertItems(paths.to_vec()));
    }

    fn delete_sections(&mut self, sections: &BTreeSet<usize>) {
        self.pending.push(BatchEdit::DeleteSections(sections.clone()));
    }

    fn delete_items(&mut self, paths: &[IndexPath]) {
        self.pending.push(BatchEdit::DeleteItems(paths.to_vec()));
    }

    fn reload_sections(&mut self, sections: &BTreeSet<usize>) {
        self.pending.push(BatchEdit::ReloadSections(sections.clone()));
    }

    fn reload_items(&mut self, paths: &[IndexPath]) {
        self.pending.push(BatchEdit::ReloadItems(paths.to_vec()));
    }

    fn move_section(&mut self, from: usize, to: usize) {
        self.pending.push(BatchEdit::MoveSection { from, to });
    }

    fn move_item(&mut self, from: &IndexPath, to: &IndexPath) {
        self.pending.push(BatchEdit::MoveItem {
            from: from.clone(),
            to: to.clone(),
        });
    }

    fn reload_data(&mut self, source: &dyn SectionCounts) {
        self.reloads += 1;
        self.sections = counts(source);
    }

    fn number_of_sections(&self) -> usize {
        self.sections.len()
    }
}
