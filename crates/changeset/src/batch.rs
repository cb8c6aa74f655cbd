//! Translation of a diff's positions into grouped view edits.
//!
//! Positions are classified by depth: one index names a section, two name
//! an item. The resulting [`BatchUpdate`] holds sorted sets, so the edits it
//! emits do not depend on the order the producer listed positions in.

use std::collections::BTreeSet;
use std::fmt;

use changeset_core::IndexPath;
use tracing::{trace, warn};

use crate::diff::Move;
use crate::view::SectionedView;

/// A diff position sorted by what it addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    Section(usize),
    Item(IndexPath),
}

impl Position {
    /// `None` for any depth other than 1 or 2.
    pub fn classify(path: &IndexPath) -> Option<Position> {
        match path.as_slice() {
            [section] => Some(Position::Section(*section)),
            [_, _] => Some(Position::Item(path.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchMove {
    Section { from: usize, to: usize },
    Item { from: IndexPath, to: IndexPath },
}

impl BatchMove {
    /// `None` when the endpoints do not both classify at the same depth.
    pub fn classify(m: &Move<IndexPath>) -> Option<BatchMove> {
        match (Position::classify(&m.from)?, Position::classify(&m.to)?) {
            (Position::Section(from), Position::Section(to)) => Some(BatchMove::Section { from, to }),
            (Position::Item(from), Position::Item(to)) => Some(BatchMove::Item { from, to }),
            _ => None,
        }
    }
}

/// One grouped call on a [`SectionedView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEdit {
    InsertSections(BTreeSet<usize>),
    InsertItems(Vec<IndexPath>),
    DeleteSections(BTreeSet<usize>),
    DeleteItems(Vec<IndexPath>),
    ReloadItems(Vec<IndexPath>),
    ReloadSections(BTreeSet<usize>),
    MoveSection { from: usize, to: usize },
    MoveItem { from: IndexPath, to: IndexPath },
}

impl BatchEdit {
    pub fn name(&self) -> &'static str {
        match self {
            BatchEdit::InsertSections(_) => "insert_sections",
            BatchEdit::InsertItems(_) => "insert_items",
            BatchEdit::DeleteSections(_) => "delete_sections",
            BatchEdit::DeleteItems(_) => "delete_items",
            BatchEdit::ReloadItems(_) => "reload_items",
            BatchEdit::ReloadSections(_) => "reload_sections",
            BatchEdit::MoveSection { .. } => "move_section",
            BatchEdit::MoveItem { .. } => "move_item",
        }
    }

    pub fn send_to<V: SectionedView + ?Sized>(&self, view: &mut V) {
        match self {
            BatchEdit::InsertSections(sections) => view.insert_sections(sections),
            BatchEdit::InsertItems(paths) => view.insert_items(paths),
            BatchEdit::DeleteSections(sections) => view.delete_sections(sections),
            BatchEdit::DeleteItems(paths) => view.delete_items(paths),
            BatchEdit::ReloadItems(paths) => view.reload_items(paths),
            BatchEdit::ReloadSections(sections) => view.reload_sections(sections),
            BatchEdit::MoveSection { from, to } => view.move_section(*from, *to),
            BatchEdit::MoveItem { from, to } => view.move_item(from, to),
        }
    }
}

impl fmt::Display for BatchEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchEdit::InsertSections(s) | BatchEdit::DeleteSections(s) | BatchEdit::ReloadSections(s) => {
                write!(f, "{}{:?}", self.name(), s)
            }
            BatchEdit::InsertItems(p) | BatchEdit::DeleteItems(p) | BatchEdit::ReloadItems(p) => {
                write!(f, "{}{:?}", self.name(), p)
            }
            BatchEdit::MoveSection { from, to } => write!(f, "{}({from} -> {to})", self.name()),
            BatchEdit::MoveItem { from, to } => write!(f, "{}({from} -> {to})", self.name()),
        }
    }
}

/// A diff's positions grouped into sections and items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchUpdate {
    pub insert_sections: BTreeSet<usize>,
    pub insert_items: BTreeSet<IndexPath>,
    pub delete_sections: BTreeSet<usize>,
    pub delete_items: BTreeSet<IndexPath>,
    pub reload_sections: BTreeSet<usize>,
    pub reload_items: BTreeSet<IndexPath>,
    pub moves: Vec<BatchMove>,
}

impl BatchUpdate {
    /// Groups positions by depth. Positions that are neither sections nor
    /// items, and moves whose endpoints disagree on depth, are dropped with
    /// a warning.
    pub fn classify(
        deletes: &[IndexPath],
        inserts: &[IndexPath],
        updates: &[IndexPath],
        moves: &[Move<IndexPath>],
    ) -> Self {
        let mut batch = BatchUpdate::default();
        partition(
            "deletes",
            deletes,
            &mut batch.delete_sections,
            &mut batch.delete_items,
        );
        partition(
            "inserts",
            inserts,
            &mut batch.insert_sections,
            &mut batch.insert_items,
        );
        partition(
            "updates",
            updates,
            &mut batch.reload_sections,
            &mut batch.reload_items,
        );
        for m in moves {
            match BatchMove::classify(m) {
                Some(batch_move) => batch.moves.push(batch_move),
                None => warn!(from = %m.from, to = %m.to, "dropping move between unsupported positions"),
            }
        }
        batch
    }

    pub fn is_empty(&self) -> bool {
        self.insert_sections.is_empty()
            && self.insert_items.is_empty()
            && self.delete_sections.is_empty()
            && self.delete_items.is_empty()
            && self.reload_sections.is_empty()
            && self.reload_items.is_empty()
            && self.moves.is_empty()
    }

    /// The grouped view calls, in the order they are issued: inserted
    /// sections, inserted items, deleted sections, deleted items, reloaded
    /// items, reloaded sections, then moves. Empty groups are skipped.
    pub fn edits(&self) -> Vec<BatchEdit> {
        let mut edits = Vec::new();
        if !self.insert_sections.is_empty() {
            edits.push(BatchEdit::InsertSections(self.insert_sections.clone()));
        }
        if !self.insert_items.is_empty() {
            edits.push(BatchEdit::InsertItems(self.insert_items.iter().cloned().collect()));
        }
        if !self.delete_sections.is_empty() {
            edits.push(BatchEdit::DeleteSections(self.delete_sections.clone()));
        }
        if !self.delete_items.is_empty() {
            edits.push(BatchEdit::DeleteItems(self.delete_items.iter().cloned().collect()));
        }
        if !self.reload_items.is_empty() {
            edits.push(BatchEdit::ReloadItems(self.reload_items.iter().cloned().collect()));
        }
        if !self.reload_sections.is_empty() {
            edits.push(BatchEdit::ReloadSections(self.reload_sections.clone()));
        }
        edits.extend(self.moves.iter().map(|m| match m {
            BatchMove::Section { from, to } => BatchEdit::MoveSection {
                from: *from,
                to: *to,
            },
            BatchMove::Item { from, to } => BatchEdit::MoveItem {
                from: from.clone(),
                to: to.clone(),
            },
        }));
        edits
    }

    /// Sends every edit to `view`. The caller opens and closes the batch.
    pub fn dispatch<V: SectionedView + ?Sized>(&self, view: &mut V) {
        for edit in self.edits() {
            trace!(edit = %edit, "batch edit");
            edit.send_to(view);
        }
    }
}

fn partition(
    list: &'static str,
    paths: &[IndexPath],
    sections: &mut BTreeSet<usize>,
    items: &mut BTreeSet<IndexPath>,
) {
    for path in paths {
        match Position::classify(path) {
            Some(Position::Section(section)) => {
                sections.insert(section);
            }
            Some(Position::Item(item)) => {
                items.insert(item);
            }
            None => warn!(list, path = %path, depth = path.depth(), "dropping position with unsupported depth"),
        }
    }
}
