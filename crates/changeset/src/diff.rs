//! Diff descriptors handed to a binder.
//!
//! A [`Diff`] either replaces the data source wholesale or carries the new
//! data source together with the positions that changed. Deletes name
//! positions in the old snapshot; inserts and updates name positions in the
//! new one. Moves pair an old position with a new one.

use std::collections::{HashMap, HashSet};
use std::fmt;

use changeset_core::{AnyOperation, IndexPath, TreeArray};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_source::{EmptySource, SectionCounts};

/// A position that changed place: `from` in the old snapshot, `to` in the
/// new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move<I> {
    pub from: I,
    pub to: I,
}

impl<I> Move<I> {
    pub fn new(from: I, to: I) -> Self {
        Self { from, to }
    }
}

impl<I> From<(I, I)> for Move<I> {
    fn from((from, to): (I, I)) -> Self {
        Self { from, to }
    }
}

impl<I: fmt::Display> fmt::Display for Move<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Diff<D> {
    /// Replace everything; no positional information.
    Reload(D),
    /// The new data source plus the positions that changed.
    Update {
        data_source: D,
        deletes: Vec<IndexPath>,
        inserts: Vec<IndexPath>,
        updates: Vec<IndexPath>,
        moves: Vec<Move<IndexPath>>,
    },
}

impl<D> Diff<D> {
    pub fn reload(data_source: D) -> Self {
        Diff::Reload(data_source)
    }

    /// An update that changes no position yet. Fill it in with
    /// [`Diff::deleting`], [`Diff::inserting`], [`Diff::updating`] and
    /// [`Diff::moving`].
    pub fn update(data_source: D) -> Self {
        Diff::Update {
            data_source,
            deletes: Vec::new(),
            inserts: Vec::new(),
            updates: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// A diff describing exactly one structural change. A single operation
    /// already satisfies the old/new position rules on its own.
    pub fn from_operation(data_source: D, operation: AnyOperation<IndexPath>) -> Self {
        let diff = Self::update(data_source);
        match operation {
            AnyOperation::Insert { at } => diff.inserting([at]),
            AnyOperation::Delete { at } => diff.deleting([at]),
            AnyOperation::Update { at } => diff.updating([at]),
            AnyOperation::Move { from, to } => diff.moving(from, to),
        }
    }

    /// Like [`Diff::from_operation`] for a flat collection, whose positions
    /// all live in section 0.
    pub fn from_flat_operation(data_source: D, operation: AnyOperation<usize>) -> Self {
        let operation = match operation {
            AnyOperation::Insert { at } => AnyOperation::Insert {
                at: IndexPath::item(0, at),
            },
            AnyOperation::Delete { at } => AnyOperation::Delete {
                at: IndexPath::item(0, at),
            },
            AnyOperation::Update { at } => AnyOperation::Update {
                at: IndexPath::item(0, at),
            },
            AnyOperation::Move { from, to } => AnyOperation::Move {
                from: IndexPath::item(0, from),
                to: IndexPath::item(0, to),
            },
        };
        Self::from_operation(data_source, operation)
    }

    pub fn deleting(mut self, paths: impl IntoIterator<Item = IndexPath>) -> Self {
        if let Diff::Update { deletes, .. } = &mut self {
            deletes.extend(paths);
        }
        self
    }

    pub fn inserting(mut self, paths: impl IntoIterator<Item = IndexPath>) -> Self {
        if let Diff::Update { inserts, .. } = &mut self {
            inserts.extend(paths);
        }
        self
    }

    pub fn updating(mut self, paths: impl IntoIterator<Item = IndexPath>) -> Self {
        if let Diff::Update { updates, .. } = &mut self {
            updates.extend(paths);
        }
        self
    }

    pub fn moving(mut self, from: IndexPath, to: IndexPath) -> Self {
        if let Diff::Update { moves, .. } = &mut self {
            moves.push(Move::new(from, to));
        }
        self
    }

    pub fn is_reload(&self) -> bool {
        matches!(self, Diff::Reload(_))
    }

    pub fn data_source(&self) -> &D {
        match self {
            Diff::Reload(data_source) | Diff::Update { data_source, .. } => data_source,
        }
    }

    pub fn into_data_source(self) -> D {
        match self {
            Diff::Reload(data_source) | Diff::Update { data_source, .. } => data_source,
        }
    }

    /// Number of positions an update names. Zero for a reload.
    pub fn change_count(&self) -> usize {
        match self {
            Diff::Reload(_) => 0,
            Diff::Update {
                deletes,
                inserts,
                updates,
                moves,
                ..
            } => deletes.len() + inserts.len() + updates.len() + moves.len(),
        }
    }
}

impl<D: SectionCounts> Diff<D> {
    /// Checks the positional rules a producer must follow, against the
    /// snapshot the diff is applied on top of. `None` stands for a view that
    /// has never been given data.
    ///
    /// A reload always passes.
    pub fn check_contract<S: SectionCounts>(&self, old: Option<&S>) -> Result<(), DiffError> {
        let Diff::Update {
            data_source,
            deletes,
            inserts,
            updates,
            moves,
        } = self
        else {
            return Ok(());
        };
        let old: &dyn SectionCounts = match old {
            Some(old) => old,
            None => &EmptySource,
        };

        for (list, paths) in [("deletes", deletes), ("inserts", inserts), ("updates", updates)] {
            for path in paths {
                check_depth(list, path)?;
            }
        }
        for m in moves {
            check_depth("moves", &m.from)?;
            check_depth("moves", &m.to)?;
            if m.from.depth() != m.to.depth() {
                return Err(DiffError::MixedDepthMove {
                    from: m.from.clone(),
                    to: m.to.clone(),
                });
            }
        }

        let deleted: HashSet<&IndexPath> = deletes.iter().collect();
        if let Some(path) = updates.iter().find(|path| deleted.contains(path)) {
            return Err(DiffError::DeletedAndUpdated(path.clone()));
        }

        let old_positions = deletes
            .iter()
            .map(|p| ("deletes", p))
            .chain(moves.iter().map(|m| ("moves", &m.from)));
        check_space(old_positions, old, "old")?;

        let new_positions = inserts
            .iter()
            .map(|p| ("inserts", p))
            .chain(updates.iter().map(|p| ("updates", p)))
            .chain(moves.iter().map(|m| ("moves", &m.to)));
        check_space(new_positions, data_source, "new")?;

        Ok(())
    }
}

/// Every position of one index space must be named once and exist in that
/// space's snapshot.
fn check_space<'a>(
    positions: impl Iterator<Item = (&'static str, &'a IndexPath)>,
    snapshot: &dyn SectionCounts,
    name: &'static str,
) -> Result<(), DiffError> {
    let mut seen: HashMap<&IndexPath, &'static str> = HashMap::new();
    for (list, path) in positions {
        if let Some(first) = seen.insert(path, list) {
            return Err(if first == list {
                DiffError::Duplicate {
                    list,
                    path: path.clone(),
                }
            } else {
                DiffError::Overlap {
                    path: path.clone(),
                    first,
                    second: list,
                    snapshot: name,
                }
            });
        }
        if !snapshot.contains_position(path) {
            return Err(DiffError::OutOfRange {
                list,
                path: path.clone(),
                snapshot: name,
            });
        }
    }
    Ok(())
}

fn check_depth(list: &'static str, path: &IndexPath) -> Result<(), DiffError> {
    match path.depth() {
        1 | 2 => Ok(()),
        depth => Err(DiffError::UnsupportedDepth {
            list,
            path: path.clone(),
            depth,
        }),
    }
}

impl<D: Default> Default for Diff<D> {
    fn default() -> Self {
        Diff::Reload(D::default())
    }
}

/// A positional rule broken by a [`Diff::Update`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    #[error("{list} names {path} more than once")]
    Duplicate { list: &'static str, path: IndexPath },
    #[error("{path} is named by both {first} and {second} in the {snapshot} snapshot")]
    Overlap {
        path: IndexPath,
        first: &'static str,
        second: &'static str,
        snapshot: &'static str,
    },
    #[error("{0} is both deleted and updated")]
    DeletedAndUpdated(IndexPath),
    #[error("{list} position {path} has unsupported depth {depth}")]
    UnsupportedDepth {
        list: &'static str,
        path: IndexPath,
        depth: usize,
    },
    #[error("move from {from} to {to} changes depth")]
    MixedDepthMove { from: IndexPath, to: IndexPath },
    #[error("{list} position {path} is out of range in the {snapshot} snapshot")]
    OutOfRange {
        list: &'static str,
        path: IndexPath,
        snapshot: &'static str,
    },
}

// ── Conversion ────────────────────────────────────────────────────────────

/// Anything a binder can take in place of a [`Diff`]. A bare data source
/// converts into a reload.
pub trait DiffConvertible {
    type DataSource;

    fn from_data_source(data_source: Self::DataSource) -> Self;

    fn into_diff(self) -> Diff<Self::DataSource>;
}

impl<D> DiffConvertible for Diff<D> {
    type DataSource = D;

    fn from_data_source(data_source: D) -> Self {
        Diff::Reload(data_source)
    }

    fn into_diff(self) -> Diff<D> {
        self
    }
}

impl<T> DiffConvertible for Vec<T> {
    type DataSource = Vec<T>;

    fn from_data_source(data_source: Vec<T>) -> Self {
        data_source
    }

    fn into_diff(self) -> Diff<Vec<T>> {
        Diff::Reload(self)
    }
}

impl<V> DiffConvertible for TreeArray<V> {
    type DataSource = TreeArray<V>;

    fn from_data_source(data_source: TreeArray<V>) -> Self {
        data_source
    }

    fn into_diff(self) -> Diff<TreeArray<V>> {
        Diff::Reload(self)
    }
}
