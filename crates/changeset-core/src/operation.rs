//! Operation types.
//!
//! An [`Operation`] is one structural change to an ordered collection. It is
//! generic over the element type and over the index type: `usize` for flat
//! collections, [`IndexPath`](changeset_index_path::IndexPath) for trees.
//!
//! # Index spaces
//!
//! `Insert.at`, `Update.at` and `Move.to` are positions in the collection
//! *after* the operation. `Delete.at` and `Move.from` are positions *before*
//! it. A move is therefore equivalent to deleting at `from` and then
//! inserting the removed element at `to` in the shortened collection.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Operation ─────────────────────────────────────────────────────────────

/// A change that carries its payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation<E, I> {
    Insert { element: E, at: I },
    Delete { at: I },
    Update { at: I, element: E },
    Move { from: I, to: I },
}

impl<E, I> Operation<E, I> {
    /// Inserts `element` so that it ends up at `at`.
    pub fn insert(element: E, at: I) -> Self {
        Operation::Insert { element, at }
    }

    /// Removes the element at `at`.
    pub fn delete(at: I) -> Self {
        Operation::Delete { at }
    }

    /// Replaces the element at `at` with `element`.
    pub fn update(at: I, element: E) -> Self {
        Operation::Update { at, element }
    }

    /// Moves the element at `from` so that it ends up at `to`.
    pub fn moving(from: I, to: I) -> Self {
        Operation::Move { from, to }
    }

    /// Returns the operation name.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Insert { .. } => "insert",
            Operation::Delete { .. } => "delete",
            Operation::Update { .. } => "update",
            Operation::Move { .. } => "move",
        }
    }

    /// The payload, for inserts and updates.
    pub fn element(&self) -> Option<&E> {
        match self {
            Operation::Insert { element, .. } | Operation::Update { element, .. } => Some(element),
            Operation::Delete { .. } | Operation::Move { .. } => None,
        }
    }

    /// Converts the payload, keeping the positions.
    pub fn map_element<F, T>(self, f: F) -> Operation<T, I>
    where
        F: FnOnce(E) -> T,
    {
        match self {
            Operation::Insert { element, at } => Operation::Insert { element: f(element), at },
            Operation::Delete { at } => Operation::Delete { at },
            Operation::Update { at, element } => Operation::Update { at, element: f(element) },
            Operation::Move { from, to } => Operation::Move { from, to },
        }
    }

    /// Drops the payload, keeping the variant and every position.
    pub fn into_any_operation(self) -> AnyOperation<I> {
        match self {
            Operation::Insert { at, .. } => AnyOperation::Insert { at },
            Operation::Delete { at } => AnyOperation::Delete { at },
            Operation::Update { at, .. } => AnyOperation::Update { at },
            Operation::Move { from, to } => AnyOperation::Move { from, to },
        }
    }
}

impl<E, I: Clone> Operation<E, I> {
    /// Payload-erased view of this operation.
    pub fn as_any_operation(&self) -> AnyOperation<I> {
        match self {
            Operation::Insert { at, .. } => AnyOperation::Insert { at: at.clone() },
            Operation::Delete { at } => AnyOperation::Delete { at: at.clone() },
            Operation::Update { at, .. } => AnyOperation::Update { at: at.clone() },
            Operation::Move { from, to } => AnyOperation::Move {
                from: from.clone(),
                to: to.clone(),
            },
        }
    }
}

impl<E: fmt::Debug, I: fmt::Debug> fmt::Display for Operation<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Insert { element, at } => write!(f, "I({element:?}, at: {at:?})"),
            Operation::Delete { at } => write!(f, "D(at: {at:?})"),
            Operation::Update { at, element } => write!(f, "U(at: {at:?}, with: {element:?})"),
            Operation::Move { from, to } => write!(f, "M(from: {from:?}, to: {to:?})"),
        }
    }
}

// ── AnyOperation ──────────────────────────────────────────────────────────

/// A change reduced to its shape: variant and positions, no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AnyOperation<I> {
    Insert { at: I },
    Delete { at: I },
    Update { at: I },
    Move { from: I, to: I },
}

impl<I> AnyOperation<I> {
    pub fn name(&self) -> &'static str {
        match self {
            AnyOperation::Insert { .. } => "insert",
            AnyOperation::Delete { .. } => "delete",
            AnyOperation::Update { .. } => "update",
            AnyOperation::Move { .. } => "move",
        }
    }
}

impl<I: Clone> AnyOperation<I> {
    /// Projection of an already erased operation is the operation itself.
    pub fn as_any_operation(&self) -> AnyOperation<I> {
        self.clone()
    }
}

impl<I: fmt::Debug> fmt::Display for AnyOperation<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyOperation::Insert { at } => write!(f, "I(at: {at:?})"),
            AnyOperation::Delete { at } => write!(f, "D(at: {at:?})"),
            AnyOperation::Update { at } => write!(f, "U(at: {at:?})"),
            AnyOperation::Move { from, to } => write!(f, "M(from: {from:?}, to: {to:?})"),
        }
    }
}

impl<E, I> From<Operation<E, I>> for AnyOperation<I> {
    fn from(operation: Operation<E, I>) -> Self {
        operation.into_any_operation()
    }
}
