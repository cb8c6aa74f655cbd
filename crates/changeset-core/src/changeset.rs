//! A collection snapshot paired with the operations that produced it.

use std::fmt;

use changeset_index_path::IndexPath;

use crate::apply::ApplyOperation;
use crate::operation::{AnyOperation, Operation};
use crate::tree::TreeNode;

/// Operation type accepted by the collection `C`.
pub type OperationOf<C> = Operation<<C as ApplyOperation>::Element, <C as ApplyOperation>::Index>;

/// Operation on a flat collection of `T`.
pub type CollectionOperation<T> = Operation<T, usize>;

/// Operation on a tree whose nodes hold `V`.
pub type TreeOperation<V> = Operation<TreeNode<V>, IndexPath>;

/// The result of one structural transition.
///
/// `diff` lists, in application order, the operations that turned the
/// previous collection into `collection`. An empty diff after a
/// [`replace`](crate::ChangesetContainer::replace) means the collection was
/// swapped wholesale and observers should reload.
pub struct Changeset<C: ApplyOperation> {
    collection: C,
    diff: Vec<OperationOf<C>>,
}

impl<C: ApplyOperation> Changeset<C> {
    /// Pairs a collection with the operations that produced it.
    pub fn new(collection: C, diff: Vec<OperationOf<C>>) -> Self {
        Self { collection, diff }
    }

    /// The collection after the diff.
    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// The operations, in application order.
    pub fn diff(&self) -> &[OperationOf<C>] {
        &self.diff
    }

    /// Splits into the collection and its diff.
    pub fn into_parts(self) -> (C, Vec<OperationOf<C>>) {
        (self.collection, self.diff)
    }

    /// The diff with payloads erased.
    pub fn any_diff(&self) -> Vec<AnyOperation<C::Index>>
    where
        C::Index: Clone,
    {
        self.diff.iter().map(Operation::as_any_operation).collect()
    }

    pub(crate) fn collection_mut(&mut self) -> &mut C {
        &mut self.collection
    }

    pub(crate) fn set_diff(&mut self, diff: Vec<OperationOf<C>>) {
        self.diff = diff;
    }
}

impl<C> Clone for Changeset<C>
where
    C: ApplyOperation + Clone,
    C::Element: Clone,
    C::Index: Clone,
{
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            diff: self.diff.clone(),
        }
    }
}

impl<C> fmt::Debug for Changeset<C>
where
    C: ApplyOperation + fmt::Debug,
    C::Element: fmt::Debug,
    C::Index: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Changeset")
            .field("collection", &self.collection)
            .field("diff", &self.diff)
            .finish()
    }
}

impl<C> PartialEq for Changeset<C>
where
    C: ApplyOperation + PartialEq,
    C::Element: PartialEq,
    C::Index: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.collection == other.collection && self.diff == other.diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_diff() {
        let changeset = Changeset::new(vec![2, 1], vec![Operation::moving(0, 1)]);
        assert_eq!(changeset.any_diff(), vec![AnyOperation::Move { from: 0, to: 1 }]);
        let (collection, diff) = changeset.into_parts();
        assert_eq!(collection, [2, 1]);
        assert_eq!(diff.len(), 1);
    }
}
