//! Observable holder of a changeset.
//!
//! [`ChangesetContainer`] is the only way to mutate the collection it owns.
//! Every mutation goes through an operation, and every listener is told
//! about it exactly once, so an observer that mirrors the collection by
//! replaying the notified operations never loses track of indices.

use std::collections::BTreeMap;

use tracing::trace;

use crate::apply::{ApplyOperation, OrderedCollection};
use crate::changeset::{Changeset, OperationOf};
use crate::operation::Operation;

pub type ListenerId = u64;

type Listener<C> = Box<dyn FnMut(&Changeset<C>)>;

/// An observable collection that reports every change as a [`Changeset`].
pub struct ChangesetContainer<C: ApplyOperation> {
    changeset: Changeset<C>,
    next_listener_id: ListenerId,
    listeners: BTreeMap<ListenerId, Listener<C>>,
}

impl<C: ApplyOperation> ChangesetContainer<C> {
    /// A container holding `collection` with an empty diff.
    pub fn new(collection: C) -> Self {
        Self {
            changeset: Changeset::new(collection, Vec::new()),
            next_listener_id: 1,
            listeners: BTreeMap::new(),
        }
    }

    /// The current collection.
    pub fn collection(&self) -> &C {
        self.changeset.collection()
    }

    /// The latest changeset: current collection and the last recorded diff.
    pub fn changeset(&self) -> &Changeset<C> {
        &self.changeset
    }

    pub fn into_collection(self) -> C {
        self.changeset.into_parts().0
    }

    /// Registers a listener called after every emitted change.
    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&Changeset<C>) + 'static,
    {
        let id = self.next_listener_id;
        self.next_listener_id = self.next_listener_id.saturating_add(1);
        self.listeners.insert(id, Box::new(listener));
        id
    }

    /// Unregisters a listener. Returns `false` for an unknown id.
    pub fn off_change(&mut self, listener_id: ListenerId) -> bool {
        self.listeners.remove(&listener_id).is_some()
    }

    /// Mutates the collection with `update`, which must return the
    /// operations that describe exactly what it did.
    pub fn descriptive_update<F>(&mut self, update: F)
    where
        F: FnOnce(&mut C) -> Vec<OperationOf<C>>,
    {
        let diff = update(self.changeset.collection_mut());
        self.changeset.set_diff(diff);
        self.emit_change();
    }

    /// Applies one operation and notifies listeners with it.
    pub fn apply(&mut self, operation: OperationOf<C>)
    where
        C::Element: Clone,
        C::Index: Clone,
    {
        self.descriptive_update(|collection| {
            collection.apply(operation.clone());
            vec![operation]
        });
    }

    /// Applies several operations and notifies listeners once with all of
    /// them. Nothing is emitted if the batch records no operation.
    pub fn batch_update<F>(&mut self, update: F)
    where
        F: FnOnce(&mut Batch<'_, C>),
        C::Element: Clone,
        C::Index: Clone,
    {
        let mut batch = Batch {
            collection: self.changeset.collection_mut(),
            operations: Vec::new(),
        };
        update(&mut batch);
        let operations = batch.operations;
        if operations.is_empty() {
            return;
        }
        self.changeset.set_diff(operations);
        self.emit_change();
    }

    /// Swaps the whole collection. Listeners receive an empty diff.
    pub fn replace(&mut self, collection: C) {
        self.changeset = Changeset::new(collection, Vec::new());
        self.emit_change();
    }

    pub fn insert(&mut self, element: C::Element, at: C::Index)
    where
        C::Element: Clone,
        C::Index: Clone,
    {
        self.apply(Operation::insert(element, at));
    }

    pub fn remove(&mut self, at: C::Index)
    where
        C::Element: Clone,
        C::Index: Clone,
    {
        self.apply(Operation::delete(at));
    }

    pub fn update(&mut self, at: C::Index, element: C::Element)
    where
        C::Element: Clone,
        C::Index: Clone,
    {
        self.apply(Operation::update(at, element));
    }

    pub fn move_element(&mut self, from: C::Index, to: C::Index)
    where
        C::Element: Clone,
        C::Index: Clone,
    {
        self.apply(Operation::moving(from, to));
    }

    fn emit_change(&mut self) {
        trace!(
            operations = self.changeset.diff().len(),
            listeners = self.listeners.len(),
            "changeset updated"
        );
        for listener in self.listeners.values_mut() {
            listener(&self.changeset);
        }
    }
}

impl<C> ChangesetContainer<C>
where
    C: ApplyOperation<Index = usize> + OrderedCollection<Element = <C as ApplyOperation>::Element>,
    <C as ApplyOperation>::Element: Clone,
{
    /// Inserts at the end.
    pub fn append(&mut self, element: <C as ApplyOperation>::Element) {
        let at = OrderedCollection::len(self.collection());
        self.insert(element, at);
    }

    /// Removes every element in one notification, deleting from the back so
    /// each recorded position is valid when replayed in order.
    pub fn remove_all(&mut self) {
        let len = OrderedCollection::len(self.collection());
        if len == 0 {
            return;
        }
        self.descriptive_update(|collection| {
            (0..len)
                .rev()
                .map(|at| {
                    collection.remove_at(at);
                    Operation::delete(at)
                })
                .collect()
        });
    }
}

/// Recording handle passed to [`ChangesetContainer::batch_update`].
pub struct Batch<'a, C: ApplyOperation> {
    collection: &'a mut C,
    operations: Vec<OperationOf<C>>,
}

impl<C> Batch<'_, C>
where
    C: ApplyOperation,
    C::Element: Clone,
    C::Index: Clone,
{
    pub fn collection(&self) -> &C {
        self.collection
    }

    /// Applies `operation` now and records it for the batch notification.
    pub fn apply(&mut self, operation: OperationOf<C>) {
        self.collection.apply(operation.clone());
        self.operations.push(operation);
    }

    pub fn recorded(&self) -> &[OperationOf<C>] {
        &self.operations
    }
}
