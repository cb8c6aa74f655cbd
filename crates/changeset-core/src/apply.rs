//! Applying operations to collections.
//!
//! The flat applicator works on anything implementing [`OrderedCollection`];
//! the tree applicator lives in [`crate::tree`]. Both are reached through
//! [`ApplyOperation`], which picks the right one at compile time from the
//! collection type.
//!
//! Positions are trusted. An out-of-range index panics inside the
//! collection's own `insert`/`remove`; nothing here checks bounds first.

use std::collections::VecDeque;

use crate::operation::Operation;

/// A collection that can insert and remove elements at integer offsets.
pub trait OrderedCollection {
    type Element;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts before the element currently at `at`, or at the end when
    /// `at == len()`.
    fn insert_at(&mut self, element: Self::Element, at: usize);

    fn remove_at(&mut self, at: usize) -> Self::Element;
}

impl<T> OrderedCollection for Vec<T> {
    type Element = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn insert_at(&mut self, element: T, at: usize) {
        self.insert(at, element);
    }

    fn remove_at(&mut self, at: usize) -> T {
        self.remove(at)
    }
}

impl<T> OrderedCollection for VecDeque<T> {
    type Element = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn insert_at(&mut self, element: T, at: usize) {
        self.insert(at, element);
    }

    fn remove_at(&mut self, at: usize) -> T {
        match self.remove(at) {
            Some(element) => element,
            None => panic!("removal index (is {at}) should be < len (is {})", self.len()),
        }
    }
}

/// Applies one operation to a flat collection.
///
/// # Panics
///
/// Panics when a position is out of range for the collection at the moment
/// it is used.
pub fn apply_to_collection<C>(collection: &mut C, operation: Operation<C::Element, usize>)
where
    C: OrderedCollection + ?Sized,
{
    match operation {
        Operation::Insert { element, at } => collection.insert_at(element, at),
        Operation::Delete { at } => {
            collection.remove_at(at);
        }
        Operation::Update { at, element } => {
            collection.remove_at(at);
            collection.insert_at(element, at);
        }
        Operation::Move { from, to } => {
            let element = collection.remove_at(from);
            collection.insert_at(element, to);
        }
    }
}

/// Applies every operation in order.
pub fn apply_all_to_collection<C, I>(collection: &mut C, operations: I)
where
    C: OrderedCollection + ?Sized,
    I: IntoIterator<Item = Operation<C::Element, usize>>,
{
    for operation in operations {
        apply_to_collection(collection, operation);
    }
}

// ── ApplyOperation ────────────────────────────────────────────────────────

/// A collection that knows how to apply its own operation type.
///
/// Flat collections use `usize` positions and their own element type; tree
/// collections use index paths and whole subtrees as elements.
pub trait ApplyOperation {
    type Element;
    type Index;

    fn apply(&mut self, operation: Operation<Self::Element, Self::Index>);

    fn apply_all<I>(&mut self, operations: I)
    where
        I: IntoIterator<Item = Operation<Self::Element, Self::Index>>,
    {
        for operation in operations {
            self.apply(operation);
        }
    }
}

impl<T> ApplyOperation for Vec<T> {
    type Element = T;
    type Index = usize;

    fn apply(&mut self, operation: Operation<T, usize>) {
        apply_to_collection(self, operation);
    }
}

impl<T> ApplyOperation for VecDeque<T> {
    type Element = T;
    type Index = usize;

    fn apply(&mut self, operation: Operation<T, usize>) {
        apply_to_collection(self, operation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete() {
        let mut v = vec![1, 2, 3, 4, 5, 6];
        v.apply(Operation::delete(2));
        assert_eq!(v, [1, 2, 4, 5, 6]);
    }

    #[test]
    fn test_insert() {
        let mut v = vec![1, 2, 3];
        v.apply(Operation::insert(9, 1));
        assert_eq!(v, [1, 9, 2, 3]);
    }

    #[test]
    fn test_insert_at_end() {
        let mut v = vec![1, 2, 3];
        v.apply(Operation::insert(4, 3));
        assert_eq!(v, [1, 2, 3, 4]);
    }

    #[test]
    fn test_move_uses_post_removal_space() {
        let mut v = vec![1, 2, 3, 4];
        v.apply(Operation::moving(0, 2));
        assert_eq!(v, [2, 3, 1, 4]);
    }

    #[test]
    fn test_move_backwards() {
        let mut v = vec![1, 2, 3, 4];
        v.apply(Operation::moving(3, 0));
        assert_eq!(v, [4, 1, 2, 3]);
    }

    #[test]
    fn test_update_in_place() {
        let mut v = vec!["a", "b", "c"];
        v.apply(Operation::update(1, "B"));
        assert_eq!(v, ["a", "B", "c"]);
    }

    #[test]
    fn test_deque_matches_vec() {
        let ops = vec![
            Operation::insert(0, 0),
            Operation::insert(5, 3),
            Operation::moving(1, 3),
            Operation::update(0, 7),
            Operation::delete(2),
        ];
        let mut v = vec![1, 2, 3];
        let mut d: VecDeque<i32> = VecDeque::from(vec![1, 2, 3]);
        v.apply_all(ops.clone());
        d.apply_all(ops);
        assert_eq!(v, Vec::from(d));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_delete_panics() {
        let mut v = vec![1];
        v.apply(Operation::delete(1));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_deque_delete_panics() {
        let mut d: VecDeque<i32> = VecDeque::new();
        d.apply(Operation::delete(0));
    }
}
