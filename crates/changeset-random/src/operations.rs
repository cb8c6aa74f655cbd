//! Random operations that are valid for the collection they target.
//!
//! Every generator looks at the current shape of the collection, so a
//! sequence produced by applying each operation before drawing the next one
//! is a correct changeset from the initial collection to the final one.

use changeset_core::{ApplyOperation, IndexPath, Operation, TreeArray, TreeCollection, TreeNode};

use crate::fuzzer::Fuzzer;

/// Relative odds of each operation kind.
#[derive(Debug, Clone)]
pub struct OperationOdds {
    pub insert: u32,
    pub delete: u32,
    pub update: u32,
    pub moves: u32,
}

impl Default for OperationOdds {
    fn default() -> Self {
        Self {
            insert: 4,
            delete: 3,
            update: 2,
            moves: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Insert,
    Delete,
    Update,
    Move,
}

impl OperationOdds {
    fn total(&self) -> u32 {
        self.insert + self.delete + self.update + self.moves
    }

    fn pick(&self, fuzzer: &mut Fuzzer) -> Kind {
        let total = self.total();
        assert!(total > 0, "operation odds must not all be zero");
        let mut roll = fuzzer.random_index(total as usize) as u32;
        for (odds, kind) in [
            (self.insert, Kind::Insert),
            (self.delete, Kind::Delete),
            (self.update, Kind::Update),
            (self.moves, Kind::Move),
        ] {
            if roll < odds {
                return kind;
            }
            roll -= odds;
        }
        Kind::Move
    }
}

// ── Flat collections ──────────────────────────────────────────────────────

/// A random operation valid for a flat collection of `len` elements.
///
/// An empty collection always gets an insert.
pub fn random_operation<T, F>(
    fuzzer: &mut Fuzzer,
    len: usize,
    odds: &OperationOdds,
    mut element: F,
) -> Operation<T, usize>
where
    F: FnMut(&mut Fuzzer) -> T,
{
    if len == 0 {
        return Operation::insert(element(fuzzer), 0);
    }
    match odds.pick(fuzzer) {
        Kind::Insert => {
            let at = fuzzer.random_index(len + 1);
            Operation::insert(element(fuzzer), at)
        }
        Kind::Delete => Operation::delete(fuzzer.random_index(len)),
        Kind::Update => {
            let at = fuzzer.random_index(len);
            Operation::update(at, element(fuzzer))
        }
        Kind::Move => {
            let from = fuzzer.random_index(len);
            let to = fuzzer.random_index(len);
            Operation::moving(from, to)
        }
    }
}

/// A random changeset of `steps` operations starting from `initial`.
///
/// Returns the operations and the collection they produce.
pub fn random_script<T, F>(
    fuzzer: &mut Fuzzer,
    initial: &[T],
    steps: usize,
    odds: &OperationOdds,
    mut element: F,
) -> (Vec<Operation<T, usize>>, Vec<T>)
where
    T: Clone,
    F: FnMut(&mut Fuzzer) -> T,
{
    let mut current = initial.to_vec();
    let mut operations = Vec::with_capacity(steps);
    for _ in 0..steps {
        let operation = random_operation(fuzzer, current.len(), odds, &mut element);
        current.apply(operation.clone());
        operations.push(operation);
    }
    (operations, current)
}

// ── Two-level trees ───────────────────────────────────────────────────────

/// A sectioned tree: up to `max_sections` top-level nodes, each with up to
/// `max_items` leaf children.
pub fn random_sectioned_tree<V, F>(
    fuzzer: &mut Fuzzer,
    max_sections: usize,
    max_items: usize,
    mut value: F,
) -> TreeArray<V>
where
    F: FnMut(&mut Fuzzer) -> V,
{
    let sections = fuzzer.random_index(max_sections + 1);
    (0..sections)
        .map(|_| random_section(fuzzer, max_items, &mut value))
        .collect()
}

fn random_section<V, F>(fuzzer: &mut Fuzzer, max_items: usize, value: &mut F) -> TreeNode<V>
where
    F: FnMut(&mut Fuzzer) -> V,
{
    let section_value = value(fuzzer);
    let items = fuzzer.random_index(max_items + 1);
    let children = (0..items).map(|_| TreeNode::leaf(value(fuzzer))).collect();
    TreeNode::new(section_value, children)
}

/// A random operation on a two-level tree: roughly a third of the time on a
/// section, otherwise on an item. Inserted sections carry a few items.
pub fn random_tree_operation<V, F>(
    fuzzer: &mut Fuzzer,
    tree: &TreeArray<V>,
    odds: &OperationOdds,
    mut value: F,
) -> Operation<TreeNode<V>, IndexPath>
where
    F: FnMut(&mut Fuzzer) -> V,
{
    let sections = tree.len();
    if sections == 0 {
        return Operation::insert(random_section(fuzzer, 3, &mut value), IndexPath::section(0));
    }
    let kind = odds.pick(fuzzer);
    if fuzzer.random_bool(0.3) {
        return match kind {
            Kind::Insert => {
                let at = fuzzer.random_index(sections + 1);
                Operation::insert(random_section(fuzzer, 3, &mut value), IndexPath::section(at))
            }
            Kind::Delete => Operation::delete(IndexPath::section(fuzzer.random_index(sections))),
            Kind::Update => {
                let at = fuzzer.random_index(sections);
                Operation::update(IndexPath::section(at), random_section(fuzzer, 3, &mut value))
            }
            Kind::Move => {
                let from = fuzzer.random_index(sections);
                let to = fuzzer.random_index(sections);
                Operation::moving(IndexPath::section(from), IndexPath::section(to))
            }
        };
    }

    let item_count = |s: usize| tree.children()[s].children.len();
    let populated: Vec<usize> = (0..sections).filter(|&s| item_count(s) > 0).collect();
    if kind == Kind::Insert || populated.is_empty() {
        let s = fuzzer.random_index(sections);
        let at = fuzzer.random_index(item_count(s) + 1);
        return Operation::insert(TreeNode::leaf(value(fuzzer)), IndexPath::item(s, at));
    }

    let s = *fuzzer.pick(&populated);
    let i = fuzzer.random_index(item_count(s));
    match kind {
        Kind::Delete => Operation::delete(IndexPath::item(s, i)),
        Kind::Update => Operation::update(IndexPath::item(s, i), TreeNode::leaf(value(fuzzer))),
        _ => {
            let t = fuzzer.random_index(sections);
            let dest_len = item_count(t) - usize::from(t == s);
            let j = fuzzer.random_index(dest_len + 1);
            Operation::moving(IndexPath::item(s, i), IndexPath::item(t, j))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_gets_insert() {
        let mut fuzzer = Fuzzer::from_u64(1);
        for _ in 0..20 {
            let op = random_operation(&mut fuzzer, 0, &OperationOdds::default(), |f| f.random_int(0, 9));
            assert_eq!(op.name(), "insert");
        }
    }

    #[test]
    fn test_script_replays_to_final_collection() {
        let mut fuzzer = Fuzzer::from_u64(0x5eed);
        let initial = vec![1, 2, 3];
        let (operations, last) =
            random_script(&mut fuzzer, &initial, 50, &OperationOdds::default(), |f| f.random_int(0, 99));
        let mut replay = initial.clone();
        replay.apply_all(operations);
        assert_eq!(replay, last);
    }

    #[test]
    fn test_tree_operations_stay_two_levels() {
        let mut fuzzer = Fuzzer::from_u64(99);
        let mut tree = random_sectioned_tree(&mut fuzzer, 4, 4, |f| f.random_int(0, 9));
        for _ in 0..200 {
            let op = random_tree_operation(&mut fuzzer, &tree, &OperationOdds::default(), |f| {
                f.random_int(0, 9)
            });
            tree.apply(op);
            assert!(tree.depth_first().all(|(path, _)| path.depth() <= 2));
        }
    }

    #[test]
    fn test_only_moves() {
        let odds = OperationOdds {
            insert: 0,
            delete: 0,
            update: 0,
            moves: 1,
        };
        let mut fuzzer = Fuzzer::from_u64(3);
        let op = random_operation(&mut fuzzer, 5, &odds, |_| 0);
        assert_eq!(op.name(), "move");
    }
}
