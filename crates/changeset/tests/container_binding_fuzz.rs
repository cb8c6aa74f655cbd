//! Seeded scenarios wiring a changeset container to a binder and a view
//! that checks its own counts at the end of every batch.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use changeset::{
    Changeset, ChangesetContainer, CollectionBinder, Diff, Operation, TreeArray,
};
use changeset_random::{
    random_operation, random_sectioned_tree, random_tree_operation, Fuzzer, OperationOdds,
};
use common::{counts, ShadowView};

type TreeBinder = CollectionBinder<TreeArray<i64>, ShadowView>;
type FlatBinder = CollectionBinder<Vec<i64>, ShadowView>;

fn forward_tree_changes(
    container: &mut ChangesetContainer<TreeArray<i64>>,
    binder: &Rc<RefCell<TreeBinder>>,
) {
    let binder = Rc::clone(binder);
    container.on_change(move |changeset: &Changeset<TreeArray<i64>>| {
        let data_source = changeset.collection().clone();
        let mut binder = binder.borrow_mut();
        match changeset.any_diff().as_slice() {
            [operation] => binder.apply(Diff::from_operation(data_source, operation.clone())),
            _ => binder.apply(data_source),
        }
    });
}

#[test]
fn test_tree_operations_keep_view_in_sync() {
    for seed in 0..16u64 {
        let mut fuzzer = Fuzzer::from_u64(seed);
        let odds = OperationOdds::default();
        let initial = random_sectioned_tree(&mut fuzzer, 5, 5, |f| f.random_int(0, 99));

        let view = Rc::new(RefCell::new(ShadowView::default()));
        let binder = Rc::new(RefCell::new(TreeBinder::new()));
        binder.borrow_mut().bind(&view);
        binder.borrow_mut().apply(initial.clone());

        let mut container = ChangesetContainer::new(initial);
        forward_tree_changes(&mut container, &binder);

        for _ in 0..200 {
            let operation =
                random_tree_operation(&mut fuzzer, container.collection(), &odds, |f| {
                    f.random_int(0, 99)
                });
            container.apply(operation);
        }

        let view = view.borrow();
        assert_eq!(view.sections, counts(container.collection()), "seed {seed}");
        assert_eq!(view.batches, 200, "seed {seed}");
        assert_eq!(view.reloads, 1, "seed {seed}");
        assert_eq!(binder.borrow().data_source(), Some(container.collection()));
    }
}

#[test]
fn test_batched_changes_reload_the_view() {
    let mut fuzzer = Fuzzer::from_u64(0xba7c4);
    let odds = OperationOdds::default();
    let initial = random_sectioned_tree(&mut fuzzer, 3, 3, |f| f.random_int(0, 9));

    let view = Rc::new(RefCell::new(ShadowView::default()));
    let binder = Rc::new(RefCell::new(TreeBinder::new()));
    binder.borrow_mut().bind(&view);
    binder.borrow_mut().apply(initial.clone());

    let mut container = ChangesetContainer::new(initial);
    forward_tree_changes(&mut container, &binder);

    for _ in 0..20 {
        container.batch_update(|batch| {
            for _ in 0..3 {
                let operation =
                    random_tree_operation(&mut fuzzer, batch.collection(), &odds, |f| {
                        f.random_int(0, 9)
                    });
                batch.apply(operation);
            }
        });
    }

    let view = view.borrow();
    assert_eq!(view.reloads, 21);
    assert_eq!(view.batches, 0);
    assert_eq!(view.sections, counts(container.collection()));
}

#[test]
fn test_flat_operations_keep_view_in_sync() {
    let mut fuzzer = Fuzzer::from_u64(7);
    let odds = OperationOdds::default();

    let view = Rc::new(RefCell::new(ShadowView::default()));
    let binder = Rc::new(RefCell::new(FlatBinder::new()));
    binder.borrow_mut().bind(&view);
    binder.borrow_mut().apply(Vec::new());

    let mut container = ChangesetContainer::new(Vec::new());
    let forward = Rc::clone(&binder);
    container.on_change(move |changeset: &Changeset<Vec<i64>>| {
        let data_source = changeset.collection().clone();
        for operation in changeset.any_diff() {
            forward
                .borrow_mut()
                .apply(Diff::from_flat_operation(data_source.clone(), operation));
        }
    });

    for _ in 0..300 {
        let len = container.collection().len();
        let operation: Operation<i64, usize> =
            random_operation(&mut fuzzer, len, &odds, |f| f.random_int(0, 999));
        container.apply(operation);
    }

    assert_eq!(view.borrow().sections, vec![container.collection().len()]);
    assert_eq!(binder.borrow().data_source(), Some(container.collection()));
}

#[test]
fn test_dropping_the_view_mid_stream() {
    let mut fuzzer = Fuzzer::from_u64(11);
    let odds = OperationOdds::default();
    let initial = random_sectioned_tree(&mut fuzzer, 3, 3, |f| f.random_int(0, 9));

    let view = Rc::new(RefCell::new(ShadowView::default()));
    let binder = Rc::new(RefCell::new(TreeBinder::new()));
    binder.borrow_mut().bind(&view);
    binder.borrow_mut().apply(initial.clone());

    let mut container = ChangesetContainer::new(initial.clone());
    forward_tree_changes(&mut container, &binder);
    drop(view);

    for _ in 0..50 {
        let operation = random_tree_operation(&mut fuzzer, container.collection(), &odds, |f| {
            f.random_int(0, 9)
        });
        container.apply(operation);
    }

    let binder = binder.borrow();
    assert!(!binder.is_bound());
    assert_eq!(binder.data_source(), Some(&initial));
}
