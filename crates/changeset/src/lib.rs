//! Changesets bound to live views.
//!
//! A producer hands a [`CollectionBinder`] either a whole new data source or
//! a [`Diff`] naming the positions that changed. The binder swaps its
//! snapshot and drives a [`SectionedView`] with grouped section and item
//! edits in a fixed order.
//!
//! The operation model and the observable container live in
//! `changeset-core` and are re-exported here.

pub mod batch;
pub mod binder;
pub mod data_source;
pub mod diff;
pub mod view;

pub use batch::{BatchEdit, BatchMove, BatchUpdate, Position};
pub use binder::{BinderOptions, CollectionBinder};
pub use data_source::{EmptySource, SectionCounts, SectionedDataSource};
pub use diff::{Diff, DiffConvertible, DiffError, Move};
pub use view::SectionedView;

pub use changeset_core::{
    apply_all_to_collection, apply_to_collection, apply_to_tree, AnyOperation, ApplyOperation,
    Batch, Changeset, ChangesetContainer, CollectionOperation, ListenerId, Operation,
    OperationOf, OrderedCollection, TreeArray, TreeCollection, TreeNode, TreeOperation,
};
pub use changeset_index_path::IndexPath;
