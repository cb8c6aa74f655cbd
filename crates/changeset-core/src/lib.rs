//! Core changeset primitives: operations, their application to flat and
//! tree-shaped collections, and the observable changeset container.

pub mod apply;
pub mod changeset;
pub mod container;
pub mod operation;
pub mod tree;

pub use apply::{apply_all_to_collection, apply_to_collection, ApplyOperation, OrderedCollection};
pub use changeset::{Changeset, CollectionOperation, OperationOf, TreeOperation};
pub use container::{Batch, ChangesetContainer, ListenerId};
pub use operation::{AnyOperation, Operation};
pub use tree::{apply_to_tree, DepthFirst, TreeArray, TreeCollection, TreeNode};

pub use changeset_index_path::IndexPath;
