//! Seeded random generation of collections and valid operation sequences,
//! for fuzzing changeset consumers.

pub mod fuzzer;
pub mod operations;

pub use fuzzer::Fuzzer;
pub use operations::{
    random_operation, random_script, random_sectioned_tree, random_tree_operation, OperationOdds,
};
