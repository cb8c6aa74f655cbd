//! Hierarchical index paths.
//!
//! An [`IndexPath`] locates a node in a tree or an element in a sectioned
//! collection: depth 1 is a section, depth 2 an item within a section.
//!
//! # Example
//!
//! ```
//! use changeset_index_path::IndexPath;
//!
//! let path = IndexPath::item(1, 3);
//! assert_eq!(path.section_index(), Some(1));
//! assert_eq!(path.to_string(), "/1/3");
//! ```

pub mod types;
pub use types::IndexPath;
