//! Binding a data source to a live view.
//!
//! [`CollectionBinder`] owns the current snapshot and holds only a weak
//! reference to the view, so the view's lifetime stays with whoever created
//! it. Each applied diff swaps the snapshot in first, then drives the view,
//! so any callback the view makes during the batch already sees the new
//! data.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use changeset_core::IndexPath;
use tracing::debug;

use crate::batch::BatchUpdate;
use crate::data_source::{SectionCounts, SectionedDataSource};
use crate::diff::{Diff, DiffConvertible};
use crate::view::SectionedView;

/// How a binder drives its view.
#[derive(Debug, Clone)]
pub struct BinderOptions {
    /// Drive positional updates as grouped edits. When `false`, every diff
    /// becomes a full reload.
    pub animated: bool,
}

impl Default for BinderOptions {
    fn default() -> Self {
        Self { animated: true }
    }
}

/// Keeps a view in step with a sequence of data source snapshots.
pub struct CollectionBinder<D, V: ?Sized> {
    data_source: Option<D>,
    view: Option<Weak<RefCell<V>>>,
    options: BinderOptions,
}

impl<D, V: ?Sized> Default for CollectionBinder<D, V> {
    fn default() -> Self {
        Self {
            data_source: None,
            view: None,
            options: BinderOptions::default(),
        }
    }
}

impl<D, V> CollectionBinder<D, V>
where
    D: SectionedDataSource,
    V: SectionedView + ?Sized,
{
    /// An unbound binder with no snapshot and animated updates.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BinderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &BinderOptions {
        &self.options
    }

    /// Points the binder at `view`, replacing any earlier binding. The
    /// binder does not keep the view alive.
    pub fn bind(&mut self, view: &Rc<RefCell<V>>) {
        self.view = Some(Rc::downgrade(view));
    }

    /// True while the bound view is still alive.
    pub fn is_bound(&self) -> bool {
        self.view.as_ref().is_some_and(|view| view.strong_count() > 0)
    }

    /// The current snapshot, if any diff has been applied yet.
    pub fn data_source(&self) -> Option<&D> {
        self.data_source.as_ref()
    }

    /// The item at `path` in the current snapshot. `None` before the first
    /// diff, or when `path` is not an existing depth-2 position.
    pub fn item(&self, path: &IndexPath) -> Option<&D::Item> {
        self.data_source
            .as_ref()
            .filter(|source| path.depth() == 2 && source.contains_position(path))
            .map(|source| source.item(path))
    }

    /// Applies a diff, or a bare data source as a reload.
    ///
    /// Does nothing if the view has been dropped or was never bound. The
    /// view is borrowed mutably for the whole call, so a view that applies
    /// another diff from inside one of its callbacks panics.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if an update breaks the positional rules
    /// checked by [`Diff::check_contract`].
    pub fn apply<T>(&mut self, diff: T)
    where
        T: DiffConvertible<DataSource = D>,
    {
        let diff = diff.into_diff();
        let Some(view) = self.view.as_ref().and_then(Weak::upgrade) else {
            debug!("no live view; dropping diff");
            return;
        };
        let mut view = view.borrow_mut();

        if cfg!(debug_assertions) {
            if let Err(error) = diff.check_contract(self.data_source.as_ref()) {
                panic!("invalid diff: {error}");
            }
        }

        match diff {
            Diff::Reload(data_source) => {
                self.data_source = Some(data_source);
                debug!(sections = self.number_of_sections(), "reloading view");
                view.reload_data(&*self);
            }
            Diff::Update {
                data_source,
                deletes,
                inserts,
                updates,
                moves,
            } => {
                let batch = BatchUpdate::classify(&deletes, &inserts, &updates, &moves);
                self.data_source = Some(data_source);
                if self.options.animated {
                    debug!(
                        deletes = deletes.len(),
                        inserts = inserts.len(),
                        updates = updates.len(),
                        moves = moves.len(),
                        "batch updating view"
                    );
                    view.begin_updates();
                    batch.dispatch(&mut *view);
                    view.end_updates(&*self);
                } else {
                    debug!(sections = self.number_of_sections(), "reloading view without animation");
                    view.reload_data(&*self);
                }
            }
        }

        // Settle the view's layout before returning to the caller.
        view.number_of_sections();
    }
}

/// Counts of the current snapshot; zero before the first diff.
impl<D: SectionCounts, V: ?Sized> SectionCounts for CollectionBinder<D, V> {
    fn number_of_sections(&self) -> usize {
        self.data_source.as_ref().map_or(0, D::number_of_sections)
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.data_source
            .as_ref()
            .map_or(0, |source| source.number_of_items(section))
    }
}
