// ── Generic entity collection ──
//
// Ordered, whole-collection storage behind a `watch` channel. The
// server's order is the display order, so the collection is replaced
// wholesale on every refresh and never patched.

use std::sync::Arc;

use tokio::sync::watch;

/// An ordered collection for a single entity type.
pub(crate) struct EntityCollection<T: Clone + Send + Sync + 'static> {
    /// Full snapshot in server order.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Clone + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self { snapshot }
    }

    /// Swap in a freshly fetched collection.
    pub(crate) fn replace(&self, items: Vec<T>) {
        let values: Vec<Arc<T>> = items.into_iter().map(Arc::new).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    /// First entity matching `pred`.
    pub(crate) fn find(&self, pred: impl Fn(&T) -> bool) -> Option<Arc<T>> {
        self.snapshot
            .borrow()
            .iter()
            .find(|item| pred(item))
            .map(Arc::clone)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }
}
