//! Realtime mirrors - local, read-only copies of a listened query
//!
//! A mirror owns the listener task for one store query. Each snapshot is
//! applied incrementally: added and modified documents are re-mapped,
//! removed ones dropped, and every other entry is shared with the previous
//! view. The result is published through a `watch` channel.

use std::collections::HashMap;
use std::sync::Arc;

use huddle_core::{ChangeKind, Document, DomainError, Listener, ListenerRegistration, QuerySnapshot};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::services::ServiceResult;

/// One published version of a mirror
#[derive(Debug)]
pub struct MirrorView<T> {
    order: Vec<String>,
    entries: HashMap<String, Arc<T>>,
    synced: bool,
}

impl<T> Default for MirrorView<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
            synced: false,
        }
    }
}

impl<T> MirrorView<T> {
    /// True once the first snapshot has been applied
    #[inline]
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id).map(AsRef::as_ref)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries in query order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(AsRef::as_ref))
    }

    /// Ids in query order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Shared handle to an entry; unchanged entries keep the same allocation
    /// across versions
    pub fn entry(&self, id: &str) -> Option<Arc<T>> {
        self.entries.get(id).cloned()
    }

    /// Build the next version from a snapshot
    fn apply(&self, snapshot: &QuerySnapshot, map: fn(&Document) -> T) -> Self {
        let mut entries = self.entries.clone();

        for change in &snapshot.changes {
            let id = change.document.id();
            match change.kind {
                ChangeKind::Added | ChangeKind::Modified => {
                    entries.insert(id.to_string(), Arc::new(map(&change.document)));
                }
                ChangeKind::Removed => {
                    entries.remove(id);
                }
            }
        }

        let order: Vec<String> = snapshot.ids().map(String::from).collect();
        if entries.len() != order.len() {
            // A listener that skipped a delivery; rebuild from the full result set
            entries = snapshot
                .documents
                .iter()
                .map(|doc| {
                    let entry = self
                        .entries
                        .get(doc.id())
                        .filter(|_| !snapshot.changes.iter().any(|c| c.document.id() == doc.id()))
                        .cloned()
                        .unwrap_or_else(|| Arc::new(map(doc)));
                    (doc.id().to_string(), entry)
                })
                .collect();
        }

        Self {
            order,
            entries,
            synced: true,
        }
    }
}

impl<T: Clone> MirrorView<T> {
    /// Owned copies of every entry in query order
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// Live mirror of a store query
pub struct Mirror<T> {
    name: &'static str,
    view: watch::Receiver<Arc<MirrorView<T>>>,
    registration: Box<dyn ListenerRegistration>,
    task: JoinHandle<()>,
}

impl<T: Send + Sync + 'static> Mirror<T> {
    /// Start applying the listener's snapshots.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(name: &'static str, listener: Listener, map: fn(&Document) -> T) -> Self {
        let (mut snapshots, registration) = listener.into_parts();
        let (sender, view) = watch::channel(Arc::new(MirrorView::default()));

        let task = tokio::spawn(async move {
            while let Some(snapshot) = snapshots.recv().await {
                let next = sender.borrow().apply(&snapshot, map);
                debug!(
                    mirror = name,
                    entries = next.len(),
                    changes = snapshot.changes.len(),
                    "Mirror updated"
                );
                sender.send_replace(Arc::new(next));
            }
            debug!(mirror = name, "Mirror listener closed");
        });

        Self {
            name,
            view,
            registration,
            task,
        }
    }
}

impl<T> Mirror<T> {
    /// Current published version
    pub fn current(&self) -> Arc<MirrorView<T>> {
        Arc::clone(&self.view.borrow())
    }

    /// Observe future versions
    pub fn subscribe(&self) -> watch::Receiver<Arc<MirrorView<T>>> {
        self.view.clone()
    }

    /// Wait until a version satisfies `predicate`
    ///
    /// # Errors
    /// Returns `ListenerClosed` if the mirror is disposed first
    pub async fn wait_for<F>(&self, mut predicate: F) -> ServiceResult<Arc<MirrorView<T>>>
    where
        F: FnMut(&MirrorView<T>) -> bool,
    {
        let mut view = self.view.clone();
        let matched = view
            .wait_for(|current| predicate(current.as_ref()))
            .await
            .map_err(|_| DomainError::ListenerClosed)?;
        Ok(Arc::clone(&matched))
    }

    /// Wait for the first snapshot
    pub async fn synced(&self) -> ServiceResult<Arc<MirrorView<T>>> {
        self.wait_for(MirrorView::is_synced).await
    }

    /// Stop listening: unregister from the store and end the listener task.
    /// Safe to call more than once.
    pub fn dispose(&self) {
        if !self.task.is_finished() {
            debug!(mirror = self.name, "Disposing mirror");
        }
        self.registration.unsubscribe();
        self.task.abort();
    }
}

impl<T> Drop for Mirror<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T> std::fmt::Debug for Mirror<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mirror")
            .field("name", &self.name)
            .field("entries", &self.view.borrow().len())
            .finish_non_exhaustive()
    }
}
