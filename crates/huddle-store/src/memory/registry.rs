//! Listener registry - tracks realtime listeners and their last delivered result

use std::collections::HashMap;

use huddle_core::{Document, Query, QuerySnapshot};
use tokio::sync::mpsc;

struct ListenerEntry {
    query: Query,
    last: Vec<Document>,
    sender: mpsc::UnboundedSender<QuerySnapshot>,
}

/// Registered listeners keyed by registration id
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: HashMap<u64, ListenerEntry>,
    next_id: u64,
}

impl ListenerRegistry {
    /// Register a listener and deliver its initial snapshot
    pub(crate) fn register(
        &mut self,
        query: Query,
        initial: Vec<Document>,
        sender: mpsc::UnboundedSender<QuerySnapshot>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        // A closed receiver is pruned on the next notify
        let _ = sender.send(QuerySnapshot::initial(initial.clone()));

        self.entries.insert(
            id,
            ListenerEntry {
                query,
                last: initial,
                sender,
            },
        );
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Re-evaluate every listener on `collection` against its current documents
    /// and deliver a snapshot to those whose result set changed.
    pub(crate) fn notify(&mut self, collection: &str, documents: &[Document]) {
        let mut closed = Vec::new();

        for (id, entry) in &mut self.entries {
            if entry.query.collection != collection {
                continue;
            }

            let current = entry.query.apply(documents);
            let snapshot = QuerySnapshot::diff(&entry.last, current);
            if snapshot.is_unchanged() {
                continue;
            }

            entry.last.clone_from(&snapshot.documents);
            if entry.sender.send(snapshot).is_err() {
                closed.push(*id);
            }
        }

        for id in closed {
            self.entries.remove(&id);
            tracing::debug!(listener_id = id, "Pruned closed listener");
        }
    }
}
