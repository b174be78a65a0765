//! Query snapshots - the full result set of a listened query plus the
//! changes since the previous delivery

use std::collections::HashMap;

use crate::value_objects::Document;

/// Kind of change a document went through between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

/// A single document change
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChange {
    pub kind: ChangeKind,
    pub document: Document,
}

/// Result set of a query at one point in time
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuerySnapshot {
    /// Every matching document in query order
    pub documents: Vec<Document>,
    /// Changes relative to the previous snapshot of the same listener
    pub changes: Vec<DocumentChange>,
}

impl QuerySnapshot {
    /// First snapshot of a listener: every document counts as added
    pub fn initial(documents: Vec<Document>) -> Self {
        let changes = documents
            .iter()
            .cloned()
            .map(|document| DocumentChange {
                kind: ChangeKind::Added,
                document,
            })
            .collect();
        Self { documents, changes }
    }

    /// Build a snapshot from the previous and current result sets.
    ///
    /// Removed changes carry the last known version of the document.
    pub fn diff(previous: &[Document], current: Vec<Document>) -> Self {
        let before: HashMap<&str, &Document> =
            previous.iter().map(|doc| (doc.id(), doc)).collect();
        let mut changes = Vec::new();

        for doc in &current {
            match before.get(doc.id()) {
                None => changes.push(DocumentChange {
                    kind: ChangeKind::Added,
                    document: doc.clone(),
                }),
                Some(old) if old.fields != doc.fields => changes.push(DocumentChange {
                    kind: ChangeKind::Modified,
                    document: doc.clone(),
                }),
                Some(_) => {}
            }
        }

        let after: HashMap<&str, ()> = current.iter().map(|doc| (doc.id(), ())).collect();
        for doc in previous {
            if !after.contains_key(doc.id()) {
                changes.push(DocumentChange {
                    kind: ChangeKind::Removed,
                    document: doc.clone(),
                });
            }
        }

        Self {
            documents: current,
            changes,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when nothing changed relative to the previous snapshot
    #[inline]
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }

    /// Document ids in query order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(Document::id)
    }
}
