//! In-memory implementation of DocumentStore

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use huddle_core::error::DomainError;
use huddle_core::traits::{DocumentStore, Listener, ListenerRegistration, StoreResult};
use huddle_core::value_objects::{Document, DocumentRef, Fields, Query};

use super::registry::ListenerRegistry;
use crate::ids::generate_document_id;

type Collection = BTreeMap<String, Fields>;

#[derive(Default)]
struct Inner {
    collections: RwLock<HashMap<String, Collection>>,
    listeners: Mutex<ListenerRegistry>,
    unavailable: AtomicBool,
}

/// Process-local document store with realtime listeners
///
/// Lock order is always `collections` then `listeners`, so snapshots reach
/// listeners in the same order the writes were applied.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Inner>,
}

impl MemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle availability; while unavailable every operation fails
    pub fn set_available(&self, available: bool) {
        self.inner.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Number of documents in a collection
    pub fn document_count(&self, collection: &str) -> usize {
        self.inner
            .collections
            .read()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.inner.unavailable.load(Ordering::SeqCst) {
            Err(DomainError::StoreError("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn documents_of(collections: &HashMap<String, Collection>, collection: &str) -> Vec<Document> {
        collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| {
                        Document::new(DocumentRef::new(collection, id.clone()), fields.clone())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Apply a mutation to one collection and notify its listeners
    fn write<T, F>(&self, collection: &str, mutate: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Collection) -> StoreResult<T>,
    {
        self.check_available()?;

        let mut collections = self.inner.collections.write();
        let result = mutate(collections.entry(collection.to_string()).or_default())?;

        let documents = Self::documents_of(&collections, collection);
        self.inner.listeners.lock().notify(collection, &documents);

        Ok(result)
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn new_document_ref(&self, collection: &str) -> DocumentRef {
        DocumentRef::new(collection, generate_document_id())
    }

    #[instrument(skip(self, fields))]
    async fn add(&self, collection: &str, fields: Fields) -> StoreResult<DocumentRef> {
        let reference = self.new_document_ref(collection);
        let id = reference.id().to_string();
        self.write(collection, move |docs| {
            docs.insert(id, fields);
            Ok(())
        })?;

        debug!(path = %reference, "Document added");
        Ok(reference)
    }

    #[instrument(skip(self, fields), fields(path = %reference))]
    async fn set(&self, reference: &DocumentRef, fields: Fields) -> StoreResult<()> {
        let id = reference.id().to_string();
        self.write(reference.collection(), move |docs| {
            docs.insert(id, fields);
            Ok(())
        })?;

        debug!("Document set");
        Ok(())
    }

    #[instrument(skip(self, fields), fields(path = %reference))]
    async fn update(&self, reference: &DocumentRef, fields: Fields) -> StoreResult<()> {
        self.write(reference.collection(), |docs| {
            let existing = docs
                .get_mut(reference.id())
                .ok_or_else(|| DomainError::DocumentNotFound(reference.path()))?;
            existing.extend(fields);
            Ok(())
        })?;

        debug!("Document updated");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %reference))]
    async fn delete(&self, reference: &DocumentRef) -> StoreResult<()> {
        let removed = self.write(reference.collection(), |docs| {
            Ok(docs.remove(reference.id()).is_some())
        })?;

        debug!(removed, "Document deleted");
        Ok(())
    }

    async fn get(&self, reference: &DocumentRef) -> StoreResult<Option<Document>> {
        self.check_available()?;

        Ok(self
            .inner
            .collections
            .read()
            .get(reference.collection())
            .and_then(|docs| docs.get(reference.id()))
            .map(|fields| Document::new(reference.clone(), fields.clone())))
    }

    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        self.check_available()?;

        let collections = self.inner.collections.read();
        let documents = Self::documents_of(&collections, &query.collection);
        Ok(query.apply(&documents))
    }

    fn listen(&self, query: Query) -> StoreResult<Listener> {
        self.check_available()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let collections = self.inner.collections.read();
        let initial = query.apply(&Self::documents_of(&collections, &query.collection));
        let collection = query.collection.clone();
        let id = self.inner.listeners.lock().register(query, initial, tx);
        drop(collections);

        debug!(listener_id = id, collection = %collection, "Listener registered");

        Ok(Listener::new(
            rx,
            Box::new(MemoryRegistration {
                id,
                inner: Arc::downgrade(&self.inner),
            }),
        ))
    }
}

struct MemoryRegistration {
    id: u64,
    inner: Weak<Inner>,
}

impl ListenerRegistration for MemoryRegistration {
    fn unsubscribe(&self) {
        if let Some(inner) = self.inner.upgrade() {
            if inner.listeners.lock().remove(self.id) {
                debug!(listener_id = self.id, "Listener removed");
            }
        }
    }
}
