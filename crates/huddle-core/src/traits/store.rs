//! Document store trait - the port to the hosted document database
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::DomainError;
use crate::events::QuerySnapshot;
use crate::value_objects::{Document, DocumentRef, Fields, Query};

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Allocate a fresh document reference without writing anything
    fn new_document_ref(&self, collection: &str) -> DocumentRef;

    /// Create a document with a store-assigned id
    async fn add(&self, collection: &str, fields: Fields) -> StoreResult<DocumentRef>;

    /// Create or overwrite the document at `reference`
    async fn set(&self, reference: &DocumentRef, fields: Fields) -> StoreResult<()>;

    /// Merge `fields` into an existing document
    ///
    /// Fails with `DocumentNotFound` if the document does not exist.
    async fn update(&self, reference: &DocumentRef, fields: Fields) -> StoreResult<()>;

    /// Delete a document; deleting a missing document succeeds
    async fn delete(&self, reference: &DocumentRef) -> StoreResult<()>;

    /// Read a single document
    async fn get(&self, reference: &DocumentRef) -> StoreResult<Option<Document>>;

    /// Run a one-shot query
    async fn query(&self, query: &Query) -> StoreResult<Vec<Document>>;

    /// Register a realtime listener
    ///
    /// The current result set is delivered immediately, then a new snapshot
    /// after every write that changes the result set.
    fn listen(&self, query: Query) -> StoreResult<Listener>;
}

/// Handle that removes a listener from the store
pub trait ListenerRegistration: Send + Sync {
    /// Stop delivering snapshots. Calling it more than once is harmless.
    fn unsubscribe(&self);
}

/// A registered realtime listener
pub struct Listener {
    receiver: mpsc::UnboundedReceiver<QuerySnapshot>,
    registration: Box<dyn ListenerRegistration>,
}

impl Listener {
    pub fn new(
        receiver: mpsc::UnboundedReceiver<QuerySnapshot>,
        registration: Box<dyn ListenerRegistration>,
    ) -> Self {
        Self {
            receiver,
            registration,
        }
    }

    /// Wait for the next snapshot; `None` once the listener is released
    pub async fn next(&mut self) -> Option<QuerySnapshot> {
        self.receiver.recv().await
    }

    /// Release the listener
    pub fn unsubscribe(&self) {
        self.registration.unsubscribe();
    }

    /// Split into the snapshot stream and the registration handle
    pub fn into_parts(
        self,
    ) -> (
        mpsc::UnboundedReceiver<QuerySnapshot>,
        Box<dyn ListenerRegistration>,
    ) {
        (self.receiver, self.registration)
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener").finish_non_exhaustive()
    }
}
