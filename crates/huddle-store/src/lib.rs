//! # huddle-store
//!
//! Document store implementations of the `DocumentStore` trait defined in
//! `huddle-core`.
//!
//! ## Overview
//!
//! [`MemoryDocumentStore`] keeps collections in process and fans out realtime
//! snapshots to registered listeners after every write. It stands in for the
//! hosted document database in tests and in the demo binary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use huddle_core::{DocumentStore, Query};
//! use huddle_store::MemoryDocumentStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryDocumentStore::new();
//!     let mut listener = store.listen(Query::collection("user"))?;
//!     let initial = listener.next().await;
//!     Ok(())
//! }
//! ```

pub mod ids;
pub mod memory;

// Re-export commonly used types
pub use ids::generate_document_id;
pub use memory::MemoryDocumentStore;
