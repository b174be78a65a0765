//! In-memory document store

mod registry;
mod store;

pub use store::MemoryDocumentStore;
