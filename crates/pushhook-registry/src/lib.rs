//! Host-side adapters for pushhook.
//!
//! Loads a job catalog, turns each declared job into a [`Job`] handle via a
//! named adapter, and queues a [`BuildRequest`] whenever a bound job's push
//! trigger fires.
//!
//! [`Job`]: pushhook_core::job::Job

pub mod adapters;
pub mod catalog;
pub mod memory;
pub mod queue;

pub use adapters::{AdapterContext, AdapterRegistry, Folder};
pub use catalog::{Catalog, FolderSpec, JobSpec};
pub use memory::InMemoryJobRegistry;
pub use queue::{BuildQueue, BuildRequest, QueueingPushTrigger, TriggerFactory};
