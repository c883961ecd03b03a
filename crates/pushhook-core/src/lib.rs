//! pushhook core
//!
//! Domain types, capability traits, and error handling shared by every
//! pushhook crate. Nothing in here performs I/O: the job registry, the
//! identity store and the build triggers are all reached through the port
//! traits in [`ports`].

pub mod error;
pub mod event;
pub mod identity;
pub mod ids;
pub mod job;
pub mod ports;
pub mod remote;
pub mod scm;

pub use error::{Error, Result};
pub use event::{PushEvent, RepositoryDescriptor};
pub use identity::Identity;
pub use ids::*;
pub use remote::{RemoteUrl, normalize};
