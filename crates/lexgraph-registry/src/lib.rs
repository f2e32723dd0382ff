//! Lexgraph Registry Layer
//!
//! The central coordinator for all registered modules: registration and
//! discovery, the topic/keyword index, and query routing. Registration is
//! single-writer (one `RwLock` write region); routing and lookups are
//! concurrent reads over a consistent snapshot.
//!
//! Routing is advisory: a query that matches no module is not an error, the
//! engine simply falls back to querying everything.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod registry;
pub mod router;

pub use registry::{ModuleRegistry, RegistryError, RegistryStats};
pub use router::QueryIntent;
