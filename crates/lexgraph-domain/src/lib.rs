//! Lexgraph Domain Layer
//!
//! This crate contains the core knowledge representation for Lexgraph: the
//! six-dimensional knowledge node and the value types it is composed of.
//! All other layers depend on it; it depends on nothing but `serde` (the
//! presentation boundary is a stable serialized contract) and `chrono`
//! (temporal validity).
//!
//! ## Key Concepts
//!
//! - **KnowledgeNode**: one authored unit of rule-logic, decomposed into six
//!   dimensions (WHAT, WHICH, IF-THEN, CAN/MUST, GIVEN, WHY)
//! - **Proposition / Conditional / Modality**: the structures each dimension
//!   is built from
//! - **SourceType**: the authority hierarchy; each source type fixes an
//!   authority weight in [0, 1]
//! - **CrossRef**: non-owning references between nodes (interprets, extends,
//!   overruled-by, ...), resolved by id lookup, never by embedded ownership
//!
//! ## Lifecycle
//!
//! Nodes are authored and validated once at load time; at run time they are
//! read-only. Nothing in this crate mutates a node after construction.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod conditional;
pub mod dimension;
pub mod modality;
pub mod node;
pub mod proposition;
pub mod relation;

// Re-exports for convenience
pub use conditional::Conditional;
pub use dimension::Dimension;
pub use modality::{Modality, ModalityKind};
pub use node::{KnowledgeNode, NodeId, SourceType};
pub use proposition::Proposition;
pub use relation::{CrossRef, CrossRefKind};
