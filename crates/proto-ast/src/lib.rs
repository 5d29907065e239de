//! Concrete-syntax-tree node definitions for the proto language server.
//!
//! This crate defines the data model only (§3): an arena of tagged-variant
//! [`Node`]s, an [`AstBuilder`] for constructing them (used by tests, since
//! the parser itself is an out-of-scope collaborator — §1), and the C2
//! ancestor-tracking [`walk`] helper.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod ast;
mod node;
mod semantic_token;
mod visitor;

pub use ast::{Ast, AstBuilder};
pub use node::{NamedChild, Node, NodeId, NodeKind};
pub use semantic_token::SemanticToken;
pub use visitor::{walk, AncestorPath};
