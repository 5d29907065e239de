//! Test-driven development helpers for the proto language server core.
//!
//! Hand-authored fixtures replace a real parser/linker in every crate's test
//! suite (the parser is an out-of-scope collaborator); this crate centralizes
//! the panic-with-message assertions and descriptor-pool/AST scaffolding so
//! each crate's tests don't reinvent them.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod builders;
pub mod fixtures;
mod must;

pub use must::{must_err, must_ok, must_some};
