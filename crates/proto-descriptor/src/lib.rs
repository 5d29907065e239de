//! Descriptor data model and navigation traits for the proto language server.
//!
//! This crate is the seam described in the "Descriptor wraps `prost-reflect`"
//! design note: `prost_reflect`'s descriptor types already provide the
//! navigation surface the distilled interface asks for, so [`Descriptor`]
//! is a thin tagged wrapper rather than a parallel hierarchy, and
//! [`ParseResult`]/[`LinkResult`] are the traits a parser/linker front-end
//! implements once for C3-C7 to build on.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod descriptor;
mod search;
mod table;
mod traits;

pub use descriptor::{Descriptor, DescriptorProtoRef};
pub use search::{ResolvedSource, SearchResult};
pub use table::{TableLinkResult, TableLinkResultBuilder};
pub use traits::{LinkResult, ParseResult};
