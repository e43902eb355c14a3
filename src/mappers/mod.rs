//! Mappers that come with xmlproc.
//!
//! [`Processor::default`](crate::Processor::default) uses [`Pruner`] followed
//! by [`NamespaceNormalizer`].
mod logger;
mod namespace;
mod pruner;

pub use logger::Logger;
pub use namespace::{NamespaceBinding, NamespaceNormalizer, Scope, ScopeStack};
pub use pruner::Pruner;
