#![forbid(unsafe_code)]

//! Stream XML documents through a chain of event mappers.
//!
//! A [`Processor`] pulls [`Event`]s from an [`EventSource`], passes each one
//! through its [`Mapper`]s in order, and writes what survives to an
//! [`EventSink`]. [`Reader`] turns XML text into events; [`Writer`] turns
//! events back into XML text.
//!
//! The default processor drops comments and whitespace-only text, then
//! rewrites namespaced names to the prefixes the document declared:
//!
//! ```rust
//! use xmlproc::Processor;
//!
//! let mut out = Vec::new();
//! Processor::default().process_streams(
//!     r#"<a xmlns:p="urn:x"><!-- hi --><p:b/></a>"#.as_bytes(),
//!     &mut out,
//! )?;
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "<a xmlns:p=\"urn:x\">\n  <p:b></p:b>\n</a>"
//! );
//! # Ok::<(), xmlproc::Error>(())
//! ```

mod encoding;
mod entity;
mod error;
mod event;
mod mapper;
pub mod mappers;
pub mod output;
mod processor;
#[cfg(any(test, feature = "proptest"))]
pub mod proptest;
mod qname;
mod reader;
mod stream;

pub use error::Error;
pub use event::{Attribute, EndElement, Event, EventType, ProcessingInstruction, StartElement};
pub use mapper::{Mapped, Mapper};
pub use output::{Indentation, Parameters, Writer};
pub use processor::{MapperId, Processor};
pub use qname::{QName, XMLNS, XML_NAMESPACE};
pub use reader::Reader;
pub use stream::{EventSink, EventSource};
