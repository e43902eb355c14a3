//! Serialization of events back to XML text.
//!
//! [`Writer`] is an [`EventSink`](crate::EventSink) that writes XML to any
//! [`std::io::Write`]. Control the layout with [`Parameters`].
mod common;
mod fullname;
mod pretty;
mod serializer;
mod writer;

pub use common::{Indentation, Parameters};
pub(crate) use pretty::Pretty;
pub(crate) use serializer::{gen_outputs, render_output, Output};
pub use writer::Writer;
