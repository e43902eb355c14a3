use std::fmt;
use std::io::{Read, Write};

use log::{debug, trace};

use crate::encoding::decode;
use crate::error::Error;
use crate::mapper::{Mapped, Mapper};
use crate::mappers::{NamespaceNormalizer, Pruner};
use crate::output::{Parameters, Writer};
use crate::reader::Reader;
use crate::stream::{EventSink, EventSource};

/// Identifies a mapper registered with a [`Processor`].
///
/// Every registration gets its own id, even when the same kind of mapper is
/// added twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapperId(usize);

/// Threads events from a source through a chain of mappers into a sink.
///
/// Mappers run in registration order. A mapper that drops an event stops it
/// from reaching the mappers after it and the sink; a mapper that fails stops
/// processing altogether.
///
/// ```rust
/// use xmlproc::{Error, Event, Mapped, Processor};
///
/// let mut processor = Processor::default();
/// processor.add_mapper(|event: Event| -> Result<Mapped, Error> {
///     match event {
///         Event::Text(text) => Ok(Mapped::Keep(Event::Text(text.to_uppercase()))),
///         event => Ok(Mapped::Keep(event)),
///     }
/// });
///
/// let events = vec![Event::comment("hi"), Event::text("  "), Event::text("ok")];
/// let mut out = Vec::new();
/// processor.process(events.into_iter().map(Ok), &mut out)?;
/// assert_eq!(out, vec![Event::text("OK")]);
/// # Ok::<(), xmlproc::Error>(())
/// ```
pub struct Processor {
    mappers: Vec<(MapperId, Box<dyn Mapper + Send>)>,
    next_id: usize,
}

impl Processor {
    /// A processor without mappers; events pass through unchanged.
    pub fn new() -> Self {
        Processor {
            mappers: Vec::new(),
            next_id: 0,
        }
    }

    fn id(&mut self) -> MapperId {
        let id = MapperId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a mapper to the end of the chain.
    pub fn add_mapper(&mut self, mapper: impl Mapper + Send + 'static) -> MapperId {
        let id = self.id();
        self.mappers.push((id, Box::new(mapper)));
        id
    }

    /// Insert a mapper at `index` in the chain.
    ///
    /// Panics if `index` is greater than the number of mappers, like
    /// [`Vec::insert`].
    pub fn insert_mapper(&mut self, index: usize, mapper: impl Mapper + Send + 'static) -> MapperId {
        let id = self.id();
        self.mappers.insert(index, (id, Box::new(mapper)));
        id
    }

    /// Remove a mapper from the chain.
    ///
    /// Returns the mapper, or `None` if it isn't (or is no longer) registered.
    pub fn remove_mapper(&mut self, id: MapperId) -> Option<Box<dyn Mapper + Send>> {
        let index = self.mappers.iter().position(|(i, _)| *i == id)?;
        Some(self.mappers.remove(index).1)
    }

    /// The number of mappers in the chain.
    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    /// Whether the chain has no mappers.
    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }

    /// Process all events from `source` into `sink`.
    ///
    /// The first error from the source, a mapper or the sink is returned;
    /// nothing is read or written after it. Buffered sinks are not flushed.
    pub fn process(
        &mut self,
        mut source: impl EventSource,
        mut sink: impl EventSink,
    ) -> Result<(), Error> {
        'events: while let Some(mut event) = source.next_event()? {
            trace!("read event: {:?}", event);
            for (id, mapper) in self.mappers.iter_mut() {
                event = match mapper.map(event)? {
                    Mapped::Keep(event) => event,
                    Mapped::Drop => {
                        debug!("event dropped by mapper {:?}", id);
                        continue 'events;
                    }
                };
            }
            sink.write_event(event)?;
        }
        Ok(())
    }

    /// Read an XML document from `reader`, process it and write the result to
    /// `writer`, indented by two spaces.
    ///
    /// The encoding of the input is detected; output is always UTF-8.
    pub fn process_streams(&mut self, mut reader: impl Read, writer: impl Write) -> Result<(), Error> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let xml = decode(&data)?;
        let mut writer = Writer::with_parameters(writer, Parameters::indented());
        self.process(Reader::new(&xml), &mut writer)?;
        writer.flush()
    }
}

impl Default for Processor {
    /// A processor that prunes comments and whitespace, then normalizes
    /// namespaces.
    fn default() -> Self {
        let mut processor = Processor::new();
        processor.add_mapper(Pruner);
        processor.add_mapper(NamespaceNormalizer::new());
        processor
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field(
                "mappers",
                &self.mappers.iter().map(|(id, _)| id).collect::<Vec<_>>(),
            )
            .finish()
    }
}
