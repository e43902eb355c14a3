use crate::error::Error;
use crate::event::Event;

/// Something that produces events, one at a time.
///
/// Any iterator over `Result<Event, Error>` is a source, which makes it easy
/// to feed a fixed list of events:
///
/// ```rust
/// use xmlproc::{Event, EventSource, QName};
///
/// let mut source = vec![Event::start(QName::new("a")), Event::end(QName::new("a"))]
///     .into_iter()
///     .map(Ok);
/// assert_eq!(source.next_event()?, Some(Event::start(QName::new("a"))));
/// assert_eq!(source.next_event()?, Some(Event::end(QName::new("a"))));
/// assert_eq!(source.next_event()?, None);
/// # Ok::<(), xmlproc::Error>(())
/// ```
pub trait EventSource {
    /// The next event, or `None` at the end of the input.
    fn next_event(&mut self) -> Result<Option<Event>, Error>;
}

impl<I> EventSource for I
where
    I: Iterator<Item = Result<Event, Error>>,
{
    #[inline]
    fn next_event(&mut self) -> Result<Option<Event>, Error> {
        self.next().transpose()
    }
}

/// Something that consumes events, one at a time.
///
/// Sinks that buffer their output need to be flushed by the caller once
/// processing is done; see [`Writer::flush`](crate::Writer::flush).
pub trait EventSink {
    /// Accept a single event.
    fn write_event(&mut self, event: Event) -> Result<(), Error>;
}

impl EventSink for Vec<Event> {
    #[inline]
    fn write_event(&mut self, event: Event) -> Result<(), Error> {
        self.push(event);
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    #[inline]
    fn write_event(&mut self, event: Event) -> Result<(), Error> {
        (**self).write_event(event)
    }
}
