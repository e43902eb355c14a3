use crate::error::Error;
use crate::event::Event;

/// What a [`Mapper`] did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapped {
    /// Pass this event on, possibly rewritten.
    Keep(Event),
    /// Discard the event. Later mappers don't see it and it isn't written.
    Drop,
}

/// A transformation applied to every event of a document.
///
/// A mapper receives each event in turn and either keeps it (possibly
/// rewritten), drops it, or fails. A failure aborts processing of the whole
/// document.
///
/// Mappers may keep state between events; a mapper instance is meant to see
/// exactly one document.
///
/// Closures are mappers too:
///
/// ```rust
/// use xmlproc::{Event, Mapped, Mapper, Error};
///
/// let mut shout = |event: Event| -> Result<Mapped, Error> {
///     Ok(Mapped::Keep(match event {
///         Event::Text(text) => Event::Text(text.to_uppercase()),
///         event => event,
///     }))
/// };
/// assert_eq!(shout.map(Event::text("hi"))?, Mapped::Keep(Event::text("HI")));
/// # Ok::<(), Error>(())
/// ```
pub trait Mapper {
    /// Map a single event.
    fn map(&mut self, event: Event) -> Result<Mapped, Error>;
}

impl<F> Mapper for F
where
    F: FnMut(Event) -> Result<Mapped, Error>,
{
    #[inline]
    fn map(&mut self, event: Event) -> Result<Mapped, Error> {
        self(event)
    }
}
