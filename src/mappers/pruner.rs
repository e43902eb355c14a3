use crate::error::Error;
use crate::event::Event;
use crate::mapper::{Mapped, Mapper};

/// Removes comments, and text consisting of whitespace only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pruner;

impl Mapper for Pruner {
    fn map(&mut self, event: Event) -> Result<Mapped, Error> {
        Ok(match event {
            Event::Comment(_) => Mapped::Drop,
            Event::Text(ref text) if text.trim().is_empty() => Mapped::Drop,
            event => Mapped::Keep(event),
        })
    }
}
