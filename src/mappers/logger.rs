use log::{log, Level};

use crate::error::Error;
use crate::event::Event;
use crate::mapper::{Mapped, Mapper};

/// Logs every event it sees and passes it on unchanged.
///
/// Put it at the position in the chain you want to observe; in front of
/// [`NamespaceNormalizer`](crate::mappers::NamespaceNormalizer) it shows the
/// raw namespace URIs, after it the prefixed names.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: Level,
}

impl Logger {
    /// A logger logging at the given level.
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Mapper for Logger {
    fn map(&mut self, event: Event) -> Result<Mapped, Error> {
        log!(self.level, "processing event: {:?}", event);
        Ok(Mapped::Keep(event))
    }
}
