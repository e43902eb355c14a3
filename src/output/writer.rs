use std::io::{self, BufWriter, Write};

use crate::error::Error;
use crate::event::Event;
use crate::qname::QName;
use crate::stream::EventSink;

use super::{gen_outputs, render_output, Output, Parameters, Pretty};

/// Writes events as XML text.
///
/// Output is buffered: call [`flush`](Writer::flush) once the last event is
/// written.
///
/// Elements are never written as empty element tags; `<a/>` comes out as
/// `<a></a>`. End elements have to match the open start element.
///
/// ```rust
/// use xmlproc::{Event, EventSink, QName, Writer};
///
/// let mut buf = Vec::new();
/// let mut writer = Writer::new(&mut buf);
/// writer.write_event(Event::start(QName::new("a")))?;
/// writer.write_event(Event::text("1 < 2"))?;
/// writer.write_event(Event::end(QName::new("a")))?;
/// writer.flush()?;
/// drop(writer);
/// assert_eq!(String::from_utf8(buf).unwrap(), "<a>1 &lt; 2</a>");
/// # Ok::<(), xmlproc::Error>(())
/// ```
pub struct Writer<W: Write> {
    w: BufWriter<W>,
    pretty: Option<(Pretty, String)>,
    // open elements with the name their start tag was written with
    open: Vec<(QName, String)>,
}

impl<W: Write> Writer<W> {
    /// A writer without indentation.
    pub fn new(w: W) -> Self {
        Self::with_parameters(w, Parameters::default())
    }

    /// A writer configured by `parameters`.
    pub fn with_parameters(w: W, parameters: Parameters) -> Self {
        Self {
            w: BufWriter::new(w),
            pretty: parameters
                .indentation
                .map(|indentation| (Pretty::new(), indentation.indent)),
            open: Vec::new(),
        }
    }

    /// Write out everything buffered so far.
    pub fn flush(&mut self) -> Result<(), Error> {
        self.w.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W, Error> {
        self.w
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }

    /// Number of elements currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    fn check_end(&mut self, name: &QName) -> Result<String, Error> {
        let (open, _) = self
            .open
            .last()
            .ok_or_else(|| Error::UnexpectedEndTag(name.to_string()))?;
        if open.namespace() != name.namespace() || open.local != name.local {
            return Err(Error::UnmatchedEndTag(open.to_string(), name.to_string()));
        }
        Ok(self
            .open
            .pop()
            .map(|(_, written)| written)
            .unwrap_or_default())
    }

    fn write_output(&mut self, output: &Output) -> io::Result<()> {
        if let Some((pretty, indent)) = &mut self.pretty {
            if let Some((newline, indentation)) = pretty.prettify(output) {
                if newline {
                    self.w.write_all(b"\n")?;
                }
                for _ in 0..indentation {
                    self.w.write_all(indent.as_bytes())?;
                }
            }
        }
        let token = render_output(output);
        if token.space {
            self.w.write_all(b" ")?;
        }
        self.w.write_all(token.text.as_bytes())
    }
}

impl<W: Write> EventSink for Writer<W> {
    fn write_event(&mut self, event: Event) -> Result<(), Error> {
        if let Event::EndElement(element) = &event {
            // the end tag repeats whatever the start tag was written as
            let written = self.check_end(&element.name)?;
            self.write_output(&Output::EndTag(written.into()))?;
            return Ok(());
        }
        for output in gen_outputs(&event) {
            if let (Event::StartElement(element), Output::StartTagOpen(written)) = (&event, &output)
            {
                self.open.push((element.name.clone(), written.to_string()));
            }
            self.write_output(&output)?;
        }
        Ok(())
    }
}
