/// Indentation: pretty-print XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indentation {
    /// The text written once per nesting level.
    pub indent: String,
}

impl Default for Indentation {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

/// Parameters used when writing events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameters {
    /// Pretty-print the output.
    ///
    /// When set, start tags, end tags, comments, processing instructions
    /// and directives each go on their own line, indented by nesting
    /// depth. Text is written as is, so whitespace-only text is best pruned
    /// before it reaches the writer.
    pub indentation: Option<Indentation>,
}

impl Parameters {
    /// Parameters for output indented by two spaces.
    pub fn indented() -> Self {
        Self {
            indentation: Some(Indentation::default()),
        }
    }
}
