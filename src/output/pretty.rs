use super::Output;

// Streaming indentation: we can't look ahead to see whether an element has
// children, so an end tag stays on the line of its start tag unless
// something other than text was written in between.
pub(crate) struct Pretty {
    depth: usize,
    // the last indented token was a start tag at `depth - 1`
    indented_in: bool,
    // nothing was written yet, so no newline is needed
    at_start: bool,
}

impl Pretty {
    pub(crate) fn new() -> Self {
        Pretty {
            depth: 0,
            indented_in: false,
            at_start: true,
        }
    }

    fn newline(&mut self) -> bool {
        !std::mem::replace(&mut self.at_start, false)
    }

    /// Given the next output, whether a newline goes in front of it and
    /// with how many levels of indentation.
    pub(crate) fn prettify(&mut self, output: &Output) -> Option<(bool, usize)> {
        use Output::*;
        match output {
            StartTagOpen(_) => {
                let r = (self.newline(), self.depth);
                self.depth += 1;
                self.indented_in = true;
                Some(r)
            }
            EndTag(_) => {
                self.depth = self.depth.saturating_sub(1);
                if std::mem::replace(&mut self.indented_in, false) {
                    return None;
                }
                Some((self.newline(), self.depth))
            }
            Comment(_) | ProcessingInstruction(..) | Directive(_) => {
                self.indented_in = false;
                Some((self.newline(), self.depth))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested() {
        let mut pretty = Pretty::new();
        assert_eq!(pretty.prettify(&Output::StartTagOpen("a".into())), Some((false, 0)));
        assert_eq!(pretty.prettify(&Output::StartTagClose), None);
        assert_eq!(pretty.prettify(&Output::StartTagOpen("b".into())), Some((true, 1)));
        assert_eq!(pretty.prettify(&Output::Text("t")), None);
        assert_eq!(pretty.prettify(&Output::EndTag("b".into())), None);
        assert_eq!(pretty.prettify(&Output::EndTag("a".into())), Some((true, 0)));
    }

    #[test]
    fn test_comment_breaks_line() {
        let mut pretty = Pretty::new();
        pretty.prettify(&Output::StartTagOpen("a".into()));
        assert_eq!(pretty.prettify(&Output::Comment("c")), Some((true, 1)));
        assert_eq!(pretty.prettify(&Output::EndTag("a".into())), Some((true, 0)));
    }
}
