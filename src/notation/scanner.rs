use tracing::warn;

use super::{Delimiter, Script, ScriptKind, Segment};

/// Single pass scanner over notation text.
///
/// Yields segments in source order. Literal runs are contiguous slices of
/// the source, so nothing is copied.
#[derive(Debug)]
pub struct NotationScanner<'a> {
    source: &'a str,
    pos: usize,
    pending: Option<Script<'a>>,
}

/// Splits `text` into literal and script segments.
///
/// Absent or empty text has no segments. Malformed markup never fails: an
/// unmatched bracket or a trigger with nothing usable after it is kept as
/// literal text.
pub fn parse_notation(text: Option<&str>) -> Vec<Segment<'_>> {
    let Some(text) = text.filter(|text| !text.is_empty()) else {
        return Vec::new();
    };

    let segments = NotationScanner::new(text).collect::<Vec<_>>();
    if segments.is_empty() {
        return vec![Segment::Literal(text)];
    }

    segments
}

impl<'a> NotationScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        NotationScanner {
            source,
            pos: 0,
            pending: None,
        }
    }

    /// Tries to read a script starting at the trigger byte `at`. Returns the
    /// script and the offset just past it.
    fn scan_script(&self, at: usize) -> Option<(Script<'a>, usize)> {
        let bytes = self.source.as_bytes();
        let kind = ScriptKind::from_trigger(bytes[at])?;
        let start = at + 1;
        let &next = bytes.get(start)?;

        if let Some(delimiter) = Delimiter::from_open(next) {
            let mut level = 1usize;
            for (i, &b) in bytes.iter().enumerate().skip(start + 1) {
                if b == delimiter.open() {
                    level += 1;
                } else if b == delimiter.close() {
                    level -= 1;
                    if level == 0 {
                        let content = &self.source[start + 1..i];
                        // `x^()` has nothing to raise; the brackets stay literal.
                        if content.is_empty() {
                            return None;
                        }
                        let script = Script {
                            kind,
                            content,
                            delimiter: Some(delimiter),
                        };
                        return Some((script, i + 1));
                    }
                }
            }

            warn!(
                offset = start,
                bracket = %(delimiter.open() as char),
                "unmatched bracket in math notation, keeping it as text"
            );
            None
        } else if next.is_ascii_alphanumeric() {
            let len = bytes[start..]
                .iter()
                .take_while(|b| b.is_ascii_alphanumeric())
                .count();
            let script = Script {
                kind,
                content: &self.source[start..start + len],
                delimiter: None,
            };
            Some((script, start + len))
        } else {
            None
        }
    }
}

impl<'a> Iterator for NotationScanner<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if let Some(script) = self.pending.take() {
            return Some(Segment::Script(script));
        }

        let literal_start = self.pos;
        // Triggers and brackets are ASCII, so stepping by byte never splits
        // a slice inside a multi-byte character.
        for i in literal_start..self.source.len() {
            if let Some((script, end)) = self.scan_script(i) {
                self.pos = end;
                if literal_start < i {
                    self.pending = Some(script);
                    return Some(Segment::Literal(&self.source[literal_start..i]));
                }
                return Some(Segment::Script(script));
            }
        }

        self.pos = self.source.len();
        if literal_start < self.source.len() {
            Some(Segment::Literal(&self.source[literal_start..]))
        } else {
            None
        }
    }
}
