//! Inline math notation: `^` and `_` markup in question text.
//!
//! `x^2 + y_{i+1}` is split into plain [`Segment::Literal`] runs and
//! [`Segment::Script`] runs that the exporters render raised or lowered.

use std::fmt;

pub mod scanner;

pub use scanner::{parse_notation, NotationScanner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Script(Script<'a>),
}

/// A superscript or subscript run.
///
/// `content` is the raw captured text. Markup nested inside it is kept
/// verbatim; pass it to [`parse_notation`] again for recursive styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Script<'a> {
    pub kind: ScriptKind,
    pub content: &'a str,
    /// `None` for the bare alphanumeric form (`x^2`).
    pub delimiter: Option<Delimiter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    Superscript,
    Subscript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Paren,
    Brace,
}

impl<'a> Segment<'a> {
    pub fn literal(text: &'a str) -> Self {
        Segment::Literal(text)
    }

    pub fn superscript(content: &'a str, delimiter: Option<Delimiter>) -> Self {
        Segment::Script(Script {
            kind: ScriptKind::Superscript,
            content,
            delimiter,
        })
    }

    pub fn subscript(content: &'a str, delimiter: Option<Delimiter>) -> Self {
        Segment::Script(Script {
            kind: ScriptKind::Subscript,
            content,
            delimiter,
        })
    }

    /// The visible text of the segment, without any markup.
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Literal(text) => text,
            Segment::Script(script) => script.content,
        }
    }
}

impl ScriptKind {
    pub fn from_trigger(byte: u8) -> Option<Self> {
        match byte {
            b'^' => Some(ScriptKind::Superscript),
            b'_' => Some(ScriptKind::Subscript),
            _ => None,
        }
    }

    pub fn trigger(self) -> char {
        match self {
            ScriptKind::Superscript => '^',
            ScriptKind::Subscript => '_',
        }
    }
}

impl Delimiter {
    pub fn from_open(byte: u8) -> Option<Self> {
        match byte {
            b'(' => Some(Delimiter::Paren),
            b'{' => Some(Delimiter::Brace),
            _ => None,
        }
    }

    pub fn open(self) -> u8 {
        match self {
            Delimiter::Paren => b'(',
            Delimiter::Brace => b'{',
        }
    }

    pub fn close(self) -> u8 {
        match self {
            Delimiter::Paren => b')',
            Delimiter::Brace => b'}',
        }
    }
}

/// Writes the segment back as markup; the segments of a parse print back
/// to exactly the text they came from.
impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Script(script) => write!(f, "{script}"),
        }
    }
}

impl fmt::Display for Script<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trigger = self.kind.trigger();
        match self.delimiter {
            Some(delimiter) => write!(
                f,
                "{trigger}{open}{content}{close}",
                open = delimiter.open() as char,
                content = self.content,
                close = delimiter.close() as char,
            ),
            None => write!(f, "{trigger}{}", self.content),
        }
    }
}
