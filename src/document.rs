use std::borrow::Cow;

use glam::Vec2;

use crate::{font::StandardFont, notation::ScriptKind};

/// Scripts are set at this fraction of the surrounding font size.
const SCRIPT_SCALE: f32 = 0.7;

pub struct Document<'a> {
    pub blocks: Vec<Block<'a>>,
    pub page_size: Vec2,
    pub margin: f32,
    /// Adds a `Page n of m` footer to every page when set.
    pub page_numbers: bool,
    pub title: Option<String>,
}

pub enum Block<'a> {
    Text(TextBlock<'a>),
    /// Vertical space in points, e.g. room to write an answer.
    Space(f32),
    PageBreak,
}

pub struct TextBlock<'a> {
    pub inlines: Vec<Inline<'a>>,
    pub align: TextAlign,
    pub indent: f32,
    pub space_before: f32,
}

pub struct Inline<'a> {
    pub text: Cow<'a, str>,
    pub style: Style,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub font: StandardFont,
    pub font_size: f32,
    /// Baseline offset in points; positive is up.
    pub rise: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl<'a> TextBlock<'a> {
    pub fn new(inlines: Vec<Inline<'a>>) -> Self {
        Self {
            inlines,
            align: TextAlign::Left,
            indent: 0.0,
            space_before: 0.0,
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn indent(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }

    pub fn space_before(mut self, space_before: f32) -> Self {
        self.space_before = space_before;
        self
    }
}

impl<'a> Inline<'a> {
    pub fn new(text: impl Into<Cow<'a, str>>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl Style {
    pub fn new(font: StandardFont, font_size: f32) -> Self {
        Self {
            font,
            font_size,
            rise: 0.0,
        }
    }

    /// The style for a superscript or subscript set within `self`.
    pub fn script(self, kind: ScriptKind) -> Self {
        let rise = match kind {
            ScriptKind::Superscript => 0.4 * self.font_size,
            ScriptKind::Subscript => -0.2 * self.font_size,
        };
        Self {
            font: self.font,
            font_size: self.font_size * SCRIPT_SCALE,
            rise: self.rise + rise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_style() {
        let body = Style::new(StandardFont::Helvetica, 10.0);

        let sup = body.script(ScriptKind::Superscript);
        assert_eq!(sup.font, StandardFont::Helvetica);
        assert!((sup.font_size - 7.0).abs() < 1e-5);
        assert!((sup.rise - 4.0).abs() < 1e-5);

        let sub = body.script(ScriptKind::Subscript);
        assert!((sub.rise + 2.0).abs() < 1e-5);
    }
}
