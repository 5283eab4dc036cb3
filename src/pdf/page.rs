use std::fmt::{self, Write};

use glam::Vec2;

use crate::{document::Style, encoding::EncodedStr, font::StandardFont, text_layout::Line};

// A4 page size
pub const PAGE_WIDTH: f32 = 8.27 * 72.0;
pub const PAGE_HEIGHT: f32 = 11.69 * 72.0;

/// Builds the content stream of one page.
#[derive(Debug, Default)]
pub struct PageBuilder {
    content: String,
    font: Option<(StandardFont, f32)>,
    rise: f32,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets laid out lines at their origins.
    pub fn text(&mut self, lines: &[Line]) -> fmt::Result {
        writeln!(self.content, "BT")?;
        for line in lines {
            writeln!(self.content, "1 0 0 1 {} {} Tm", line.origin.x, line.origin.y)?;
            for chunk in &line.chunks {
                self.set_style(chunk.style)?;
                writeln!(self.content, "{} Tj", EncodedStr(chunk.text))?;
            }
        }
        self.set_rise(0.0)?;
        writeln!(self.content, "ET")
    }

    /// Sets a single run of text with its baseline starting at `position`.
    pub fn text_at(&mut self, style: Style, position: Vec2, s: &str) -> fmt::Result {
        writeln!(self.content, "BT")?;
        writeln!(self.content, "1 0 0 1 {} {} Tm", position.x, position.y)?;
        self.set_style(style)?;
        writeln!(self.content, "{} Tj", EncodedStr(s))?;
        self.set_rise(0.0)?;
        writeln!(self.content, "ET")
    }

    fn set_style(&mut self, style: Style) -> fmt::Result {
        let font = (style.font, style.font_size);
        if self.font != Some(font) {
            writeln!(
                self.content,
                "/{} {} Tf",
                style.font.resource_name(),
                style.font_size,
            )?;
            self.font = Some(font);
        }
        self.set_rise(style.rise)
    }

    fn set_rise(&mut self, rise: f32) -> fmt::Result {
        if self.rise != rise {
            writeln!(self.content, "{rise} Ts")?;
            self.rise = rise;
        }
        Ok(())
    }

    pub fn build(self) -> String {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::*;
    use crate::{
        document::{Block, Document, Inline, TextBlock},
        notation::ScriptKind,
        text_layout::layout_document,
    };

    #[test]
    fn test_text_with_script() {
        let body = Style::new(StandardFont::Helvetica, 10.0);
        let document = Document {
            blocks: vec![Block::Text(TextBlock::new(vec![
                Inline::new("x", body),
                Inline::new("2", body.script(ScriptKind::Superscript)),
                Inline::new(" y", body),
            ]))],
            page_size: vec2(200.0, 200.0),
            margin: 20.0,
            page_numbers: false,
            title: None,
        };
        let pages = layout_document(&document);

        let mut builder = PageBuilder::new();
        builder.text(&pages[0].lines).unwrap();
        let content = builder.build();

        let lines = content.lines().collect::<Vec<_>>();
        assert!(lines[1].starts_with("1 0 0 1 20 ") && lines[1].ends_with(" Tm"));

        let expected = [
            "/F1 10 Tf",
            "<78> Tj",
            "/F1 7 Tf",
            "4 Ts",
            "<32> Tj",
            "/F1 10 Tf",
            "0 Ts",
            "<20> Tj",
            "<79> Tj",
            "ET",
        ];
        assert_eq!(lines[0], "BT");
        assert_eq!(lines[2..], expected);
    }

    #[test]
    fn test_text_at() {
        let mut builder = PageBuilder::new();
        let style = Style::new(StandardFont::HelveticaBold, 9.0);
        builder.text_at(style, vec2(10.0, 5.5), "Hi").unwrap();
        assert_eq!(builder.build(), "BT\n1 0 0 1 10 5.5 Tm\n/F2 9 Tf\n<4869> Tj\nET\n");
    }
}
