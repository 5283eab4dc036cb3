use std::mem;

use glam::{vec2, Vec2};

use crate::{
    document::{Block, Document, Inline, Style, TextAlign, TextBlock},
    font::TextMetrics,
};

/// Space kept clear above the bottom margin for the page footer.
pub const FOOTER_HEIGHT: f32 = 18.0;

#[derive(Debug, Default, Clone)]
pub struct Page<'a> {
    pub lines: Vec<Line<'a>>,
}

#[derive(Debug, Clone)]
pub struct Line<'a> {
    pub chunks: Vec<Chunk<'a>>,
    pub text_metrics: TextMetrics,
    pub width: f32,
    /// Absolute position of the start of the baseline.
    pub origin: Vec2,
}

#[derive(Debug, Clone)]
pub struct Chunk<'a> {
    pub text: &'a str,
    pub style: Style,
    pub text_metrics: TextMetrics,
    pub width: f32,
    pub is_whitespace: bool,
}

pub fn layout_document<'a>(document: &'a Document<'_>) -> Vec<Page<'a>> {
    let target_width = document.page_size.x - 2.0 * document.margin;
    let top = document.page_size.y - document.margin;
    let mut bottom = document.margin;
    if document.page_numbers {
        bottom += FOOTER_HEIGHT;
    }

    let mut pages = Vec::new();
    let mut current_page = Page::default();
    let mut y = top;
    let mut prev_descent = 0.0;
    for block in &document.blocks {
        match block {
            Block::Text(block) => {
                let block_width = target_width - block.indent;
                for (i, mut line) in layout_block(block_width, block).into_iter().enumerate() {
                    let metrics = line.text_metrics;

                    let mut advance = metrics.ascent;
                    if !current_page.lines.is_empty() {
                        advance += metrics.line_gap - prev_descent;
                        if i == 0 {
                            advance += block.space_before;
                        }

                        if y - advance + metrics.descent < bottom {
                            pages.push(mem::take(&mut current_page));
                            y = top;
                            advance = metrics.ascent;
                        }
                    }
                    y -= advance;

                    let align_offset = match block.align {
                        TextAlign::Left => 0.0,
                        TextAlign::Center => 0.5 * (block_width - line.width),
                    };
                    line.origin = vec2(document.margin + block.indent + align_offset, y);

                    prev_descent = metrics.descent;
                    current_page.lines.push(line);
                }
            }
            Block::Space(height) => {
                // Space at the top of a page is dropped.
                if !current_page.lines.is_empty() {
                    y -= height;
                    if y < bottom {
                        pages.push(mem::take(&mut current_page));
                        y = top;
                    }
                }
            }
            Block::PageBreak => {
                if !current_page.lines.is_empty() {
                    pages.push(mem::take(&mut current_page));
                    y = top;
                }
            }
        }
    }

    if !current_page.lines.is_empty() || pages.is_empty() {
        pages.push(current_page);
    }

    pages
}

fn layout_block<'a>(target_width: f32, block: &'a TextBlock<'_>) -> Vec<Line<'a>> {
    // Split block into chunks
    let chunks = block
        .inlines
        .iter()
        .flat_map(chunk_inline)
        .collect::<Vec<_>>();

    // Organise chunks into lines. Lines only break at whitespace, so a
    // script stays attached to the word before it.
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut possible_break = 0;
    let mut x = 0.0;
    for (i, chunk) in chunks.iter().enumerate() {
        if chunk.is_whitespace && i > line_start && !chunks[i - 1].is_whitespace {
            possible_break = i;
        }

        if !chunk.is_whitespace && possible_break > line_start && x + chunk.width > target_width
        {
            lines.push(make_line(&chunks[line_start..possible_break]));

            line_start = possible_break;
            while chunks[line_start].is_whitespace {
                line_start += 1;
            }
            possible_break = line_start;
            x = chunks[line_start..=i].iter().map(|c| c.width).sum();
        } else {
            x += chunk.width;
        }
    }

    // Add the last line if there are any chunks left
    if line_start < chunks.len() {
        lines.push(make_line(&chunks[line_start..]));
    }

    lines.retain(|line| !line.chunks.is_empty());
    lines
}

fn make_line<'a>(chunks: &[Chunk<'a>]) -> Line<'a> {
    let end = chunks
        .iter()
        .rposition(|c| !c.is_whitespace)
        .map_or(0, |i| i + 1);
    let chunks = chunks[..end].to_vec();

    let text_metrics = chunks
        .iter()
        .fold(TextMetrics::default(), |metrics, c| metrics.max(c.text_metrics));
    let width = chunks.iter().map(|c| c.width).sum();

    Line {
        chunks,
        text_metrics,
        width,
        origin: Vec2::ZERO,
    }
}

fn chunk_inline<'a>(inline: &'a Inline<'_>) -> Vec<Chunk<'a>> {
    let style = inline.style;
    let font = style.font;
    let font_scale = style.font_size / 1000.0;
    let text_metrics = (font.metrics() * style.font_size).raised(style.rise);
    let text: &'a str = &inline.text;

    let mut chunks = Vec::new();
    let mut current_chunk_start = 0;
    let mut current_chunk_width = 0.0;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            let next_i = i + c.len_utf8();

            if current_chunk_start < i {
                chunks.push(Chunk {
                    text: &text[current_chunk_start..i],
                    style,
                    text_metrics,
                    width: current_chunk_width,
                    is_whitespace: false,
                });
            }

            // Every whitespace character is set as a plain space.
            chunks.push(Chunk {
                text: " ",
                style,
                text_metrics,
                width: font.char_width(' ') as f32 * font_scale,
                is_whitespace: true,
            });

            current_chunk_start = next_i;
            current_chunk_width = 0.0;
        } else {
            current_chunk_width += font.char_width(c) as f32 * font_scale;
        }
    }

    if current_chunk_start < text.len() {
        chunks.push(Chunk {
            text: &text[current_chunk_start..],
            style,
            text_metrics,
            width: current_chunk_width,
            is_whitespace: false,
        });
    }

    chunks
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::*;
    use crate::{font::StandardFont, notation::ScriptKind};

    fn body() -> Style {
        Style::new(StandardFont::Helvetica, 10.0)
    }

    fn document(blocks: Vec<Block<'static>>) -> Document<'static> {
        Document {
            blocks,
            page_size: vec2(200.0, 200.0),
            margin: 20.0,
            page_numbers: false,
            title: None,
        }
    }

    fn paragraph(text: &'static str) -> Block<'static> {
        Block::Text(TextBlock::new(vec![Inline::new(text, body())]))
    }

    fn line_texts<'a>(line: &Line<'a>) -> Vec<&'a str> {
        line.chunks.iter().map(|c| c.text).collect()
    }

    #[test]
    fn test_chunk_inline() {
        let inline = Inline::new("a  b\tc", body());
        let chunks = chunk_inline(&inline);
        let texts = chunks.iter().map(|c| c.text).collect::<Vec<_>>();
        assert_eq!(texts, vec!["a", " ", " ", "b", " ", "c"]);
        assert!(chunks[2].is_whitespace);
        assert!((chunks[0].width - 5.56).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_at_whitespace() {
        let block = TextBlock::new(vec![Inline::new("aaa bbb ccc", body())]);
        let lines = layout_block(40.0, &block);

        assert_eq!(lines.len(), 2);
        assert_eq!(line_texts(&lines[0]), vec!["aaa", " ", "bbb"]);
        assert_eq!(line_texts(&lines[1]), vec!["ccc"]);
        assert!(lines[0].width <= 40.0);
    }

    #[test]
    fn test_script_stays_with_word() {
        let block = TextBlock::new(vec![
            Inline::new("aaa bbb x", body()),
            Inline::new("2", body().script(ScriptKind::Superscript)),
        ]);
        let lines = layout_block(46.0, &block);

        assert_eq!(lines.len(), 2);
        assert_eq!(line_texts(&lines[1]), vec!["x", "2"]);
        assert!(lines[1].text_metrics.ascent > body().font.metrics().ascent * 10.0);
    }

    #[test]
    fn test_long_word_overflows() {
        let block = TextBlock::new(vec![Inline::new("aaaaaaaaaaaa", body())]);
        let lines = layout_block(20.0, &block);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_pagination() {
        let blocks = (0..20).map(|_| paragraph("line")).collect();
        let document = document(blocks);
        let pages = layout_document(&document);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].lines.len(), 14);
        assert_eq!(pages[1].lines.len(), 6);

        let first = &pages[1].lines[0];
        assert!((first.origin.y - (180.0 - first.text_metrics.ascent)).abs() < 1e-4);
        for page in &pages {
            for line in &page.lines {
                assert!(line.origin.y + line.text_metrics.descent >= 20.0);
            }
        }
    }

    #[test]
    fn test_page_break() {
        let document = document(vec![
            Block::PageBreak,
            paragraph("one"),
            Block::PageBreak,
            paragraph("two"),
        ]);
        let pages = layout_document(&document);

        assert_eq!(pages.len(), 2);
        assert_eq!(line_texts(&pages[0].lines[0]), vec!["one"]);
        assert_eq!(line_texts(&pages[1].lines[0]), vec!["two"]);
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let document = document(Vec::new());
        let pages = layout_document(&document);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn test_center_and_indent() {
        let document = document(vec![
            Block::Text(TextBlock::new(vec![Inline::new("ab", body())]).align(TextAlign::Center)),
            Block::Text(TextBlock::new(vec![Inline::new("ab", body())]).indent(15.0)),
        ]);
        let pages = layout_document(&document);
        let lines = &pages[0].lines;

        let expected = 20.0 + 0.5 * (160.0 - lines[0].width);
        assert!((lines[0].origin.x - expected).abs() < 1e-4);
        assert!((lines[1].origin.x - 35.0).abs() < 1e-4);
    }

    #[test]
    fn test_space_before_and_space_blocks() {
        let plain = document(vec![paragraph("a"), paragraph("b")]);
        let spaced = document(vec![
            paragraph("a"),
            Block::Space(10.0),
            Block::Text(TextBlock::new(vec![Inline::new("b", body())]).space_before(5.0)),
        ]);
        let plain = layout_document(&plain);
        let spaced = layout_document(&spaced);

        let gap = |page: &Page| page.lines[0].origin.y - page.lines[1].origin.y;
        assert!((gap(&spaced[0]) - gap(&plain[0]) - 15.0).abs() < 1e-4);
    }
}
