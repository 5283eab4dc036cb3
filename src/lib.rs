use std::fmt;

use glam::vec2;

use crate::{
    document::{Document, Style},
    font::StandardFont,
    pdf::{page::PageBuilder, PDFBuilder},
    text_layout::layout_document,
};

pub mod analysis;
pub mod document;
pub mod encoding;
pub mod error;
pub mod export;
pub mod filter;
pub mod font;
pub mod notation;
pub mod pdf;
pub mod question;
pub mod selection;
pub mod text_layout;

pub use error::{Error, Result};

const FOOTER_FONT_SIZE: f32 = 9.0;

pub fn generate_pdf(document: &Document) -> Result<Vec<u8>, fmt::Error> {
    let pages = layout_document(document);
    let page_count = pages.len();

    let mut pdf_builder = PDFBuilder::new();
    for (i, page) in pages.iter().enumerate() {
        let mut builder = PageBuilder::new();
        builder.text(&page.lines)?;

        if document.page_numbers {
            let label = format!("Page {} of {}", i + 1, page_count);
            let style = Style::new(StandardFont::Helvetica, FOOTER_FONT_SIZE);
            let width = style.font.text_width(&label, style.font_size);
            let position = vec2(
                document.page_size.x - document.margin - width,
                document.margin,
            );
            builder.text_at(style, position, &label)?;
        }

        pdf_builder.page(&builder.build())?;
    }

    if let Some(title) = &document.title {
        pdf_builder.info(title)?;
    }
    pdf_builder.catalog(document.page_size)?;
    pdf_builder.build()
}
