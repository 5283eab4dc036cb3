use std::fmt::{self, Write};

use glam::Vec2;

use crate::{encoding::EncodedStr, font::StandardFont};

pub mod page;

const HEADER: &str = "%PDF-1.7\n";

/// Writes a PDF file object by object, then the cross-reference table.
///
/// Everything written is ASCII (strings are hex encoded), so offsets into
/// `content` are byte offsets.
pub struct PDFBuilder {
    content: String,
    xref: Vec<XRefEntry>,
    pages_ref: Ref,
    page_refs: Vec<Ref>,
    root: Ref,
    info: Option<Ref>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Ref(u32, u16);

#[derive(Debug)]
enum XRefEntry {
    Free { next_free: u32, generation: u16 },
    InUse { offset: u32, generation: u16 },
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.0, self.1)
    }
}

impl Default for PDFBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PDFBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            content: HEADER.to_owned(),
            xref: vec![XRefEntry::Free {
                // Will be filled in when XREF table is generated
                next_free: 0,
                generation: u16::MAX,
            }],
            pages_ref: Ref::default(),
            page_refs: Vec::new(),
            root: Ref::default(),
            info: None,
        };
        builder.pages_ref = builder.preallocate_object();
        builder
    }

    fn preallocate_object(&mut self) -> Ref {
        let id = self.xref.len() as u32;
        self.xref.push(XRefEntry::Free {
            next_free: 0,
            generation: u16::MAX,
        });
        Ref(id, 0)
    }

    fn start_object(&mut self) -> Result<Ref, fmt::Error> {
        let ref_ = self.preallocate_object();
        self.start_object_with_ref(ref_)?;
        Ok(ref_)
    }

    fn start_object_with_ref(&mut self, ref_: Ref) -> fmt::Result {
        let Ref(id, generation) = ref_;

        let offset = self.content.len() as u32;
        self.xref[id as usize] = XRefEntry::InUse { offset, generation };

        writeln!(self.content, "{id} {generation} obj")
    }

    fn end_object(&mut self) -> fmt::Result {
        writeln!(self.content, "endobj")
    }

    fn stream_object(&mut self, content: &str) -> Result<Ref, fmt::Error> {
        let ref_ = self.start_object()?;
        writeln!(self.content, "<< /Length {} >>", content.len())?;
        writeln!(self.content, "stream")?;
        self.content.push_str(content);
        write!(self.content, "\nendstream\n")?;
        self.end_object()?;
        Ok(ref_)
    }

    fn font(&mut self, font: StandardFont) -> Result<Ref, fmt::Error> {
        let font_ref = self.start_object()?;
        write!(
            self.content,
            "<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} /Encoding /WinAnsiEncoding >>",
            base_font = font.base_font(),
        )?;
        self.end_object()?;
        Ok(font_ref)
    }

    pub fn page(&mut self, content: &str) -> fmt::Result {
        let contents = self.stream_object(content)?;

        let page = self.start_object()?;
        write!(
            self.content,
            "<< /Type /Page /Parent {pages} /Contents {contents} >>",
            pages = self.pages_ref,
        )?;
        self.end_object()?;

        self.page_refs.push(page);
        Ok(())
    }

    /// Records the document title in the information dictionary.
    pub fn info(&mut self, title: &str) -> fmt::Result {
        let info = self.start_object()?;
        write!(
            self.content,
            "<< /Title {title} /Producer (worksheet) >>",
            title = EncodedStr(title),
        )?;
        self.end_object()?;

        self.info = Some(info);
        Ok(())
    }

    /// Writes the page tree, with the standard fonts as shared resources,
    /// and the document catalog. Call after the last page.
    pub fn catalog(&mut self, page_size: Vec2) -> fmt::Result {
        let font_refs = StandardFont::ALL
            .into_iter()
            .map(|font| Ok((font.resource_name(), self.font(font)?)))
            .collect::<Result<Vec<_>, fmt::Error>>()?;

        self.start_object_with_ref(self.pages_ref)?;
        write!(self.content, "<< /Type /Pages /Kids [ ")?;
        for page_ref in &self.page_refs {
            write!(self.content, "{page_ref} ")?;
        }
        write!(
            self.content,
            "] /Count {page_count} ",
            page_count = self.page_refs.len(),
        )?;
        write!(self.content, "/Resources << /Font << ")?;
        for (name, font_ref) in font_refs {
            write!(self.content, "/{name} {font_ref} ")?;
        }
        write!(
            self.content,
            ">> >> /MediaBox [ 0 0 {width} {height} ] >>",
            width = page_size.x,
            height = page_size.y,
        )?;
        self.end_object()?;

        let catalog = self.start_object()?;
        write!(
            self.content,
            "<< /Type /Catalog /Pages {pages} >>",
            pages = self.pages_ref,
        )?;
        self.end_object()?;

        self.root = catalog;
        Ok(())
    }

    pub fn build(self) -> Result<Vec<u8>, fmt::Error> {
        let Self {
            mut content,
            mut xref,
            root,
            info,
            ..
        } = self;

        let xref_size = xref.len() as u32;
        xref[0] = XRefEntry::Free {
            next_free: xref_size,
            generation: u16::MAX,
        };

        let start_xref = content.len();
        writeln!(content, "xref")?;
        writeln!(content, "0 {xref_size}")?;
        for entry in xref {
            let (n, g, c) = match entry {
                XRefEntry::Free {
                    next_free,
                    generation,
                } => (next_free, generation, 'f'),
                XRefEntry::InUse { offset, generation } => (offset, generation, 'n'),
            };
            write!(content, "{n:010} {g:05} {c}\r\n")?;
        }

        writeln!(content, "trailer")?;
        write!(content, "<< /Size {xref_size} /Root {root} ")?;
        if let Some(info) = info {
            write!(content, "/Info {info} ")?;
        }
        writeln!(content, ">>")?;

        writeln!(content, "startxref")?;
        writeln!(content, "{start_xref}")?;
        writeln!(content, "%%EOF")?;

        Ok(content.into_bytes())
    }
}
