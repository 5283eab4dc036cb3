//! Worksheet documents built from a selection of questions.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    error::{Error, Result},
    question::Question,
};

pub mod docx;
pub mod pdf;
pub mod text;

pub(crate) const MISSING_TEXT: &str = "[No Question Text]";
pub(crate) const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Docx,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub title: String,
    pub format: ExportFormat,
    /// Appends an answer key after the questions.
    pub include_answer_key: bool,
}

/// A rendered document, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
            ExportFormat::Text => "txt",
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            title: "Math Practice".to_owned(),
            format: ExportFormat::default(),
            include_answer_key: true,
        }
    }
}

impl ExportSettings {
    /// The trimmed title, or `Untitled Document` when it is blank.
    pub fn normalized_title(&self) -> &str {
        match self.title.trim() {
            "" => "Untitled Document",
            title => title,
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "{}.{}",
            sanitize_filename(self.normalized_title()),
            self.format.extension(),
        )
    }
}

impl Export {
    /// Writes the document into `dir` and returns the path written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "wrote worksheet");
        Ok(path)
    }
}

/// Lower-cases `title` and replaces everything but ASCII letters and digits
/// with `_`.
pub fn sanitize_filename(title: &str) -> String {
    let name = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect::<String>();

    if name.is_empty() {
        "document".to_owned()
    } else {
        name
    }
}

pub fn export(questions: &[&Question], settings: &ExportSettings) -> Result<Export> {
    if questions.is_empty() {
        return Err(Error::EmptySelection);
    }

    info!(
        title = settings.normalized_title(),
        format = ?settings.format,
        questions = questions.len(),
        answer_key = settings.include_answer_key,
        "exporting worksheet"
    );
    let bytes = match settings.format {
        ExportFormat::Pdf => pdf::render(questions, settings)?,
        ExportFormat::Docx => docx::render(questions, settings)?,
        ExportFormat::Text => text::render(questions, settings)?.into_bytes(),
    };

    Ok(Export {
        file_name: settings.file_name(),
        bytes,
    })
}
