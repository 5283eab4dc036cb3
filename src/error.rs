use std::{fmt, io};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid question bank: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to format document")]
    Format(#[from] fmt::Error),
    #[error("failed to package docx: {0}")]
    Docx(String),
    #[error("no questions selected")]
    EmptySelection,
    #[error("unknown question id: {0}")]
    UnknownQuestion(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
