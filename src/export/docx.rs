//! Word worksheet: title heading, numbered questions, and an answer key
//! after a page break. Every page carries the title in its header and a
//! `Page n of m` footer.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, FieldCharType, Footer, Header,
    IndentLevel, InstrNUMPAGES, InstrPAGE, InstrText, Level, LevelJc, LevelText, NumberFormat,
    Numbering, NumberingId, Paragraph, Run, Start, Style, StyleType, VertAlignType,
};

use crate::{
    error::{Error, Result},
    notation::{parse_notation, ScriptKind, Segment},
    question::Question,
};

use super::{ExportSettings, MISSING_TEXT, NOT_AVAILABLE};

/// Sizes are in half points.
const BODY_SIZE: usize = 22;
const HEADING1_SIZE: usize = 32;
const HEADING2_SIZE: usize = 26;

const QUESTION_NUMBERING: usize = 1;
const ANSWER_NUMBERING: usize = 2;

pub fn render(questions: &[&Question], settings: &ExportSettings) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    build_docx(questions, settings)
        .build()
        .pack(&mut buf)
        .map_err(|err| Error::Docx(err.to_string()))?;
    Ok(buf.into_inner())
}

pub fn build_docx(questions: &[&Question], settings: &ExportSettings) -> Docx {
    let title = settings.normalized_title();

    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "Heading 1", HEADING1_SIZE))
        .add_style(heading_style("Heading2", "Heading 2", HEADING2_SIZE))
        .add_abstract_numbering(decimal_numbering(QUESTION_NUMBERING))
        .add_numbering(Numbering::new(QUESTION_NUMBERING, QUESTION_NUMBERING))
        .add_abstract_numbering(decimal_numbering(ANSWER_NUMBERING))
        .add_numbering(Numbering::new(ANSWER_NUMBERING, ANSWER_NUMBERING))
        .header(Header::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(title))))
        .footer(Footer::new().add_paragraph(page_footer()))
        .add_paragraph(heading("Heading1", title).align(AlignmentType::Center))
        .add_paragraph(heading("Heading2", "Questions"));

    for question in questions {
        let text = question.text().unwrap_or(MISSING_TEXT);
        docx = docx.add_paragraph(numbered(text, QUESTION_NUMBERING));
    }

    if settings.include_answer_key {
        docx = docx
            .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
            .add_paragraph(heading("Heading1", "Answer Key").align(AlignmentType::Center));
        for question in questions {
            let answer = question.correct_answer().unwrap_or(NOT_AVAILABLE);
            docx = docx.add_paragraph(numbered(answer, ANSWER_NUMBERING));
        }
    }

    docx
}

fn heading_style(id: &str, name: &str, size: usize) -> Style {
    Style::new(id, StyleType::Paragraph)
        .name(name)
        .size(size)
        .bold()
}

fn heading(style: &str, text: &str) -> Paragraph {
    Paragraph::new()
        .style(style)
        .add_run(Run::new().add_text(text))
}

fn decimal_numbering(id: usize) -> AbstractNumbering {
    AbstractNumbering::new(id).add_level(Level::new(
        0,
        Start::new(1),
        NumberFormat::new("decimal"),
        LevelText::new("%1."),
        LevelJc::new("left"),
    ))
}

/// A numbered list item with notation scripts set as Word superscripts and
/// subscripts.
fn numbered(text: &str, numbering: usize) -> Paragraph {
    parse_notation(Some(text))
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => Run::new().add_text(text).size(BODY_SIZE),
            Segment::Script(script) => {
                let align = match script.kind {
                    ScriptKind::Superscript => VertAlignType::SuperScript,
                    ScriptKind::Subscript => VertAlignType::SubScript,
                };
                let mut run = Run::new().add_text(script.content).size(BODY_SIZE);
                run.run_property = run.run_property.vert_align(align);
                run
            }
        })
        .fold(
            Paragraph::new().numbering(NumberingId::new(numbering), IndentLevel::new(0)),
            Paragraph::add_run,
        )
}

fn page_footer() -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Right)
        .add_run(Run::new().add_text("Page "))
        .add_run(field(InstrText::PAGE(InstrPAGE::new())))
        .add_run(Run::new().add_text(" of "))
        .add_run(field(InstrText::NUMPAGES(InstrNUMPAGES::new())))
}

fn field(instr: InstrText) -> Run {
    Run::new()
        .add_field_char(FieldCharType::Begin, false)
        .add_instr_text(instr)
        .add_field_char(FieldCharType::Separate, false)
        .add_text("1")
        .add_field_char(FieldCharType::End, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            id: "q1".to_owned(),
            question_text: Some("Simplify x^2 + y_1".to_owned()),
            answer: Some("2x^2".to_owned()),
            ..Question::default()
        }
    }

    fn document_xml(docx: Docx) -> String {
        String::from_utf8(docx.build().document).unwrap()
    }

    #[test]
    fn test_questions_and_answer_key() {
        let question = question();
        let xml = document_xml(build_docx(&[&question], &ExportSettings::default()));

        assert!(xml.contains(">Math Practice</w:t>"));
        assert!(xml.contains(">Questions</w:t>"));
        assert!(xml.contains(">Simplify x</w:t>"));
        assert!(xml.contains(r#"w:vertAlign w:val="superscript""#));
        assert!(xml.contains(r#"w:vertAlign w:val="subscript""#));
        assert!(xml.contains(r#"w:br w:type="page""#));
        assert!(xml.contains(">Answer Key</w:t>"));
        assert!(xml.contains(r#"w:numId w:val="2""#));
    }

    #[test]
    fn test_without_answer_key() {
        let question = question();
        let settings = ExportSettings {
            include_answer_key: false,
            ..ExportSettings::default()
        };
        let xml = document_xml(build_docx(&[&question], &settings));

        assert!(xml.contains(r#"w:numId w:val="1""#));
        assert!(!xml.contains("Answer Key"));
        assert!(!xml.contains(r#"w:br w:type="page""#));
    }

    #[test]
    fn test_render_is_a_zip_package() {
        let question = question();
        let bytes = render(&[&question], &ExportSettings::default()).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }
}
