use std::fmt;

use glam::vec2;

use crate::{
    document::{Block, Document, Inline, Style, TextAlign, TextBlock},
    font::StandardFont,
    generate_pdf,
    notation::{parse_notation, Segment},
    pdf::page::{PAGE_HEIGHT, PAGE_WIDTH},
    question::Question,
};

use super::{ExportSettings, MISSING_TEXT, NOT_AVAILABLE};

const MARGIN: f32 = 72.0;
const TITLE_SIZE: f32 = 16.0;
const QUESTION_SIZE: f32 = 11.0;
const ANSWER_SIZE: f32 = 10.0;
const META_SIZE: f32 = 9.0;
const ANSWER_INDENT: f32 = 15.0;
/// Room left under each question for the student's working.
const ANSWER_SPACE: f32 = 35.0;
const QUESTION_GAP: f32 = 15.0;

pub fn render(questions: &[&Question], settings: &ExportSettings) -> Result<Vec<u8>, fmt::Error> {
    let document = build_document(questions, settings);
    generate_pdf(&document)
}

/// Lays the worksheet out as blocks: the questions, then the answer key
/// on a new page.
pub fn build_document<'a>(questions: &[&'a Question], settings: &ExportSettings) -> Document<'a> {
    let title = settings.normalized_title();
    let regular = |size: f32| Style::new(StandardFont::Helvetica, size);
    let bold = |size: f32| Style::new(StandardFont::HelveticaBold, size);

    let mut blocks = vec![heading(title.to_owned())];
    for (i, &question) in questions.iter().enumerate() {
        let text = question.text().unwrap_or(MISSING_TEXT);
        let mut inlines = vec![Inline::new(format!("{}. ", i + 1), bold(QUESTION_SIZE))];
        inlines.extend(notation_inlines(text, regular(QUESTION_SIZE)));
        blocks.push(Block::Text(
            TextBlock::new(inlines).space_before(QUESTION_GAP),
        ));

        let answer_line = Inline::new("Answer: ____________________", regular(ANSWER_SIZE));
        blocks.push(Block::Text(
            TextBlock::new(vec![answer_line])
                .indent(ANSWER_INDENT)
                .space_before(6.0),
        ));
        blocks.push(Block::Space(ANSWER_SPACE));
    }

    if settings.include_answer_key {
        blocks.push(Block::PageBreak);
        blocks.push(heading(format!("{title} - Answer Key")));

        for (i, &question) in questions.iter().enumerate() {
            let answer = question.correct_answer().unwrap_or(NOT_AVAILABLE);
            let mut inlines = vec![Inline::new(format!("{}. ", i + 1), bold(QUESTION_SIZE))];
            inlines.extend(notation_inlines(answer, bold(ANSWER_SIZE)));
            blocks.push(Block::Text(
                TextBlock::new(inlines).space_before(QUESTION_GAP),
            ));

            blocks.push(Block::Text(
                TextBlock::new(vec![Inline::new(meta_line(question), regular(META_SIZE))])
                    .indent(ANSWER_INDENT)
                    .space_before(4.0),
            ));
        }
    }

    Document {
        blocks,
        page_size: vec2(PAGE_WIDTH, PAGE_HEIGHT),
        margin: MARGIN,
        page_numbers: true,
        title: Some(title.to_owned()),
    }
}

fn heading<'a>(text: String) -> Block<'a> {
    let style = Style::new(StandardFont::HelveticaBold, TITLE_SIZE);
    Block::Text(TextBlock::new(vec![Inline::new(text, style)]).align(TextAlign::Center))
}

/// One inline per notation segment, scripts raised or lowered from `style`.
fn notation_inlines(text: &str, style: Style) -> impl Iterator<Item = Inline<'_>> {
    parse_notation(Some(text))
        .into_iter()
        .map(move |segment| match segment {
            Segment::Literal(text) => Inline::new(text, style),
            Segment::Script(script) => Inline::new(script.content, style.script(script.kind)),
        })
}

fn meta_line(question: &Question) -> String {
    let dok = question
        .dok
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |dok| dok.to_string());
    let topic = question.topic_title().unwrap_or(NOT_AVAILABLE);

    let mut line = format!("DOK: {dok} | Topic: {topic}");
    if let Some(standard) = question.standard_label() {
        line.push_str(" | Standard: ");
        line.push_str(standard);
    }
    line
}
