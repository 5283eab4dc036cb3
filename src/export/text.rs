use std::fmt::{self, Write};

use crate::{
    notation::{parse_notation, ScriptKind, Segment},
    question::Question,
};

use super::{ExportSettings, MISSING_TEXT, NOT_AVAILABLE};

/// Plain text worksheet: numbered questions with an answer line each, then
/// an optional answer key.
pub fn render(questions: &[&Question], settings: &ExportSettings) -> Result<String, fmt::Error> {
    let mut s = String::new();
    let title = settings.normalized_title();

    write_heading(&mut s, title)?;
    for (i, question) in questions.iter().enumerate() {
        let text = question.text().unwrap_or(MISSING_TEXT);
        writeln!(s)?;
        writeln!(s, "{}. {}", i + 1, render_notation(text))?;
        writeln!(s, "   Answer: ____________________")?;
    }

    if settings.include_answer_key {
        writeln!(s)?;
        write_heading(&mut s, "Answer Key")?;
        writeln!(s)?;
        for (i, question) in questions.iter().enumerate() {
            let answer = question.correct_answer().unwrap_or(NOT_AVAILABLE);
            writeln!(s, "{}. {}", i + 1, render_notation(answer))?;
        }
    }

    Ok(s)
}

fn write_heading(s: &mut String, heading: &str) -> fmt::Result {
    writeln!(s, "{heading}")?;
    writeln!(s, "{}", "=".repeat(heading.chars().count()))
}

/// Flattens notation markup for plain text. Scripts become Unicode
/// superscript or subscript characters where every character has one, and
/// `^(...)` or `_(...)` otherwise.
pub fn render_notation(text: &str) -> String {
    parse_notation(Some(text))
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text.to_owned(),
            Segment::Script(script) => script
                .content
                .chars()
                .map(|c| script_char(script.kind, c))
                .collect::<Option<String>>()
                .unwrap_or_else(|| format!("{}({})", script.kind.trigger(), script.content)),
        })
        .collect()
}

fn script_char(kind: ScriptKind, c: char) -> Option<char> {
    match kind {
        ScriptKind::Superscript => superscript_char(c),
        ScriptKind::Subscript => subscript_char(c),
    }
}

fn superscript_char(c: char) -> Option<char> {
    Some(match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'i' => 'ⁱ',
        'n' => 'ⁿ',
        _ => return None,
    })
}

fn subscript_char(c: char) -> Option<char> {
    Some(match c {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'h' => 'ₕ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'o' => 'ₒ',
        'p' => 'ₚ',
        's' => 'ₛ',
        't' => 'ₜ',
        'x' => 'ₓ',
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_notation() {
        assert_eq!(render_notation("x^2 + y_1"), "x² + y₁");
        assert_eq!(render_notation("z^(n+1)"), "zⁿ⁺¹");
        assert_eq!(render_notation("a_{n-1}"), "aₙ₋₁");
        assert_eq!(render_notation("e^{i*pi}"), "e^(i*pi)");
        assert_eq!(render_notation("x^(2"), "x^(2");
        assert_eq!(render_notation(""), "");
    }
}
