//! WinAnsi encoding for the standard fonts.

use std::fmt;

use tracing::warn;

/// Characters WinAnsi places in 0x80..=0x9F, indexed by `code - 0x80`.
/// Unassigned slots hold `'\0'`.
const WIN_ANSI_HIGH: [char; 32] = [
    '€', '\0', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', '\0', 'Ž', '\0',
    '\0', '‘', '’', '“', '”', '•', '–', '—', '˜', '™', 'š', '›', 'œ', '\0', 'ž', 'Ÿ',
];

const REPLACEMENT: u8 = b'?';

/// Maps `c` to its WinAnsi code. Tabs and line breaks count as spaces.
pub fn encode_char(c: char) -> Option<u8> {
    match c {
        '\t' | '\n' | '\r' => Some(b' '),
        ' '..='~' | '\u{A0}'..='\u{FF}' => Some(c as u8),
        '\0' => None,
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&x| x == c)
            .map(|i| 0x80 + i as u8),
    }
}

/// Writes a string as a PDF hex string in WinAnsi encoding. Characters
/// outside the encoding are written as `?`.
pub struct EncodedStr<'a>(pub &'a str);

impl fmt::Display for EncodedStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;

        let Self(s) = self;
        for c in s.chars() {
            let code = encode_char(c).unwrap_or_else(|| {
                warn!(character = ?c, "character not in WinAnsi encoding, writing '?'");
                REPLACEMENT
            });
            write!(f, "{:02x}", code)?;
        }

        write!(f, ">")?;
        Ok(())
    }
}
