use std::ops::Mul;

use crate::encoding::encode_char;

/// One of the PDF standard fonts. Readers ship these, so nothing is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

// Advance widths in thousandths of an em for ' '..='~', from the Adobe AFM files.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for encodable characters outside printable ASCII.
const FALLBACK_WIDTH: u16 = 556;

impl StandardFont {
    pub const ALL: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// The name the font is registered under in page resources.
    pub fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "F1",
            StandardFont::HelveticaBold => "F2",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of `c` in thousandths of an em. Characters that cannot
    /// be encoded are measured as the `?` they are written as.
    pub fn char_width(self, c: char) -> u16 {
        match encode_char(c) {
            Some(code @ 0x20..=0x7E) => self.widths()[(code - 0x20) as usize],
            Some(_) => FALLBACK_WIDTH,
            None => self.widths()[(b'?' - 0x20) as usize],
        }
    }

    /// Width of `s` in points at `font_size`.
    pub fn text_width(self, s: &str, font_size: f32) -> f32 {
        let milli_em = s.chars().map(|c| self.char_width(c) as u32).sum::<u32>();
        milli_em as f32 * font_size / 1000.0
    }

    pub fn metrics(self) -> TextMetrics {
        // Both faces share the Helvetica vertical metrics.
        TextMetrics {
            ascent: 0.718,
            descent: -0.207,
            line_gap: 0.2,
        }
    }
}

impl TextMetrics {
    pub fn max(&self, other: Self) -> Self {
        Self {
            ascent: self.ascent.max(other.ascent), // Choose the uppermost ascent.
            descent: self.descent.min(other.descent), // Choose the lowermost descent.
            line_gap: self.line_gap.max(other.line_gap), // Choose the largest line gap.
        }
    }

    pub fn line_height(&self) -> f32 {
        self.line_gap + self.ascent - self.descent
    }

    /// Moves the metrics up by `rise` points.
    pub fn raised(self, rise: f32) -> Self {
        Self {
            ascent: self.ascent + rise,
            descent: self.descent + rise,
            line_gap: self.line_gap,
        }
    }
}

impl Mul<f32> for TextMetrics {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self {
            ascent: self.ascent * rhs,
            descent: self.descent * rhs,
            line_gap: self.line_gap * rhs,
        }
    }
}
