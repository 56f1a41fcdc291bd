//! Standard 14 font selection, metrics and WinAnsi encoding.

/// Widths of Helvetica glyphs for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Widths of Helvetica-Bold glyphs for ASCII 32..=126, in 1/1000 em.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// Characters outside ASCII that WinAnsiEncoding places in 0x80..=0x9F.
const WIN_ANSI_EXTRAS: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// One of the standard Type1 faces used for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl Font {
    /// Every face, in resource order.
    pub const ALL: [Font; 8] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::HelveticaOblique,
        Font::HelveticaBoldOblique,
        Font::Courier,
        Font::CourierBold,
        Font::CourierOblique,
        Font::CourierBoldOblique,
    ];

    /// Pick a face for the given traits.
    pub fn select(bold: bool, italic: bool, monospace: bool) -> Self {
        match (monospace, bold, italic) {
            (false, false, false) => Font::Helvetica,
            (false, true, false) => Font::HelveticaBold,
            (false, false, true) => Font::HelveticaOblique,
            (false, true, true) => Font::HelveticaBoldOblique,
            (true, false, false) => Font::Courier,
            (true, true, false) => Font::CourierBold,
            (true, false, true) => Font::CourierOblique,
            (true, true, true) => Font::CourierBoldOblique,
        }
    }

    /// PostScript name written as `BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
            Font::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Font::Courier => "Courier",
            Font::CourierBold => "Courier-Bold",
            Font::CourierOblique => "Courier-Oblique",
            Font::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Name of the font in page resource dictionaries.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
            Font::HelveticaBoldOblique => "F4",
            Font::Courier => "F5",
            Font::CourierBold => "F6",
            Font::CourierOblique => "F7",
            Font::CourierBoldOblique => "F8",
        }
    }

    fn is_bold(self) -> bool {
        matches!(
            self,
            Font::HelveticaBold
                | Font::HelveticaBoldOblique
                | Font::CourierBold
                | Font::CourierBoldOblique
        )
    }

    fn is_monospace(self) -> bool {
        matches!(
            self,
            Font::Courier | Font::CourierBold | Font::CourierOblique | Font::CourierBoldOblique
        )
    }

    /// Advance width of a character in 1/1000 em.
    pub fn char_width(self, c: char) -> u16 {
        if self.is_monospace() {
            return 600;
        }
        let table = if self.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };
        match c {
            ' '..='~' => table[c as usize - 32],
            '\u{00A0}' => table[0],
            '\u{2022}' => 350,
            '\u{2013}' => 556,
            '\u{2014}' | '\u{2026}' => 1000,
            '\u{2018}' | '\u{2019}' => 222,
            '\u{201C}' | '\u{201D}' => 333,
            _ => 556,
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }
}

/// Encode text for a simple font using WinAnsiEncoding. Characters the
/// encoding lacks become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => c as u8,
        _ => WIN_ANSI_EXTRAS
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, b)| *b)
            .unwrap_or(b'?'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        assert_eq!(Font::select(false, false, false), Font::Helvetica);
        assert_eq!(Font::select(true, true, false), Font::HelveticaBoldOblique);
        assert_eq!(Font::select(false, false, true), Font::Courier);
        assert_eq!(Font::HelveticaBold.base_font(), "Helvetica-Bold");
    }

    #[test]
    fn test_widths() {
        assert_eq!(Font::Helvetica.char_width('a'), 556);
        assert_eq!(Font::Helvetica.char_width('i'), 222);
        assert_eq!(Font::HelveticaBold.char_width('i'), 278);
        assert_eq!(Font::Courier.char_width('i'), 600);
        // "Page" = 667 + 556 + 556 + 556
        assert!((Font::Helvetica.text_width("Page", 10.0) - 23.35).abs() < 0.001);
    }

    #[test]
    fn test_win_ansi() {
        assert_eq!(to_win_ansi("A\u{00E9}\u{2022}\u{20AC}"), vec![b'A', 0xE9, 0x95, 0x80]);
        assert_eq!(to_win_ansi("\u{4E2D}"), vec![b'?']);
    }
}
