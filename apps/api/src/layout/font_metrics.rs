//! Static font-metric tables for the PDF base-14 faces used by the letter templates.
//!
//! Widths are the standard Adobe AFM advance widths in 1/1000 em, so a string
//! measured here matches what a PDF viewer draws with the built-in fonts.
//! Text is measured through the same WinAnsi mapping the renderer encodes
//! with: ASCII 0x20..=0x7E, the upper half 0x80..=0xFF, and `?` for anything
//! WinAnsi cannot express.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Faces
// ────────────────────────────────────────────────────────────────────────────

/// A font family offered by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    Helvetica,
    Times,
}

/// A concrete face: family plus weight. Maps 1:1 to a PDF base-14 font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
}

impl FontFamily {
    pub fn regular(self) -> FontFace {
        match self {
            FontFamily::Helvetica => FontFace::Helvetica,
            FontFamily::Times => FontFace::TimesRoman,
        }
    }

    pub fn bold(self) -> FontFace {
        match self {
            FontFamily::Helvetica => FontFace::HelveticaBold,
            FontFamily::Times => FontFace::TimesBold,
        }
    }
}

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Helvetica,
        FontFace::HelveticaBold,
        FontFace::TimesRoman,
        FontFace::TimesBold,
    ];

    /// The PostScript name of the base-14 font.
    pub fn base_font_name(self) -> &'static str {
        match self {
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
            FontFace::TimesRoman => "Times-Roman",
            FontFace::TimesBold => "Times-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement service
// ────────────────────────────────────────────────────────────────────────────

/// Measures and wraps text. The layout engine only talks to this trait.
pub trait TextMeasurer: Send + Sync {
    /// Rendered width of `text` in points.
    fn text_width(&self, text: &str, face: FontFace, size_pt: f32) -> f32;

    /// Splits `text` into lines no wider than `max_width` points.
    ///
    /// Greedy word wrap; a word wider than a whole line is broken between
    /// characters. Whitespace-only input yields no lines.
    fn split_to_width(&self, text: &str, face: FontFace, size_pt: f32, max_width: f32) -> Vec<String> {
        let space_w = self.text_width(" ", face, size_pt);
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = self.text_width(word, face, size_pt);

            if word_w > max_width {
                // Flush the partial line, then hard-break the long word.
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut chunk = String::new();
                let mut chunk_w = 0.0_f32;
                for ch in word.chars() {
                    let mut buf = [0u8; 4];
                    let ch_w = self.text_width(ch.encode_utf8(&mut buf), face, size_pt);
                    if !chunk.is_empty() && chunk_w + ch_w > max_width {
                        lines.push(std::mem::take(&mut chunk));
                        chunk_w = 0.0;
                    }
                    chunk.push(ch);
                    chunk_w += ch_w;
                }
                current = chunk;
                current_width = chunk_w;
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// `TextMeasurer` backed by the static AFM tables below.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontMetrics;

impl TextMeasurer for StandardFontMetrics {
    fn text_width(&self, text: &str, face: FontFace, size_pt: f32) -> f32 {
        get_metrics(face).measure_str(text) * size_pt
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Maps a char to its WinAnsiEncoding byte; anything unmappable becomes `?`.
pub fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        '\t' => b' ',
        ' '..='~' => ch as u8,
        '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => b'?',
    }
}

/// Static character-width table for a face, indexed by WinAnsi byte.
///
/// `ascii[i]` = advance of byte `(i + 0x20)`; `upper[i]` = advance of byte
/// `(i + 0x80)`. Slots WinAnsi leaves undefined hold 0 and are never hit,
/// since `win_ansi_byte` never produces them.
///
/// ASCII slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub face: FontFace,
    ascii: [u16; 95],
    upper: [u16; 128],
}

impl FontMetricTable {
    /// Advance of one WinAnsi byte in 1/1000 em.
    fn byte_width(&self, byte: u8) -> u16 {
        match byte {
            0x20..=0x7e => self.ascii[usize::from(byte - 0x20)],
            0x80..=0xff => self.upper[usize::from(byte - 0x80)],
            _ => self.ascii[usize::from(b'?' - 0x20)],
        }
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        let units: u32 = s
            .chars()
            .map(|c| u32::from(self.byte_width(win_ansi_byte(c))))
            .sum();
        units as f32 / 1000.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::Helvetica,
    #[rustfmt::skip]
    ascii: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    #[rustfmt::skip]
    upper: [
        // 0x80..=0xFF, sixteen per row
        556,   0, 222, 556, 333,1000, 556, 556, 333,1000, 667, 333,1000,   0, 611,   0,
          0, 222, 222, 333, 333, 350, 556,1000, 333,1000, 500, 333, 944,   0, 500, 667,
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        667, 667, 667, 667, 667, 667,1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::HelveticaBold,
    #[rustfmt::skip]
    ascii: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    #[rustfmt::skip]
    upper: [
        // 0x80..=0xFF, sixteen per row
        556,   0, 278, 556, 500,1000, 556, 556, 333,1000, 667, 333,1000,   0, 611,   0,
          0, 278, 278, 500, 500, 350, 556,1000, 333,1000, 556, 333, 944,   0, 500, 667,
        278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        722, 722, 722, 722, 722, 722,1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
        611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
    ],
};

static TIMES_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::TimesRoman,
    #[rustfmt::skip]
    ascii: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        278, 278, 564, 564, 564, 444, 921,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 469, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
        // {    |    }    ~
        480, 200, 480, 541,
    ],
    #[rustfmt::skip]
    upper: [
        // 0x80..=0xFF, sixteen per row
        500,   0, 333, 500, 444,1000, 500, 500, 333,1000, 556, 333, 889,   0, 611,   0,
          0, 333, 333, 444, 444, 350, 500,1000, 333, 980, 389, 333, 722,   0, 444, 722,
        250, 333, 500, 500, 500, 500, 200, 500, 333, 760, 276, 500, 564, 333, 760, 333,
        400, 564, 300, 300, 333, 500, 453, 250, 333, 300, 310, 500, 750, 750, 750, 444,
        722, 722, 722, 722, 722, 722, 889, 667, 611, 611, 611, 611, 333, 333, 333, 333,
        722, 722, 722, 722, 722, 722, 722, 564, 722, 722, 722, 722, 722, 722, 556, 500,
        444, 444, 444, 444, 444, 444, 667, 444, 444, 444, 444, 444, 278, 278, 278, 278,
        500, 500, 500, 500, 500, 500, 500, 564, 500, 500, 500, 500, 500, 500, 500, 500,
    ],
};

static TIMES_BOLD_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::TimesBold,
    #[rustfmt::skip]
    ascii: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
        // 0    1    2    3    4    5    6    7    8    9
        500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
        // :    ;    <    =    >    ?    @
        333, 333, 570, 570, 570, 500, 930,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
        // [    \    ]    ^    _    `
        333, 278, 333, 581, 500, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
        // {    |    }    ~
        394, 220, 394, 520,
    ],
    #[rustfmt::skip]
    upper: [
        // 0x80..=0xFF, sixteen per row
        500,   0, 333, 500, 500,1000, 500, 500, 333,1000, 556, 333,1000,   0, 667,   0,
          0, 333, 333, 500, 500, 350, 500,1000, 333,1000, 389, 333, 722,   0, 444, 722,
        250, 333, 500, 500, 500, 500, 220, 500, 333, 747, 300, 500, 570, 333, 747, 333,
        400, 570, 300, 300, 333, 556, 540, 250, 333, 300, 330, 500, 750, 750, 750, 500,
        722, 722, 722, 722, 722, 722,1000, 722, 667, 667, 667, 667, 389, 389, 389, 389,
        722, 722, 778, 778, 778, 778, 778, 570, 778, 722, 722, 722, 722, 722, 611, 556,
        500, 500, 500, 500, 500, 500, 722, 444, 444, 444, 444, 444, 278, 278, 278, 278,
        500, 556, 500, 500, 500, 500, 500, 570, 500, 556, 556, 556, 556, 500, 556, 500,
    ],
};

/// Returns the static metric table for a face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
        FontFace::TimesRoman => &TIMES_ROMAN_TABLE,
        FontFace::TimesBold => &TIMES_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const M: StandardFontMetrics = StandardFontMetrics;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(FontFace::Helvetica).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "Rust" in Helvetica = R(722) + u(556) + s(500) + t(278) = 2056
        let width = get_metrics(FontFace::Helvetica).measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-4, "got {width}");
    }

    #[test]
    fn test_measure_str_uses_win_ansi_upper_half() {
        // bullet (0x95) is 350 in every face; e-acute (0xE9) is 444 in Times-Roman
        for face in FontFace::ALL {
            let width = get_metrics(face).measure_str("\u{2022}");
            assert!((width - 0.35).abs() < 1e-4, "{face:?} got {width}");
        }
        let width = get_metrics(FontFace::TimesRoman).measure_str("caf\u{e9}");
        assert!((width - (0.444 + 0.444 + 0.333 + 0.444)).abs() < 1e-4, "got {width}");
        let dot = get_metrics(FontFace::Helvetica).measure_str("\u{b7}");
        assert!((dot - 0.278).abs() < 1e-4);
    }

    #[test]
    fn test_unmappable_chars_measure_as_question_mark() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.measure_str("\u{4e2d}"), metrics.measure_str("?"));
    }

    #[test]
    fn test_win_ansi_byte() {
        assert_eq!(win_ansi_byte('A'), b'A');
        assert_eq!(win_ansi_byte('\u{e9}'), 0xe9);
        assert_eq!(win_ansi_byte('\u{2014}'), 0x97);
        assert_eq!(win_ansi_byte('\u{4e2d}'), b'?');
        assert_eq!(win_ansi_byte('\u{1}'), b'?');
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let w10 = M.text_width("Hello", FontFace::Helvetica, 10.0);
        let w20 = M.text_width("Hello", FontFace::Helvetica, 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Dear Hiring Manager";
        assert!(
            M.text_width(text, FontFace::HelveticaBold, 11.0)
                > M.text_width(text, FontFace::Helvetica, 11.0)
        );
    }

    #[test]
    fn test_times_narrower_than_helvetica() {
        let text = "Architected distributed caching layer";
        assert!(
            M.text_width(text, FontFace::TimesRoman, 11.0)
                < M.text_width(text, FontFace::Helvetica, 11.0)
        );
    }

    #[test]
    fn test_split_short_text_is_single_line() {
        let lines = M.split_to_width("Hello world", FontFace::Helvetica, 11.0, 468.0);
        assert_eq!(lines, vec!["Hello world".to_string()]);
    }

    #[test]
    fn test_split_whitespace_only_is_empty() {
        assert!(M
            .split_to_width("   ", FontFace::Helvetica, 11.0, 468.0)
            .is_empty());
    }

    #[test]
    fn test_split_lines_fit_width() {
        let text = "word ".repeat(200);
        let lines = M.split_to_width(&text, FontFace::TimesRoman, 11.0, 468.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(M.text_width(line, FontFace::TimesRoman, 11.0) <= 468.0);
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        assert_eq!(rejoined.len(), 200);
    }

    #[test]
    fn test_split_breaks_overlong_word() {
        let word = "x".repeat(300);
        let lines = M.split_to_width(&word, FontFace::Helvetica, 11.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(M.text_width(line, FontFace::Helvetica, 11.0) <= 100.0);
        }
    }

    #[test]
    fn test_font_family_faces() {
        assert_eq!(FontFamily::Times.bold(), FontFace::TimesBold);
        assert_eq!(FontFamily::Helvetica.regular(), FontFace::Helvetica);
        assert_eq!(FontFace::TimesRoman.base_font_name(), "Times-Roman");
    }
}
