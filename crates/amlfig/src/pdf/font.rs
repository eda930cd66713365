//! Standard-14 font metrics and WinAnsi text encoding.
//!
//! Only advance widths are needed: the chart layout measures tick labels,
//! axis labels and legend rows. Widths are in 1/1000 em, taken from the
//! Helvetica AFM file.

/// The one font every page uses.
pub const BASE_FONT: &str = "Helvetica";

/// Ascender of Helvetica, in em.
pub const ASCENT: f64 = 0.718;
/// Descender depth of Helvetica (positive), in em.
pub const DESCENT: f64 = 0.207;

/// Helvetica advance widths for bytes 32..=126.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Helvetica advance widths for bytes 0xA0..=0xFF (Latin-1 block of WinAnsi).
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0..AF
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0..BF
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0..CF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0..DF
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // E0..EF
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // F0..FF
];

/// Helvetica widths for the WinAnsi 0x80..=0x9F punctuation block.
fn helvetica_special(b: u8) -> u16 {
    match b {
        0x80 => 556,               // euro
        0x85 | 0x89 => 1000,       // ellipsis, perthousand
        0x91 | 0x92 | 0x82 => 222, // single quotes
        0x93 | 0x94 | 0x84 => 333, // double quotes
        0x95 => 350,               // bullet
        0x96 => 556,               // en dash
        0x97 => 1000,              // em dash
        _ => 556,
    }
}

/// Advance width of one WinAnsi byte, in 1/1000 em.
pub fn glyph_width(b: u8) -> u16 {
    match b {
        32..=126 => HELVETICA_ASCII[(b - 32) as usize],
        0xA0..=0xFF => HELVETICA_LATIN1[(b - 0xA0) as usize],
        0x80..=0x9F => helvetica_special(b),
        _ => 556,
    }
}

/// Width of `text` set at `size` points.
pub fn text_width(size: f64, text: &str) -> f64 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| u32::from(glyph_width(b)))
        .sum();
    f64::from(units) * size / 1000.0
}

/// Height of a text line box (ascender to descender) at `size` points.
#[inline]
pub fn text_height(size: f64) -> f64 {
    (ASCENT + DESCENT) * size
}

/// Encode to WinAnsi; unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\u{A0}'..='\u{FF}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‰' => 0x89,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// PDF literal string `( … )` with escapes; bytes ≥ 0x80 use octal escapes.
pub fn literal_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('(');
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7E => out.push(b as char),
            _ => out.push_str(&format!("\\{:03o}", b)),
        }
    }
    out.push(')');
    out
}
