// apg.rs - APG code decoding and placement
//
// An apgcode looks like `xq4_153`: a prefix naming the pattern class and
// period, then a body where every character is a 5-cell column. `w` and `x`
// are two and three blank columns, `y<c>` is a longer run of blanks, and `z`
// starts a new 5-row strip.

use std::str::FromStr;
use thiserror::Error;

use crate::grid::Pos;
use crate::life::CellState;

/// Rows covered by one strip.
pub const STRIP_HEIGHT: i32 = 5;

/// Column bits for `0-9a-v`, top row last.
const COLUMN_TABLE: [&str; 32] = [
    "00000", "00001", "00010", "00011", "00100", "00101", "00110", "00111",
    "01000", "01001", "01010", "01011", "01100", "01101", "01110", "01111",
    "10000", "10001", "10010", "10011", "10100", "10101", "10110", "10111",
    "11000", "11001", "11010", "11011", "11100", "11101", "11110", "11111",
];

/// Blank-column counts for the character following a `y`. `y` itself has no
/// entry.
const RUN_TABLE: [Option<usize>; 36] = [
    Some(4), Some(5), Some(6), Some(7), Some(8), Some(9), Some(10), Some(11), Some(12), Some(13),
    Some(14), Some(15), Some(16), Some(17), Some(18), Some(19), Some(20), Some(21), Some(22),
    Some(23), Some(24), Some(25), Some(26), Some(27), Some(28), Some(29), Some(30), Some(31),
    Some(32), Some(33), Some(34), Some(35), Some(36), Some(37), None, Some(39),
];

fn alphabet_index(c: char) -> Option<usize> {
    match c {
        '0'..='9' => Some(c as usize - '0' as usize),
        'a'..='z' => Some(c as usize - 'a' as usize + 10),
        _ => None,
    }
}

/// The 5-bit column string for a column character.
pub fn column_bits(c: char) -> Option<&'static str> {
    alphabet_index(c).and_then(|idx| COLUMN_TABLE.get(idx).copied())
}

fn run_length(c: char) -> Option<usize> {
    alphabet_index(c).and_then(|idx| RUN_TABLE[idx])
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApgError {
    #[error("unknown character {character:?} at position {position}")]
    UnknownCharacter { character: char, position: usize },
    #[error("unencodable apgcode: {0}")]
    Unencodable(String),
    #[error("invalid period in prefix {prefix:?}")]
    InvalidPeriod {
        prefix: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApgToken {
    /// A single 5-cell column, `0-9a-v`.
    Column(char),
    /// `n` empty columns.
    Blank(usize),
    /// End of the current strip.
    StripEnd,
}

/// Streams tokens out of an apgcode body.
///
/// Only the previous *source* character is remembered, so `y` can modify the
/// character after it. At the start of the body there is no previous character.
pub struct ApgDecoder<'a> {
    chars: std::str::CharIndices<'a>,
    previous: Option<char>,
}

impl<'a> ApgDecoder<'a> {
    pub fn new(body: &'a str) -> Self {
        Self { chars: body.char_indices(), previous: None }
    }
}

impl Iterator for ApgDecoder<'_> {
    type Item = Result<ApgToken, ApgError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (position, current) = self.chars.next()?;
            let previous = self.previous.replace(current);
            let unknown = ApgError::UnknownCharacter { character: current, position };

            if alphabet_index(current).is_none() {
                return Some(Err(unknown));
            }
            if previous == Some('y') {
                return Some(run_length(current).map(ApgToken::Blank).ok_or(unknown));
            }
            let token = match current {
                'y' => continue,
                'w' => ApgToken::Blank(2),
                'x' => ApgToken::Blank(3),
                'z' => ApgToken::StripEnd,
                c => ApgToken::Column(c),
            };
            return Some(Ok(token));
        }
    }
}

/// Expands a body into its flat form: column characters, `'0'` per blank
/// column and `'z'` between strips.
pub fn decode(body: &str) -> Result<String, ApgError> {
    let mut out = String::with_capacity(body.len());
    for token in ApgDecoder::new(body) {
        match token? {
            ApgToken::Column(c) => out.push(c),
            ApgToken::Blank(n) => out.extend(std::iter::repeat('0').take(n)),
            ApgToken::StripEnd => out.push('z'),
        }
    }
    Ok(out)
}

/// Decodes a body into strips of 5-bit column strings. Empty strips are kept
/// so later strips stay at the right height.
pub fn parse(body: &str) -> Result<Vec<Vec<&'static str>>, ApgError> {
    let blank = COLUMN_TABLE[0];
    let mut strips = Vec::new();
    let mut current = Vec::new();
    for token in ApgDecoder::new(body) {
        match token? {
            ApgToken::Column(c) => {
                // the decoder only yields column characters from 0-9a-v
                if let Some(bits) = column_bits(c) {
                    current.push(bits);
                }
            }
            ApgToken::Blank(n) => current.extend(std::iter::repeat(blank).take(n)),
            ApgToken::StripEnd => strips.push(std::mem::take(&mut current)),
        }
    }
    strips.push(current);
    Ok(strips)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApgPattern {
    StillLife,
    Oscillator,
    Spaceship,
}

impl ApgPattern {
    fn from_prefix(lead: &str) -> Option<Self> {
        match lead {
            "xs" => Some(Self::StillLife),
            "xp" => Some(Self::Oscillator),
            "xq" => Some(Self::Spaceship),
            _ => None,
        }
    }
}

/// A parsed apgcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApgCode {
    source: String,
    pattern: ApgPattern,
    period: u32,
    strips: Vec<Vec<&'static str>>,
}

impl ApgCode {
    pub fn parse(text: &str) -> Result<Self, ApgError> {
        let mut parts = text.split('_');
        let (Some(prefix), Some(body)) = (parts.next(), parts.next()) else {
            return Err(ApgError::Unencodable(text.to_string()));
        };

        let pattern = prefix
            .get(..2)
            .and_then(ApgPattern::from_prefix)
            .ok_or_else(|| ApgError::Unencodable(text.to_string()))?;

        let period = match pattern {
            ApgPattern::StillLife => 1,
            _ => prefix[2..].parse().map_err(|source| ApgError::InvalidPeriod {
                prefix: prefix.to_string(),
                source,
            })?,
        };

        Ok(Self {
            source: text.to_string(),
            pattern,
            period,
            strips: parse(body)?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn pattern(&self) -> ApgPattern {
        self.pattern
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn strips(&self) -> &[Vec<&'static str>] {
        &self.strips
    }

    /// Columns spanned by the widest strip.
    pub fn width(&self) -> usize {
        self.strips.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Rows spanned by all strips.
    pub fn height(&self) -> usize {
        self.strips.len() * STRIP_HEIGHT as usize
    }

    /// Every cell of the pattern relative to its top-left corner. Strip `i`
    /// covers rows `5i..5i+5`, and the first bit of a column is its bottom row.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, CellState)> + '_ {
        self.strips.iter().enumerate().flat_map(|(i, strip)| {
            let top = STRIP_HEIGHT * i as i32;
            strip.iter().enumerate().flat_map(move |(j, column)| {
                column.bytes().enumerate().map(move |(k, bit)| {
                    let pos = Pos::new(j as i32, top + STRIP_HEIGHT - 1 - k as i32);
                    let state = if bit == b'0' { CellState::Dead } else { CellState::Alive };
                    (pos, state)
                })
            })
        })
    }
}

impl FromStr for ApgCode {
    type Err = ApgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
