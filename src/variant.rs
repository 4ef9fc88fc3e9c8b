use std::collections::BTreeMap;
use std::fs::read_to_string;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Kind of bonus carried by a board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusKind {
    Word,
    Letter,
}

/// One bonus square in a variant description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusSquare {
    pub row: usize,
    pub col: usize,
    #[serde(rename = "type")]
    pub kind: BonusKind,
    pub multiplier: u32,
}

/// Description of a game variant: board dimension, rack size, bingo bonus,
/// tile distribution, letter values and bonus layout.
///
/// Variants are plain data and can be read from JSON:
///
/// ```
/// use scrabble_engine::Variant;
///
/// let variant = Variant::from_json(r#"{
///     "dim": 3, "bingo_bonus": 10, "rack_size": 2,
///     "letter_distribution": {"?": 1, "A": 4},
///     "letter_values": {"A": 1},
///     "bonus": [{"row": 1, "col": 1, "type": "word", "multiplier": 2}]
/// }"#)?;
/// assert_eq!(variant.dim, 3);
/// # Ok::<(), scrabble_engine::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub dim: usize,
    pub bingo_bonus: i32,
    pub rack_size: usize,
    /// Tile glyph to count, including `?` for blanks.
    pub letter_distribution: BTreeMap<char, u32>,
    /// Uppercase letter to value; `?` is implicitly worth 0.
    pub letter_values: BTreeMap<char, i32>,
    pub bonus: Vec<BonusSquare>,
}

/// Quarter of the standard Scrabble bonus layout; the full board is this
/// pattern mirrored horizontally and vertically around the center.
const SCRABBLE_QUARTER: [&str; 8] = [
    "3w -- -- 2l -- -- -- 3w",
    "-- 2w -- -- -- 3l -- --",
    "-- -- 2w -- -- -- 2l --",
    "2l -- -- 2w -- -- -- 2l",
    "-- -- -- -- 2w -- -- --",
    "-- 3l -- -- -- 3l -- --",
    "-- -- 2l -- -- -- 2l --",
    "3w -- -- 2l -- -- -- 2w",
];

const SCRABBLE_DISTRIBUTION: [(char, u32); 27] = [
    ('?', 2),
    ('A', 9),
    ('B', 2),
    ('C', 2),
    ('D', 4),
    ('E', 12),
    ('F', 2),
    ('G', 3),
    ('H', 2),
    ('I', 9),
    ('J', 1),
    ('K', 1),
    ('L', 4),
    ('M', 2),
    ('N', 6),
    ('O', 8),
    ('P', 2),
    ('Q', 1),
    ('R', 6),
    ('S', 4),
    ('T', 6),
    ('U', 4),
    ('V', 2),
    ('W', 2),
    ('X', 1),
    ('Y', 2),
    ('Z', 1),
];

const SCRABBLE_VALUES: [(char, i32); 26] = [
    ('A', 1),
    ('B', 3),
    ('C', 3),
    ('D', 2),
    ('E', 1),
    ('F', 4),
    ('G', 2),
    ('H', 4),
    ('I', 1),
    ('J', 8),
    ('K', 5),
    ('L', 1),
    ('M', 3),
    ('N', 1),
    ('O', 1),
    ('P', 3),
    ('Q', 10),
    ('R', 1),
    ('S', 1),
    ('T', 1),
    ('U', 1),
    ('V', 4),
    ('W', 4),
    ('X', 8),
    ('Y', 4),
    ('Z', 10),
];

/// Expand a quarter bonus layout by mirroring it horizontally and vertically.
fn expand_quarter(quarter: &[&str]) -> Vec<BonusSquare> {
    let dim = quarter.len() * 2 - 1;
    let mut cells = BTreeMap::new();
    for (i, line) in quarter.iter().enumerate() {
        for (j, code) in line.split(' ').enumerate() {
            let (kind, multiplier) = match code {
                "--" => continue,
                "2l" => (BonusKind::Letter, 2),
                "3l" => (BonusKind::Letter, 3),
                "2w" => (BonusKind::Word, 2),
                "3w" => (BonusKind::Word, 3),
                other => unreachable!("bad bonus code {}", other),
            };
            for &(row, col) in &[
                (i, j),
                (dim - 1 - i, j),
                (i, dim - 1 - j),
                (dim - 1 - i, dim - 1 - j),
            ] {
                cells.insert((row, col), (kind, multiplier));
            }
        }
    }
    cells
        .into_iter()
        .map(|((row, col), (kind, multiplier))| BonusSquare {
            row,
            col,
            kind,
            multiplier,
        })
        .collect()
}

impl Variant {
    /// The official 15x15 Scrabble variant: 100 tiles, rack of 7, 50-point
    /// bingo bonus.
    pub fn scrabble() -> Variant {
        Variant {
            dim: 15,
            bingo_bonus: 50,
            rack_size: 7,
            letter_distribution: SCRABBLE_DISTRIBUTION.iter().cloned().collect(),
            letter_values: SCRABBLE_VALUES.iter().cloned().collect(),
            bonus: expand_quarter(&SCRABBLE_QUARTER),
        }
    }

    pub fn from_json(text: &str) -> Result<Variant, Error> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &str) -> Result<Variant, Error> {
        let text = read_to_string(path).map_err(|_| Error::VariantRead(path.to_string()))?;
        Variant::from_json(&text)
    }
}

impl Default for Variant {
    fn default() -> Variant {
        Variant::scrabble()
    }
}
