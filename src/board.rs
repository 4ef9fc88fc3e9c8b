use std::fmt;
use std::iter;

use itertools::Itertools;

use crate::moves::{Kind, Move};
use crate::variant::{BonusKind, Variant};
use crate::Error;

/// Bonus on a board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bonus {
    None,
    Letter(u32),
    Word(u32),
}

impl Default for Bonus {
    fn default() -> Bonus {
        Bonus::None
    }
}

/// One square of the board: an optional bonus and an optional placed letter.
/// Uppercase letters are regular tiles; lowercase letters are blanks acting
/// as that letter. Once set, a letter is never cleared nor overwritten with
/// a different one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Square {
    bonus: Bonus,
    letter: Option<char>,
}

impl Square {
    pub fn bonus(&self) -> Bonus {
        self.bonus
    }

    pub fn letter(&self) -> Option<char> {
        self.letter
    }
}

/// The state of a game board: a `dim` x `dim` grid of squares plus the
/// variant tables (tile distribution, letter values, rack size, bingo
/// bonus).
///
/// Every participant in a game owns its own board; they stay in sync by
/// applying the same stream of moves.
#[derive(Debug, Clone)]
pub struct Board {
    variant: Variant,
    squares: Vec<Square>,
    empty: bool,
}

impl Default for Board {
    fn default() -> Board {
        Board::new(Variant::scrabble())
    }
}

impl Board {
    pub fn new(variant: Variant) -> Board {
        let mut squares = vec![Square::default(); variant.dim * variant.dim];
        for bonus in &variant.bonus {
            squares[bonus.row * variant.dim + bonus.col].bonus = match bonus.kind {
                BonusKind::Letter => Bonus::Letter(bonus.multiplier),
                BonusKind::Word => Bonus::Word(bonus.multiplier),
            };
        }
        Board {
            variant,
            squares,
            empty: true,
        }
    }

    pub fn dim(&self) -> usize {
        self.variant.dim
    }

    pub fn rack_size(&self) -> usize {
        self.variant.rack_size
    }

    pub fn bingo_bonus(&self) -> i32 {
        self.variant.bingo_bonus
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    /// True iff no square has a letter yet.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn square(&self, row: usize, col: usize) -> &Square {
        &self.squares[row * self.variant.dim + col]
    }

    pub fn letter(&self, row: usize, col: usize) -> Option<char> {
        self.square(row, col).letter
    }

    pub(crate) fn bonus(&self, row: usize, col: usize) -> Bonus {
        self.square(row, col).bonus
    }

    /// Number of squares holding a letter.
    pub fn filled_squares(&self) -> usize {
        self.squares.iter().filter(|s| s.letter.is_some()).count()
    }

    /// The squares a move would pass through, leftmost/topmost first.
    /// A trade covers no squares.
    pub fn walk(&self, m: &Move) -> Result<Vec<(usize, usize)>, Error> {
        let (dr, dc) = match m.kind() {
            Kind::Trade => return Ok(Vec::new()),
            Kind::Across => (0, 1),
            Kind::Down => (1, 0),
        };
        let (row, col) = match (m.row(), m.col()) {
            (Some(row), Some(col)) => (row, col),
            _ => return Err(Error::InvalidMove(format!("move {} has no position", m))),
        };
        let len = m.word().len();
        if len == 0 {
            return Ok(Vec::new());
        }
        if row + dr * (len - 1) >= self.dim() || col + dc * (len - 1) >= self.dim() {
            return Err(Error::InvalidMove(format!("move {} is off the board", m)));
        }
        Ok((0..len).map(|i| (row + dr * i, col + dc * i)).collect())
    }

    /// Play a move onto the board. Fails with `InvalidMove` if a letter of
    /// the move conflicts with a tile already on the board; other forms of
    /// invalid moves may still be accepted (check against
    /// [`valid_moves`](Board::valid_moves) for full validity). On failure
    /// the board is unchanged. Trades are a no-op.
    pub fn play(&mut self, m: &Move) -> Result<(), Error> {
        if m.kind() == Kind::Trade {
            return Ok(());
        }
        let path = self.walk(m)?;
        for (letter, &(row, col)) in m.word().chars().zip(path.iter()) {
            match self.letter(row, col) {
                Some(existing) if existing != letter => {
                    return Err(Error::InvalidMove("invalid play".to_string()));
                }
                _ => {}
            }
        }
        for (letter, &(row, col)) in m.word().chars().zip(path.iter()) {
            self.squares[row * self.variant.dim + col].letter = Some(letter);
        }
        self.empty = false;
        Ok(())
    }

    /// Value of a letter glyph: the variant value for uppercase, 0 for
    /// blanks (lowercase) and unknown glyphs.
    pub fn letter_value(&self, letter: char) -> i32 {
        if letter.is_ascii_uppercase() {
            self.variant.letter_values.get(&letter).copied().unwrap_or(0)
        } else {
            0
        }
    }

    /// The full initial tile bag in sorted glyph order (`?` first).
    pub fn all_tiles(&self) -> Vec<char> {
        self.variant
            .letter_distribution
            .iter()
            .flat_map(|(&glyph, &count)| iter::repeat(glyph).take(count as usize))
            .collect()
    }

    /// An anchor is an empty square orthogonally adjacent to a filled one.
    pub fn is_anchor(&self, row: usize, col: usize) -> bool {
        if self.letter(row, col).is_some() {
            return false;
        }
        let dim = self.dim() as isize;
        [(-1, 0), (0, -1), (1, 0), (0, 1)].iter().any(|&(dr, dc)| {
            let (r, c) = (row as isize + dr, col as isize + dc);
            r >= 0 && r < dim && c >= 0 && c < dim && self.letter(r as usize, c as usize).is_some()
        })
    }

    /// A copy of this board with rows and columns swapped. Bonuses travel
    /// with their squares, so cross-checks and cross-scores computed on the
    /// copy are orthogonal to the copy's row direction.
    pub(crate) fn transposed(&self) -> Board {
        let dim = self.variant.dim;
        let mut flipped = self.clone();
        for row in 0..dim {
            for col in 0..dim {
                flipped.squares[col * dim + row] = self.squares[row * dim + col];
            }
        }
        flipped
    }
}

/// Display the board as `dim` lines of `dim` glyphs, `.` for empty squares.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = (0..self.dim())
            .map(|row| {
                (0..self.dim())
                    .map(|col| self.letter(row, col).unwrap_or('.'))
                    .collect::<String>()
            })
            .join("\n");
        write!(f, "{}", repr)
    }
}
