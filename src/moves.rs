use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::Error;

lazy_static! {
    static ref DOWN_POS: Regex = Regex::new("^([A-Z])([0-9]+)$").unwrap();
    static ref ACROSS_POS: Regex = Regex::new("^([0-9]+)([A-Z])$").unwrap();
    static ref TRADE_WORD: Regex = Regex::new(r"^([A-Za-z?]*|\**)$").unwrap();
    static ref PLACED_WORD: Regex = Regex::new(r"^([A-Za-z()]+|\*+)$").unwrap();
}

/// Direction of a placement, or a trade/pass turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Across,
    Down,
    Trade,
}

/// A single Scrabble move: a word placement or an exchange of tiles.
///
/// For `Across`/`Down` moves, `word` holds the full formed word including
/// letters that were already on the board; the tile mask records which
/// positions were newly placed. Blanks appear as lowercase letters in the
/// word and score zero. For `Trade`, the word is the (possibly empty) run
/// of discarded tile glyphs and there is no position.
///
/// The notation is `"<word> <pos>"`, where `<letter><number>` positions are
/// down moves, `<number><letter>` positions are across moves, and `--` is a
/// trade. Parenthesized runs mark pre-existing tiles:
///
/// ```
/// use scrabble_engine::Move;
///
/// let m: Move = "N(ITRO)GEn(ASE) 3H".parse()?;
/// assert_eq!(m.word(), "NITROGEnASE");
/// assert_eq!(m.tiles(), "NGEn");
/// assert_eq!(m.position(), "3H");
/// # Ok::<(), scrabble_engine::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Move {
    kind: Kind,
    pos: Option<(usize, usize)>,
    word: String,
    tile_mask: Vec<bool>,
    score: i32,
}

impl Move {
    /// An across placement at `(row, col)` with every letter newly placed.
    pub fn across<W: Into<String>>(row: usize, col: usize, word: W) -> Move {
        let word = word.into();
        let tile_mask = vec![true; word.len()];
        Move::placed(Kind::Across, row, col, word, tile_mask, 0)
    }

    /// A down placement at `(row, col)` with every letter newly placed.
    pub fn down<W: Into<String>>(row: usize, col: usize, word: W) -> Move {
        let word = word.into();
        let tile_mask = vec![true; word.len()];
        Move::placed(Kind::Down, row, col, word, tile_mask, 0)
    }

    /// An exchange of the given tile glyphs.
    pub fn trade<W: Into<String>>(letters: W) -> Move {
        let word = letters.into();
        let tile_mask = vec![true; word.len()];
        Move {
            kind: Kind::Trade,
            pos: None,
            word,
            tile_mask,
            score: 0,
        }
    }

    /// An empty exchange, i.e. a skipped turn.
    pub fn pass() -> Move {
        Move::trade("")
    }

    pub(crate) fn placed(
        kind: Kind,
        row: usize,
        col: usize,
        word: String,
        tile_mask: Vec<bool>,
        score: i32,
    ) -> Move {
        debug_assert_eq!(word.len(), tile_mask.len());
        Move {
            kind,
            pos: Some((row, col)),
            word,
            tile_mask,
            score,
        }
    }

    /// Reinterpret an across move found on a transposed board as the
    /// corresponding down move.
    pub(crate) fn into_down(mut self) -> Move {
        if let Some((row, col)) = self.pos {
            self.pos = Some((col, row));
        }
        self.kind = Kind::Down;
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Row of the leftmost/topmost square, `None` for a trade.
    pub fn row(&self) -> Option<usize> {
        self.pos.map(|(row, _)| row)
    }

    /// Column of the leftmost/topmost square, `None` for a trade.
    pub fn col(&self) -> Option<usize> {
        self.pos.map(|(_, col)| col)
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Per-position flags: `true` where this move placed a new tile.
    pub fn tile_mask(&self) -> &[bool] {
        &self.tile_mask
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// The tiles this move takes from the rack: the masked-in subsequence of
    /// the word. For a trade, every character is a tile.
    pub fn tiles(&self) -> String {
        self.word
            .chars()
            .zip(self.tile_mask.iter())
            .filter(|(_, &placed)| placed)
            .map(|(ch, _)| ch)
            .collect()
    }

    /// Replace every letter of the word with `*`. Used to hide the identity
    /// of exchanged tiles from the opponent.
    pub fn mask_word(&mut self) {
        self.word = "*".repeat(self.word.len());
    }

    /// Position in coordinate notation: `<number><letter>` for across,
    /// `<letter><number>` for down, `--` for a trade.
    pub fn position(&self) -> String {
        let (row_str, col_str) = match self.pos {
            Some((row, col)) => ((row + 1).to_string(), ((b'A' + col as u8) as char).to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        match self.kind {
            Kind::Down => format!("{}{}", col_str, row_str),
            _ => format!("{}{}", row_str, col_str),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.word.is_empty() {
            return write!(f, "{}", self.position());
        }
        let mut display = String::new();
        let mut placed = true;
        for (i, ch) in self.word.chars().enumerate() {
            if placed && !self.tile_mask[i] {
                display.push('(');
            } else if !placed && self.tile_mask[i] {
                display.push(')');
            }
            display.push(ch);
            placed = self.tile_mask[i];
        }
        if !placed {
            display.push(')');
        }
        write!(f, "{} {}", display, self.position())
    }
}

/// Two moves are equal iff their canonical rendered strings match. Notably,
/// different tile masks over the same letters are not equal, and the score
/// never takes part in the comparison.
impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Move {}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Move, Error> {
        let (word, pos) = if s == "--" {
            ("", "--")
        } else {
            let mut parts = s.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(word), Some(pos), None) => (word, pos),
                _ => return Err(Error::InvalidPosition),
            }
        };

        if pos == "--" {
            if !TRADE_WORD.is_match(word) {
                return Err(Error::InvalidWord(word.to_string()));
            }
            return Ok(Move::trade(word));
        }

        let (kind, row, col) = if let Some(caps) = DOWN_POS.captures(pos) {
            let col = (caps[1].as_bytes()[0] - b'A') as usize;
            (Kind::Down, parse_coordinate(&caps[2])?, col)
        } else if let Some(caps) = ACROSS_POS.captures(pos) {
            let col = (caps[2].as_bytes()[0] - b'A') as usize;
            (Kind::Across, parse_coordinate(&caps[1])?, col)
        } else {
            return Err(Error::InvalidPosition);
        };

        if !PLACED_WORD.is_match(word) {
            return Err(Error::InvalidWord(word.to_string()));
        }

        let mut letters = String::new();
        let mut tile_mask = Vec::new();
        let mut placed = true;
        for ch in word.chars() {
            match ch {
                '(' => placed = false,
                ')' => placed = true,
                _ => {
                    letters.push(ch);
                    tile_mask.push(placed);
                }
            }
        }
        Ok(Move::placed(kind, row, col, letters, tile_mask, 0))
    }
}

/// 1-based row number in notation to 0-based index.
fn parse_coordinate(digits: &str) -> Result<usize, Error> {
    let n: usize = digits.parse().map_err(|_| Error::InvalidPosition)?;
    n.checked_sub(1).ok_or(Error::InvalidPosition)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_down() -> Result<(), Error> {
        let m: Move = "NITROGEnASE H3".parse()?;
        assert_eq!(m.to_string(), "NITROGEnASE H3");
        assert_eq!(m.row(), Some(2));
        assert_eq!(m.col(), Some(7));
        assert_eq!(m.kind(), Kind::Down);
        assert_eq!(m.word(), "NITROGEnASE");
        assert_eq!(m.tiles(), "NITROGEnASE");
        Ok(())
    }

    #[test]
    fn test_parse_across_with_mask() -> Result<(), Error> {
        let m: Move = "N(ITRO)GEn(ASE) 3H".parse()?;
        assert_eq!(m.to_string(), "N(ITRO)GEn(ASE) 3H");
        assert_eq!(m.row(), Some(2));
        assert_eq!(m.col(), Some(7));
        assert_eq!(m.kind(), Kind::Across);
        assert_eq!(m.word(), "NITROGEnASE");
        assert_eq!(m.tiles(), "NGEn");
        Ok(())
    }

    #[test]
    fn test_parse_trade() -> Result<(), Error> {
        let m: Move = "DEW? --".parse()?;
        assert_eq!(m.to_string(), "DEW? --");
        assert_eq!(m.row(), None);
        assert_eq!(m.col(), None);
        assert_eq!(m.kind(), Kind::Trade);
        assert_eq!(m.word(), "DEW?");
        assert_eq!(m.tiles(), "DEW?");

        let m: Move = "**** --".parse()?;
        assert_eq!(m.to_string(), "**** --");
        assert_eq!(m.word(), "****");
        assert_eq!(m.tiles(), "****");

        let m: Move = "--".parse()?;
        assert_eq!(m.to_string(), "--");
        assert_eq!(m.kind(), Kind::Trade);
        assert_eq!(m.word(), "");
        assert_eq!(m.tiles(), "");
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "NITROGEnASE 33".parse::<Move>(),
            Err(Error::InvalidPosition)
        ));
        assert!(matches!(
            "NITROGEnASE 0H".parse::<Move>(),
            Err(Error::InvalidPosition)
        ));
        assert!(matches!("??? 3H".parse::<Move>(), Err(Error::InvalidWord(_))));
        assert!(matches!("... --".parse::<Move>(), Err(Error::InvalidWord(_))));
        assert!(matches!("NITROGEnASE".parse::<Move>(), Err(Error::InvalidPosition)));
        assert!(matches!("".parse::<Move>(), Err(Error::InvalidPosition)));
    }

    #[test]
    fn test_display_with_mask() {
        let tile_mask: Vec<bool> = vec![false; 8].into_iter().chain(vec![true; 2]).collect();
        let m = Move::placed(Kind::Down, 2, 3, "ADDITiONAL".to_string(), tile_mask, 74);
        assert_eq!(m.to_string(), "(ADDITiON)AL D3");
        assert_eq!(m.word(), "ADDITiONAL");
        assert_eq!(m.position(), "D3");
        assert_eq!(m.score(), 74);
        assert_eq!(m.tiles(), "AL");
    }

    #[test]
    fn test_mask_word() -> Result<(), Error> {
        let mut m: Move = "NITROGEnASE 3B".parse()?;
        m.mask_word();
        assert_eq!(m.word(), "***********");
        assert_eq!(m.to_string(), "*********** 3B");
        Ok(())
    }

    #[test]
    fn test_equality() -> Result<(), Error> {
        let a: Move = "NITROGEnASE 3H".parse()?;
        let b: Move = "NITROGEnASE 3H".parse()?;
        assert_eq!(a, b);
        let masked: Move = "(NITRO)GEnASE 3H".parse()?;
        assert_ne!(a, masked);
        let down: Move = "NITROGEnASE H3".parse()?;
        assert_ne!(a, down);
        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<(), Error> {
        for s in &["NITROGEnASE H3", "N(ITRO)GEn(ASE) 3H", "DEW? --", "--", "A(b)a 15O"] {
            let m: Move = s.parse()?;
            assert_eq!(&m.to_string(), s);
            let again: Move = m.to_string().parse()?;
            assert_eq!(m, again);
        }
        Ok(())
    }
}
