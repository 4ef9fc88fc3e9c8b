use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::board::Board;
use crate::lexicon::Lexicon;
use crate::moves::{Kind, Move};
use crate::Error;

/// A participant in a game, called once per turn by the referee with the
/// tiles drawn for it and the opponent's last move (whose letters are masked
/// if it was an exchange). Implementations keep their own board in sync by
/// applying the opponent's move and their own chosen move.
pub trait Player {
    fn play(&mut self, drawn: &[char], opponent_move: Option<&Move>) -> Result<Move, Error>;
}

/// Chooses among the legal moves generated for the current rack. The list
/// arrives in generation order; strategies that break ties keep the earliest
/// candidate.
pub trait Strategy {
    fn best_move(&mut self, moves: Vec<Move>, rack: &[char], board: &Board) -> Move;
}

/// A player that mirrors the game on a private board and delegates the
/// choice of move to a [`Strategy`].
pub struct RackPlayer<'a, S> {
    board: Board,
    rack: Vec<char>,
    lexicon: &'a Lexicon,
    strategy: S,
}

/// [`RackPlayer`] maximizing the move score.
pub type MaxScorePlayer<'a> = RackPlayer<'a, MaxScore>;
/// [`RackPlayer`] maximizing the word length.
pub type MaxLengthPlayer<'a> = RackPlayer<'a, MaxLength>;
/// [`RackPlayer`] choosing uniformly at random.
pub type RandomPlayer<'a> = RackPlayer<'a, Random>;

impl<'a, S: Strategy> RackPlayer<'a, S> {
    pub fn new(lexicon: &'a Lexicon, board: Board, strategy: S) -> RackPlayer<'a, S> {
        RackPlayer {
            board,
            rack: Vec::new(),
            lexicon,
            strategy,
        }
    }

    pub fn rack(&self) -> &[char] {
        &self.rack
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn remove_from_rack(&mut self, glyph: char) -> Result<(), Error> {
        match self.rack.iter().position(|&c| c == glyph) {
            Some(i) => {
                self.rack.remove(i);
                Ok(())
            }
            None => Err(Error::InvalidMove(format!("letter {} not in rack", glyph))),
        }
    }
}

impl<'a, S: Strategy> Player for RackPlayer<'a, S> {
    fn play(&mut self, drawn: &[char], opponent_move: Option<&Move>) -> Result<Move, Error> {
        if let Some(m) = opponent_move {
            self.board.play(m)?;
        }
        self.rack.extend_from_slice(drawn);

        let moves = self.board.valid_moves(&self.rack, self.lexicon);
        let chosen = self.strategy.best_move(moves, &self.rack, &self.board);

        if chosen.kind() == Kind::Trade {
            for glyph in chosen.word().chars() {
                self.remove_from_rack(glyph)?;
            }
        } else {
            let path = self.board.walk(&chosen)?;
            for (glyph, (row, col)) in chosen.word().chars().zip(path) {
                if self.board.letter(row, col).is_none() {
                    let wanted = if glyph.is_ascii_uppercase() { glyph } else { '?' };
                    self.remove_from_rack(wanted)?;
                }
            }
            self.board.play(&chosen)?;
        }
        Ok(chosen)
    }
}

/// Highest score; ties prefer the lexicographically greatest word, then the
/// earliest generated move.
#[derive(Debug, Default)]
pub struct MaxScore;

impl Strategy for MaxScore {
    fn best_move(&mut self, moves: Vec<Move>, rack: &[char], board: &Board) -> Move {
        let mut best: Option<Move> = None;
        for candidate in moves {
            let better = match &best {
                Some(current) => {
                    (candidate.score(), candidate.word()) > (current.score(), current.word())
                }
                None => true,
            };
            if better {
                best = Some(candidate);
            }
        }
        best.unwrap_or_else(|| exchange_or_pass(rack, board))
    }
}

/// Longest word; ties prefer the earliest generated move.
#[derive(Debug, Default)]
pub struct MaxLength;

impl Strategy for MaxLength {
    fn best_move(&mut self, moves: Vec<Move>, rack: &[char], board: &Board) -> Move {
        let mut best: Option<Move> = None;
        for candidate in moves {
            let better = best
                .as_ref()
                .map_or(true, |current| candidate.word().len() > current.word().len());
            if better {
                best = Some(candidate);
            }
        }
        best.unwrap_or_else(|| exchange_or_pass(rack, board))
    }
}

/// Uniformly random choice among the legal moves.
#[derive(Debug)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    pub fn new() -> Random {
        Random {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded variant for reproducible games.
    pub fn seeded(seed: u64) -> Random {
        Random {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for Random {
    fn default() -> Random {
        Random::new()
    }
}

impl Strategy for Random {
    fn best_move(&mut self, moves: Vec<Move>, rack: &[char], board: &Board) -> Move {
        moves
            .into_iter()
            .choose(&mut self.rng)
            .unwrap_or_else(|| exchange_or_pass(rack, board))
    }
}

/// Fallback when no placement exists: exchange one tile while the bag still
/// looks full enough for the referee to allow it, otherwise pass. The bag
/// size is estimated as the tiles this board has not seen.
fn exchange_or_pass(rack: &[char], board: &Board) -> Move {
    let unseen = board.all_tiles().len() as i64
        - board.filled_squares() as i64
        - 2 * board.rack_size() as i64;
    if unseen >= board.rack_size() as i64 && !rack.is_empty() {
        Move::trade(rack[0].to_string())
    } else {
        Move::pass()
    }
}
