//! A Scrabble move-generation and refereeing library.
//!
//! This crate enumerates every legal placement for a rack on a board — main
//! word, cross-words, anchoring and exact scores included — and can referee
//! a full two-player game with Scrabble end-of-game accounting. Game
//! variants (board size, bonus layout, tile distribution, letter values)
//! are plain data; the official 15x15 game ships as
//! [`Variant::scrabble`].
//!
//! # Basic usage
//!
//! Build a lexicon, ask a board for the legal moves, play one:
//!
//! ```
//! use scrabble_engine::{Board, Lexicon};
//!
//! let lexicon = Lexicon::from_words(&["dog", "dogged"]);
//! let mut board = Board::default();
//! let rack: Vec<char> = "DOGGED?".chars().collect();
//! let moves = board.valid_moves(&rack, &lexicon);
//! assert!(!moves.is_empty());
//! board.play(&moves[0])?;
//! # Ok::<(), scrabble_engine::Error>(())
//! ```
//!
//! To run a game, give each player its own board and a shared lexicon, and
//! hand both players to a [`Referee`]:
//!
//! ```no_run
//! use scrabble_engine::{Board, DrawMode, Lexicon, MaxScore, RackPlayer, Referee};
//!
//! let lexicon = Lexicon::from_file("wordlist.txt")?;
//! let mut p1 = RackPlayer::new(&lexicon, Board::default(), MaxScore);
//! let mut p2 = RackPlayer::new(&lexicon, Board::default(), MaxScore);
//! let referee = Referee::new(&mut p1, &mut p2, &lexicon, Board::default(), DrawMode::Random);
//! let game = referee.run();
//! println!("{} - {}", game.players[0].score, game.players[1].score);
//! # Ok::<(), scrabble_engine::Error>(())
//! ```

mod board;
mod error;
mod external;
mod generator;
mod letterset;
mod lexicon;
mod moves;
mod player;
mod referee;
mod variant;

pub use board::{Board, Bonus, Square};
pub use error::Error;
pub use external::ExternalPlayer;
pub use lexicon::{Lexicon, TrieNode};
pub use moves::{Kind, Move};
pub use player::{
    MaxLength, MaxLengthPlayer, MaxScore, MaxScorePlayer, Player, RackPlayer, Random, RandomPlayer,
    Strategy,
};
pub use referee::{DrawMode, GameResult, MoveRecord, PlayerResult, Referee};
pub use variant::{BonusKind, BonusSquare, Variant};
