use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::Board;
use crate::lexicon::Lexicon;
use crate::moves::{Kind, Move};
use crate::player::Player;
use crate::Error;

/// How the referee draws replacement tiles from the bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Sample uniformly without replacement (normal play).
    Random,
    /// Take tiles from the head of the bag (deterministic tests).
    InOrder,
}

/// One entry of the move log.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    pub player: String,
    /// The player's rack at the moment the move was accepted.
    pub rack_before: String,
    pub move_string: String,
    pub score: i32,
    pub time_micros: u64,
}

/// Final state of one player.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerResult {
    pub id: String,
    pub rack: String,
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub moves: Vec<MoveRecord>,
    pub players: Vec<PlayerResult>,
}

struct Seat<'a> {
    agent: &'a mut dyn Player,
    id: &'static str,
    rack: Vec<char>,
    score: i32,
    exception: Option<String>,
    last_move: Option<Move>,
    last_drawn: Vec<char>,
}

impl<'a> Seat<'a> {
    fn new(agent: &'a mut dyn Player, id: &'static str) -> Seat<'a> {
        Seat {
            agent,
            id,
            rack: Vec::new(),
            score: 0,
            exception: None,
            last_move: None,
            last_drawn: Vec::new(),
        }
    }
}

/// Manages a game between two players: the turn loop, the bag, move
/// validation against the authoritative legal set, and the end-of-game
/// accounting.
///
/// The referee owns its own board; the players never see it and must keep
/// their private mirrors in sync through the move stream.
pub struct Referee<'a> {
    board: Board,
    lexicon: &'a Lexicon,
    bag: Vec<char>,
    draw_mode: DrawMode,
    rng: StdRng,
    moves: Vec<MoveRecord>,
    seats: [Seat<'a>; 2],
}

impl<'a> Referee<'a> {
    pub fn new(
        player1: &'a mut dyn Player,
        player2: &'a mut dyn Player,
        lexicon: &'a Lexicon,
        board: Board,
        draw_mode: DrawMode,
    ) -> Referee<'a> {
        let bag = board.all_tiles();
        Referee {
            board,
            lexicon,
            bag,
            draw_mode,
            rng: StdRng::from_entropy(),
            moves: Vec::new(),
            seats: [Seat::new(player1, "p1"), Seat::new(player2, "p2")],
        }
    }

    /// Play the game to completion and return its record.
    pub fn run(mut self) -> GameResult {
        self.draw(0);
        self.draw(1);

        let mut skips = 0u32;
        let mut cur = 0usize;
        loop {
            match self.take_turn(cur, &mut skips) {
                Ok(true) => break,
                Ok(false) => cur = 1 - cur,
                Err(err) => {
                    let message = err.to_string();
                    info!("[exception] {}: {}", self.seats[cur].id, message);
                    self.seats[cur].exception = Some(message);
                    break;
                }
            }
        }

        info!("final board:\n{}", self.board);

        let players = self
            .seats
            .iter()
            .map(|seat| PlayerResult {
                id: seat.id.to_string(),
                rack: seat.rack.iter().collect(),
                score: seat.score,
                exception: seat.exception.clone(),
            })
            .collect();
        GameResult {
            moves: self.moves,
            players,
        }
    }

    /// Draw tiles for a seat until its rack is full or the bag runs out.
    fn draw(&mut self, seat: usize) {
        let want = self.board.rack_size().saturating_sub(self.seats[seat].rack.len());
        let count = want.min(self.bag.len());
        let drawn: Vec<char> = match self.draw_mode {
            DrawMode::InOrder => self.bag.drain(..count).collect(),
            DrawMode::Random => {
                let picks = self
                    .bag
                    .iter()
                    .cloned()
                    .choose_multiple(&mut self.rng, count);
                for &glyph in &picks {
                    if let Some(i) = self.bag.iter().position(|&c| c == glyph) {
                        self.bag.remove(i);
                    }
                }
                picks
            }
        };
        self.seats[seat].last_drawn = drawn.clone();
        self.seats[seat].rack.extend(drawn);
    }

    /// Run one turn for the seat at `cur`. Returns `Ok(true)` when a
    /// termination rule ended the game.
    fn take_turn(&mut self, cur: usize, skips: &mut u32) -> Result<bool, Error> {
        let oth = 1 - cur;
        let rack_size = self.board.rack_size();

        // Exchanged letters are hidden from the opponent.
        if let Some(last) = self.seats[oth].last_move.as_mut() {
            if last.kind() == Kind::Trade {
                last.mask_word();
            }
        }
        let drawn = self.seats[cur].last_drawn.clone();
        let opponent_move = self.seats[oth].last_move.clone();

        debug!(
            "> {} {}:{}",
            self.seats[cur].id,
            drawn.iter().collect::<String>(),
            opponent_move
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_default()
        );

        let started = Instant::now();
        let mut mv = self.seats[cur].agent.play(&drawn, opponent_move.as_ref())?;
        let micros = started.elapsed().as_micros() as u64;

        if mv.kind() == Kind::Trade {
            // Non-empty exchanges need a reasonably full bag.
            if !mv.word().is_empty() && self.bag.len() < rack_size {
                return Err(Error::InvalidMove(format!(
                    "attempt to exchange with less than {} tiles in the bag",
                    rack_size
                )));
            }
        } else {
            let legal = self.board.valid_moves(&self.seats[cur].rack, self.lexicon);
            match legal.into_iter().find(|candidate| *candidate == mv) {
                // Substitute the authoritative move so the recorded score
                // and tile mask are trustworthy.
                Some(authoritative) => mv = authoritative,
                None => return Err(Error::InvalidMove(format!("invalid move: {}", mv))),
            }
        }

        let rack_before: String = self.seats[cur].rack.iter().collect();
        self.seats[cur].score += mv.score();
        self.moves.push(MoveRecord {
            player: self.seats[cur].id.to_string(),
            rack_before: rack_before.clone(),
            move_string: mv.to_string(),
            score: mv.score(),
            time_micros: micros,
        });
        info!(
            "< {} {} {} {} {} {}",
            self.seats[cur].id,
            mv,
            mv.score(),
            rack_before,
            self.seats[cur].score,
            micros
        );

        for glyph in mv.tiles().chars() {
            // Lowercase letters were played as blanks.
            let wanted = if glyph.is_ascii_uppercase() { glyph } else { '?' };
            match self.seats[cur].rack.iter().position(|&c| c == wanted) {
                Some(i) => {
                    self.seats[cur].rack.remove(i);
                }
                None => return Err(Error::InvalidMove(format!("letter {} not in rack", glyph))),
            }
        }

        self.draw(cur);

        // Discards go back only after the draw, so the player cannot redraw
        // its own exchanged tiles.
        if mv.kind() == Kind::Trade {
            self.bag.extend(mv.word().chars());
        }

        self.board.play(&mv)?;

        if mv.kind() == Kind::Trade {
            *skips += 1;
        } else {
            *skips = 0;
        }
        self.seats[cur].last_move = Some(mv);

        if *skips == 6 {
            let board = &self.board;
            for seat in self.seats.iter_mut() {
                let rack_value: i32 = seat.rack.iter().map(|&l| board.letter_value(l)).sum();
                seat.score -= rack_value;
            }
            return Ok(true);
        }

        if self.bag.is_empty() && self.seats[cur].rack.is_empty() {
            let board = &self.board;
            let other_value: i32 = self.seats[oth]
                .rack
                .iter()
                .map(|&l| board.letter_value(l))
                .sum();
            self.seats[cur].score += 2 * other_value;
            return Ok(true);
        }

        Ok(false)
    }
}
