//! Anchor-based move generation: for every anchor square, enumerate left
//! parts (fixed by board tiles or drawn from the rack) and extend rightwards
//! through the lexicon trie, pruned by per-square cross-check sets. The down
//! pass reruns the same search on a transposed board.

use crate::board::{Board, Bonus};
use crate::letterset::LetterSet;
use crate::lexicon::{Lexicon, TrieNode};
use crate::moves::{Kind, Move};

/// Per-row search data: for every column, the set of letters that form a
/// valid cross-word there, and the score contribution of that cross-word.
struct RowData {
    checks: Vec<LetterSet>,
    scores: Vec<Option<i32>>,
}

impl Board {
    /// Every legal placement for `rack` on this board, with authoritative
    /// tile masks and scores. The rack holds uppercase tile glyphs and `?`
    /// for blanks. The result is independent of rack ordering; an empty
    /// result means no placement exists.
    pub fn valid_moves(&self, rack: &[char], lexicon: &Lexicon) -> Vec<Move> {
        let mut moves = self.across_moves(rack, lexicon);
        let flipped = self.transposed();
        moves.extend(
            flipped
                .across_moves(rack, lexicon)
                .into_iter()
                .map(Move::into_down),
        );
        moves
    }

    fn across_moves(&self, rack: &[char], lexicon: &Lexicon) -> Vec<Move> {
        let mut search = Search {
            board: self,
            lexicon,
            rack: rack.to_vec(),
            moves: Vec::new(),
        };
        for row in 0..self.dim() {
            search.scan_row(row);
        }
        search.moves
    }

    /// The maximal filled runs directly above and below `(row, col)`, both
    /// read top-to-bottom.
    pub(crate) fn updown_fragments(&self, row: usize, col: usize) -> (String, String) {
        let mut up = String::new();
        for r in (0..row).rev() {
            match self.letter(r, col) {
                Some(letter) => up.insert(0, letter),
                None => break,
            }
        }
        let mut down = String::new();
        for r in row + 1..self.dim() {
            match self.letter(r, col) {
                Some(letter) => down.push(letter),
                None => break,
            }
        }
        (up, down)
    }

    /// Letters that can be placed in `(row, col)` without spelling an
    /// invalid vertical word. The candidate alphabet is the variant's value
    /// table; with no vertical neighbors every candidate is allowed. A
    /// filled square admits nothing.
    pub(crate) fn cross_checks(&self, row: usize, col: usize, lexicon: &Lexicon) -> LetterSet {
        if self.letter(row, col).is_some() {
            return LetterSet::new();
        }
        let (up, down) = self.updown_fragments(row, col);
        let letters = self.variant().letter_values.keys().cloned();
        if up.is_empty() && down.is_empty() {
            return letters.collect();
        }
        let mut set = LetterSet::new();
        if let Some(node) = lexicon.descend(&up) {
            for letter in letters {
                if node.contains(&format!("{}{}", letter, down)) {
                    set.insert(letter);
                }
            }
        }
        set
    }

    /// Score of the vertical fragments joined at `(row, col)`, inclusive of
    /// the square's word bonus, or `None` when no fragment touches the
    /// square. A fragment made of blanks scores `Some(0)`, which is distinct
    /// from no fragment at all.
    pub(crate) fn cross_score(&self, row: usize, col: usize) -> Option<i32> {
        let (up, down) = self.updown_fragments(row, col);
        if up.is_empty() && down.is_empty() {
            return None;
        }
        let mut score: i32 = up
            .chars()
            .chain(down.chars())
            .map(|letter| self.letter_value(letter))
            .sum();
        if let Bonus::Word(k) = self.bonus(row, col) {
            score *= k as i32;
        }
        Some(score)
    }
}

struct Search<'a> {
    board: &'a Board,
    lexicon: &'a Lexicon,
    rack: Vec<char>,
    moves: Vec<Move>,
}

impl<'a> Search<'a> {
    fn scan_row(&mut self, row: usize) {
        let board = self.board;
        let lexicon = self.lexicon;
        let dim = board.dim();

        let anchors: Vec<usize> = if board.is_empty() {
            // The sole anchor on an empty board is the center square.
            if row == dim / 2 {
                vec![dim / 2]
            } else {
                Vec::new()
            }
        } else {
            (0..dim).filter(|&col| board.is_anchor(row, col)).collect()
        };
        if anchors.is_empty() {
            return;
        }

        let data = RowData {
            checks: (0..dim)
                .map(|col| board.cross_checks(row, col, lexicon))
                .collect(),
            scores: (0..dim).map(|col| board.cross_score(row, col)).collect(),
        };

        let mut prev_anchor: isize = -1;
        for &anchor in &anchors {
            self.hook(row, anchor, prev_anchor, &data);
            prev_anchor = anchor as isize;
        }
    }

    fn hook(&mut self, row: usize, anchor: usize, prev_anchor: isize, data: &RowData) {
        let board = self.board;
        let lexicon = self.lexicon;
        if anchor == 0 || board.letter(row, anchor - 1).is_some() {
            // The left part is fixed: the contiguous filled run ending at
            // the anchor (empty when the anchor sits on the left edge).
            let mut start = anchor;
            while start > 0 && board.letter(row, start - 1).is_some() {
                start -= 1;
            }
            let prefix: String = (start..anchor)
                .flat_map(|col| board.letter(row, col))
                .collect();
            if let Some(node) = lexicon.descend(&prefix) {
                let mut word = prefix;
                self.extend_right(row, anchor, data, &mut word, node, anchor);
            }
        } else {
            // Left parts may not reach back past the previous anchor, whose
            // own search already covers those words.
            let limit = (anchor as isize - prev_anchor - 1) as usize;
            let mut word = String::new();
            self.left_parts(row, anchor, data, &mut word, lexicon.root(), limit);
        }
    }

    /// Enumerate left parts drawn from the rack, shortest first, attempting
    /// a right extension from the anchor for each.
    fn left_parts(
        &mut self,
        row: usize,
        anchor: usize,
        data: &RowData,
        word: &mut String,
        node: &'a TrieNode,
        limit: usize,
    ) {
        self.extend_right(row, anchor, data, word, node, anchor);
        if limit == 0 {
            return;
        }
        for (letter, child) in node.children() {
            if self.take(letter) {
                word.push(letter);
                self.left_parts(row, anchor, data, word, child, limit - 1);
                word.pop();
                self.rack.push(letter);
            }
            if self.take('?') {
                word.push(letter.to_ascii_lowercase());
                self.left_parts(row, anchor, data, word, child, limit - 1);
                word.pop();
                self.rack.push('?');
            }
        }
    }

    fn extend_right(
        &mut self,
        row: usize,
        anchor: usize,
        data: &RowData,
        word: &mut String,
        node: &'a TrieNode,
        col: usize,
    ) {
        let board = self.board;
        let dim = board.dim();

        if col < dim {
            if let Some(letter) = board.letter(row, col) {
                // Occupied square: the word must run through its letter.
                if let Some(child) = node.child(letter) {
                    word.push(letter);
                    self.extend_right(row, anchor, data, word, child, col + 1);
                    word.pop();
                }
                return;
            }
        }

        if col > anchor && node.is_terminal() {
            self.emit(row, col, word, data);
        }

        if col < dim {
            for (letter, child) in node.children() {
                if !data.checks[col].contains(letter) {
                    continue;
                }
                if self.take(letter) {
                    word.push(letter);
                    self.extend_right(row, anchor, data, word, child, col + 1);
                    word.pop();
                    self.rack.push(letter);
                }
                if self.take('?') {
                    word.push(letter.to_ascii_lowercase());
                    self.extend_right(row, anchor, data, word, child, col + 1);
                    word.pop();
                    self.rack.push('?');
                }
            }
        }
    }

    fn emit(&mut self, row: usize, end_col: usize, word: &str, data: &RowData) {
        let board = self.board;
        let start = end_col - word.len();
        let score = self.score_word(row, end_col, word, data);
        let tile_mask: Vec<bool> = (start..end_col)
            .map(|col| board.letter(row, col).is_none())
            .collect();
        self.moves.push(Move::placed(
            Kind::Across,
            row,
            start,
            word.to_string(),
            tile_mask,
            score,
        ));
    }

    fn score_word(&self, row: usize, end_col: usize, word: &str, data: &RowData) -> i32 {
        let board = self.board;
        let start = end_col - word.len();
        let mut base = 0;
        let mut base_mult = 1;
        let mut extra = 0;
        let mut played = 0;

        for (i, letter) in word.chars().enumerate() {
            let col = start + i;
            let mut value = board.letter_value(letter);
            if board.letter(row, col).is_none() {
                played += 1;
                // Letter bonuses apply only to newly placed tiles; the
                // cross-score is pre-multiplied for its own word bonus, so
                // the new tile joins it at its letter-bonus-adjusted value.
                if let Bonus::Letter(k) = board.bonus(row, col) {
                    value *= k as i32;
                }
                if let Some(cross) = data.scores[col] {
                    extra += cross + value;
                }
                if let Bonus::Word(k) = board.bonus(row, col) {
                    base_mult *= k as i32;
                }
            }
            base += value;
        }

        if played == board.rack_size() {
            extra += board.bingo_bonus();
        }
        base * base_mult + extra
    }

    fn take(&mut self, glyph: char) -> bool {
        match self.rack.iter().position(|&c| c == glyph) {
            Some(i) => {
                self.rack.swap_remove(i);
                true
            }
            None => false,
        }
    }
}
