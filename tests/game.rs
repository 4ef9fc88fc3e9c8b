//! Full games driven through the referee: a deterministic head-of-bag game
//! between two max-score players, and games cut short by illegal moves.

use scrabble_engine::{
    Board, DrawMode, Error, Lexicon, MaxScore, Move, Player, RackPlayer, Referee, Variant,
};

/// 15x15 variant with a small A-F alphabet, used for short reproducible
/// games. The bonus layout is the standard Scrabble one.
fn test_variant() -> Variant {
    let mut variant = Variant::scrabble();
    variant.letter_distribution = vec![
        ('?', 2),
        ('A', 18),
        ('B', 4),
        ('C', 4),
        ('D', 8),
        ('E', 24),
        ('F', 4),
    ]
    .into_iter()
    .collect();
    variant.letter_values = vec![('A', 1), ('B', 3), ('C', 3), ('D', 2), ('E', 1), ('F', 4)]
        .into_iter()
        .collect();
    variant
}

fn fixture_lexicon() -> Lexicon {
    Lexicon::from_words(&[
        "aa", "ab", "aba", "abba", "abbe", "abed", "ace", "aced", "ad", "add", "ae", "aff", "ba",
        "baa", "baba", "babe", "bad", "baff", "be", "bead", "bed", "bee", "beef", "cab", "caca",
        "cad", "cade", "cafe", "caff", "ceca", "cede", "cee", "dab", "dace", "dad", "de", "deaf",
        "deb", "dee", "deed", "def", "ebb", "ed", "ef", "eff", "fab", "fad", "fe", "fee", "feed",
    ])
}

#[test]
fn deterministic_game() {
    let lexicon = fixture_lexicon();
    let mut p1 = RackPlayer::new(&lexicon, Board::new(test_variant()), MaxScore);
    let mut p2 = RackPlayer::new(&lexicon, Board::new(test_variant()), MaxScore);
    let referee = Referee::new(
        &mut p1,
        &mut p2,
        &lexicon,
        Board::new(test_variant()),
        DrawMode::InOrder,
    );
    let game = referee.run();

    let expected: Vec<(&str, &str, &str, i32)> = vec![
        ("p1", "??AAAAA", "cAcA 8H", 4),
        ("p2", "AAAAAAA", "AA 7K", 4),
        ("p1", "AAAAAAA", "AA 6L", 4),
        ("p2", "AAAAAAA", "AA 5M", 4),
        ("p1", "AAAAABB", "ABBA 4L", 27),
        ("p2", "AAAAABB", "BAB(A) O1", 24),
        ("p1", "AAACCCC", "CAC(A) 2L", 16),
        ("p2", "AAAADDD", "D(A)D I7", 9),
        ("p1", "AACCDDD", "CA(c)A H6", 11),
        ("p2", "AAAADDD", "DAD G9", 14),
        ("p1", "CDDDEEE", "CE(D)E 11E", 14),
        ("p2", "AAADEEE", "DEE 12H", 11),
        ("p1", "DDDEEEE", "DEED 11J", 15),
        ("p2", "AAAEEEE", "(D)EE M11", 8),
        ("p1", "DEEEEEE", "DEE 13I", 15),
        ("p2", "AAAEEEE", "A(E) F10", 8),
        ("p1", "EEEEEEE", "(C)EE E11", 5),
        ("p2", "AAEEEEE", "AA D12", 9),
        ("p1", "EEEEEEE", "--", 0),
        ("p2", "EEEEEFF", "F(E)E 12L", 18),
        ("p1", "EEEEEEE", "--", 0),
        ("p2", "EEEEFFF", "(E)FF N12", 23),
        ("p1", "EEEEEEE", "(F)E 14N", 5),
        ("p2", "EEEEF", "F(E)E O13", 27),
        ("p1", "EEEEEE", "--", 0),
        ("p2", "EEE", "--", 0),
        ("p1", "EEEEEE", "--", 0),
        ("p2", "EEE", "--", 0),
        ("p1", "EEEEEE", "--", 0),
        ("p2", "EEE", "--", 0),
    ];

    let got: Vec<(&str, &str, &str, i32)> = game
        .moves
        .iter()
        .map(|m| {
            (
                m.player.as_str(),
                m.rack_before.as_str(),
                m.move_string.as_str(),
                m.score,
            )
        })
        .collect();
    assert_eq!(got, expected);

    assert_eq!(game.players[0].id, "p1");
    assert_eq!(game.players[0].score, 110);
    assert_eq!(game.players[0].rack, "EEEEEE");
    assert!(game.players[0].exception.is_none());
    assert_eq!(game.players[1].id, "p2");
    assert_eq!(game.players[1].score, 156);
    assert_eq!(game.players[1].rack, "EEE");
    assert!(game.players[1].exception.is_none());
}

/// Every tile of the 64-tile bag ends up on the board or in a final rack.
#[test]
fn deterministic_game_conserves_tiles() {
    let lexicon = fixture_lexicon();
    let mut p1 = RackPlayer::new(&lexicon, Board::new(test_variant()), MaxScore);
    let mut p2 = RackPlayer::new(&lexicon, Board::new(test_variant()), MaxScore);
    let referee = Referee::new(
        &mut p1,
        &mut p2,
        &lexicon,
        Board::new(test_variant()),
        DrawMode::InOrder,
    );
    let game = referee.run();

    let placed: usize = game
        .moves
        .iter()
        .map(|record| {
            let m: Move = record.move_string.parse().unwrap();
            match m.kind() {
                scrabble_engine::Kind::Trade => 0,
                _ => m.tiles().len(),
            }
        })
        .sum();
    let rack_tiles: usize = game.players.iter().map(|p| p.rack.len()).sum();
    let total: u32 = test_variant().letter_distribution.values().sum();
    assert_eq!(placed + rack_tiles, total as usize);
}

struct ScriptedPlayer {
    line: &'static str,
}

impl Player for ScriptedPlayer {
    fn play(&mut self, _drawn: &[char], _opponent_move: Option<&Move>) -> Result<Move, Error> {
        self.line.parse()
    }
}

#[test]
fn illegal_placement_ends_the_game() {
    let lexicon = fixture_lexicon();
    let mut p1 = RackPlayer::new(&lexicon, Board::new(test_variant()), MaxScore);
    let mut p2 = ScriptedPlayer { line: "ZZZZZZZ A1" };
    let referee = Referee::new(
        &mut p1,
        &mut p2,
        &lexicon,
        Board::new(test_variant()),
        DrawMode::InOrder,
    );
    let game = referee.run();

    assert_eq!(game.moves.len(), 1);
    assert_eq!(game.moves[0].move_string, "cAcA 8H");
    assert_eq!(game.players[0].score, 4);
    assert_eq!(game.players[0].rack, "AAAAAAA");
    assert!(game.players[0].exception.is_none());
    assert_eq!(game.players[1].score, 0);
    assert_eq!(game.players[1].rack, "AAAAAAA");
    assert_eq!(
        game.players[1].exception.as_deref(),
        Some("invalid move: ZZZZZZZ A1")
    );
}

#[test]
fn illegal_trade_ends_the_game() {
    let lexicon = fixture_lexicon();
    let mut p1 = RackPlayer::new(&lexicon, Board::new(test_variant()), MaxScore);
    let mut p2 = ScriptedPlayer { line: "ZZZZZZZ --" };
    let referee = Referee::new(
        &mut p1,
        &mut p2,
        &lexicon,
        Board::new(test_variant()),
        DrawMode::InOrder,
    );
    let game = referee.run();

    // The trade itself is recorded; the rack check then fails.
    assert_eq!(game.moves.len(), 2);
    assert_eq!(game.moves[1].move_string, "ZZZZZZZ --");
    assert_eq!(game.moves[1].score, 0);
    assert_eq!(
        game.players[1].exception.as_deref(),
        Some("letter Z not in rack")
    );
    assert_eq!(game.players[1].score, 0);
}

#[test]
fn exchange_needs_a_full_bag() {
    // Eight tiles total: after both racks are drawn the bag is empty, so
    // any non-empty exchange is illegal.
    let mut variant = test_variant();
    variant.letter_distribution = vec![('A', 8)].into_iter().collect();
    let lexicon = Lexicon::new();
    let mut p1 = ScriptedPlayer { line: "A --" };
    let mut p2 = RackPlayer::new(&lexicon, Board::new(variant.clone()), MaxScore);
    let referee = Referee::new(
        &mut p1,
        &mut p2,
        &lexicon,
        Board::new(variant),
        DrawMode::InOrder,
    );
    let game = referee.run();

    assert!(game.moves.is_empty());
    assert_eq!(
        game.players[0].exception.as_deref(),
        Some("attempt to exchange with less than 7 tiles in the bag")
    );
}

/// With no legal placements ever, both players exchange one tile per turn
/// until six consecutive trades end the game, and each player's final score
/// is minus the value of its rack.
#[test]
fn six_trades_end_the_game() {
    let lexicon = Lexicon::new();
    let mut p1 = RackPlayer::new(&lexicon, Board::default(), MaxScore);
    let mut p2 = RackPlayer::new(&lexicon, Board::default(), MaxScore);
    let referee = Referee::new(
        &mut p1,
        &mut p2,
        &lexicon,
        Board::default(),
        DrawMode::Random,
    );
    let game = referee.run();

    assert_eq!(game.moves.len(), 6);
    assert!(game.moves.iter().all(|m| m.move_string.ends_with("--")));
    let board = Board::default();
    for player in &game.players {
        let rack_value: i32 = player.rack.chars().map(|l| board.letter_value(l)).sum();
        assert_eq!(player.score, -rack_value);
        assert_eq!(player.rack.len(), 7);
        assert!(player.exception.is_none());
    }
}
