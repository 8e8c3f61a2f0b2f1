use crate::{GameState, PlayerSummary, Seat, Side, Tile, ValidMoves};

/// A running game with `active` to play, and `game_over` as given.
///
/// Every seat holds the same two tiles.
pub(crate) fn game_state(active: Seat, game_over: bool) -> GameState {
    let players = Seat::ALL
        .into_iter()
        .map(|seat| PlayerSummary {
            name: String::from(seat.name()),
            strategy: String::from("AI"),
            tiles: vec![Tile(1, 2), Tile(4, 4)],
            tile_count: 2,
            team: seat.team().to_string(),
            is_current: seat == active,
        })
        .collect();
    GameState {
        table: vec![Tile(6, 6)],
        playable_numbers: vec![6, 6],
        players,
        current_player: String::from(active.name()),
        current_player_index: active.index(),
        turn_count: 1,
        passes: 0,
        game_over,
        winner: None,
        game_locked: false,
        team_ac_points: 0,
        team_bd_points: 0,
        play_history: vec![],
        game_history: vec![],
    }
}

impl quickcheck::Arbitrary for Seat {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Seat::ALL).unwrap()
    }
}

impl quickcheck::Arbitrary for Side {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Side::Left, Side::Right]).unwrap()
    }
}

impl quickcheck::Arbitrary for Tile {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Tile(u8::arbitrary(g) % 7, u8::arbitrary(g) % 7)
    }
}

impl quickcheck::Arbitrary for ValidMoves {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // A hand has at most seven tiles
        let mut valid = Vec::new();
        let mut ambiguous = Vec::new();
        for tile_index in 0..7 {
            if bool::arbitrary(g) {
                valid.push(tile_index);
                if bool::arbitrary(g) {
                    ambiguous.push(tile_index);
                }
            }
        }
        ValidMoves { valid, ambiguous }
    }
}
