use std::sync::{Arc, Mutex};

use domino::{GameState, Seat, Side, ValidMoves};
use domino_client::{ClientConfig, GameService, ServiceError, Session};

use crate::app::App;

/// Seat A to play, holding `[6|3]`, `[1|2]` and `[6|6]`.
const RUNNING: &str = r#"{
    "table": [[6, 1], [1, 3]],
    "playable_numbers": [6, 3],
    "players": [
        {"name": "A", "strategy": "User", "tiles": [[6, 3], [1, 2], [6, 6]], "tile_count": 3, "team": "AC", "is_current": true},
        {"name": "B", "strategy": "Greedy", "tiles": [[2, 2], [0, 4]], "tile_count": 2, "team": "BD", "is_current": false},
        {"name": "C", "strategy": "Greedy", "tiles": [[5, 5], [0, 1]], "tile_count": 2, "team": "AC", "is_current": false},
        {"name": "D", "strategy": "Random", "tiles": [[4, 4], [0, 0]], "tile_count": 2, "team": "BD", "is_current": false}
    ],
    "current_player": "A",
    "current_player_index": 0,
    "turn_count": 3,
    "passes": 0,
    "game_over": false,
    "winner": null,
    "game_locked": false,
    "team_ac_points": 0,
    "team_bd_points": 0,
    "play_history": [["C", [6, 1]], ["D", [1, 3]]],
    "game_history": [
        {"player": "B", "action": "passed", "tile": null, "reasoning": ""},
        {"player": "C", "action": "played", "tile": [6, 1], "reasoning": ""},
        {"player": "D", "action": "played", "tile": [1, 3], "reasoning": ""}
    ]
}"#;

pub(crate) fn running_state() -> GameState {
    serde_json::from_str(RUNNING).unwrap()
}

/// A locked game won by team BD.
pub(crate) fn locked_state() -> GameState {
    let mut state = running_state();
    state.game_over = true;
    state.game_locked = true;
    state.winner = Some(String::from("B"));
    state.team_ac_points = 31;
    state.team_bd_points = 20;
    state
}

/// A game service that answers every request with the same state.
#[derive(Clone)]
pub(crate) struct FixedService {
    pub(crate) state: GameState,
    pub(crate) valid_moves: ValidMoves,
    /// Names of the requests made so far.
    pub(crate) calls: Arc<Mutex<Vec<String>>>,
}

impl FixedService {
    pub(crate) fn new(state: GameState, valid: &[usize], ambiguous: &[usize]) -> Self {
        Self {
            state,
            valid_moves: ValidMoves {
                valid: valid.to_vec(),
                ambiguous: ambiguous.to_vec(),
            },
            calls: Arc::default(),
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl GameService for FixedService {
    fn start(&self, seat: Seat) -> Result<GameState, ServiceError> {
        self.record(format!("start {}", seat));
        Ok(self.state.clone())
    }

    fn fetch_state(&self) -> Result<GameState, ServiceError> {
        self.record(String::from("state"));
        Ok(self.state.clone())
    }

    fn fetch_valid_moves(&self) -> Result<ValidMoves, ServiceError> {
        self.record(String::from("valid moves"));
        Ok(self.valid_moves.clone())
    }

    fn play(&self, tile_index: usize, side: Option<Side>) -> Result<GameState, ServiceError> {
        match side {
            Some(side) => self.record(format!("play {} {}", tile_index, side)),
            None => self.record(format!("play {}", tile_index)),
        }
        Ok(self.state.clone())
    }

    fn skip(&self) -> Result<GameState, ServiceError> {
        self.record(String::from("skip"));
        Ok(self.state.clone())
    }

    fn reset(&self) -> Result<(), ServiceError> {
        self.record(String::from("reset"));
        Ok(())
    }
}

pub(crate) fn app(service: FixedService) -> App<FixedService> {
    App::new(Session::new(service, &ClientConfig::default()))
}
