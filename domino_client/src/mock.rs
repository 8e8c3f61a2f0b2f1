use std::collections::VecDeque;
use std::sync::Mutex;

use domino::{GameState, PlayerSummary, Seat, Side, Tile, ValidMoves};

use crate::{GameService, ServiceError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Start(Seat),
    FetchState,
    FetchValidMoves,
    Play(usize, Option<Side>),
    Skip,
    Reset,
}

/// A game service that answers from queues of prepared responses.
///
/// `start`, `fetch_state`, `play` and `skip` share one queue of states, so
/// responses must be pushed in the order the calls are expected. An empty
/// queue answers with `ServiceUnavailable`.
#[derive(Default)]
pub(crate) struct ScriptedService {
    calls: Mutex<Vec<Call>>,
    states: Mutex<VecDeque<Result<GameState, ServiceError>>>,
    valid_moves: Mutex<VecDeque<Result<ValidMoves, ServiceError>>>,
}

impl ScriptedService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_state(&self, state: Result<GameState, ServiceError>) {
        self.states.lock().unwrap().push_back(state);
    }

    pub(crate) fn push_moves(&self, valid: &[usize], ambiguous: &[usize]) {
        self.valid_moves.lock().unwrap().push_back(Ok(ValidMoves {
            valid: valid.to_vec(),
            ambiguous: ambiguous.to_vec(),
        }));
    }

    pub(crate) fn push_moves_error(&self, err: ServiceError) {
        self.valid_moves.lock().unwrap().push_back(Err(err));
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_state(&self) -> Result<GameState, ServiceError> {
        self.states
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }
}

fn unscripted() -> ServiceError {
    ServiceError::ServiceUnavailable {
        reason: String::from("no scripted response"),
    }
}

impl GameService for ScriptedService {
    fn start(&self, seat: Seat) -> Result<GameState, ServiceError> {
        self.record(Call::Start(seat));
        self.next_state()
    }

    fn fetch_state(&self) -> Result<GameState, ServiceError> {
        self.record(Call::FetchState);
        self.next_state()
    }

    fn fetch_valid_moves(&self) -> Result<ValidMoves, ServiceError> {
        self.record(Call::FetchValidMoves);
        self.valid_moves
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted()))
    }

    fn play(&self, tile_index: usize, side: Option<Side>) -> Result<GameState, ServiceError> {
        self.record(Call::Play(tile_index, side));
        self.next_state()
    }

    fn skip(&self) -> Result<GameState, ServiceError> {
        self.record(Call::Skip);
        self.next_state()
    }

    fn reset(&self) -> Result<(), ServiceError> {
        self.record(Call::Reset);
        Ok(())
    }
}

/// A game in progress with `active` to play.
pub(crate) fn running_state(active: Seat) -> GameState {
    let players = Seat::ALL
        .into_iter()
        .map(|seat| PlayerSummary {
            name: String::from(seat.name()),
            strategy: String::from(if seat == Seat::A { "User" } else { "AI" }),
            tiles: vec![Tile(0, 1), Tile(1, 1), Tile(2, 6), Tile(3, 4), Tile(5, 5), Tile(6, 1)],
            tile_count: 6,
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
        game_over: false,
        winner: None,
        game_locked: false,
        team_ac_points: 0,
        team_bd_points: 0,
        play_history: vec![(String::from("D"), Tile(6, 6))],
        game_history: vec![],
    }
}

/// A finished game won by `winner`.
pub(crate) fn finished_state(winner: Seat) -> GameState {
    let mut state = running_state(winner);
    state.game_over = true;
    state.winner = Some(String::from(winner.name()));
    state
}
