use std::sync::Arc;
use std::time::Duration;

use domino::{
    decide_sync, GameState, Generation, IllegalAction, PlayIntent, Resolution, Seat, Selection,
    Side, StaleSelection, SyncDecision, Tile, ValidMoves,
};
use tracing::{debug, info, warn};

use crate::{ClientConfig, ClientError, GameService, PollResult, Poller};

/// Everything the client knows about the current game.
///
/// The game and the valid moves are only ever replaced as a whole.
#[derive(Clone, Debug, Default)]
pub struct ClientState {
    pub generation: Generation,
    /// The human's seat, set when a game is started.
    pub seat: Option<Seat>,
    pub game: Option<GameState>,
    /// `None` until fetched for the current `game`. Only fetched while the
    /// human's side is to play.
    pub valid_moves: Option<ValidMoves>,
    pub selection: Selection,
}

/// What a tap on a hand tile led to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// The tile was played.
    Played,
    /// The tile fits on both ends; call [`Session::choose_side`].
    AwaitingSide { tile_index: usize },
}

/// Drives one human seat through a game hosted by a [`GameService`].
///
/// All requests that change the game are made synchronously by the caller's
/// thread, one at a time. Only the re-fetch while other seats are playing
/// runs in the background, see [`Poller`]; its results are picked up with
/// [`Session::process_poll_results`].
///
/// A failed action is returned and also kept in [`Session::error`] until
/// [`Session::dismiss_error`] is called. While it is kept, other actions are
/// refused.
pub struct Session<S> {
    service: Arc<S>,
    poller: Poller<S>,
    state: ClientState,
    error: Option<ClientError>,
}

impl<S: GameService> Session<S> {
    pub fn new(service: S, config: &ClientConfig) -> Self {
        let service = Arc::new(service);
        Self {
            poller: Poller::new(Arc::clone(&service), config.poll_delay),
            service,
            state: ClientState::default(),
            error: None,
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn game(&self) -> Option<&GameState> {
        self.state.game.as_ref()
    }

    pub fn seat(&self) -> Option<Seat> {
        self.state.seat
    }

    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    /// Whether we are waiting for other seats to play.
    pub fn is_polling(&self) -> bool {
        self.poller.is_pending()
    }

    pub fn poll_delay(&self) -> Duration {
        self.poller.delay()
    }

    /// The human's tiles.
    pub fn hand(&self) -> &[Tile] {
        match (&self.state.game, self.state.seat) {
            (Some(game), Some(seat)) => game.hand(seat),
            _ => &[],
        }
    }

    /// Whether `tile_index` is in the last known valid moves.
    pub fn is_playable(&self, tile_index: usize) -> bool {
        self.state
            .valid_moves
            .as_ref()
            .is_some_and(|valid_moves| valid_moves.contains(tile_index))
    }

    /// Whether it is the human's turn and nothing can be played.
    pub fn can_skip(&self) -> bool {
        self.check_human_turn().is_ok()
            && self.state.selection.is_idle()
            && self
                .state
                .valid_moves
                .as_ref()
                .is_some_and(|valid_moves| valid_moves.is_empty())
    }

    /// Starts a new game with the human in `seat`, discarding any current game.
    pub fn start(&mut self, seat: Seat) -> Result<(), ClientError> {
        let result = self.try_start(seat);
        self.surface(result)
    }

    /// Selects a tile from the human's hand.
    ///
    /// Taps on tiles that are not in the valid moves never reach the service.
    pub fn tap(&mut self, tile_index: usize) -> Result<TapOutcome, ClientError> {
        let result = self.try_tap(tile_index);
        self.surface(result)
    }

    /// Plays the tile awaiting a side on that side of the line.
    pub fn choose_side(&mut self, side: Side) -> Result<(), ClientError> {
        let result = self.try_choose_side(side);
        self.surface(result)
    }

    /// Passes the turn when no tile can be played.
    pub fn skip(&mut self) -> Result<(), ClientError> {
        let result = self.try_skip();
        self.surface(result)
    }

    /// Fetches the game again and continues from there.
    pub fn resync(&mut self) -> Result<(), ClientError> {
        let result = self.try_resync();
        self.surface(result)
    }

    /// Forgets the current game and asks the service to reset it.
    ///
    /// Polls issued before the reset are discarded. A failure of the service
    /// reset is only logged.
    pub fn reset(&mut self) {
        self.clear_session();
        info!(generation = %self.state.generation, "Game reset");
        if let Err(err) = self.service.reset() {
            warn!(%err, "Could not reset the game on the service");
        }
    }

    /// Clears the current error, re-fetching the game if it may be outdated.
    pub fn dismiss_error(&mut self) -> Result<(), ClientError> {
        let Some(err) = self.error.take() else {
            return Ok(());
        };
        debug!(%err, "Error dismissed");
        if err.needs_resync() && self.state.game.is_some() {
            self.resync()
        } else {
            Ok(())
        }
    }

    /// Applies the result of the background poll, if it has arrived.
    ///
    /// Returns whether a new state was applied.
    pub fn process_poll_results(&mut self) -> Result<bool, ClientError> {
        match self.poller.try_next() {
            Some(poll) => self.apply_poll(poll),
            None => Ok(false),
        }
    }

    /// Like [`Session::process_poll_results`], but waits up to `timeout` for the poll.
    pub fn wait_for_poll(&mut self, timeout: Duration) -> Result<bool, ClientError> {
        match self.poller.wait_next(timeout) {
            Some(poll) => self.apply_poll(poll),
            None => Ok(false),
        }
    }

    fn try_start(&mut self, seat: Seat) -> Result<(), ClientError> {
        self.clear_session();
        self.state.seat = Some(seat);
        info!(%seat, generation = %self.state.generation, "Starting game");
        let state = match self.service.start(seat) {
            Ok(state) => state,
            Err(err) => {
                self.state.seat = None;
                return Err(err.into());
            }
        };
        self.apply_state(state)
    }

    fn try_tap(&mut self, tile_index: usize) -> Result<TapOutcome, ClientError> {
        self.check_human_turn()?;
        let valid_moves = self
            .state
            .valid_moves
            .as_ref()
            .ok_or(IllegalAction::ValidMovesUnknown)?;
        self.state.selection.tap(tile_index, valid_moves)?;
        debug!(tile_index, "Tile selected");

        // Whether the tile is ambiguous is asked again, the cached moves may be outdated
        let fresh = match self.service.fetch_valid_moves() {
            Ok(fresh) => fresh,
            Err(err) => {
                self.state.selection.clear();
                return Err(err.into());
            }
        };
        let resolution = self.state.selection.resolve(&fresh)?;
        self.state.valid_moves = Some(fresh);
        match resolution {
            Resolution::Play(intent) => {
                self.submit(intent)?;
                Ok(TapOutcome::Played)
            }
            Resolution::AwaitSide { tile_index } => {
                debug!(tile_index, "Tile fits on both ends, waiting for a side");
                Ok(TapOutcome::AwaitingSide { tile_index })
            }
            Resolution::Stale(stale) => Err(stale.into()),
        }
    }

    fn try_choose_side(&mut self, side: Side) -> Result<(), ClientError> {
        self.check_human_turn()?;
        let intent = self.state.selection.choose_side(side)?;
        self.submit(intent)
    }

    fn try_skip(&mut self) -> Result<(), ClientError> {
        self.check_human_turn()?;
        if let Some(tile_index) = self.state.selection.tile_index() {
            return Err(IllegalAction::SelectionPending { tile_index }.into());
        }
        match &self.state.valid_moves {
            None => return Err(IllegalAction::ValidMovesUnknown.into()),
            Some(valid_moves) if !valid_moves.is_empty() => {
                return Err(IllegalAction::SkipWithPlayableTiles.into())
            }
            Some(_) => {}
        }
        info!("Skipping turn");
        let state = self.service.skip()?;
        self.apply_state(state)
    }

    fn try_resync(&mut self) -> Result<(), ClientError> {
        if self.error.is_some() {
            return Err(IllegalAction::ErrorPending.into());
        }
        if self.state.game.is_none() {
            return Err(IllegalAction::NoGameInProgress.into());
        }
        if self.poller.is_pending() {
            // The poll brings a fresh state anyway
            return Ok(());
        }
        debug!("Re-synchronizing");
        let state = self.service.fetch_state()?;
        self.apply_state(state)
    }

    fn submit(&mut self, intent: PlayIntent) -> Result<(), ClientError> {
        info!(tile_index = intent.tile_index, side = ?intent.side, "Playing tile");
        let state = self.service.play(intent.tile_index, intent.side)?;
        self.apply_state(state)
    }

    fn apply_poll(&mut self, poll: PollResult) -> Result<bool, ClientError> {
        if poll.generation != self.state.generation {
            debug!(generation = %poll.generation, "Ignoring poll of an earlier game");
            return Ok(false);
        }
        let result = poll
            .result
            .map_err(ClientError::from)
            .and_then(|state| self.apply_state(state));
        self.surface(result).map(|()| true)
    }

    /// Replaces the cached game and decides how to continue.
    fn apply_state(&mut self, state: GameState) -> Result<(), ClientError> {
        let seat = self.state.seat.ok_or(IllegalAction::NoGameInProgress)?;
        let decision = decide_sync(&state, seat);
        debug!(
            active = %state.current_player,
            turn = state.turn_count,
            game_over = state.game_over,
            ?decision,
            "New game state"
        );
        if state.game_over {
            info!(winner = ?state.winner, locked = state.game_locked, "Game over");
        }
        self.state.game = Some(state);
        self.state.valid_moves = None;

        if decision.needs_valid_moves() {
            return self.refresh_valid_moves();
        }
        if decision == SyncDecision::Poll {
            self.poller.schedule(self.state.generation);
        } else {
            self.state.valid_moves = Some(ValidMoves::default());
        }
        // The turn has left the human's side, a pending tile can't be played anymore
        match self.state.selection.tile_index() {
            Some(tile_index) => {
                self.state.selection.clear();
                Err(StaleSelection { tile_index }.into())
            }
            None => Ok(()),
        }
    }

    fn refresh_valid_moves(&mut self) -> Result<(), ClientError> {
        let valid_moves = self.service.fetch_valid_moves()?;
        let stale = self.state.selection.invalidate_if_stale(&valid_moves);
        self.state.valid_moves = Some(valid_moves);
        match stale {
            Some(stale) => Err(stale.into()),
            None => Ok(()),
        }
    }

    fn check_human_turn(&self) -> Result<(), IllegalAction> {
        if self.error.is_some() {
            return Err(IllegalAction::ErrorPending);
        }
        let (Some(seat), Some(game)) = (self.state.seat, &self.state.game) else {
            return Err(IllegalAction::NoGameInProgress);
        };
        if game.game_over {
            return Err(IllegalAction::GameOver);
        }
        if self.poller.is_pending() || decide_sync(game, seat) != SyncDecision::AwaitHuman {
            return Err(IllegalAction::NotYourTurn);
        }
        Ok(())
    }

    /// Starts a new generation with nothing known.
    fn clear_session(&mut self) {
        let generation = self.state.generation.next();
        self.poller.cancel(generation);
        self.state = ClientState {
            generation,
            ..ClientState::default()
        };
        self.error = None;
    }

    /// Keeps the first error until it is dismissed.
    fn surface<T>(&mut self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(err) = &result {
            if self.error.is_none() {
                warn!(%err, "Action failed");
                self.error = Some(err.clone());
            }
        }
        result
    }
}
