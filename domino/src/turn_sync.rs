use crate::{GameState, Seat};

/// What the client should do after receiving a new [`GameState`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SyncDecision {
    /// The game is over. Nothing more to fetch.
    Halt,
    /// The human's side is to play. Fetch the valid moves and wait for input.
    AwaitHuman,
    /// Another seat is to play. Fetch the state again after a delay.
    Poll,
}

impl SyncDecision {
    /// The service computes valid moves for the active seat, so they are only
    /// worth fetching when that seat is on the human's side.
    pub fn needs_valid_moves(self) -> bool {
        matches!(self, SyncDecision::AwaitHuman)
    }
}

/// Decides whether control is with the human's side.
///
/// Both the human's seat and the partner seat count as the human's side. An
/// active seat that can't be identified is treated as someone else's.
pub fn decide_sync(state: &GameState, human: Seat) -> SyncDecision {
    if state.game_over {
        return SyncDecision::Halt;
    }
    match state.active_seat() {
        Some(active) if human.same_side_as(active) => SyncDecision::AwaitHuman,
        _ => SyncDecision::Poll,
    }
}
