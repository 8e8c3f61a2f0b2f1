/// The error type for a user action that is refused locally, without
/// contacting the game service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalAction {
    NoGameInProgress,
    GameOver,
    /// Another seat is playing, so we are waiting for the service.
    NotYourTurn,
    /// An earlier error has not been dismissed yet.
    ErrorPending,
    /// The valid moves for the current state have not been fetched.
    ValidMovesUnknown,
    TileNotPlayable {
        tile_index: usize,
    },
    SelectionPending {
        tile_index: usize,
    },
    NoSelectionPending,
    SkipWithPlayableTiles,
}

impl std::error::Error for IllegalAction {}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::NoGameInProgress => write!(f, "No game in progress"),
            IllegalAction::GameOver => write!(f, "The game is over"),
            IllegalAction::NotYourTurn => write!(f, "It is not your turn"),
            IllegalAction::ErrorPending => {
                write!(f, "Dismiss the current error before doing anything else")
            }
            IllegalAction::ValidMovesUnknown => {
                write!(f, "The playable tiles are not known yet, refresh the game")
            }
            IllegalAction::TileNotPlayable { tile_index } => {
                write!(f, "Tile {} cannot be played right now", tile_index + 1)
            }
            IllegalAction::SelectionPending { tile_index } => write!(
                f,
                "Choose a side for tile {} before selecting another tile",
                tile_index + 1
            ),
            IllegalAction::NoSelectionPending => write!(f, "No tile is waiting for a side"),
            IllegalAction::SkipWithPlayableTiles => {
                write!(f, "You cannot skip while you have a playable tile")
            }
        }
    }
}

/// A pending tile selection that no longer matches the current state of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaleSelection {
    pub tile_index: usize,
}

impl std::error::Error for StaleSelection {}

impl std::fmt::Display for StaleSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "The game changed while tile {} was selected, select again",
            self.tile_index + 1
        )
    }
}
