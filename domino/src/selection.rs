use crate::{IllegalAction, Side, StaleSelection, ValidMoves};

/// The human's tile selection.
///
/// ```text
/// Idle --tap--> Selected --resolve--> AwaitingSide --choose_side--> Idle
///                   |
///                   +------resolve (unambiguous or stale)--------> Idle
/// ```
///
/// `Selected` lasts while the valid moves are re-queried. Only `resolve()`
/// moves out of it, which makes that re-query an explicit step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        tile_index: usize,
    },
    AwaitingSide {
        tile_index: usize,
    },
}

/// A tile the human has committed to play.
///
/// `side` is `Some` exactly when the tile was ambiguous.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayIntent {
    pub tile_index: usize,
    pub side: Option<Side>,
}

/// What to do after the valid moves for a selected tile were re-queried.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The tile fits on one end only and can be played right away.
    Play(PlayIntent),
    /// The tile fits on both ends, the human needs to pick one.
    AwaitSide { tile_index: usize },
    /// The tile is not playable anymore.
    Stale(StaleSelection),
}

impl Selection {
    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    /// The selected tile, if any.
    pub fn tile_index(&self) -> Option<usize> {
        match *self {
            Selection::Idle => None,
            Selection::Selected { tile_index } | Selection::AwaitingSide { tile_index } => {
                Some(tile_index)
            }
        }
    }

    pub fn awaiting_side(&self) -> Option<usize> {
        match *self {
            Selection::AwaitingSide { tile_index } => Some(tile_index),
            _ => None,
        }
    }

    /// Registers a tap on a hand tile.
    ///
    /// Only taps on tiles in the last known valid moves are accepted, and
    /// only while nothing else is selected. A refused tap leaves the
    /// selection unchanged.
    pub fn tap(&mut self, tile_index: usize, valid_moves: &ValidMoves) -> Result<(), IllegalAction> {
        match *self {
            Selection::Idle if valid_moves.contains(tile_index) => {
                *self = Selection::Selected { tile_index };
                Ok(())
            }
            Selection::Idle => Err(IllegalAction::TileNotPlayable { tile_index }),
            Selection::Selected { tile_index } | Selection::AwaitingSide { tile_index } => {
                Err(IllegalAction::SelectionPending { tile_index })
            }
        }
    }

    /// Decides how to continue with a `Selected` tile, given freshly fetched valid moves.
    pub fn resolve(&mut self, fresh: &ValidMoves) -> Result<Resolution, IllegalAction> {
        let Selection::Selected { tile_index } = *self else {
            return Err(IllegalAction::NoSelectionPending);
        };
        let resolution = if !fresh.contains(tile_index) {
            *self = Selection::Idle;
            Resolution::Stale(StaleSelection { tile_index })
        } else if fresh.is_ambiguous(tile_index) {
            *self = Selection::AwaitingSide { tile_index };
            Resolution::AwaitSide { tile_index }
        } else {
            *self = Selection::Idle;
            Resolution::Play(PlayIntent {
                tile_index,
                side: None,
            })
        };
        Ok(resolution)
    }

    /// Commits the side for the tile that is awaiting one.
    ///
    /// The selection is cleared no matter what happens with the play afterwards.
    pub fn choose_side(&mut self, side: Side) -> Result<PlayIntent, IllegalAction> {
        match *self {
            Selection::AwaitingSide { tile_index } => {
                *self = Selection::Idle;
                Ok(PlayIntent {
                    tile_index,
                    side: Some(side),
                })
            }
            _ => Err(IllegalAction::NoSelectionPending),
        }
    }

    /// Drops a tile awaiting a side if `valid_moves` no longer lists it as ambiguous.
    pub fn invalidate_if_stale(&mut self, valid_moves: &ValidMoves) -> Option<StaleSelection> {
        match *self {
            Selection::AwaitingSide { tile_index } if !valid_moves.is_ambiguous(tile_index) => {
                *self = Selection::Idle;
                Some(StaleSelection { tile_index })
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        *self = Selection::Idle;
    }
}
