use serde::{Deserialize, Serialize};

use crate::{Seat, Team};

/// A domino tile: an unordered pair of pip counts.
///
/// Serialized as a two-element JSON array, e.g. `[6, 3]`. The order of the
/// two halves is only meaningful for rendering the line on the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tile(pub u8, pub u8);

impl Tile {
    pub fn is_double(&self) -> bool {
        self.0 == self.1
    }

    pub fn has_pips(&self, pips: u8) -> bool {
        self.0 == pips || self.1 == pips
    }

    /// Sum of both halves, which is what a tile is worth when a locked game is scored.
    pub fn points(&self) -> u32 {
        u32::from(self.0) + u32::from(self.1)
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}|{}]", self.0, self.1)
    }
}

/// Which end of the line of tiles an ambiguous tile should be attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Snapshot of a whole game, as reported by the game service.
///
/// The client never edits a snapshot; a new one replaces the old one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The line of tiles on the table, from the left end to the right end.
    pub table: Vec<Tile>,
    /// The pip values open at the two ends. Empty before the first tile is played.
    #[serde(default)]
    pub playable_numbers: Vec<u8>,
    /// One entry per seat, in seat order.
    pub players: Vec<PlayerSummary>,
    /// Name of the seat whose turn it is.
    pub current_player: String,
    #[serde(default)]
    pub current_player_index: usize,
    pub turn_count: u32,
    /// Number of consecutive passes.
    #[serde(default)]
    pub passes: u32,
    pub game_over: bool,
    /// Name of the winning seat. For a locked game this is the first seat of
    /// the winning team.
    #[serde(default)]
    pub winner: Option<String>,
    /// Whether the game ended because nobody could play.
    #[serde(default)]
    pub game_locked: bool,
    #[serde(default)]
    pub team_ac_points: u32,
    #[serde(default)]
    pub team_bd_points: u32,
    /// Every tile placed so far, with the name of who placed it.
    #[serde(default)]
    pub play_history: Vec<(String, Tile)>,
    /// The most recent moves, oldest first. The service only keeps a few.
    #[serde(default)]
    pub game_history: Vec<HistoryEntry>,
}

impl GameState {
    /// The seat whose turn it is, if the service reported a recognizable one.
    pub fn active_seat(&self) -> Option<Seat> {
        self.current_player
            .parse::<Seat>()
            .ok()
            .or_else(|| Seat::from_index(self.current_player_index))
    }

    pub fn player(&self, seat: Seat) -> Option<&PlayerSummary> {
        self.players.get(seat.index())
    }

    /// The tiles in the hand of `seat`, or an empty slice if the service did not report them.
    pub fn hand(&self, seat: Seat) -> &[Tile] {
        self.player(seat)
            .map(|player| player.tiles.as_slice())
            .unwrap_or(&[])
    }

    pub fn team_points(&self, team: Team) -> u32 {
        match team {
            Team::AC => self.team_ac_points,
            Team::BD => self.team_bd_points,
        }
    }

    /// The team that won, once the game is over.
    pub fn winning_team(&self) -> Option<Team> {
        if !self.game_over {
            return None;
        }
        let winner = self.winner.as_deref()?.parse::<Seat>().ok()?;
        Some(winner.team())
    }
}

/// What the service tells us about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    /// A descriptive label, e.g. "User" for the human seat.
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub tiles: Vec<Tile>,
    pub tile_count: usize,
    pub team: String,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveAction {
    Played,
    Passed,
}

/// One entry of the recent move history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub player: String,
    pub action: MoveAction,
    /// Only present when a tile was played.
    #[serde(default)]
    pub tile: Option<Tile>,
    #[serde(default)]
    pub reasoning: String,
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.action, self.tile) {
            (MoveAction::Played, Some(tile)) => write!(f, "{} played {}", self.player, tile),
            (MoveAction::Played, None) => write!(f, "{} played", self.player),
            (MoveAction::Passed, _) => write!(f, "{} passed", self.player),
        }
    }
}

/// The hand indices the active seat may play, as computed by the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidMoves {
    #[serde(rename = "valid_moves")]
    pub valid: Vec<usize>,
    /// The subset of `valid` that fits on both ends of the line.
    #[serde(rename = "ambiguous_tiles", default)]
    pub ambiguous: Vec<usize>,
}

impl ValidMoves {
    pub fn contains(&self, tile_index: usize) -> bool {
        self.valid.contains(&tile_index)
    }

    /// Only valid indices can be ambiguous.
    pub fn is_ambiguous(&self, tile_index: usize) -> bool {
        self.contains(tile_index) && self.ambiguous.contains(&tile_index)
    }

    pub fn is_empty(&self) -> bool {
        self.valid.is_empty()
    }
}

/// Body of the request that starts a new game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartRequest {
    /// Index of the seat taken by the human, `0..4`.
    pub player_position: usize,
}

impl From<Seat> for StartRequest {
    fn from(seat: Seat) -> Self {
        Self {
            player_position: seat.index(),
        }
    }
}

/// Body of the request that plays a tile from the human's hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    pub tile_index: usize,
    /// Only sent for ambiguous tiles. When not needed, this is omitted from
    /// the JSON serialization.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub side: Option<Side>,
}

/// Response to a play or skip.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameStateEnvelope {
    pub game_state: GameState,
    #[serde(default)]
    pub message: Option<String>,
}
