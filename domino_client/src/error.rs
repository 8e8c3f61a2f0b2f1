use domino::{IllegalAction, StaleSelection};
use thiserror::Error;

/// Why a request to the game service failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service could not be reached, or did not answer in time.
    #[error("Cannot reach the game service: {reason}")]
    ServiceUnavailable { reason: String },
    #[error("The game service answered with status {status}: {body}")]
    ServerError { status: u16, body: String },
    /// A play was refused, e.g. because it was based on an outdated state.
    #[error("The game service rejected the move (status {status}): {body}")]
    PlayRejected { status: u16, body: String },
    /// The response could not be understood.
    #[error("Unexpected response from the game service: {reason}")]
    FetchError { reason: String },
}

/// Everything that can go wrong with a user action.
///
/// None of these are fatal. They are shown to the user, who dismisses them.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// Refused locally, the service was not contacted.
    #[error(transparent)]
    IllegalAction(#[from] IllegalAction),
    #[error(transparent)]
    StaleSelection(#[from] StaleSelection),
}

impl ClientError {
    /// Whether the cached game may be outdated after this error, so that
    /// dismissing it should fetch the game again.
    pub fn needs_resync(&self) -> bool {
        !matches!(self, ClientError::IllegalAction(_))
    }
}
