use domino::{
    GameState, GameStateEnvelope, PlayRequest, Seat, Side, StartRequest, ValidMoves,
};
use reqwest::blocking::Client;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use crate::{ClientConfig, ServiceError};

/// The operations offered by the authoritative game service.
///
/// Each method is a single request/response exchange. Implementations must be
/// shareable with the background poll.
pub trait GameService: Send + Sync + 'static {
    /// Starts a new game with the human in `seat`.
    fn start(&self, seat: Seat) -> Result<GameState, ServiceError>;
    fn fetch_state(&self) -> Result<GameState, ServiceError>;
    /// The valid moves of the seat whose turn it is.
    fn fetch_valid_moves(&self) -> Result<ValidMoves, ServiceError>;
    /// `side` must be given exactly for ambiguous tiles.
    fn play(&self, tile_index: usize, side: Option<Side>) -> Result<GameState, ServiceError>;
    fn skip(&self) -> Result<GameState, ServiceError>;
    fn reset(&self) -> Result<(), ServiceError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Endpoint {
    Start,
    State,
    ValidMoves,
    Play,
    Skip,
    Reset,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Start => "start",
            Endpoint::State => "state",
            Endpoint::ValidMoves => "get-valid-moves",
            Endpoint::Play => "play",
            Endpoint::Skip => "skip",
            Endpoint::Reset => "reset",
        }
    }

    fn method(self) -> Method {
        match self {
            Endpoint::State | Endpoint::ValidMoves => Method::GET,
            Endpoint::Start | Endpoint::Play | Endpoint::Skip | Endpoint::Reset => Method::POST,
        }
    }

    fn rejection(self, status: u16, body: String) -> ServiceError {
        match self {
            Endpoint::Play => ServiceError::PlayRejected { status, body },
            _ => ServiceError::ServerError { status, body },
        }
    }
}

/// Talks to the game service over HTTP with JSON bodies.
pub struct HttpGameService {
    client: Client,
    base_url: String,
}

impl HttpGameService {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: String::from(config.server_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/api/game/{}", self.base_url, endpoint.path())
    }

    /// Returns the body of a successful response.
    fn perform_request<B: Serialize>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<String, ServiceError> {
        let url = self.url(endpoint);
        let mut request = self.client.request(endpoint.method(), &url);
        if let Some(body) = body {
            trace!(name: "Sending request", url = %url, request = %serde_json::to_string(body).unwrap_or_default());
            request = request.json(body);
        } else {
            trace!(name: "Sending request", url = %url);
        }

        let unavailable = |err: reqwest::Error| ServiceError::ServiceUnavailable {
            reason: format!("{} ({})", err, url),
        };
        let response = request.send().map_err(unavailable)?;
        let status = response.status();
        let text = response.text().map_err(unavailable)?;
        trace!(name: "Received response", url = %url, status = status.as_u16(), response = %text);

        if !status.is_success() {
            return Err(endpoint.rejection(status.as_u16(), text));
        }
        Ok(text)
    }

    fn perform_json_request<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<&B>,
    ) -> Result<T, ServiceError> {
        let text = self.perform_request(endpoint, body)?;
        serde_json::from_str::<T>(&text).map_err(|err| ServiceError::FetchError {
            reason: format!("{} response: {}", endpoint.path(), err),
        })
    }
}

impl GameService for HttpGameService {
    fn start(&self, seat: Seat) -> Result<GameState, ServiceError> {
        self.perform_json_request(Endpoint::Start, Some(&StartRequest::from(seat)))
    }

    fn fetch_state(&self) -> Result<GameState, ServiceError> {
        self.perform_json_request(Endpoint::State, None::<&()>)
    }

    fn fetch_valid_moves(&self) -> Result<ValidMoves, ServiceError> {
        self.perform_json_request(Endpoint::ValidMoves, None::<&()>)
    }

    fn play(&self, tile_index: usize, side: Option<Side>) -> Result<GameState, ServiceError> {
        let req = PlayRequest { tile_index, side };
        let envelope: GameStateEnvelope = self.perform_json_request(Endpoint::Play, Some(&req))?;
        Ok(envelope.game_state)
    }

    fn skip(&self) -> Result<GameState, ServiceError> {
        let envelope: GameStateEnvelope =
            self.perform_json_request(Endpoint::Skip, None::<&()>)?;
        Ok(envelope.game_state)
    }

    fn reset(&self) -> Result<(), ServiceError> {
        // The body is not interesting
        self.perform_request(Endpoint::Reset, None::<&()>)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls() {
        let config = ClientConfig {
            server_url: String::from("http://example.com:5001/"),
            ..ClientConfig::default()
        };
        let service = HttpGameService::new(&config).unwrap();
        assert_eq!(service.base_url(), "http://example.com:5001");
        assert_eq!(
            service.url(Endpoint::ValidMoves),
            "http://example.com:5001/api/game/get-valid-moves"
        );
        assert_eq!(Endpoint::State.method(), Method::GET);
        assert_eq!(Endpoint::Skip.method(), Method::POST);
    }

    #[test]
    fn only_play_is_rejected_as_a_move() {
        assert_eq!(
            Endpoint::Play.rejection(400, String::new()),
            ServiceError::PlayRejected {
                status: 400,
                body: String::new()
            }
        );
        assert_eq!(
            Endpoint::Skip.rejection(400, String::new()),
            ServiceError::ServerError {
                status: 400,
                body: String::new()
            }
        );
    }
}
