use std::time::Duration;

mod error;
#[cfg(test)]
mod mock;
mod poller;
mod service;
mod session;
pub use error::*;
pub use poller::*;
pub use service::*;
pub use session::*;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5001";

/// Settings for talking to the game service.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Scheme, host and port of the service, e.g. `http://localhost:5001`.
    pub server_url: String,
    /// A request that takes longer than this fails as unavailable.
    pub request_timeout: Duration,
    /// How long to wait before re-fetching the state while other seats play.
    pub poll_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: String::from(DEFAULT_SERVER_URL),
            request_timeout: Duration::from_secs(10),
            poll_delay: Duration::from_secs(1),
        }
    }
}
