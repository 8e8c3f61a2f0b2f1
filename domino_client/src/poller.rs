use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use domino::{GameState, Generation};
use tracing::{debug, trace};

use crate::{GameService, ServiceError};

/// The outcome of one delayed state fetch.
#[derive(Debug)]
pub struct PollResult {
    /// The session generation the poll was scheduled under.
    pub generation: Generation,
    pub result: Result<GameState, ServiceError>,
}

/// Re-fetches the game state after a delay, while other seats are playing.
///
/// At most one poll is outstanding at any time. Each poll runs on its own
/// short-lived thread and is tagged with a [`Generation`]. [`Poller::cancel`]
/// moves the poller to a new generation: a poll from an older one skips its
/// request if it has not fired yet, and its result is dropped if it arrives
/// later.
pub struct Poller<S> {
    service: Arc<S>,
    delay: Duration,
    /// The generation whose polls are still wanted. Shared with the poll threads.
    current: Arc<AtomicU64>,
    in_flight: Option<Generation>,
    sender: Sender<PollResult>,
    receiver: Receiver<PollResult>,
}

impl<S: GameService> Poller<S> {
    pub fn new(service: Arc<S>, delay: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            service,
            delay,
            current: Arc::new(AtomicU64::new(Generation::default().get())),
            in_flight: None,
            sender,
            receiver,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a poll has been scheduled and its result not yet taken.
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Abandons any outstanding poll and only accepts polls of `generation` from now on.
    pub fn cancel(&mut self, generation: Generation) {
        if let Some(stale) = self.in_flight.take() {
            debug!(%stale, %generation, "Cancelling poll");
        }
        self.current.store(generation.get(), Ordering::SeqCst);
    }

    /// Schedules a single state fetch after the delay.
    ///
    /// Returns `false` without scheduling anything if a poll is already outstanding.
    pub fn schedule(&mut self, generation: Generation) -> bool {
        if let Some(pending) = self.in_flight {
            debug!(%pending, "Poll already scheduled");
            return false;
        }
        self.current.store(generation.get(), Ordering::SeqCst);
        self.in_flight = Some(generation);
        let delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX);
        debug!(%generation, delay_ms, "Scheduling poll");

        let service = Arc::clone(&self.service);
        let current = Arc::clone(&self.current);
        let sender = self.sender.clone();
        let delay = self.delay;
        thread::spawn(move || {
            thread::sleep(delay);
            if current.load(Ordering::SeqCst) != generation.get() {
                trace!(%generation, "Poll cancelled before it fired");
                return;
            }
            let result = service.fetch_state();
            // The receiver is gone if the session was dropped, then nobody needs the result.
            let _ = sender.send(PollResult { generation, result });
        });
        true
    }

    /// Takes the result of the outstanding poll, if it has arrived.
    pub fn try_next(&mut self) -> Option<PollResult> {
        while let Ok(poll) = self.receiver.try_recv() {
            if let Some(poll) = self.accept(poll) {
                return Some(poll);
            }
        }
        None
    }

    /// Like [`Poller::try_next`], but waits up to `timeout` for the result.
    pub fn wait_next(&mut self, timeout: Duration) -> Option<PollResult> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(poll) => {
                    if let Some(poll) = self.accept(poll) {
                        return Some(poll);
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
    }

    fn accept(&mut self, poll: PollResult) -> Option<PollResult> {
        if self.in_flight == Some(poll.generation) {
            self.in_flight = None;
            Some(poll)
        } else {
            debug!(generation = %poll.generation, "Dropping result of a cancelled poll");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{running_state, Call, ScriptedService};
    use domino::Seat;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn one_poll_at_a_time() {
        let service = Arc::new(ScriptedService::new());
        let mut poller = Poller::new(Arc::clone(&service), Duration::from_secs(3600));
        let generation = Generation::default().next();
        assert!(poller.schedule(generation));
        assert!(!poller.schedule(generation));
        assert!(poller.is_pending());
        assert!(poller.try_next().is_none());
        assert!(service.calls().is_empty());
    }

    #[test]
    fn delivers_result_of_current_generation() {
        let service = Arc::new(ScriptedService::new());
        service.push_state(Ok(running_state(Seat::B)));
        let mut poller = Poller::new(Arc::clone(&service), Duration::ZERO);
        let generation = Generation::default().next();
        poller.schedule(generation);
        let poll = poller.wait_next(WAIT).unwrap();
        assert_eq!(poll.generation, generation);
        assert_eq!(poll.result.unwrap().active_seat(), Some(Seat::B));
        assert!(!poller.is_pending());
        assert_eq!(service.calls(), vec![Call::FetchState]);
    }

    #[test]
    fn cancelled_poll_is_dropped() {
        let service = Arc::new(ScriptedService::new());
        service.push_state(Ok(running_state(Seat::B)));
        let mut poller = Poller::new(Arc::clone(&service), Duration::ZERO);
        let generation = Generation::default().next();
        poller.schedule(generation);
        poller.cancel(generation.next());
        assert!(!poller.is_pending());
        // Whether or not the request went out, its result must not show up
        assert!(poller.wait_next(Duration::from_millis(200)).is_none());
    }
}
