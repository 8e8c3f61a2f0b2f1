use domino::{Seat, Side};
use domino_client::{ClientError, GameService, Session};
use ratatui::crossterm::event::KeyCode;
use tracing::debug;

/// What the user asked for with a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Previous,
    Next,
    /// Start the game in the highlighted seat, play the highlighted tile or
    /// dismiss the error, depending on the screen.
    Confirm,
    Place(Side),
    Skip,
    NewGame,
    Dismiss,
}

impl Action {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Left | KeyCode::Up => Some(Action::Previous),
            KeyCode::Right | KeyCode::Down => Some(Action::Next),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Confirm),
            KeyCode::Char('l') => Some(Action::Place(Side::Left)),
            KeyCode::Char('r') => Some(Action::Place(Side::Right)),
            KeyCode::Char('s') => Some(Action::Skip),
            KeyCode::Char('n') => Some(Action::NewGame),
            KeyCode::Esc => Some(Action::Dismiss),
            _ => None,
        }
    }

    /// Whether handling this action may wait for the game service.
    pub fn may_block(self) -> bool {
        !matches!(self, Action::Quit | Action::Previous | Action::Next)
    }
}

/// The state of the terminal UI around a [`Session`].
pub struct App<S> {
    session: Session<S>,
    /// The seat highlighted in the start menu.
    menu_seat: Seat,
    /// The hand tile highlighted during a game.
    hand_cursor: usize,
    should_quit: bool,
}

impl<S: GameService> App<S> {
    pub fn new(session: Session<S>) -> Self {
        Self {
            session,
            menu_seat: Seat::A,
            hand_cursor: 0,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn menu_seat(&self) -> Seat {
        self.menu_seat
    }

    pub fn hand_cursor(&self) -> usize {
        self.hand_cursor
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether the start menu is shown instead of a game.
    pub fn in_menu(&self) -> bool {
        self.session.game().is_none()
    }

    pub fn start(&mut self, seat: Seat) {
        self.menu_seat = seat;
        self.hand_cursor = 0;
        let result = self.session.start(seat);
        report(result);
    }

    /// Picks up the state fetched in the background, if any.
    pub fn tick(&mut self) {
        let result = self.session.process_poll_results();
        report(result);
        self.clamp_cursor();
    }

    pub fn handle(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        if self.session.error().is_some() {
            // The error dialog takes every other key
            if matches!(action, Action::Confirm | Action::Dismiss) {
                let result = self.session.dismiss_error();
                report(result);
            }
        } else if self.in_menu() {
            self.handle_menu(action);
        } else {
            self.handle_game(action);
        }
        self.clamp_cursor();
    }

    fn handle_menu(&mut self, action: Action) {
        match action {
            Action::Previous => self.menu_seat = step(self.menu_seat, Seat::ALL.len() - 1),
            Action::Next => self.menu_seat = step(self.menu_seat, 1),
            Action::Confirm => self.start(self.menu_seat),
            _ => {}
        }
    }

    fn handle_game(&mut self, action: Action) {
        let hand_size = self.session.hand().len();
        match action {
            Action::Previous => self.hand_cursor = self.hand_cursor.saturating_sub(1),
            Action::Next if self.hand_cursor + 1 < hand_size => self.hand_cursor += 1,
            Action::Confirm => {
                let result = self.session.tap(self.hand_cursor);
                report(result);
            }
            Action::Place(side) => {
                let result = self.session.choose_side(side);
                report(result);
            }
            Action::Skip => {
                let result = self.session.skip();
                report(result);
            }
            Action::NewGame => {
                self.session.reset();
                self.hand_cursor = 0;
            }
            _ => {}
        }
    }

    /// The hand shrinks as tiles are played.
    fn clamp_cursor(&mut self) {
        let hand_size = self.session.hand().len();
        self.hand_cursor = self.hand_cursor.min(hand_size.saturating_sub(1));
    }
}

fn step(seat: Seat, by: usize) -> Seat {
    Seat::ALL[(seat.index() + by) % Seat::ALL.len()]
}

/// The session keeps the error for display, it only needs to be logged here.
fn report<T>(result: Result<T, ClientError>) {
    if let Err(err) = result {
        debug!(%err, "Action refused");
    }
}
