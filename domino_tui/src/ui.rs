use domino::{visualize_playable_numbers, visualize_table, GameState, Seat, TILE_WIDTH};
use domino_client::{GameService, Session};
use ratatui::{prelude::*, widgets::*};

use crate::app::App;

const INFO_PANEL_WIDTH: u16 = 36;

const HAND_HEIGHT: u16 = 4;

/// How many entries of the move history are listed.
const LAST_MOVES: usize = 5;

pub fn render<S: GameService>(frame: &mut Frame, app: &App<S>) {
    let area = frame.size();
    let session = app.session();
    match (session.game(), session.seat()) {
        (Some(game), Some(seat)) => render_game(frame, area, app, game, seat),
        _ => render_menu(frame, area, app.menu_seat()),
    }
    if let Some(err) = session.error() {
        render_dialog(
            frame,
            area,
            "Error",
            Color::Red,
            vec![
                Line::from(err.to_string()),
                Line::default(),
                Line::from("Press Enter to dismiss").italic(),
            ],
        );
    }
}

fn render_menu(frame: &mut Frame, area: Rect, highlighted: Seat) {
    let [seats_area, help_area] =
        Layout::vertical([Constraint::Length(12), Constraint::Min(0)]).areas(area);

    let mut lines = vec![
        Line::from("Dominoes").bold(),
        Line::from("Choose your seat:"),
        Line::default(),
    ];
    for seat in Seat::ALL {
        let line = Line::from(format!(" Seat {} (team {}) ", seat, seat.team()));
        if seat == highlighted {
            lines.push(line.reversed());
        } else {
            lines.push(line);
        }
    }
    let [opponent_1, opponent_2] = highlighted.team().opponents().seats();
    lines.push(Line::default());
    lines.push(Line::from(format!("Teammate: {}", highlighted.partner())));
    lines.push(Line::from(format!(
        "Opponents: {} and {}",
        opponent_1, opponent_2
    )));
    frame.render_widget(
        Paragraph::new(lines).block(Block::new().borders(Borders::all())),
        seats_area,
    );

    let help = vec![
        Line::from("How to play").bold(),
        Line::from("Match a tile to one of the open ends of the line."),
        Line::from("When a tile fits both ends, pick a side with l or r."),
        Line::from("Skip with s when nothing fits."),
        Line::from("Teams are A and C against B and D."),
        Line::default(),
        Line::from("↑/↓ choose, Enter to start, q to quit").italic(),
    ];
    frame.render_widget(
        Paragraph::new(help).wrap(Wrap { trim: false }),
        help_area,
    );
}

fn render_game<S: GameService>(
    frame: &mut Frame,
    area: Rect,
    app: &App<S>,
    game: &GameState,
    seat: Seat,
) {
    let [main_area, hand_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(HAND_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(area);
    let [board_area, info_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(INFO_PANEL_WIDTH)])
            .areas(main_area);

    render_board(frame, board_area, game);
    render_info(frame, info_area, app.session(), game, seat);
    render_hand(frame, hand_area, app);
    frame.render_widget(
        Paragraph::new(status_line(app.session(), game, seat)),
        status_area,
    );
    if game.game_over {
        render_game_over(frame, area, game, seat);
    }
}

fn render_board(frame: &mut Frame, area: Rect, game: &GameState) {
    // The table draws its own border
    let tiles_per_row = usize::from(area.width.saturating_sub(2)) / TILE_WIDTH;
    let mut text = Text::from(Line::from(format!("Table ({} tiles)", game.table.len())).bold());
    text.lines
        .extend(Text::raw(visualize_table(&game.table, tiles_per_row)).lines);
    frame.render_widget(Paragraph::new(text), area);
}

fn render_info<S: GameService>(
    frame: &mut Frame,
    area: Rect,
    session: &Session<S>,
    game: &GameState,
    seat: Seat,
) {
    let mut whose_turn = game.current_player.clone();
    match game.active_seat() {
        Some(active) if active == seat => whose_turn += " (you)",
        Some(active) if active == seat.partner() => whose_turn += " (partner)",
        _ => {}
    }
    let mut lines = vec![
        Line::from(format!("You: seat {} (team {})", seat, seat.team())),
        Line::from(format!("Turn {}: {}", game.turn_count, whose_turn)),
        Line::from(format!(
            "Playable: {}",
            visualize_playable_numbers(&game.playable_numbers)
        )),
        Line::from(format!("Passes: {}", game.passes)),
        Line::default(),
    ];
    for player in &game.players {
        let line = Line::from(format!(
            "{} {} ({}) {} tiles, {}",
            if player.is_current { "▶" } else { " " },
            player.name,
            player.team,
            player.tile_count,
            player.strategy
        ));
        lines.push(if player.is_current { line.bold() } else { line });
    }
    lines.push(Line::default());
    lines.push(Line::from("Last moves:"));
    let skip = game.game_history.len().saturating_sub(LAST_MOVES);
    for entry in game.game_history.iter().skip(skip) {
        lines.push(Line::from(format!("  {}", entry)));
    }
    if session.is_polling() {
        lines.push(Line::default());
        lines.push(Line::from("Waiting for the other players…").italic());
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::new().borders(Borders::all()).title("Game")),
        area,
    );
}

fn render_hand<S: GameService>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let session = app.session();
    let awaiting = session.selection().awaiting_side();
    let mut spans = vec![];
    for (tile_index, tile) in session.hand().iter().enumerate() {
        let mut style = Style::new();
        if session.is_playable(tile_index) {
            style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
        }
        if awaiting == Some(tile_index) {
            style = style.fg(Color::Yellow);
        }
        if tile_index == app.hand_cursor() {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(tile.to_string(), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .block(Block::new().borders(Borders::all()).title("Your hand")),
        area,
    );
}

fn status_line<S: GameService>(session: &Session<S>, game: &GameState, seat: Seat) -> Line<'static> {
    if game.game_over {
        return Line::from("Game over: n for a new game, q to quit");
    }
    if let Some(tile_index) = session.selection().awaiting_side() {
        let tile = session
            .hand()
            .get(tile_index)
            .map(|tile| tile.to_string())
            .unwrap_or_default();
        return Line::from(format!(
            "{} fits on both ends: l for left, r for right",
            tile
        ))
        .yellow();
    }
    let on_turn = game
        .active_seat()
        .is_some_and(|active| active.same_side_as(seat));
    if session.is_polling() || !on_turn {
        return Line::from(format!("Waiting for {}…", game.current_player));
    }
    if session.can_skip() {
        return Line::from("No tile fits: s to skip");
    }
    Line::from("←/→ choose a tile, Enter to play, n for a new game, q to quit")
}

fn render_game_over(frame: &mut Frame, area: Rect, game: &GameState, seat: Seat) {
    let mut lines = vec![];
    match game.winning_team() {
        Some(team) if team == seat.team() => lines.push(Line::from("Your team won!").green()),
        Some(_) => lines.push(Line::from("Your team lost.").red()),
        None => {}
    }
    if let Some(winner) = &game.winner {
        lines.push(Line::from(format!("Winner: {}", winner)));
    }
    if game.game_locked {
        lines.push(Line::from("Nobody could play, the game is locked."));
        lines.push(Line::from(format!(
            "Team AC: {} points, team BD: {} points",
            game.team_ac_points, game.team_bd_points
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from("Press n for a new game").italic());
    render_dialog(frame, area, "Game over", Color::Blue, lines);
}

fn render_dialog(frame: &mut Frame, area: Rect, title: &str, color: Color, lines: Vec<Line>) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered(area, 60, height);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::new()
                .borders(Borders::all())
                .border_type(BorderType::Rounded)
                .border_style(Style::new().fg(color))
                .title(title),
        ),
        area,
    );
}

/// A rectangle of at most `width` x `height` in the middle of `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::app::Action;
    use crate::fixture::{app, locked_state, running_state, FixedService};

    fn draw(app: &App<FixedService>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut screen = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen += buffer.get(x, y).symbol();
            }
            screen += "\n";
        }
        screen
    }

    #[test]
    fn menu() {
        let mut app = app(FixedService::new(running_state(), &[], &[]));
        app.handle(Action::Next);
        let screen = draw(&app);
        assert!(screen.contains("Seat B (team BD)"));
        assert!(screen.contains("Teammate: D"));
        assert!(screen.contains("Opponents: A and C"));
    }

    #[test]
    fn game() {
        let mut app = app(FixedService::new(running_state(), &[0, 2], &[]));
        app.start(Seat::A);
        let screen = draw(&app);
        assert!(screen.contains("[6|1][1|3]"));
        assert!(screen.contains("[6|3] [1|2] [6|6]"));
        assert!(screen.contains("Turn 3: A (you)"));
        assert!(screen.contains("Playable: 6 or 3"));
        assert!(screen.contains("D played [1|3]"));
        assert!(screen.contains("Enter to play"));
    }

    #[test]
    fn side_prompt() {
        let mut app = app(FixedService::new(running_state(), &[0], &[0]));
        app.start(Seat::A);
        app.handle(Action::Confirm);
        assert!(draw(&app).contains("[6|3] fits on both ends"));
    }

    #[test]
    fn skip_prompt() {
        let mut app = app(FixedService::new(running_state(), &[], &[]));
        app.start(Seat::A);
        assert!(draw(&app).contains("s to skip"));
    }

    #[test]
    fn error_dialog() {
        let mut app = app(FixedService::new(running_state(), &[0], &[]));
        app.start(Seat::A);
        app.handle(Action::Skip);
        let screen = draw(&app);
        assert!(screen.contains("You cannot skip while you have a playable tile"));
        assert!(screen.contains("Press Enter to dismiss"));
    }

    #[test]
    fn locked_game_over() {
        let mut app = app(FixedService::new(locked_state(), &[], &[]));
        app.start(Seat::A);
        let screen = draw(&app);
        assert!(screen.contains("Your team lost."));
        assert!(screen.contains("Team AC: 31 points, team BD: 20 points"));
    }
}
