//! Play command implementation - interactive TUI frontend.

// The TUI consumes its arguments and reuses short names across widgets
#![allow(clippy::needless_pass_by_value, clippy::similar_names)]

use super::CliError;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mazechase::sim::{Cell, Direction, MapLayout, SimConfig, Simulation, Status};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::collections::HashSet;
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How long the final frame is held before the process exits.
const TERMINAL_HOLD: Duration = Duration::from_secs(3);

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the map fails to load or the TUI fails.
pub(crate) fn execute(map: Option<PathBuf>, seed: Option<u64>) -> Result<(), CliError> {
    let text = super::load_map_text(map)?;
    let layout = MapLayout::parse(&text)?;
    let seed = seed.unwrap_or_else(super::default_seed);

    let sim = Simulation::new(layout, SimConfig::default(), seed)?;
    run_tui(sim, seed)
}

/// App state for the TUI.
struct App {
    sim: Simulation,
    seed: u64,
    last_frame: Instant,
}

fn run_tui(sim: Simulation, seed: u64) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App {
        sim,
        seed,
        last_frame: Instant::now(),
    };

    loop {
        // Draw
        terminal.draw(|f| ui(f, &app))?;

        // Hold the final frame, then leave.
        if app.sim.status().is_terminal() {
            hold_final_frame()?;
            break;
        }

        // Advance simulation time by the real frame delta.
        let now = Instant::now();
        let dt = now.duration_since(app.last_frame);
        app.last_frame = now;
        app.sim.step(dt);

        // Handle input with timeout
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Backspace => break,
                KeyCode::Left | KeyCode::Char('a') => {
                    app.sim.steer(Direction::Left);
                }
                KeyCode::Right | KeyCode::Char('d') => {
                    app.sim.steer(Direction::Right);
                }
                KeyCode::Up | KeyCode::Char('w') => {
                    app.sim.steer(Direction::Up);
                }
                KeyCode::Down | KeyCode::Char('s') => {
                    app.sim.steer(Direction::Down);
                }
                _ => {}
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

/// Wait out the terminal-state pause, cut short by any key press.
fn hold_final_frame() -> Result<(), CliError> {
    let deadline = Instant::now() + TERMINAL_HOLD;
    while Instant::now() < deadline {
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            break;
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    // Header
    render_header(f, chunks[0], app);

    // Main content - map and stats
    let main_chunks = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    render_map(f, main_chunks[0], app);
    render_stats(f, main_chunks[1], app);

    // Footer
    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let (status, style) = match app.sim.status() {
        Status::Running => (
            "RUNNING",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Status::Won => (
            "YOU WIN",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Status::Lost => (
            "YOU LOSE",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let title = format!(" mazechase | Score: {} | {status} ", app.sim.player().score);

    let header = Paragraph::new(title)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    let grid = app.sim.grid();

    let chasers: HashSet<Cell> = app
        .sim
        .registry()
        .chasers()
        .iter()
        .map(|c| c.pos)
        .collect();
    let pellets: HashSet<Cell> = app.sim.registry().pellets().iter().copied().collect();
    let player = app.sim.player().pos;

    // Show the portion of the grid that fits the pane.
    let visible_width = area.width.saturating_sub(2).min(grid.width());
    let visible_height = area.height.saturating_sub(2).min(grid.height());

    let mut lines: Vec<Line> = Vec::new();
    for y in 0..visible_height {
        let mut spans = Vec::new();
        for x in 0..visible_width {
            let cell = Cell::new(x, y);
            let (ch, color) = if cell == player {
                ("@", Color::Yellow)
            } else if chasers.contains(&cell) {
                ("c", Color::Blue)
            } else if pellets.contains(&cell) {
                ("·", Color::Yellow)
            } else if grid.is_wall(cell) {
                ("█", Color::Green)
            } else {
                (" ", Color::Reset)
            };
            spans.push(Span::styled(ch, Style::default().fg(color)));
        }
        lines.push(Line::from(spans));
    }

    let map_widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Maze "));

    f.render_widget(map_widget, area);
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let registry = app.sim.registry();
    let threshold = app.sim.config().lose_threshold;

    let lines = vec![
        Line::from(""),
        Line::from(format!("  Score:    {}", app.sim.player().score)),
        Line::from(format!(
            "  Chasers:  {}/{threshold}",
            registry.chaser_count()
        )),
        Line::from(format!("  Pellets:  {}", registry.pellet_count())),
        Line::from(""),
        Line::from(format!("  Time:     {:.0}s", app.sim.elapsed().as_secs_f64())),
        Line::from(format!("  Seed:     {}", app.seed)),
    ];

    let stats_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Run "))
        .wrap(Wrap { trim: false });

    f.render_widget(stats_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.sim.status().is_terminal() {
        " Game over - any key to exit "
    } else {
        " [q/Esc] Quit  [arrows/WASD] Steer "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
