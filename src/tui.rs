//! Terminal front-end: draws the field with `ratatui` and turns `crossterm`
//! events into controller calls.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use sysinfo::{System, SystemExt};

use crate::clock::Clock;
use crate::config::MAX_SIDE;
use crate::controller::{ExecutionController, PresentationPort, Speed};
use crate::error::Result;
use crate::grid::{Grid, GridModel};
use crate::stats::Stats;

const MIN_SPEED_SECS: f64 = 0.05;
const MAX_SPEED_SECS: f64 = 10.0;

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleRun,
    Step,
    NewGame,
    FillRandom,
    Faster,
    Slower,
    /// Grow or shrink the field by whole columns and rows
    Resize { columns: isize, rows: isize },
    Click { x: usize, y: usize },
    DismissStatus,
}

/// The terminal side of the session.
#[derive(Debug)]
pub struct TerminalView {
    grid: Grid,
    width: usize,
    height: usize,
    /// Label state of the start/stop control
    running: bool,
    status: Option<String>,
    /// Inner area of the grid panel as last drawn, for mouse hit-testing
    grid_area: Rect,
    sys: System,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalView {
    pub fn new() -> Self {
        TerminalView {
            grid: Grid::new(),
            width: 0,
            height: 0,
            running: false,
            status: None,
            grid_area: Rect::default(),
            sys: System::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn shows_running(&self) -> bool {
        self.running
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Maps a terminal position to the field cell drawn there.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let area = self.grid_area;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return None;
        }
        let x = usize::from(column - area.x);
        let y = usize::from(row - area.y);
        (x < self.width && y < self.height).then_some((x, y))
    }

    /// Translates a terminal event into an [`Action`].
    pub fn action_for(&self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                KeyCode::Char(' ') => Some(Action::ToggleRun),
                KeyCode::Enter => Some(Action::Step),
                KeyCode::Char('n') => Some(Action::NewGame),
                KeyCode::Char('r') => Some(Action::FillRandom),
                KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::Faster),
                KeyCode::Char('-') => Some(Action::Slower),
                KeyCode::Char('c') => Some(Action::DismissStatus),
                KeyCode::Right => Some(Action::Resize { columns: 1, rows: 0 }),
                KeyCode::Left => Some(Action::Resize { columns: -1, rows: 0 }),
                KeyCode::Down => Some(Action::Resize { columns: 0, rows: 1 }),
                KeyCode::Up => Some(Action::Resize { columns: 0, rows: -1 }),
                _ => None,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => self
                .cell_at(mouse.column, mouse.row)
                .map(|(x, y)| Action::Click { x, y }),
            _ => None,
        }
    }

    /// Draws the grid panel and the statistics panel.
    pub fn draw(&mut self, f: &mut Frame, stats: &Stats, speed: Speed, running: bool) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
            .split(f.size());

        self.draw_grid(f, chunks[0]);
        self.draw_stats(f, stats, speed, running, chunks[1]);
    }

    fn draw_grid(&mut self, f: &mut Frame, area: Rect) {
        let title = if self.running {
            "Game of Life [Space: Pause | n: New | r: Random | q: Quit]"
        } else {
            "Game of Life [Space: Start | Enter: Step | n: New | r: Random | q: Quit]"
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        self.grid_area = block.inner(area);

        let paragraph = Paragraph::new(grid_text(&self.grid))
            .style(Style::default().fg(Color::White))
            .block(block);

        f.render_widget(paragraph, area);
    }

    fn draw_stats(
        &mut self,
        f: &mut Frame,
        stats: &Stats,
        speed: Speed,
        running: bool,
        area: Rect,
    ) {
        self.sys.refresh_memory();
        let memory_used = self.sys.used_memory() / 1024; // KB
        let memory_total = self.sys.total_memory() / 1024;

        let mut stats_text = format!(
            "Field: {}x{}\n\
            Generation: {}\n\
            Current Population: {}\n\
            Cells Created: {}\n\
            Cells Destroyed: {}\n\
            Birth Rate: {:.2}/gen\n\
            Death Rate: {:.2}/gen\n\
            Speed: {}\n\
            Memory Usage: {}KB/{:.2}MB\n\
            Status: {}\n",
            self.width,
            self.height,
            stats.generation,
            stats.current_population,
            stats.cells_created,
            stats.cells_destroyed,
            stats.birth_rate(),
            stats.death_rate(),
            speed,
            memory_used,
            memory_total as f64 / 1024.0,
            if running { "Running" } else { "Paused" }
        );
        if let Some(status) = &self.status {
            stats_text.push('\n');
            stats_text.push_str(status);
            stats_text.push_str("\n(c to dismiss)");
        }

        let stats_widget = Paragraph::new(stats_text)
            .block(Block::default().borders(Borders::ALL).title("Statistics"))
            .wrap(Wrap { trim: true });

        f.render_widget(stats_widget, area);
    }
}

impl PresentationPort for TerminalView {
    fn render_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    fn set_dimensions(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    fn reset_controls_to_idle(&mut self) {
        self.running = false;
    }

    fn game_finished(&mut self, stats: &Stats) {
        self.status = Some(format!(
            "Game over after {} generations",
            stats.generation
        ));
    }
}

/// One line per row, `•` for live cells.
pub fn grid_text(grid: &Grid) -> String {
    let mut cells = String::new();
    for row in grid {
        for cell in row {
            cells.push(if cell.is_alive() { '•' } else { ' ' });
        }
        cells.push('\n');
    }
    cells
}

/// Draws one frame of the session.
pub fn draw_session<B, M, C>(
    terminal: &mut Terminal<B>,
    controller: &mut ExecutionController<M, TerminalView, C>,
) -> std::io::Result<()>
where
    B: Backend,
    M: GridModel,
    C: Clock,
{
    let stats = *controller.stats();
    let speed = controller.get_speed();
    let running = controller.is_running();
    let view = controller.presenter_mut();
    terminal.draw(|f| view.draw(f, &stats, speed, running))?;
    Ok(())
}

/// Carries out an action. Returns `false` once the user asked to quit.
///
/// # Errors
///
/// Propagates a failed random fill.
pub fn apply<M, C>(
    controller: &mut ExecutionController<M, TerminalView, C>,
    action: Action,
) -> Result<bool>
where
    M: GridModel,
    C: Clock,
{
    match action {
        Action::Quit => return Ok(false),
        Action::ToggleRun => {
            controller.toggle_activation();
            let running = controller.is_running();
            controller.presenter_mut().running = running;
        }
        Action::Step => {
            controller.step();
        }
        Action::NewGame => {
            controller.stop();
            controller.new_game();
        }
        Action::FillRandom => controller.fill_randomly()?,
        Action::Faster | Action::Slower => {
            let factor = if action == Action::Faster { 0.5 } else { 2.0 };
            let secs = (controller.get_speed().as_secs() * factor)
                .clamp(MIN_SPEED_SECS, MAX_SPEED_SECS);
            if let Ok(speed) = Speed::from_secs(secs) {
                controller.change_speed(speed);
            }
        }
        Action::Resize { columns, rows } => {
            let (width, height) = controller.dimensions();
            controller.change_size(resized(width, columns), resized(height, rows));
        }
        Action::Click { x, y } => match controller.on_cell_click(x, y) {
            Ok(()) => {
                let field = controller.get_field();
                controller.presenter_mut().render_grid(field);
            }
            Err(err) => tracing::warn!(%err, "ignored click"),
        },
        Action::DismissStatus => controller.presenter_mut().status = None,
    }
    Ok(true)
}

fn resized(side: usize, delta: isize) -> usize {
    side.saturating_add_signed(delta).min(MAX_SIDE)
}
