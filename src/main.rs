//! # Game of Life
//!
//! Terminal front-end for the session engine, built on `ratatui` for drawing
//! and `crossterm` for terminal manipulation.
//!
//! ## Controls
//!
//! * Space: start or pause the simulation
//! * Enter: step one generation while paused
//! * n: new game, r: random fill, c: dismiss the status message
//! * + / -: faster / slower
//! * Arrow keys: resize the field
//! * Left click: toggle a cell
//! * q: quit

use std::{io, time::Duration};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use life_session::config::{Args, SessionConfig};
use life_session::tui::{self, TerminalView};
use life_session::{logging, ExecutionController, LifeGrid};

/// Longest wait for input, so the statistics keep refreshing while idle.
const INPUT_POLL: Duration = Duration::from_millis(100);

type Session = ExecutionController<LifeGrid, TerminalView>;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = SessionConfig::try_from(&args)?;
    logging::init(args.log_file.as_deref())?;
    tracing::info!(?config, "starting session");

    let mut session = ExecutionController::new(
        LifeGrid::new(config.width, config.height),
        TerminalView::new(),
        config.speed,
    );
    if let Some(seed) = config.seed {
        session = session.with_seed(seed);
    }
    if config.random_fill {
        session.fill_randomly()?;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut session);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(%err, "session ended with an error");
    }
    res
}

fn run<B: Backend>(terminal: &mut Terminal<B>, session: &mut Session) -> Result<()> {
    loop {
        tui::draw_session(terminal, session)?;

        let timeout = session
            .time_until_tick()
            .map_or(INPUT_POLL, |remaining| remaining.min(INPUT_POLL));

        if event::poll(timeout)? {
            let event = event::read()?;
            if let Some(action) = session.presenter().action_for(&event) {
                if !tui::apply(session, action)? {
                    break;
                }
            }
        }

        session.poll();
    }

    tracing::info!(generation = session.stats().generation, "quit");
    Ok(())
}
