use std::cell::Cell as Counter;
use std::collections::VecDeque;

use life_session::{
    Grid, GridModel, LifeGrid, ManualClock, PresentationPort, Result, Speed, Stats, Transition,
};
use life_session::ExecutionController;

/// Everything a presentation port can be told.
#[derive(Debug, Clone, PartialEq)]
pub enum PortEvent {
    Render(Grid),
    Dimensions(usize, usize),
    ResetControls,
    Finished(Stats),
}

#[derive(Debug, Default)]
pub struct RecordingPort {
    pub events: Vec<PortEvent>,
}

#[allow(dead_code)]
impl RecordingPort {
    pub fn renders(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PortEvent::Render(_)))
            .count()
    }

    pub fn count(&self, wanted: &PortEvent) -> usize {
        self.events.iter().filter(|event| *event == wanted).count()
    }

    pub fn finished(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PortEvent::Finished(_)))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl PresentationPort for RecordingPort {
    fn render_grid(&mut self, grid: Grid) {
        self.events.push(PortEvent::Render(grid));
    }

    fn set_dimensions(&mut self, width: usize, height: usize) {
        self.events.push(PortEvent::Dimensions(width, height));
    }

    fn reset_controls_to_idle(&mut self) {
        self.events.push(PortEvent::ResetControls);
    }

    fn game_finished(&mut self, stats: &Stats) {
        self.events.push(PortEvent::Finished(*stats));
    }
}

/// A [`LifeGrid`] that counts calls and can be told what `next_generation`
/// reports.
#[derive(Debug)]
pub struct ScriptedModel {
    pub inner: LifeGrid,
    /// Results to hand out before falling back to the real transition
    pub script: VecDeque<bool>,
    pub generations: Counter<usize>,
    pub clears: Counter<usize>,
}

#[allow(dead_code)]
impl ScriptedModel {
    pub fn new(inner: LifeGrid) -> Self {
        ScriptedModel {
            inner,
            script: VecDeque::new(),
            generations: Counter::new(0),
            clears: Counter::new(0),
        }
    }

    pub fn scripted(inner: LifeGrid, script: &[bool]) -> Self {
        ScriptedModel {
            script: script.iter().copied().collect(),
            ..Self::new(inner)
        }
    }
}

impl GridModel for ScriptedModel {
    fn state(&self) -> Grid {
        self.inner.state()
    }

    fn dimensions(&self) -> (usize, usize) {
        self.inner.dimensions()
    }

    fn toggle_cell_state(&mut self, x: usize, y: usize) -> Result<()> {
        self.inner.toggle_cell_state(x, y)
    }

    fn is_inside_field(&self, x: isize, y: isize) -> bool {
        self.inner.is_inside_field(x, y)
    }

    fn count_neighbors(&self, x: usize, y: usize) -> usize {
        self.inner.count_neighbors(x, y)
    }

    fn next_generation(&mut self) -> bool {
        self.generations.set(self.generations.get() + 1);
        let changed = self.inner.next_generation();
        self.script.pop_front().unwrap_or(changed)
    }

    fn set_size(&mut self, width: usize, height: usize) {
        self.inner.set_size(width, height);
    }

    fn clear_field(&mut self) {
        self.clears.set(self.clears.get() + 1);
        self.inner.clear_field();
    }

    fn last_transition(&self) -> Transition {
        self.inner.last_transition()
    }
}

pub type TestSession = ExecutionController<ScriptedModel, RecordingPort, ManualClock>;

/// A horizontal blinker in a 5x5 field; it never settles.
#[allow(dead_code)]
pub fn blinker() -> LifeGrid {
    LifeGrid::with_alive(5, 5, &[(1, 2), (2, 2), (3, 2)])
}

/// An idle session on a manual clock, with the construction-time pushes
/// already cleared from the port.
pub fn session(model: ScriptedModel, secs: f64) -> (TestSession, ManualClock) {
    let clock = ManualClock::new();
    let speed = Speed::from_secs(secs).unwrap();
    let mut session =
        ExecutionController::with_clock(model, RecordingPort::default(), speed, clock.clone());
    session.presenter_mut().clear();
    (session, clock)
}
