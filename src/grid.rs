//! The cell field and the Game of Life transition rule.
//!
//! The field is bounded: cells past an edge do not exist, so corner and edge
//! cells simply have fewer neighbors.

use crate::error::{LifeError, Result};

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }

    /// Applies Conway's rules to this cell given its live neighbor count:
    ///
    /// * A dead cell with exactly three live neighbors becomes alive
    /// * A live cell with two or three live neighbors survives
    /// * Every other cell is dead in the next generation
    pub fn next(self, live_neighbors: usize) -> Self {
        match (self, live_neighbors) {
            (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive,
            (Cell::Dead, 3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

/// A snapshot of the field: `height` rows of `width` cells, indexed `[y][x]`.
pub type Grid = Vec<Vec<Cell>>;

/// Cells that changed state during one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// Dead cells that came alive
    pub births: u64,
    /// Live cells that died
    pub deaths: u64,
}

impl Transition {
    /// Whether any cell changed.
    pub fn changed(&self) -> bool {
        self.births + self.deaths > 0
    }
}

/// Everything the controller needs from a cell field.
///
/// Coordinates are `(x, y)` with `x` the column and `y` the row.
pub trait GridModel {
    /// Returns an independent copy of the field.
    fn state(&self) -> Grid;

    /// Current `(width, height)`.
    fn dimensions(&self) -> (usize, usize);

    /// Flips the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`LifeError::OutOfBounds`] when the coordinate is outside the
    /// field; the field is left untouched.
    fn toggle_cell_state(&mut self, x: usize, y: usize) -> Result<()>;

    /// True iff `0 <= x < width` and `0 <= y < height`.
    fn is_inside_field(&self, x: isize, y: isize) -> bool;

    /// Live cells among the (up to) eight Moore neighbors of `(x, y)`.
    fn count_neighbors(&self, x: usize, y: usize) -> usize;

    /// Advances the field by one generation.
    ///
    /// Returns `false` when the new field is identical to the old one, which
    /// means the population reached a stable or extinct fixed point.
    fn next_generation(&mut self) -> bool;

    /// Resizes the field, keeping the cells both sizes have in common.
    fn set_size(&mut self, width: usize, height: usize);

    /// Kills every cell without changing the dimensions.
    fn clear_field(&mut self);

    /// Number of live cells.
    fn population(&self) -> usize {
        self.state()
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_alive())
            .count()
    }

    /// Births and deaths of the most recent generation.
    fn last_transition(&self) -> Transition {
        Transition::default()
    }
}

/// The field used by the game: a bounded, row-major matrix of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeGrid {
    width: usize,
    height: usize,
    cells: Grid,
    /// The field as it was before the latest generation, if nothing else
    /// has touched the field since.
    previous: Option<Grid>,
    last_transition: Transition,
}

impl LifeGrid {
    /// Creates a field of the given dimensions with every cell dead.
    ///
    /// Either dimension may be zero; every operation on an empty field is a
    /// no-op.
    pub fn new(width: usize, height: usize) -> Self {
        LifeGrid {
            width,
            height,
            cells: dead_grid(width, height),
            previous: None,
            last_transition: Transition::default(),
        }
    }

    /// Builds a field from rows of cells.
    ///
    /// Short rows are padded with dead cells so every row is as wide as the
    /// widest one.
    pub fn from_rows(rows: Grid) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        let mut grid = LifeGrid::new(width, height);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, cell) in row.into_iter().enumerate() {
                grid.cells[y][x] = cell;
            }
        }
        grid
    }

    /// Builds a field with the listed `(x, y)` cells alive.
    ///
    /// Coordinates outside the field are ignored.
    pub fn with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> Self {
        let mut grid = LifeGrid::new(width, height);
        for &(x, y) in alive {
            if x < width && y < height {
                grid.cells[y][x] = Cell::Alive;
            }
        }
        grid
    }

    /// Reads one cell, or `None` outside the field.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Whether the latest generation left the field unchanged.
    ///
    /// This is the snapshot-comparison form of termination detection. It
    /// agrees with the value returned by [`GridModel::next_generation`] and
    /// reports `false` once any other mutation touched the field.
    pub fn is_game_finished(&self) -> bool {
        self.previous
            .as_ref()
            .is_some_and(|previous| *previous == self.cells)
    }

    /// Computes the next field without installing it.
    fn evolve(&self) -> (Grid, Transition) {
        let mut transition = Transition::default();
        let next = self
            .cells
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, &cell)| {
                        let next = cell.next(self.count_neighbors(x, y));
                        match (cell, next) {
                            (Cell::Dead, Cell::Alive) => transition.births += 1,
                            (Cell::Alive, Cell::Dead) => transition.deaths += 1,
                            _ => {}
                        }
                        next
                    })
                    .collect()
            })
            .collect();
        (next, transition)
    }
}

impl GridModel for LifeGrid {
    fn state(&self) -> Grid {
        self.cells.clone()
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn toggle_cell_state(&mut self, x: usize, y: usize) -> Result<()> {
        let dimensions = self.dimensions();
        let cell = self
            .cells
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or_else(|| LifeError::out_of_bounds(x, y, dimensions))?;
        *cell = cell.toggled();
        self.previous = None;
        Ok(())
    }

    fn is_inside_field(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn count_neighbors(&self, x: usize, y: usize) -> usize {
        // Nothing past the one-cell margin around the field can have a live
        // neighbor, and the field's sides always fit in an isize.
        if x > self.width || y > self.height {
            return 0;
        }
        let (cx, cy) = (x as isize, y as isize);

        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (cx + dx, cy + dy);
                if self.is_inside_field(nx, ny) && self.cells[ny as usize][nx as usize].is_alive()
                {
                    count += 1;
                }
            }
        }
        count
    }

    fn next_generation(&mut self) -> bool {
        let (next, transition) = self.evolve();
        self.previous = Some(std::mem::replace(&mut self.cells, next));
        self.last_transition = transition;
        transition.changed()
    }

    fn set_size(&mut self, width: usize, height: usize) {
        let cells = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| self.get(x, y).unwrap_or_default())
                    .collect()
            })
            .collect();

        self.width = width;
        self.height = height;
        self.cells = cells;
        self.previous = None;
    }

    fn clear_field(&mut self) {
        for cell in self.cells.iter_mut().flat_map(|row| row.iter_mut()) {
            *cell = Cell::Dead;
        }
        self.previous = None;
    }

    fn population(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_alive())
            .count()
    }

    fn last_transition(&self) -> Transition {
        self.last_transition
    }
}

fn dead_grid(width: usize, height: usize) -> Grid {
    vec![vec![Cell::Dead; width]; height]
}

/// Positions of the live cells in a snapshot, in row-major order.
pub fn alive_cells(grid: &Grid) -> Vec<(usize, usize)> {
    grid.iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_alive())
                .map(move |(x, _)| (x, y))
        })
        .collect()
}
