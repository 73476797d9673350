/// Simulation: the complete state of a running game.
///
/// Owns the grid, the pending input and a base copy of the grid as
/// loaded. Nothing else holds a reference to any of it; the frame loop
/// passes the simulation explicitly to `tick()` and `render()`.
///
/// `restart()` resets `grid = base.clone()`.

use super::event::GameEvent;
use super::grid::Grid;
use super::input_queue::InputQueue;
use super::level::{self, LevelError};
use super::render::{self, FillRect};
use super::step;

pub struct Simulation {
    /// Grid as loaded. Never mutated.
    base: Grid,
    grid: Grid,
    inputs: InputQueue,
    ticks: u64,
}

impl Simulation {
    pub fn new(grid: Grid) -> Self {
        Simulation {
            base: grid.clone(),
            grid,
            inputs: InputQueue::new(),
            ticks: 0,
        }
    }

    /// Load an integer-coded level and start a simulation on it.
    pub fn from_level<R, C>(rows: &[R]) -> Result<Self, LevelError>
    where
        R: AsRef<[C]>,
        C: Copy + Into<i64>,
    {
        level::load(rows).map(Simulation::new)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn inputs_mut(&mut self) -> &mut InputQueue {
        &mut self.inputs
    }

    /// Advance one tick: drain inputs, then run the gravity pass.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        self.ticks += 1;
        step::step(&mut self.grid, &mut self.inputs)
    }

    /// Feed the draw descriptors for the current grid to `draw`.
    pub fn render(&self, tile_size: u32, draw: impl FnMut(FillRect)) {
        render::render(&self.grid, tile_size, draw);
    }

    /// Put the level back the way it was loaded and drop pending input.
    pub fn restart(&mut self) {
        self.grid = self.base.clone();
        self.inputs.clear();
        self.ticks = 0;
    }

    /// (Lock1, Lock2) cells still on the grid.
    pub fn locks_remaining(&self) -> (usize, usize) {
        self.grid.cells().fold((0, 0), |(l1, l2), (_, _, t)| {
            (l1 + t.is_lock1() as usize, l2 + t.is_lock2() as usize)
        })
    }
}
