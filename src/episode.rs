//! One simulated run from initial placement to termination.

use crate::config::SimConfig;
use crate::dir::{Decision, Dir};
use crate::error::{Result, SimError};
use crate::food::place_food;
use crate::grid::Grid;
use crate::perception::{Perception, perceive};
use crate::pos::Cell;
use crate::snake::Snake;
use crate::snapshot::Snapshot;
use ahash::AHashSet;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Why an episode ended, in the order the checks run each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationReason {
    SelfCollision,
    WallCollision,
    BoardFilled,
    StallTimeout,
    OscillationTimeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    pub reason: TerminationReason,
    /// Snake length at the moment of termination.
    pub length: usize,
    pub ticks: u32,
}

impl Termination {
    /// Score credited for the episode: the final length, nothing else.
    pub fn fitness(&self) -> f64 {
        self.length as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Running,
    Terminated(Termination),
}

impl Status {
    pub fn is_running(&self) -> bool {
        matches!(self, Status::Running)
    }

    pub fn termination(&self) -> Option<Termination> {
        match *self {
            Status::Running => None,
            Status::Terminated(t) => Some(t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub ticks: u32,
    pub cells_visited: usize,
    pub turns_since_growth: u32,
    pub ticks_since_growth: u32,
    pub length: usize,
    pub food_eaten: u32,
}

pub struct Episode<R: Rng = SmallRng> {
    config: SimConfig,
    grid: Grid,
    snake: Snake,
    food: Cell,
    heading: Dir,
    rng: R,
    visited: AHashSet<Cell>,
    turns_since_growth: u32,
    ticks_since_growth: u32,
    ticks: u32,
    food_eaten: u32,
    status: Status,
}

impl Episode<SmallRng> {
    pub fn seeded(config: SimConfig, seed: u64) -> Result<Self> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Episode<R> {
    /// Fresh episode: one-cell snake at a random cell, food elsewhere, heading
    /// towards the farthest wall.
    pub fn new(config: SimConfig, mut rng: R) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid_size)?;
        let head = grid.random_cell(&mut rng);
        let snake = Snake::new(head);
        let food = place_food(&grid, &snake, &mut rng, config.effective_food_attempts())
            .ok_or_else(|| SimError::Configuration("no free cell for food".into()))?;
        let heading = initial_heading(&grid, head);
        Ok(Self::assemble(config, grid, snake, food, heading, rng))
    }

    /// Episode from an explicit layout, for scripted scenarios. The body must
    /// be a non-empty, in-bounds, edge-connected chain without repeats and the
    /// food must sit on a free in-bounds cell.
    pub fn from_parts(config: SimConfig, body: &[Cell], heading: Dir, food: Cell, rng: R) -> Result<Self> {
        config.validate()?;
        let grid = Grid::new(config.grid_size)?;
        let layout_err = |msg: &str| SimError::Configuration(format!("invalid layout: {msg}"));

        if body.iter().any(|&c| !grid.in_bounds(c)) {
            return Err(layout_err("segment out of bounds"));
        }
        if body.windows(2).any(|w| !w[0].is_adjacent(w[1])) {
            return Err(layout_err("segments are not edge-connected"));
        }
        let snake = Snake::from_cells(body.iter().copied()).ok_or_else(|| layout_err("empty body"))?;
        if snake.positions().len() != snake.len() {
            return Err(layout_err("repeated segment"));
        }
        if !grid.in_bounds(food) || snake.contains(food) {
            return Err(layout_err("food must be on a free cell"));
        }
        Ok(Self::assemble(config, grid, snake, food, heading, rng))
    }

    fn assemble(config: SimConfig, grid: Grid, snake: Snake, food: Cell, heading: Dir, rng: R) -> Self {
        let mut visited = AHashSet::new();
        visited.insert(snake.head());
        Self {
            config,
            grid,
            snake,
            food,
            heading,
            rng,
            visited,
            turns_since_growth: 0,
            ticks_since_growth: 0,
            ticks: 0,
            food_eaten: 0,
            status: Status::Running,
        }
    }

    /// Advances one tick. A terminated episode is left untouched and keeps
    /// reporting its terminal status.
    pub fn step(&mut self, decision: Decision) -> Status {
        if !self.status.is_running() {
            return self.status;
        }

        self.heading = self.heading.after(decision);
        self.snake.move_to(self.heading);
        self.ticks += 1;

        if self.snake.collides_with_body() {
            return self.finish(TerminationReason::SelfCollision);
        }
        let head = self.snake.head();
        if !self.grid.in_bounds(head) {
            return self.finish(TerminationReason::WallCollision);
        }
        if self.board_filled() {
            return self.finish(TerminationReason::BoardFilled);
        }

        self.visited.insert(head);

        if head == self.food {
            self.snake.grow(self.heading);
            self.food_eaten += 1;
            if self.board_filled() {
                return self.finish(TerminationReason::BoardFilled);
            }
            match place_food(&self.grid, &self.snake, &mut self.rng, self.config.effective_food_attempts()) {
                Some(c) => self.food = c,
                None => return self.finish(TerminationReason::BoardFilled),
            }
            self.ticks_since_growth = 0;
            self.turns_since_growth = 0;
        } else {
            self.ticks_since_growth += 1;
            if decision.is_turn() {
                self.turns_since_growth += 1;
            }
        }

        if self.ticks_since_growth > self.config.stall_limit {
            return self.finish(TerminationReason::StallTimeout);
        }
        if self.turns_since_growth > self.config.turn_limit {
            return self.finish(TerminationReason::OscillationTimeout);
        }
        Status::Running
    }

    /// Index form used by numeric decision processes: 0 left, 1 straight,
    /// 2 right. Anything else is rejected before the episode is touched.
    pub fn step_index(&mut self, index: usize) -> Result<Status> {
        let decision = Decision::try_from(index)?;
        Ok(self.step(decision))
    }

    pub fn perceive(&self) -> Perception {
        perceive(&self.grid, &self.snake, self.food, self.heading)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot { grid_size: self.grid.size(), body: self.snake.iter().collect(), food: self.food, heading: self.heading }
    }

    /// Adds the final length to `fitness` if the episode has ended. Never
    /// resets the accumulator. Returns whether anything was added.
    pub fn add_fitness(&self, fitness: &mut f64) -> bool {
        match self.status {
            Status::Terminated(t) => {
                *fitness += t.fitness();
                true
            }
            Status::Running => false,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    pub fn stats(&self) -> EpisodeStats {
        EpisodeStats {
            ticks: self.ticks,
            cells_visited: self.visited.len(),
            turns_since_growth: self.turns_since_growth,
            ticks_since_growth: self.ticks_since_growth,
            length: self.snake.len(),
            food_eaten: self.food_eaten,
        }
    }

    pub fn heading(&self) -> Dir {
        self.heading
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    fn board_filled(&self) -> bool {
        self.snake.len() >= self.grid.cell_count()
    }

    fn finish(&mut self, reason: TerminationReason) -> Status {
        let t = Termination { reason, length: self.snake.len(), ticks: self.ticks };
        debug!("episode over: {:?} after {} ticks, length {}", reason, t.ticks, t.length);
        self.status = Status::Terminated(t);
        self.status
    }
}

/// Direction with the most open cells ahead; ties go to the earliest in
/// North, East, South, West order.
fn initial_heading(grid: &Grid, head: Cell) -> Dir {
    let mut best = Dir::North;
    for d in Dir::ALL {
        if grid.open_distance(head, d) > grid.open_distance(head, best) {
            best = d;
        }
    }
    best
}
