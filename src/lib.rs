//! Grid snake simulation driven by an external decision process.
//!
//! An [`Episode`] owns one snake, one food cell and its own random source.
//! Each tick the caller reads a six-value [`Perception`], picks a
//! [`Decision`], and calls [`Episode::step`]; when the episode ends the final
//! snake length is the fitness.

pub mod config;
pub mod dir;
pub mod episode;
pub mod error;
pub mod food;
pub mod grid;
pub mod perception;
pub mod policy;
pub mod pos;
pub mod snake;
pub mod snapshot;
pub mod trainer;

pub use config::SimConfig;
pub use dir::{Decision, Dir};
pub use episode::{Episode, EpisodeStats, Status, Termination, TerminationReason};
pub use error::{Result, SimError};
pub use grid::Grid;
pub use perception::{PERCEPTION_LEN, Perception};
pub use policy::{LinearPolicy, Policy, evaluate, run_episode};
pub use pos::Cell;
pub use snake::Snake;
pub use snapshot::Snapshot;
pub use trainer::{EvoTrainer, GenerationReport, TrainerConfig};
