pub mod event;
pub mod grid;
pub mod input_queue;
pub mod level;
pub mod pacing;
pub mod render;
pub mod simulation;
pub mod step;
