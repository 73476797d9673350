pub mod command;
pub mod physics;
pub mod rules;
pub mod tile;
