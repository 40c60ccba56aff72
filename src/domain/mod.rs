pub mod ai;
pub mod command;
pub mod entity;
pub mod grid;
pub mod tile;
