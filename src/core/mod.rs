pub mod board;
pub mod display;
pub mod notation;
pub mod task;
