pub mod handler;
pub mod roster;
