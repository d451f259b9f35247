mod command;
pub use command::*;

pub mod env;

pub mod sed;
