//! Application state and logic

mod state;
mod actions;
mod browser;
mod export;
mod generation;
mod handlers;
mod input;
mod notify;
mod reducer;
mod results;

pub use state::*;
pub use actions::*;
pub use browser::*;
pub use export::*;
pub use generation::*;
pub use input::*;
pub use notify::*;
pub use reducer::*;
pub use results::*;
