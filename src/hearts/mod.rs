mod difficulty;
mod direction;
mod engine;
mod memory;
mod phase;
mod round;
mod rules;
mod situation;

pub use difficulty::*;
pub use direction::*;
pub use engine::*;
pub use memory::*;
pub use phase::*;
pub use round::*;
pub use rules::*;
pub use situation::*;
