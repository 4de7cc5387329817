mod card;
mod rank;
mod suit;

pub use card::*;
pub use rank::*;
pub use suit::*;
