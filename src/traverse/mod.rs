mod external;
mod node;
mod pass;
mod play;
mod reach;
mod replay;

pub use external::*;
pub use node::*;
pub use pass::*;
pub use play::*;
pub use reach::*;
pub use replay::*;
