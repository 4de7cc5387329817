mod archive;
mod deal;
mod simulator;
mod trick;

pub use archive::*;
pub use deal::*;
pub use simulator::*;
pub use trick::*;
