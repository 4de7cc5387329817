mod arena;
mod distortion;
mod extractor;
mod sampling;

pub use arena::*;
pub use distortion::*;
pub use extractor::*;
pub use sampling::*;
