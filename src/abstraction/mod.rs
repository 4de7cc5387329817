mod approximator;
mod centroids;
mod clustered;
mod encoder;
mod exact;
mod features;
mod key;
mod learned;

pub use approximator::*;
pub use centroids::*;
pub use clustered::*;
pub use encoder::*;
pub use exact::*;
pub use features::*;
pub use key::*;
pub use learned::*;
