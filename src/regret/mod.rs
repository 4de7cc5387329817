mod entry;
mod matching;
mod table;
mod tables;

pub use entry::*;
pub use matching::*;
pub use table::*;
pub use tables::*;
