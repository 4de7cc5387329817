#[cfg(feature = "server")]
mod cli;
mod config;
mod driver;
mod progress;

#[cfg(feature = "server")]
pub use cli::*;
pub use config::*;
pub use driver::*;
pub use progress::*;
