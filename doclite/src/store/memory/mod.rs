mod config;
mod map;
mod module;
mod store;

pub use config::*;
pub use map::*;
pub use module::*;
pub use store::*;
