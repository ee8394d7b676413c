#![warn(missing_docs)]
//! Destructible trees: registry, generation, lifecycle and deferred removal.

mod generator;
mod lifecycle;
mod registry;
mod removal;
mod tree;
mod world;

pub use generator::*;
pub use lifecycle::*;
pub use registry::*;
pub use removal::*;
pub use tree::*;
pub use world::*;
