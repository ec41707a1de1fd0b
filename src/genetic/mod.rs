mod algorithm;
mod fitness;
mod genome;
mod initializer;
mod mutation;
mod reproduction;
mod selection;
mod strategy;
mod terminator;

pub use algorithm::*;
pub use fitness::*;
pub use genome::*;
pub use initializer::*;
pub use mutation::*;
pub use reproduction::*;
pub use selection::*;
pub use strategy::*;
pub use terminator::*;
