mod app;
mod error;
pub mod genetic;
pub mod init;
pub mod simulation;

pub use app::*;
pub use error::*;
