mod collision;
mod geometry;
mod physics;
mod rollout;
mod scenario;
mod terrain;

pub use collision::*;
pub use geometry::*;
pub use physics::*;
pub use rollout::*;
pub use scenario::*;
pub use terrain::*;
