pub mod assembly;
pub mod curve;
pub mod group;
pub mod point;
pub mod solid;

pub use assembly::*;
pub use curve::*;
pub use group::*;
pub use point::*;
pub use solid::*;
