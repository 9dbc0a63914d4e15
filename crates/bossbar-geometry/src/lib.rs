//! Parametric boundary construction for the boss/bar assembly.
//!
//! Everything here is a pure computation: parameters in, value-type boundary
//! representation out. Handing the result to a mesher is the job of
//! `bossbar-mesher`.

pub mod assemble;
pub mod builder;
pub mod config;
pub mod error;
pub mod params;
pub mod validate;

pub use assemble::assemble;
pub use builder::{build_bar, build_boss, GeometryBuilder};
pub use config::{Clearance, GroupTags, Tolerance};
pub use error::GeometryError;
pub use params::{AssemblyParams, CapSurfaceNames};
pub use validate::{audit_loop, check_loop, LoopAudit};
