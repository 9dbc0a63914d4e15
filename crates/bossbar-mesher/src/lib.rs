//! Hand-off of a boss/bar assembly to an external meshing engine.
//!
//! The engine sits behind the [`Mesher`] trait. [`submit_assembly`] replays
//! an [`bossbar_types::Assembly`] into it and [`with_session`] scopes its
//! lifetime.

pub mod mock_mesher;
pub mod session;
pub mod submit;
pub mod traits;
pub mod types;

pub use mock_mesher::{MockGroup, MockMesher, MockOperation};
pub use session::{with_session, MesherSession};
pub use submit::{submit_assembly, submit_solid, SolidHandles, SubmittedAssembly};
pub use traits::*;
pub use types::*;
