//! Scoped acquisition of a mesher.
//!
//! A [`MesherSession`] initializes a model on acquire and finalizes it when
//! dropped, on success, on error and on unwinding alike.

use std::ops::{Deref, DerefMut};

use tracing::{info, warn};
use uuid::Uuid;

use crate::traits::Mesher;
use crate::types::MesherError;

/// Guard owning an initialized mesher.
pub struct MesherSession<M: Mesher> {
    mesher: M,
    id: Uuid,
    model: String,
}

impl<M: Mesher> MesherSession<M> {
    /// Initialize `model_name` on `mesher` and take ownership of it.
    pub fn acquire(mut mesher: M, model_name: &str) -> Result<Self, MesherError> {
        mesher.initialize(model_name)?;
        let id = Uuid::new_v4();
        info!(session = %id, model = model_name, "mesher session acquired");
        Ok(Self {
            mesher,
            id,
            model: model_name.to_string(),
        })
    }

    /// Identifier used to correlate log lines of one session.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl<M: Mesher> Deref for MesherSession<M> {
    type Target = M;
    fn deref(&self) -> &M {
        &self.mesher
    }
}

impl<M: Mesher> DerefMut for MesherSession<M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut self.mesher
    }
}

impl<M: Mesher> Drop for MesherSession<M> {
    fn drop(&mut self) {
        self.mesher.finalize();
        info!(session = %self.id, model = %self.model, "mesher session released");
    }
}

/// Run `f` against a freshly acquired mesher, releasing it afterwards
/// whatever `f` returns.
pub fn with_session<M, T, E, F>(mesher: M, model_name: &str, f: F) -> Result<T, E>
where
    M: Mesher,
    E: From<MesherError> + std::fmt::Display,
    F: FnOnce(&mut M) -> Result<T, E>,
{
    let mut session = MesherSession::acquire(mesher, model_name)?;
    let result = f(&mut *session);
    if let Err(e) = &result {
        warn!(
            session = %session.id(),
            model = session.model(),
            error = %e,
            "mesher session failed"
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_mesher::{MockMesher, MockOperation};
    use std::sync::atomic::Ordering;

    #[test]
    fn test_drop_releases() {
        let mesher = MockMesher::new();
        let probe = mesher.release_probe();
        {
            let session = MesherSession::acquire(mesher, "scoped").unwrap();
            assert_eq!(session.model(), "scoped");
            assert_eq!(session.model_name(), Some("scoped"));
            assert_eq!(probe.load(Ordering::SeqCst), 0);
        }
        assert_eq!(probe.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_acquire_does_not_release() {
        let mesher = MockMesher::new().fail_on(MockOperation::Initialize);
        let probe = mesher.release_probe();
        assert!(MesherSession::acquire(mesher, "x").is_err());
        assert_eq!(probe.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_with_session_releases_on_error() {
        let mesher = MockMesher::new();
        let probe = mesher.release_probe();
        let result: Result<(), MesherError> = with_session(mesher, "fails", |m| {
            m.add_point([0.0, 0.0, 0.0], 1.0)?;
            Err(MesherError::MeshingFailed {
                reason: "did not converge".to_string(),
            })
        });
        assert_eq!(
            result,
            Err(MesherError::MeshingFailed {
                reason: "did not converge".to_string()
            })
        );
        assert_eq!(probe.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let a = MesherSession::acquire(MockMesher::new(), "a").unwrap();
        let b = MesherSession::acquire(MockMesher::new(), "b").unwrap();
        assert_ne!(a.id(), b.id());
    }
}
