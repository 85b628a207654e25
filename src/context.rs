//! The evaluation context handle.
//!
//! A context stands for one evaluation round (e.g. one game event). Templates
//! never look inside it; the only operation this subsystem needs is identity,
//! which keys the single-slot evaluation cache. How expressions obtain values
//! from their context is a contract between the expression implementation and
//! the surrounding runtime.

use uuid::Uuid;

/// Identity of an evaluation context. Two contexts with equal ids are the
/// same evaluation round; value-equal contexts with distinct ids are not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContextId(Uuid);

impl ContextId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContextId {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque per-evaluation handle against which expressions resolve.
pub trait EvalContext {
    fn context_id(&self) -> ContextId;
}
