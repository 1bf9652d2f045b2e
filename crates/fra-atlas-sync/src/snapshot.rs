//! The immutable data pair a run operates on.

use fra_atlas_core::{AnnotatedClaim, BoundarySet, Claim, annotate};

/// Boundary features plus claim records, loaded together. Nothing mutates a
/// snapshot after load; every pass works on its own copy of the results.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub boundary: BoundarySet,
    pub claims: Vec<Claim>,
}

impl Snapshot {
    /// Run the annotation pass over this snapshot.
    #[must_use]
    pub fn annotate(&self) -> Vec<AnnotatedClaim> {
        annotate(&self.claims, &self.boundary)
    }
}
