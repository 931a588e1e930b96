//! Reviewer decision logic.
//!
//! Everything here is computation only: no gateway access, no awaiting. The
//! orchestration layer feeds the engines with the rows it read and writes
//! back whatever they decide.

pub mod reassignment;
pub mod sampler;
pub mod selection;

pub use reassignment::ReassignmentEngine;
pub use sampler::Sampler;
pub use selection::ReviewerSelector;
