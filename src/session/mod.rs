//! Recording session management
//!
//! This module provides the `Recorder` state machine that owns the single
//! capture session:
//! - Exclusive, race-free control of the one recording resource
//! - Idle/Armed/Paused lifecycle with validated transitions
//! - Deterministic device and file cleanup on every exit path
//! - Artifact metadata derivation (duration, MIME type, location) at stop

mod artifact;
mod recorder;

pub use artifact::ArtifactDescription;
pub use recorder::{CaptureState, Recorder};
