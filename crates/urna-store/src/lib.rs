//! Local persistence of ballot-unit artifacts.
//!
//! One file per unit, named by [`artifact_file_name`], in a single flat output
//! directory. Writes go through a hidden staging file and a rename so a
//! reader never observes a half-written artifact.

mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::{ArtifactStore, Written, artifact_file_name};
