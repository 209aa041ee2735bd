//! Core domain types and contracts for planta
//!
//! This crate defines the vocabulary shared by the storage layer and the
//! view-data engine: genetic elements and species, view kinds with their
//! loader and reducer contracts, and the error types used across the
//! workspace. It contains no engine logic of its own.

pub mod error;
pub mod gene;
pub mod view;

pub use error::{Error, Result};
pub use gene::{GeneticElement, Species};
pub use view::{LoadProgress, ViewDataError, ViewDataResult, ViewKind, ViewLoader, ViewReducer};
