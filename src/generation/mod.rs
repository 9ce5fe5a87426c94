//! Synonym suggestions from a local language model.

mod error;
pub mod generator;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod prompt;
pub mod runtime;


pub use error::GenerationError;
pub use generator::{GenaiGenerator, TextGenerator};
#[cfg(any(test, feature = "mock"))]
pub use mock::StaticGenerator;
pub use prompt::{parse_synonym_csv, synonym_prompt};
pub use runtime::{find_runtime, pull_model};
