pub mod contract;
pub mod error;
mod execute;
pub mod hook;
mod query;
pub mod rand;
mod state;
pub mod validate;

pub use crate::contract::DrawOrchestrator;
pub use crate::error::DrawError;
pub use crate::hook::{NoPresentation, PresentationHook};
pub use crate::rand::{shuffle, OsEntropy, SecureRandomSource, SeededEntropy, UniformSampler};
pub use crate::validate::validate_results;

#[cfg(test)]
mod testing;
