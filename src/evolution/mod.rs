pub mod launcher;
pub mod options;

pub use launcher::{EvolutionEngine, EvolutionResult, GenerationReport, Generations, Termination};
pub use options::{EvolutionOptions, EvolutionOptionsBuilder, LogLevel};
