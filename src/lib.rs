//! This crate parses textual descriptions of finite-state automata, classifies them as
//! deterministic, nondeterministic or invalid, and decides which input strings they accept.
//! It includes modules for the automaton model, the description parser, the acceptance
//! simulators, loading descriptions from disk and reporting per-machine results.

pub mod automaton;
pub mod loader;
pub mod parser;
pub mod report;
pub mod simulator;
pub mod types;

/// Re-exports the `Automaton` value and its `TransitionRelation`.
pub use automaton::{Automaton, TransitionRelation};
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::MachineLoader;
/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the evaluation entry points and records from the report module.
pub use report::{evaluate, evaluate_directory, Evaluation, Summary};
/// Re-exports the `Simulator` struct from the simulator module.
pub use simulator::Simulator;
/// Re-exports the core value types and the error type.
pub use types::{AutomatonError, Classification, State, Symbol};
