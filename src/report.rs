//! This module evaluates machines against candidate strings and writes the results: one
//! file of accepted strings per machine and one summary line per machine.

use crate::automaton::Automaton;
use crate::loader::MachineLoader;
use crate::simulator::Simulator;
use crate::types::{AutomatonError, Classification};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name the batch summary is written to.
pub const SUMMARY_FILE: &str = "summary.txt";

/// Per-machine summary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Short name of the machine, usually its file stem.
    pub name: String,
    pub classification: Classification,
    pub state_count: usize,
    pub alphabet_size: usize,
    pub accepted_count: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}, states: {}, alphabet: {}, accepted: {}",
            self.name,
            self.classification,
            self.state_count,
            self.alphabet_size,
            self.accepted_count
        )
    }
}

/// The outcome of running one machine against a list of candidate strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub summary: Summary,
    /// Accepted strings, in input order.
    pub accepted: Vec<String>,
}

/// Runs every candidate string against a machine.
///
/// Invalid machines are not simulated and report zero accepted strings. Without a
/// `step_limit` every search runs to completion. With one, a string whose search runs past
/// it is logged and counted as not accepted, so `accepted_count` is then a lower bound.
///
/// # Arguments
///
/// * `name` - Short name recorded in the summary.
/// * `automaton` - The parsed machine.
/// * `strings` - Candidate strings; the empty string is epsilon.
/// * `step_limit` - Optional search cap handed to the [`Simulator`].
pub fn evaluate(
    name: &str,
    automaton: &Automaton,
    strings: &[String],
    step_limit: Option<usize>,
) -> Evaluation {
    let mut accepted = Vec::new();

    if automaton.classification.is_invalid() {
        log::info!("{name}: invalid machine, no strings evaluated");
    } else {
        let mut simulator = Simulator::new(automaton);
        if let Some(step_limit) = step_limit {
            simulator = simulator.with_step_limit(step_limit);
        }

        for input in strings {
            match simulator.accepts(input) {
                Ok(true) => accepted.push(input.clone()),
                Ok(false) => {}
                Err(e) => log::warn!("{name}: {input:?} not evaluated: {e}"),
            }
        }
    }

    Evaluation {
        summary: Summary {
            name: name.to_string(),
            classification: automaton.classification,
            state_count: automaton.state_count(),
            alphabet_size: automaton.alphabet_size(),
            accepted_count: accepted.len(),
        },
        accepted,
    }
}

/// Evaluates every machine description in a directory.
///
/// Machines that cannot be loaded are logged and returned as `Err` entries; the rest of
/// the batch is still evaluated.
pub fn evaluate_directory(
    directory: &Path,
    strings: &[String],
    step_limit: Option<usize>,
) -> Vec<Result<Evaluation, AutomatonError>> {
    MachineLoader::load_machines(directory)
        .into_iter()
        .map(|loaded| {
            let (path, automaton) =
                loaded.inspect_err(|e| log::warn!("skipping machine: {e}"))?;
            let name = MachineLoader::short_name(&path);
            Ok(evaluate(&name, &automaton, strings, step_limit))
        })
        .collect()
}

/// Writes the accepted strings of an evaluation to `<directory>/<name>.txt`, one per line.
/// Epsilon is written as a blank line.
///
/// # Returns
///
/// * `Ok(PathBuf)` with the path written.
/// * `Err(AutomatonError::FileError)` if the file cannot be written.
pub fn write_accepted(
    directory: &Path,
    evaluation: &Evaluation,
) -> Result<PathBuf, AutomatonError> {
    let path = directory.join(format!("{}.txt", evaluation.summary.name));
    let content = evaluation
        .accepted
        .iter()
        .map(|s| format!("{s}\n"))
        .collect::<String>();

    write_file(&path, &content)?;
    Ok(path)
}

/// Writes one summary line per machine to `path`.
pub fn write_summaries(path: &Path, summaries: &[Summary]) -> Result<(), AutomatonError> {
    let content = summaries
        .iter()
        .map(|summary| format!("{summary}\n"))
        .collect::<String>();

    write_file(path, &content)
}

/// Writes a whole batch to `directory`: every machine's accepted strings, then the summary
/// of every machine to [`SUMMARY_FILE`].
///
/// A machine whose file cannot be written is logged and its error collected; the remaining
/// machines and the summary are still written.
///
/// # Returns
///
/// * The errors of every write that failed, empty if all succeeded.
pub fn write_outputs(directory: &Path, evaluations: &[Evaluation]) -> Vec<AutomatonError> {
    let mut failures = Vec::new();

    for evaluation in evaluations {
        if let Err(e) = write_accepted(directory, evaluation) {
            log::warn!("{}: {e}", evaluation.summary.name);
            failures.push(e);
        }
    }

    let summaries = evaluations
        .iter()
        .map(|evaluation| evaluation.summary.clone())
        .collect::<Vec<_>>();

    if let Err(e) = write_summaries(&directory.join(SUMMARY_FILE), &summaries) {
        log::warn!("{e}");
        failures.push(e);
    }

    failures
}

fn write_file(path: &Path, content: &str) -> Result<(), AutomatonError> {
    fs::write(path, content).map_err(|e| {
        AutomatonError::FileError(format!("Failed to write file {}: {}", path.display(), e))
    })
}
