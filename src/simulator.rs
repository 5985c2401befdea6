//! This module defines the `Simulator`, which decides whether a parsed automaton accepts an
//! input string. Deterministic machines are walked along their single path; nondeterministic
//! machines are searched depth-first over `(state, consumed)` configurations.

use crate::automaton::Automaton;
use crate::types::{AutomatonError, Classification, State, Symbol};
use std::collections::HashSet;

/// A point in a nondeterministic run: the current state and how many input symbols have
/// been consumed to reach it.
type Configuration = (State, usize);

/// Runs input strings against an automaton.
///
/// The simulator only borrows the automaton. Lookups of undeclared transitions fall back to
/// the dead state without touching the relation, so repeated runs always agree.
pub struct Simulator<'a> {
    automaton: &'a Automaton,
    step_limit: Option<usize>,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator whose nondeterministic search is bounded only by the number of
    /// distinct configurations, see [`Simulator::search_bound`].
    pub fn new(automaton: &'a Automaton) -> Self {
        Self {
            automaton,
            step_limit: None,
        }
    }

    /// Caps how many configurations the nondeterministic search may explore per input.
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = Some(step_limit);
        self
    }

    /// The number of distinct `(state, consumed)` configurations for an input of
    /// `input_len` symbols: every declared state, plus the start and dead states, at every
    /// input position. Since each configuration is explored at most once, a search never
    /// takes more steps than this.
    pub fn search_bound(&self, input_len: usize) -> usize {
        (self.automaton.state_count() + 2).saturating_mul(input_len + 1)
    }

    /// Decides whether the automaton accepts `input`. The empty string is epsilon.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` for an accepted / rejected input.
    /// * `Err(AutomatonError::InvalidMachine)` if the automaton is classified invalid.
    /// * `Err(AutomatonError::StepLimitExceeded)` if a nondeterministic search runs past the
    ///   configured limit.
    pub fn accepts(&self, input: &str) -> Result<bool, AutomatonError> {
        let symbols = input.chars().collect::<Vec<_>>();

        match self.automaton.classification {
            Classification::Deterministic => Ok(self.walk(&symbols)),
            Classification::Nondeterministic => self.search(&symbols),
            Classification::Invalid => Err(AutomatonError::InvalidMachine(
                "refusing to simulate an invalid machine".to_string(),
            )),
        }
    }

    /// Follows the single path a deterministic machine takes through `symbols`.
    fn walk(&self, symbols: &[char]) -> bool {
        let relation = &self.automaton.transitions;

        let state = symbols.iter().fold(State::START, |state, &c| {
            relation.resolve(state, Symbol::Char(c))
        });

        self.automaton.is_accepting(state)
    }

    /// Explores every path of a nondeterministic machine, stopping at the first one that
    /// ends in an accepting state with the whole input consumed.
    ///
    /// Epsilon arcs are followed before acceptance is checked, so a machine whose start
    /// state reaches an accepting state through epsilon arcs alone accepts the empty
    /// string. Each configuration is visited at most once, which bounds the search by
    /// `states × (input length + 1)` even when epsilon arcs form cycles.
    fn search(&self, symbols: &[char]) -> Result<bool, AutomatonError> {
        let relation = &self.automaton.transitions;
        let mut pending: Vec<Configuration> = vec![(State::START, 0)];
        let mut visited: HashSet<Configuration> = HashSet::new();
        let step_limit = self
            .step_limit
            .unwrap_or_else(|| self.search_bound(symbols.len()));
        let mut steps = 0;

        while let Some((state, consumed)) = pending.pop() {
            if !visited.insert((state, consumed)) {
                continue;
            }

            steps += 1;
            if steps > step_limit {
                return Err(AutomatonError::StepLimitExceeded(step_limit));
            }

            // Self-loops add nothing and would never terminate without the visited set.
            for &next in relation.epsilon_targets(state) {
                if next != state {
                    pending.push((next, consumed));
                }
            }

            match symbols.get(consumed) {
                None => {
                    if self.automaton.is_accepting(state) {
                        return Ok(true);
                    }
                }
                Some(&c) => {
                    for &next in relation.targets(state, Symbol::Char(c)) {
                        pending.push((next, consumed + 1));
                    }
                }
            }
        }

        Ok(false)
    }
}
