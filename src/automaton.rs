//! This module defines the `Automaton` value produced by the parser and the
//! `TransitionRelation` it carries.

use crate::types::{Classification, State, Symbol};
use std::collections::HashMap;

/// The destination list used for every undeclared `(state, symbol)` pair.
static DEAD_TARGETS: [State; 1] = [State::DEAD];

/// A transition relation mapping `(state, symbol)` to an ordered list of destinations.
///
/// Destinations are kept in discovery order, so the first entry is the arc declared first
/// and every later entry is an additional arc for the same pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionRelation {
    arcs: HashMap<(State, Symbol), Vec<State>>,
}

impl TransitionRelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `source --symbol--> target`.
    ///
    /// Returns `true` if the pair already had at least one destination, i.e. the new arc
    /// makes the relation nondeterministic.
    pub fn insert(&mut self, source: State, symbol: Symbol, target: State) -> bool {
        let targets = self.arcs.entry((source, symbol)).or_default();
        targets.push(target);
        targets.len() > 1
    }

    /// Returns the declared destinations of a pair, empty if none.
    pub fn declared(&self, state: State, symbol: Symbol) -> &[State] {
        self.arcs
            .get(&(state, symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the destinations of a pair, defaulting to the dead state when none are
    /// declared. The default is computed, never stored.
    pub fn targets(&self, state: State, symbol: Symbol) -> &[State] {
        match self.declared(state, symbol) {
            [] => &DEAD_TARGETS[..],
            targets => targets,
        }
    }

    /// Returns the first destination of a pair, or the dead state.
    pub fn resolve(&self, state: State, symbol: Symbol) -> State {
        self.targets(state, symbol)[0]
    }

    /// Returns the destinations reachable from `state` without consuming input.
    pub fn epsilon_targets(&self, state: State) -> &[State] {
        self.declared(state, Symbol::Epsilon)
    }

    /// Number of declared arcs, counting every destination.
    pub fn arc_count(&self) -> usize {
        self.arcs.values().map(Vec::len).sum()
    }

}

/// A parsed finite-state machine together with its classification.
///
/// Built once by the parser and consumed read-only by the simulators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Automaton {
    /// Accepting states in header order, without duplicates.
    pub accept_states: Vec<State>,
    /// Every state seen as a source or destination, in first-seen order.
    pub states: Vec<State>,
    /// Every symbol seen on a transition, in first-seen order. Epsilon is recorded here
    /// when present but not counted by [`Automaton::alphabet_size`].
    pub alphabet: Vec<Symbol>,
    pub transitions: TransitionRelation,
    pub classification: Classification,
}

impl Automaton {
    /// Checks whether `state` is accepting. The dead state never is, even if the header
    /// lists it.
    pub fn is_accepting(&self, state: State) -> bool {
        state != State::DEAD && self.accept_states.contains(&state)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet.iter().filter(|s| !s.is_epsilon()).count()
    }

    /// Records a state in first-seen order.
    pub(crate) fn register_state(&mut self, state: State) {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
    }

    /// Records a symbol in first-seen order.
    pub(crate) fn register_symbol(&mut self, symbol: Symbol) {
        if !self.alphabet.contains(&symbol) {
            self.alphabet.push(symbol);
        }
    }

    /// Records an accepting state, ignoring repeats.
    pub(crate) fn register_accept_state(&mut self, state: State) {
        if !self.accept_states.contains(&state) {
            self.accept_states.push(state);
        }
    }

    /// Raises the classification; it never goes back down.
    pub(crate) fn classify(&mut self, classification: Classification) {
        let merged = self.classification.merge(classification);
        if merged != self.classification {
            log::debug!("classification {} -> {}", self.classification, merged);
            self.classification = merged;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_every_destination_in_order() {
        let mut relation = TransitionRelation::new();

        assert!(!relation.insert(State(0), Symbol::Char('a'), State(1)));
        assert!(relation.insert(State(0), Symbol::Char('a'), State(2)));
        assert!(relation.insert(State(0), Symbol::Char('a'), State(1)));

        assert_eq!(
            relation.declared(State(0), Symbol::Char('a')),
            &[State(1), State(2), State(1)]
        );
        assert_eq!(relation.arc_count(), 3);
    }

    #[test]
    fn test_missing_pair_defaults_to_dead_state_without_storing_it() {
        let mut relation = TransitionRelation::new();
        relation.insert(State(0), Symbol::Char('a'), State(1));
        let before = relation.clone();

        assert_eq!(relation.resolve(State(0), Symbol::Char('b')), State::DEAD);
        assert_eq!(relation.targets(State(7), Symbol::Char('a')), &[State::DEAD]);
        assert!(relation.declared(State(0), Symbol::Char('b')).is_empty());
        assert_eq!(relation, before);
    }

    #[test]
    fn test_epsilon_targets() {
        let mut relation = TransitionRelation::new();
        relation.insert(State(0), Symbol::Epsilon, State(3));

        assert_eq!(relation.epsilon_targets(State(0)), &[State(3)]);
        assert!(relation.epsilon_targets(State(3)).is_empty());
    }

    #[test]
    fn test_alphabet_size_excludes_epsilon() {
        let mut automaton = Automaton::default();
        automaton.register_symbol(Symbol::Char('a'));
        automaton.register_symbol(Symbol::Epsilon);
        automaton.register_symbol(Symbol::Char('a'));
        automaton.register_symbol(Symbol::Char(','));

        assert_eq!(automaton.alphabet.len(), 3);
        assert_eq!(automaton.alphabet_size(), 2);
    }

    #[test]
    fn test_dead_state_is_never_accepting() {
        let mut automaton = Automaton::default();
        automaton.register_accept_state(State::DEAD);
        automaton.register_accept_state(State(1));

        assert!(!automaton.is_accepting(State::DEAD));
        assert!(automaton.is_accepting(State(1)));
    }

    #[test]
    fn test_classify_is_sticky() {
        let mut automaton = Automaton::default();
        automaton.classify(Classification::Invalid);
        automaton.classify(Classification::Nondeterministic);

        assert_eq!(automaton.classification, Classification::Invalid);
    }
}
