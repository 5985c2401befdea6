//! This module provides the parser for finite automaton descriptions, utilizing the `pest`
//! crate. The grammar lives in `grammar.pest`; this module walks the parse tree, registers
//! states, symbols and transitions, and classifies the machine as it goes.

use crate::{
    automaton::Automaton,
    types::{AutomatonError, Classification, State, Symbol},
};
use pest::{iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;

/// Derives a `PestParser` for the description grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DescriptionParser;

/// Parses a machine description into an `Automaton`.
///
/// Classification happens inline: the machine starts out deterministic, becomes
/// nondeterministic on an epsilon arc or a repeated `(state, symbol)` pair, and becomes
/// invalid on any out-of-domain state, symbol or malformed line. Invalid input never
/// aborts parsing; the returned automaton is always complete and carries the verdict in
/// its `classification`.
///
/// # Arguments
///
/// * `input` - The full description text: the accept-state header, then one transition
///   per line.
///
/// # Returns
///
/// * `Ok(Automaton)` for any text the grammar can read, which is all text.
/// * `Err(AutomatonError::ParseError)` if the grammar rejects the input.
pub fn parse(input: &str) -> Result<Automaton, AutomatonError> {
    let pairs = DescriptionParser::parse(Rule::description, input)
        .map_err(|e| AutomatonError::ParseError(e.into()))?;

    let mut automaton = Automaton::default();

    for description in pairs {
        for p in description.into_inner() {
            match p.as_rule() {
                Rule::header => parse_header(p, &mut automaton),
                Rule::transition => parse_transition(p, &mut automaton),
                Rule::malformed => {
                    reject(&mut automaton, &format!("malformed line {:?}", p.as_str()));
                }
                _ => {} // blank lines and EOI
            }
        }
    }

    log::debug!(
        "parsed {} states, {} arcs: {}",
        automaton.state_count(),
        automaton.transitions.arc_count(),
        automaton.classification
    );

    Ok(automaton)
}

/// Parses the accept-state header from a `Pair<Rule::header>`.
///
/// `[]` and `[ ]` both mean "no accepting states". A missing or malformed header makes
/// the machine invalid.
fn parse_header(pair: Pair<Rule>, automaton: &mut Automaton) {
    let Some(inner) = pair.into_inner().next() else {
        reject(automaton, "missing accept-state header");
        return;
    };

    if inner.as_rule() != Rule::accept_set {
        reject(automaton, &format!("malformed header {:?}", inner.as_str()));
        return;
    }

    let entries = inner
        .into_inner()
        .map(|entry| entry.as_str())
        .collect::<Vec<_>>();

    if let [only] = entries.as_slice() {
        if only.trim().is_empty() {
            return;
        }
    }

    for entry in entries {
        if let Some(state) = parse_state(entry, automaton) {
            automaton.register_accept_state(state);
        }
    }
}

/// Parses a single transition from a `Pair<Rule::transition>` and registers it.
///
/// A transition with no `symbol` or `comma` child is an epsilon arc (`s,,d` or `s,d`); a
/// `comma` child marks a four-field line, whose symbol is a literal comma and whose two
/// middle fields are ignored. The arc is only added to the relation when every field is in
/// its domain, but the valid fields are still registered so the state and alphabet counts
/// describe what was declared.
fn parse_transition(pair: Pair<Rule>, automaton: &mut Automaton) {
    let mut source = None;
    let mut symbol = Some(Symbol::Epsilon);
    let mut target = None;

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::source => source = parse_state(p.as_str(), automaton),
            Rule::target => target = parse_state(p.as_str(), automaton),
            Rule::comma => symbol = Some(Symbol::Char(',')),
            Rule::symbol => symbol = parse_symbol(p.as_str(), automaton),
            _ => {}
        }
    }

    if let Some(source) = source {
        automaton.register_state(source);
    }
    if let Some(target) = target {
        automaton.register_state(target);
    }
    if let Some(symbol) = symbol {
        automaton.register_symbol(symbol);
        if symbol.is_epsilon() {
            automaton.classify(Classification::Nondeterministic);
        }
    }

    if let (Some(source), Some(symbol), Some(target)) = (source, symbol, target) {
        if automaton.transitions.insert(source, symbol, target) {
            automaton.classify(Classification::Nondeterministic);
        }
    }
}

/// Parses a state field, marking the machine invalid if it is not an integer in `[0, 255]`.
fn parse_state(field: &str, automaton: &mut Automaton) -> Option<State> {
    match field.parse::<State>() {
        Ok(state) => Some(state),
        Err(_) => {
            reject(automaton, &format!("state {field:?} out of range"));
            None
        }
    }
}

/// Parses a symbol field, marking the machine invalid if it is not a single printable
/// ASCII character.
fn parse_symbol(field: &str, automaton: &mut Automaton) -> Option<Symbol> {
    let symbol = Symbol::parse(field);
    if symbol.is_none() {
        reject(automaton, &format!("symbol {field:?} out of range"));
    }
    symbol
}

/// Marks the machine invalid.
fn reject(automaton: &mut Automaton, reason: &str) {
    log::debug!("invalid description: {reason}");
    automaton.classify(Classification::Invalid);
}
