//! Branch set compilation and evaluation
//!
//! A branch set is compiled once with [`compile`] and evaluated any number
//! of times against inputs of the matching target kind. Compilation parses
//! every regex literal, checks the set-level rules (catch-all placement,
//! strategy restrictions, duplicate names) and lowers each pattern to an
//! automaton; evaluation allocates nothing beyond the decoded unit buffer
//! and the capture map, and every returned span borrows from the input.

use std::collections::HashMap;

use crate::error::{CompileError, Result};
use crate::first;
use crate::input::{TargetKind, Units, Value, View};
use crate::longest;
use crate::nfa::Automaton;
use crate::parser::parse_pattern;

/// How the set selects among branches that match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// First declared branch that matches wins; within a branch, the first
    /// derivation found by the biased backtracking search wins
    First,
    /// The branch consuming the most units wins, ties broken by
    /// declaration order; runs all branches in lock-step without
    /// backtracking
    Longest,
}

/// What a structural position (prefix, rest, or catch-all) binds to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Bind the span to a name in the capture map
    Named(String),
    /// Match the span but bind nothing
    Wildcard,
}

impl Binding {
    fn name(&self) -> Option<&str> {
        match self {
            Binding::Named(name) => Some(name),
            Binding::Wildcard => None,
        }
    }
}

/// One branch of a set, before compilation
///
/// The pattern strings borrow from the caller; they are parsed and lowered
/// during [`compile`] and not retained afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum BranchSpec<'s> {
    /// `(pattern)`: the pattern must consume the entire input
    Bare {
        /// The pattern source
        pattern: &'s str,
    },
    /// `(pattern, rest)`: the pattern matches a prefix of the input and
    /// `rest` binds whatever follows
    TwoPart {
        /// The pattern source
        pattern: &'s str,
        /// Binding for the unmatched suffix
        rest: Binding,
    },
    /// `(prefix, pattern, rest)`: the pattern may match anywhere;
    /// `prefix` binds what precedes the match and `rest` what follows.
    /// The earliest start position wins, and only under
    /// [`Strategy::First`].
    ThreePart {
        /// Binding for the input before the match
        prefix: Binding,
        /// The pattern source
        pattern: &'s str,
        /// Binding for the input after the match
        rest: Binding,
    },
    /// A catch-all that matches any input; must be the last branch
    CatchAll {
        /// Binding for the entire input
        binding: Binding,
    },
}

#[derive(Debug)]
enum CompiledForm {
    Bare(Automaton),
    TwoPart {
        automaton: Automaton,
        rest: Binding,
    },
    ThreePart {
        automaton: Automaton,
        prefix: Binding,
        rest: Binding,
    },
    CatchAll {
        binding: Binding,
    },
}

impl CompiledForm {
    fn automaton(&self) -> Option<&Automaton> {
        match self {
            CompiledForm::Bare(automaton)
            | CompiledForm::TwoPart { automaton, .. }
            | CompiledForm::ThreePart { automaton, .. } => Some(automaton),
            CompiledForm::CatchAll { .. } => None,
        }
    }
}

/// A compiled branch set, ready for repeated evaluation
#[derive(Debug)]
pub struct CompiledSet {
    strategy: Strategy,
    target: TargetKind,
    branches: Vec<CompiledForm>,
}

/// The outcome of evaluating a set against one input
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'a> {
    /// Some branch matched
    Match(MatchResult<'a>),
    /// No branch matched and the set has no catch-all
    NoMatch,
}

impl<'a> MatchOutcome<'a> {
    /// The result, if any branch matched
    pub fn matched(&self) -> Option<&MatchResult<'a>> {
        match self {
            MatchOutcome::Match(result) => Some(result),
            MatchOutcome::NoMatch => None,
        }
    }
}

/// A successful match: which branch won, how much it consumed and what it
/// bound
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    /// Declaration index of the winning branch
    pub branch: usize,
    /// Units consumed by the pattern itself, excluding prefix and rest
    pub length: usize,
    /// All named bindings: regex captures as scalars or views, structural
    /// bindings always as views
    pub captures: HashMap<String, Value<'a>>,
    /// The span before the match, for three-part branches
    pub prefix: Option<View<'a>>,
    /// The span after the match, for two- and three-part branches
    pub rest: Option<View<'a>>,
}

/// Compile a branch set
///
/// Validates the whole set before returning: every pattern must parse,
/// a catch-all may only appear last, capture and binding names must be
/// unique within each branch, and under [`Strategy::Longest`] three-part
/// branches and non-greedy quantifiers are rejected.
pub fn compile(
    strategy: Strategy,
    target: TargetKind,
    specs: &[BranchSpec<'_>],
) -> Result<CompiledSet> {
    let mut branches = Vec::with_capacity(specs.len());

    for (index, spec) in specs.iter().enumerate() {
        if matches!(spec, BranchSpec::CatchAll { .. }) && index + 1 != specs.len() {
            return Err(CompileError::CatchAllNotLast { branch: index });
        }
        if strategy == Strategy::Longest && matches!(spec, BranchSpec::ThreePart { .. }) {
            return Err(CompileError::ThreePartUnderLongest { branch: index });
        }

        let lower = |src: &str| -> Result<Automaton> {
            let allow_end_anchor = !matches!(spec, BranchSpec::ThreePart { .. });
            let pattern = parse_pattern(src, target, allow_end_anchor)
                .map_err(|e| e.into_compile_error(index))?;
            if strategy == Strategy::Longest && pattern.has_non_greedy() {
                return Err(CompileError::NonGreedyUnderLongest { branch: index });
            }
            check_names(index, &pattern, spec)?;
            let require_end = matches!(spec, BranchSpec::Bare { .. });
            Ok(Automaton::compile(&pattern, require_end))
        };

        let form = match spec {
            BranchSpec::Bare { pattern } => CompiledForm::Bare(lower(pattern)?),
            BranchSpec::TwoPart { pattern, rest } => CompiledForm::TwoPart {
                automaton: lower(pattern)?,
                rest: rest.clone(),
            },
            BranchSpec::ThreePart {
                prefix,
                pattern,
                rest,
            } => CompiledForm::ThreePart {
                automaton: lower(pattern)?,
                prefix: prefix.clone(),
                rest: rest.clone(),
            },
            BranchSpec::CatchAll { binding } => CompiledForm::CatchAll {
                binding: binding.clone(),
            },
        };
        branches.push(form);
    }

    Ok(CompiledSet {
        strategy,
        target,
        branches,
    })
}

/// Every name bound by a branch (regex captures plus structural bindings)
/// must be distinct
fn check_names(index: usize, pattern: &crate::ast::Pattern, spec: &BranchSpec<'_>) -> Result<()> {
    let mut names = pattern.capture_names();
    match spec {
        BranchSpec::TwoPart { rest, .. } => names.extend(rest.name()),
        BranchSpec::ThreePart { prefix, rest, .. } => {
            names.extend(prefix.name());
            names.extend(rest.name());
        }
        _ => {}
    }

    let mut seen: Vec<&str> = Vec::with_capacity(names.len());
    for name in names {
        if seen.contains(&name) {
            return Err(CompileError::DuplicateCaptureName {
                branch: index,
                name: name.to_string(),
            });
        }
        seen.push(name);
    }
    Ok(())
}

impl CompiledSet {
    /// The strategy this set was compiled with
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The target kind this set addresses
    pub fn target(&self) -> TargetKind {
        self.target
    }

    /// Number of branches in the set
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Whether the set has no branches
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Evaluate the set against one input
    ///
    /// # Panics
    ///
    /// Panics if the input's addressing does not match the set's target
    /// kind (a `&[u8]` against a char-addressed set, or vice versa). The
    /// kinds are part of the compiled set's type-level contract; mixing
    /// them is a caller bug, not a runtime condition.
    pub fn eval<'a>(&self, input: impl Into<View<'a>>) -> MatchOutcome<'a> {
        let view = input.into();
        assert_eq!(
            view.kind(),
            self.target,
            "input addressing does not match the set's target kind"
        );
        let units = Units::decode(view);
        match self.strategy {
            Strategy::First => self.eval_first(&units),
            Strategy::Longest => self.eval_longest(&units),
        }
    }

    fn eval_first<'a>(&self, units: &Units<'a>) -> MatchOutcome<'a> {
        let len = units.len();
        for (index, form) in self.branches.iter().enumerate() {
            match form {
                CompiledForm::Bare(automaton) => {
                    if let Some(m) = first::run(automaton, units, 0) {
                        return MatchOutcome::Match(self.build(
                            units, index, automaton, len, &m.slots, None, None,
                        ));
                    }
                }
                CompiledForm::TwoPart { automaton, rest } => {
                    if let Some(m) = first::run(automaton, units, 0) {
                        let rest_view = units.slice(m.end, len);
                        return MatchOutcome::Match(self.build(
                            units,
                            index,
                            automaton,
                            m.end,
                            &m.slots,
                            None,
                            Some((rest, rest_view)),
                        ));
                    }
                }
                CompiledForm::ThreePart {
                    automaton,
                    prefix,
                    rest,
                } => {
                    // earliest start wins; the search within a start is
                    // already first-derivation biased
                    for start in 0..=len {
                        if let Some(m) = first::run(automaton, units, start) {
                            let prefix_view = units.slice(0, start);
                            let rest_view = units.slice(m.end, len);
                            return MatchOutcome::Match(self.build(
                                units,
                                index,
                                automaton,
                                m.end - start,
                                &m.slots,
                                Some((prefix, prefix_view)),
                                Some((rest, rest_view)),
                            ));
                        }
                    }
                }
                CompiledForm::CatchAll { binding } => {
                    return MatchOutcome::Match(self.catch_all(units, index, binding));
                }
            }
        }
        MatchOutcome::NoMatch
    }

    fn eval_longest<'a>(&self, units: &Units<'a>) -> MatchOutcome<'a> {
        let len = units.len();
        let mut indices = Vec::new();
        let mut automata = Vec::new();
        for (index, form) in self.branches.iter().enumerate() {
            if let Some(automaton) = form.automaton() {
                indices.push(index);
                automata.push(automaton);
            }
        }

        if let Some(best) = longest::run(&automata, units) {
            let index = indices[best.branch];
            let automaton = automata[best.branch];
            let rest = match &self.branches[index] {
                CompiledForm::TwoPart { rest, .. } => Some((rest, units.slice(best.end, len))),
                _ => None,
            };
            return MatchOutcome::Match(self.build(
                units,
                index,
                automaton,
                best.end,
                &best.slots,
                None,
                rest,
            ));
        }

        if let Some(CompiledForm::CatchAll { binding }) = self.branches.last() {
            let index = self.branches.len() - 1;
            return MatchOutcome::Match(self.catch_all(units, index, binding));
        }
        MatchOutcome::NoMatch
    }

    #[allow(clippy::too_many_arguments)]
    fn build<'a>(
        &self,
        units: &Units<'a>,
        branch: usize,
        automaton: &Automaton,
        length: usize,
        slots: &[Option<(usize, usize)>],
        prefix: Option<(&Binding, View<'a>)>,
        rest: Option<(&Binding, View<'a>)>,
    ) -> MatchResult<'a> {
        let mut captures = HashMap::new();
        for (slot, span) in slots.iter().enumerate() {
            if let Some((open, close)) = span {
                captures.insert(automaton.slots[slot].clone(), units.value(*open, *close));
            }
        }
        let prefix = prefix.map(|(binding, view)| {
            if let Some(name) = binding.name() {
                captures.insert(name.to_string(), Value::View(view));
            }
            view
        });
        let rest = rest.map(|(binding, view)| {
            if let Some(name) = binding.name() {
                captures.insert(name.to_string(), Value::View(view));
            }
            view
        });
        MatchResult {
            branch,
            length,
            captures,
            prefix,
            rest,
        }
    }

    fn catch_all<'a>(&self, units: &Units<'a>, branch: usize, binding: &Binding) -> MatchResult<'a> {
        let len = units.len();
        let mut captures = HashMap::new();
        if let Some(name) = binding.name() {
            captures.insert(name.to_string(), Value::View(units.slice(0, len)));
        }
        MatchResult {
            branch,
            length: len,
            captures,
            prefix: None,
            rest: None,
        }
    }
}
