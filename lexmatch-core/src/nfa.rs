//! Automaton construction
//!
//! Lowers a [`Pattern`] into an explicit finite-state graph: states are
//! indices into a `Vec`, edges either consume one input unit, assert
//! end-of-input, mark a capture slot boundary, or are free epsilon moves.
//!
//! The order of a state's outgoing edges encodes quantifier preference for
//! the first-match executor: a greedy loop lists its re-entry edge before
//! its exit edge, a non-greedy loop the reverse. The longest-match executor
//! ignores edge order entirely — it explores every reachable state.
//!
//! Bounded repeats (`{n}`, `{n,m}`) are unrolled into explicit copies;
//! unbounded repeats (`*`, `+`, `{n,}`) become a loop with an epsilon
//! back-edge. Case-insensitive scopes are lowered here by ASCII-folding
//! every literal and class edge inside them, so the executors never see a
//! fold flag.

use crate::ast::Pattern;
use crate::classes::ClassSet;

/// An automaton state ID
pub type StateId = usize;

/// A consuming-edge test against one input unit
#[derive(Debug, Clone, PartialEq)]
pub enum UnitTest {
    /// Exactly this unit
    Literal(u32),
    /// Any unit, including newline
    Any,
    /// Any unit in the set
    Class(ClassSet),
}

impl UnitTest {
    /// Test one input unit
    pub fn matches(&self, unit: u32) -> bool {
        match self {
            UnitTest::Literal(u) => *u == unit,
            UnitTest::Any => true,
            UnitTest::Class(set) => set.contains(unit),
        }
    }
}

/// An edge in the automaton
#[derive(Debug, Clone, PartialEq)]
pub enum Edge {
    /// Consume one unit if the test passes
    Unit(UnitTest),
    /// Free move
    Epsilon,
    /// Free move that records the open position of capture slot `k`
    Open(usize),
    /// Free move that records the close position of capture slot `k`
    Close(usize),
    /// Free move, valid only at the end-of-input position
    End,
}

/// An automaton state: ordered outgoing edges
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Outgoing edges; order is first-match preference
    pub edges: Vec<(Edge, StateId)>,
}

/// A compiled pattern automaton with its capture-slot table
///
/// Exactly one state accepts the whole pattern; capture spans are
/// sub-ranges of the path to acceptance, recorded through `Open`/`Close`
/// edges, never separate accept states.
#[derive(Debug, Clone)]
pub struct Automaton {
    /// All states
    pub states: Vec<State>,
    /// The start state
    pub start: StateId,
    /// The single accepting state
    pub accept: StateId,
    /// Capture-slot table: slot index to capture name, in declaration order
    pub slots: Vec<String>,
}

impl Automaton {
    /// Compile a pattern. With `require_end`, acceptance additionally
    /// requires the end-of-input position (the bare anchoring form).
    ///
    /// Capture-name uniqueness is validated by the caller before
    /// compilation; a collision here would be an engine bug.
    pub fn compile(pattern: &Pattern, require_end: bool) -> Self {
        let mut builder = Builder {
            states: Vec::new(),
            slots: Vec::new(),
        };
        let (start, accept) = builder.compile_pattern(pattern, false);
        let accept = if require_end {
            let gated = builder.new_state();
            builder.add_edge(accept, Edge::End, gated);
            gated
        } else {
            accept
        };
        Automaton {
            states: builder.states,
            start,
            accept,
            slots: builder.slots,
        }
    }

    /// Number of states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the automaton has no states (never true for compiled
    /// patterns; `Empty` still gets two states)
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

struct Builder {
    states: Vec<State>,
    slots: Vec<String>,
}

impl Builder {
    fn new_state(&mut self) -> StateId {
        self.states.push(State::default());
        self.states.len() - 1
    }

    fn add_edge(&mut self, from: StateId, edge: Edge, to: StateId) {
        self.states[from].edges.push((edge, to));
    }

    /// Compile a subpattern and return its (start, accept) pair. `fold`
    /// is true inside a case-insensitive scope.
    fn compile_pattern(&mut self, pattern: &Pattern, fold: bool) -> (StateId, StateId) {
        match pattern {
            Pattern::Empty => self.compile_empty(),
            Pattern::Literal(unit) => self.compile_unit(literal_test(*unit, fold)),
            Pattern::Any => self.compile_unit(UnitTest::Any),
            Pattern::Class(set) => {
                let mut set = set.clone();
                if fold {
                    set.fold_ascii();
                }
                self.compile_unit(UnitTest::Class(set))
            }
            Pattern::Concat(items) => self.compile_concat(items, fold),
            Pattern::Repeat {
                inner,
                min,
                max,
                greedy,
            } => self.compile_repeat(inner, *min, *max, *greedy, fold),
            Pattern::CaseInsensitive(inner) => self.compile_pattern(inner, true),
            Pattern::Capture { name, inner } => self.compile_capture(name, inner, fold),
            Pattern::EndAnchor => self.compile_end(),
        }
    }

    fn compile_empty(&mut self) -> (StateId, StateId) {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, Edge::Epsilon, accept);
        (start, accept)
    }

    fn compile_unit(&mut self, test: UnitTest) -> (StateId, StateId) {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, Edge::Unit(test), accept);
        (start, accept)
    }

    fn compile_end(&mut self) -> (StateId, StateId) {
        let start = self.new_state();
        let accept = self.new_state();
        self.add_edge(start, Edge::End, accept);
        (start, accept)
    }

    fn compile_concat(&mut self, items: &[Pattern], fold: bool) -> (StateId, StateId) {
        let Some((first, rest)) = items.split_first() else {
            return self.compile_empty();
        };
        let (start, mut prev_accept) = self.compile_pattern(first, fold);
        for item in rest {
            let (s, a) = self.compile_pattern(item, fold);
            self.add_edge(prev_accept, Edge::Epsilon, s);
            prev_accept = a;
        }
        (start, prev_accept)
    }

    fn compile_capture(&mut self, name: &str, inner: &Pattern, fold: bool) -> (StateId, StateId) {
        let slot = self.slots.len();
        self.slots.push(name.to_string());

        let start = self.new_state();
        let (inner_start, inner_accept) = self.compile_pattern(inner, fold);
        let accept = self.new_state();
        self.add_edge(start, Edge::Open(slot), inner_start);
        self.add_edge(inner_accept, Edge::Close(slot), accept);
        (start, accept)
    }

    fn compile_repeat(
        &mut self,
        inner: &Pattern,
        min: u32,
        max: Option<u32>,
        greedy: bool,
        fold: bool,
    ) -> (StateId, StateId) {
        match max {
            Some(max) if min == max => self.compile_exact(inner, min, fold),
            Some(max) => self.compile_between(inner, min, max, greedy, fold),
            None if min == 0 => self.compile_star(inner, greedy, fold),
            None => {
                // {n,}: n mandatory copies followed by a star loop
                let (exact_start, exact_accept) = self.compile_exact(inner, min, fold);
                let (star_start, star_accept) = self.compile_star(inner, greedy, fold);
                self.add_edge(exact_accept, Edge::Epsilon, star_start);
                (exact_start, star_accept)
            }
        }
    }

    /// `{n}`: n chained copies
    fn compile_exact(&mut self, inner: &Pattern, n: u32, fold: bool) -> (StateId, StateId) {
        if n == 0 {
            return self.compile_empty();
        }
        let (start, mut prev_accept) = self.compile_pattern(inner, fold);
        for _ in 1..n {
            let (s, a) = self.compile_pattern(inner, fold);
            self.add_edge(prev_accept, Edge::Epsilon, s);
            prev_accept = a;
        }
        (start, prev_accept)
    }

    /// `{n,m}`: n mandatory copies, then m-n optional ones. Edge order at
    /// each optional point encodes greediness.
    fn compile_between(
        &mut self,
        inner: &Pattern,
        min: u32,
        max: u32,
        greedy: bool,
        fold: bool,
    ) -> (StateId, StateId) {
        let (start, exact_accept) = if min == 0 {
            let s = self.new_state();
            (s, s)
        } else {
            self.compile_exact(inner, min, fold)
        };
        let accept = self.new_state();

        let mut prev_accept = exact_accept;
        for _ in 0..(max - min) {
            let (s, a) = self.compile_pattern(inner, fold);
            if greedy {
                self.add_edge(prev_accept, Edge::Epsilon, s);
                self.add_edge(prev_accept, Edge::Epsilon, accept);
            } else {
                self.add_edge(prev_accept, Edge::Epsilon, accept);
                self.add_edge(prev_accept, Edge::Epsilon, s);
            }
            prev_accept = a;
        }
        self.add_edge(prev_accept, Edge::Epsilon, accept);
        (start, accept)
    }

    /// `*`: loop with an epsilon back-edge; greedy prefers re-entry
    fn compile_star(&mut self, inner: &Pattern, greedy: bool, fold: bool) -> (StateId, StateId) {
        let start = self.new_state();
        let accept = self.new_state();
        let (inner_start, inner_accept) = self.compile_pattern(inner, fold);

        if greedy {
            self.add_edge(start, Edge::Epsilon, inner_start);
            self.add_edge(start, Edge::Epsilon, accept);
            self.add_edge(inner_accept, Edge::Epsilon, inner_start);
            self.add_edge(inner_accept, Edge::Epsilon, accept);
        } else {
            self.add_edge(start, Edge::Epsilon, accept);
            self.add_edge(start, Edge::Epsilon, inner_start);
            self.add_edge(inner_accept, Edge::Epsilon, accept);
            self.add_edge(inner_accept, Edge::Epsilon, inner_start);
        }
        (start, accept)
    }
}

/// A literal edge, ASCII-folded into a two-unit class inside `(?i:)`
fn literal_test(unit: u32, fold: bool) -> UnitTest {
    if fold && (unit as u8 as u32 == unit) && (unit as u8).is_ascii_alphabetic() {
        let mut set = ClassSet::single(unit);
        set.fold_ascii();
        UnitTest::Class(set)
    } else {
        UnitTest::Literal(unit)
    }
}
