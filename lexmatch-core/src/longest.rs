//! Longest-match executor
//!
//! Runs every eligible branch's automaton simultaneously over the input,
//! one unit per step, as a non-backtracking multi-thread simulation. Each
//! live thread carries (branch, state, slot timestamps); epsilon closures
//! are recomputed every step and threads are deduplicated per
//! (branch, state), which bounds the work by
//! input length × branch count × automaton size.
//!
//! Acceptances are recorded as they appear; once no thread is live (or the
//! input is exhausted) the best acceptance wins: greatest consumed length
//! first, then lowest declaration index. Greediness is irrelevant here —
//! every reachable continuation is explored — which is why non-greedy
//! quantifiers are rejected at compile time under this strategy.

use std::collections::HashSet;

use crate::input::Units;
use crate::nfa::{Automaton, Edge, StateId};

/// The winning acceptance of a lock-step run
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Best {
    /// Position of the winning branch in the list passed to [`run`]
    pub branch: usize,
    /// Units consumed by the winning acceptance
    pub end: usize,
    /// Per-slot (open, close) unit positions of the winning thread
    pub slots: Vec<Option<(usize, usize)>>,
}

type SlotStamps = Vec<(Option<usize>, Option<usize>)>;

struct Thread {
    branch: usize,
    state: StateId,
    slots: SlotStamps,
}

/// Run all `branches` in lock-step from position 0. The slice order is the
/// declaration order used for tie-breaking.
pub(crate) fn run(branches: &[&Automaton], units: &Units<'_>) -> Option<Best> {
    let mut sim = Sim {
        branches,
        len: units.len(),
        best: None,
    };

    let mut current: Vec<Thread> = Vec::new();
    let mut visited: HashSet<(usize, StateId)> = HashSet::new();
    for (branch, automaton) in branches.iter().enumerate() {
        let slots = vec![(None, None); automaton.slots.len()];
        sim.add_thread(&mut current, &mut visited, branch, automaton.start, 0, slots);
    }

    for pos in 0..units.len() {
        if current.is_empty() {
            break;
        }
        let unit = units.at(pos);
        let mut next: Vec<Thread> = Vec::new();
        visited.clear();
        for thread in &current {
            let automaton = sim.branches[thread.branch];
            for (edge, target) in &automaton.states[thread.state].edges {
                if let Edge::Unit(test) = edge {
                    if test.matches(unit) {
                        sim.add_thread(
                            &mut next,
                            &mut visited,
                            thread.branch,
                            *target,
                            pos + 1,
                            thread.slots.clone(),
                        );
                    }
                }
            }
        }
        current = next;
    }

    sim.best.map(|(branch, end, slots)| Best {
        branch,
        end,
        slots: slots.into_iter().map(|(o, c)| o.zip(c)).collect(),
    })
}

struct Sim<'a> {
    branches: &'a [&'a Automaton],
    len: usize,
    /// (branch, end, slots) of the best acceptance so far
    best: Option<(usize, usize, SlotStamps)>,
}

impl Sim<'_> {
    /// Add a thread and its whole epsilon closure, recording slot
    /// timestamps along the way and any acceptance reached at `pos`
    fn add_thread(
        &mut self,
        list: &mut Vec<Thread>,
        visited: &mut HashSet<(usize, StateId)>,
        branch: usize,
        state: StateId,
        pos: usize,
        slots: SlotStamps,
    ) {
        let automaton = self.branches[branch];
        let mut stack = vec![(state, slots)];

        while let Some((state, slots)) = stack.pop() {
            if !visited.insert((branch, state)) {
                continue;
            }
            if state == automaton.accept {
                self.record(branch, pos, &slots);
            }
            for (edge, target) in &automaton.states[state].edges {
                match edge {
                    Edge::Epsilon => stack.push((*target, slots.clone())),
                    Edge::Open(k) => {
                        let mut slots = slots.clone();
                        slots[*k].0 = Some(pos);
                        stack.push((*target, slots));
                    }
                    Edge::Close(k) => {
                        let mut slots = slots.clone();
                        slots[*k].1 = Some(pos);
                        stack.push((*target, slots));
                    }
                    Edge::End if pos == self.len => stack.push((*target, slots.clone())),
                    Edge::End | Edge::Unit(_) => {}
                }
            }
            list.push(Thread {
                branch,
                state,
                slots,
            });
        }
    }

    /// Longest consumed length wins; ties go to the lowest branch index
    fn record(&mut self, branch: usize, end: usize, slots: &SlotStamps) {
        let better = match &self.best {
            None => true,
            Some((best_branch, best_end, _)) => {
                end > *best_end || (end == *best_end && branch < *best_branch)
            }
        };
        if better {
            self.best = Some((branch, end, slots.clone()));
        }
    }
}
