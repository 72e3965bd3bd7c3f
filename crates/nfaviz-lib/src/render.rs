//! Dual traversals over the automaton graph.
//!
//! Both renderers walk the graph depth-first from the entry state and emit a
//! flat event stream for the exporter. [`verbatim`] reproduces the graph
//! exactly as built, including the epsilon-only join state each
//! concatenation leaves behind. [`canonical`] resolves every edge through
//! those join states, producing the textbook Thompson topology.
//!
//! Neither walk mutates the graph, and visited bookkeeping lives in a
//! per-call table, so the passes may run in any order, any number of times.
//! Recursion depth is bounded by the nesting of the input expression.

use log::trace;

use crate::automaton::{EdgeLabel, Nfa, StateId, Tag};

/// One drawing instruction for the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Marks the automaton entry state; emitted once, before anything else.
    Initial(StateId),
    State {
        id: StateId,
        tag: Tag,
        accepting: bool,
    },
    Edge {
        from: StateId,
        to: StateId,
        label: EdgeLabel,
        tag: Tag,
    },
}

/// Emit the graph exactly as built.
///
/// Every reachable state appears exactly once; the visited table guarantees
/// termination across closure cycles.
pub fn verbatim(nfa: &Nfa) -> Vec<Event> {
    let mut events = vec![Event::Initial(nfa.start())];
    let mut visited = vec![false; nfa.num_states()];
    walk_verbatim(nfa, nfa.start(), &mut visited, &mut events);
    trace!("verbatim walk emitted {} events", events.len());
    events
}

fn walk_verbatim(nfa: &Nfa, id: StateId, visited: &mut [bool], events: &mut Vec<Event>) {
    if visited[id.index()] {
        return;
    }
    visited[id.index()] = true;

    let state = nfa.state(id);
    events.push(Event::State {
        id,
        tag: state.tag,
        accepting: state.is_accepting(),
    });
    for target in state.out_edges() {
        events.push(Event::Edge {
            from: id,
            to: target,
            label: state.label,
            tag: state.tag,
        });
        walk_verbatim(nfa, target, visited, events);
    }
}

/// Emit the canonical Thompson topology: no join state is ever drawn or
/// traversed into.
pub fn canonical(nfa: &Nfa) -> Vec<Event> {
    let mut events = vec![Event::Initial(nfa.start())];
    let mut visited = vec![false; nfa.num_states()];
    let mut forward: Vec<Option<StateId>> = vec![None; nfa.num_states()];
    walk_canonical(nfa, nfa.start(), &mut visited, &mut forward, &mut events);
    trace!("canonical walk emitted {} events", events.len());
    events
}

/// Resolve an edge target through any chain of concatenation join states.
///
/// A join state has exactly one outgoing edge, so the chase is well-defined;
/// chains are acyclic because a join's successor is always some fragment's
/// entry, which no reduction ever retags as a join. Resolutions are memoized
/// in a skip table, the derived form of collapsing the hop permanently.
fn resolve(nfa: &Nfa, id: StateId, forward: &mut [Option<StateId>]) -> StateId {
    if let Some(target) = forward[id.index()] {
        return target;
    }
    let mut current = id;
    while nfa.state(current).tag == Tag::ConcatJoin {
        current = nfa
            .state(current)
            .out_edges()
            .next()
            .expect("join state has exactly one outgoing edge");
    }
    forward[id.index()] = Some(current);
    current
}

fn walk_canonical(
    nfa: &Nfa,
    id: StateId,
    visited: &mut [bool],
    forward: &mut [Option<StateId>],
    events: &mut Vec<Event>,
) {
    if visited[id.index()] {
        return;
    }
    visited[id.index()] = true;

    let state = nfa.state(id);
    events.push(Event::State {
        id,
        tag: state.tag,
        accepting: state.is_accepting(),
    });
    for target in state.out_edges() {
        let target = resolve(nfa, target, forward);
        events.push(Event::Edge {
            from: id,
            to: target,
            label: state.label,
            tag: state.tag,
        });
        walk_canonical(nfa, target, visited, forward, events);
    }
}
