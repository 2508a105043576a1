//! # Run Construction
//!
//! Builds a run bottom-up. A transition only applies to an edge once every
//! child is mapped to the state it expects, so leaves are labelled first and
//! parents follow.
//!
//! ## Greedy
//!
//! [`construct_run`] repeatedly passes over the pending edges. Each edge
//! with at least one applicable transition gets one picked by a
//! [`TransitionChooser`], committed to its parent and removed. A pass that
//! commits nothing while edges remain fails with `RunConstructionFailure`.
//! Every commit is final. The result is sound but incomplete: a poor pick
//! can strand construction even though another pick would succeed.
//!
//! ## Backtracking
//!
//! [`Backtracker`] explores every candidate transition depth-first. It
//! retracts a choice when construction stalls below it or when the finished
//! run fails verification, and reports the last rejection if no branch is
//! accepted. The search is iterative: one run, a trail of commits and a
//! stack of choice points, so depth costs heap and not stack. Every
//! candidate tried at a choice point counts against the branch budget.

use std::collections::{BTreeSet, HashMap};

use gauto_core::{Edge, GautoError, Graph, NodeId};

use crate::automaton::Automaton;
use crate::choice::TransitionChooser;
use crate::run::Run;
use crate::transition::Transition;
use crate::verify::{verify_run, Verification};

/// Build a run greedily, resolving competing transitions with `chooser`.
///
/// The returned run maps every graph node. It is not yet verified.
pub fn construct_run<C>(automaton: &Automaton, graph: &Graph, chooser: &mut C) -> Result<Run, GautoError>
where
    C: TransitionChooser + ?Sized,
{
    let mut run = Run::new();
    let mut pending: Vec<&Edge> = graph.edges().iter().collect();
    let mut pass = 0usize;

    while !pending.is_empty() {
        pass += 1;
        let before = pending.len();
        let mut remaining = Vec::with_capacity(before);

        for edge in pending {
            let candidates = automaton.applicable_transitions(edge, &run);
            match chooser.choose(edge, &candidates) {
                Some(transition) => commit(&mut run, edge, transition)?,
                None => remaining.push(edge),
            }
        }

        tracing::debug!(
            pass,
            committed = before - remaining.len(),
            remaining = remaining.len(),
            "construction pass"
        );
        if remaining.len() == before {
            return Err(stalled(&remaining));
        }
        pending = remaining;
    }

    ensure_total(graph, &run)?;
    Ok(run)
}

/// Fail with `Unmapped` on the first graph node the run does not map.
pub fn ensure_total(graph: &Graph, run: &Run) -> Result<(), GautoError> {
    match graph.nodes().iter().find(|node| !run.contains(node)) {
        Some(node) => Err(GautoError::Unmapped { node: node.clone() }),
        None => Ok(()),
    }
}

fn commit(run: &mut Run, edge: &Edge, transition: &Transition) -> Result<(), GautoError> {
    run.map(edge.parent.clone(), transition.labelling())?;
    tracing::debug!(
        node = %edge.parent,
        state = %transition.parent,
        symbol = %edge.symbol,
        "transition committed"
    );
    Ok(())
}

fn stalled(pending: &[&Edge]) -> GautoError {
    GautoError::RunConstructionFailure {
        pending: pending.len(),
        stalled: pending.iter().map(|edge| edge.parent.clone()).collect::<Vec<NodeId>>(),
    }
}

/// Depth-first search over every candidate transition.
///
/// The search keeps one run and mutates it in place. Every commit is pushed
/// onto a trail, and a choice point remembers the trail length at which it
/// was opened, so backing up to it means popping the trail and retracting
/// those nodes. Edges with a single candidate are committed without opening
/// a choice point.
#[derive(Debug)]
pub struct Backtracker<'a> {
    automaton: &'a Automaton,
    graph: &'a Graph,
    limit: usize,
    explored: usize,
    last_rejection: Option<GautoError>,
}

/// An edge with more than one candidate and the next candidate to try.
#[derive(Debug)]
struct ChoicePoint<'a> {
    edge: usize,
    candidates: Vec<&'a Transition>,
    next: usize,
    trail_len: usize,
}

enum Advance {
    /// Every edge is committed.
    Complete,
    /// The lowest ready edge has no candidate, so this branch can never
    /// commit it.
    Stuck,
}

impl<'a> Backtracker<'a> {
    /// A search over `graph` trying at most `limit` branches.
    pub fn new(automaton: &'a Automaton, graph: &'a Graph, limit: usize) -> Self {
        Self {
            automaton,
            graph,
            limit,
            explored: 0,
            last_rejection: None,
        }
    }

    /// Branches tried so far. Each candidate tried at a choice point counts
    /// as one.
    pub fn explored(&self) -> usize {
        self.explored
    }

    /// Find a complete run that passes verification.
    ///
    /// # Errors
    ///
    /// The last verdict seen when every branch is rejected,
    /// `SearchBudgetExceeded` when the limit is reached first, or any
    /// structural error (`AlreadyMapped`, `Unmapped`, `NoRootFound`) as soon
    /// as it occurs.
    pub fn search(&mut self) -> Result<(Run, Verification), GautoError> {
        let graph = self.graph;
        let mut frontier = Frontier::new(graph.edges());
        let mut points: Vec<ChoicePoint<'a>> = Vec::new();

        loop {
            match self.advance(&mut frontier, &mut points)? {
                Advance::Complete => {
                    ensure_total(graph, &frontier.run)?;
                    match verify_run(graph, &frontier.run) {
                        Ok(verification) => return Ok((frontier.run, verification)),
                        Err(rejection) if rejection.is_verdict() => self.reject(rejection),
                        Err(fatal) => return Err(fatal),
                    }
                }
                Advance::Stuck => self.reject(frontier.stalled()),
            }

            // Back up to the deepest choice point with an untried candidate.
            loop {
                let Some(point) = points.last_mut() else {
                    return Err(self.last_rejection.take().unwrap_or_else(|| {
                        GautoError::RunConstructionFailure {
                            pending: frontier.pending,
                            stalled: Vec::new(),
                        }
                    }));
                };
                frontier.undo_to(point.trail_len);
                if let Some(&transition) = point.candidates.get(point.next) {
                    point.next += 1;
                    let edge = point.edge;
                    self.count_branch()?;
                    tracing::trace!(
                        node = %graph.edges()[edge].parent,
                        state = %transition.parent,
                        "trying next transition"
                    );
                    frontier.commit(edge, transition)?;
                    break;
                }
                points.pop();
            }
        }
    }

    /// Commit ready edges in index order until the branch completes or
    /// gets stuck, opening a choice point wherever candidates compete.
    fn advance(
        &mut self,
        frontier: &mut Frontier<'a>,
        points: &mut Vec<ChoicePoint<'a>>,
    ) -> Result<Advance, GautoError> {
        let automaton = self.automaton;
        while let Some(edge) = frontier.next_ready() {
            let candidates = automaton.applicable_transitions(&frontier.edges[edge], &frontier.run);
            let Some(&first) = candidates.first() else {
                return Ok(Advance::Stuck);
            };
            if candidates.len() > 1 {
                self.count_branch()?;
                points.push(ChoicePoint {
                    edge,
                    candidates,
                    next: 1,
                    trail_len: frontier.trail.len(),
                });
            }
            frontier.commit(edge, first)?;
        }
        Ok(if frontier.pending == 0 {
            Advance::Complete
        } else {
            Advance::Stuck
        })
    }

    fn count_branch(&mut self) -> Result<(), GautoError> {
        if self.explored >= self.limit {
            return Err(GautoError::SearchBudgetExceeded { limit: self.limit });
        }
        self.explored += 1;
        Ok(())
    }

    fn reject(&mut self, rejection: GautoError) {
        tracing::trace!(error = %rejection, "branch rejected");
        self.last_rejection = Some(rejection);
    }
}

/// The run under construction and which edges it can extend next.
///
/// An edge is ready once none of its children is waiting for a labelling.
/// `waiting` counts unmapped child occurrences per edge and `dependents`
/// lists, per node, the edges that have it as a child.
#[derive(Debug)]
struct Frontier<'a> {
    edges: &'a [Edge],
    run: Run,
    dependents: HashMap<&'a NodeId, Vec<usize>>,
    waiting: Vec<usize>,
    committed: Vec<bool>,
    ready: BTreeSet<usize>,
    trail: Vec<usize>,
    pending: usize,
}

impl<'a> Frontier<'a> {
    fn new(edges: &'a [Edge]) -> Self {
        let mut dependents: HashMap<&'a NodeId, Vec<usize>> = HashMap::new();
        for (index, edge) in edges.iter().enumerate() {
            for child in &edge.children {
                dependents.entry(child).or_default().push(index);
            }
        }
        let waiting: Vec<usize> = edges.iter().map(|edge| edge.children.len()).collect();
        let ready = (0..edges.len()).filter(|&index| waiting[index] == 0).collect();
        Self {
            edges,
            run: Run::new(),
            dependents,
            waiting,
            committed: vec![false; edges.len()],
            ready,
            trail: Vec::new(),
            pending: edges.len(),
        }
    }

    fn next_ready(&self) -> Option<usize> {
        self.ready.first().copied()
    }

    fn commit(&mut self, index: usize, transition: &Transition) -> Result<(), GautoError> {
        let edges = self.edges;
        let edge = &edges[index];
        commit(&mut self.run, edge, transition)?;
        self.ready.remove(&index);
        self.committed[index] = true;
        self.trail.push(index);
        self.pending -= 1;
        if let Some(dependents) = self.dependents.get(&edge.parent) {
            for &dependent in dependents {
                self.waiting[dependent] -= 1;
                if self.waiting[dependent] == 0 {
                    self.ready.insert(dependent);
                }
            }
        }
        Ok(())
    }

    /// Retract commits until the trail is `len` long.
    fn undo_to(&mut self, len: usize) {
        while self.trail.len() > len {
            let Some(index) = self.trail.pop() else { break };
            let edges = self.edges;
            let edge = &edges[index];
            if let Some(dependents) = self.dependents.get(&edge.parent) {
                for &dependent in dependents {
                    if self.waiting[dependent] == 0 {
                        self.ready.remove(&dependent);
                    }
                    self.waiting[dependent] += 1;
                }
            }
            self.run.retract(&edge.parent);
            self.committed[index] = false;
            self.ready.insert(index);
            self.pending += 1;
        }
    }

    fn stalled(&self) -> GautoError {
        let pending: Vec<&Edge> = self
            .edges
            .iter()
            .zip(&self.committed)
            .filter(|(_, done)| !**done)
            .map(|(edge, _)| edge)
            .collect();
        stalled(&pending)
    }
}
