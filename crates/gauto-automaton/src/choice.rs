//! # Transition Choice
//!
//! When several transitions apply to one edge the greedy constructor asks a
//! [`TransitionChooser`] which one to commit. The choice is final: the
//! greedy constructor never revisits it.
//!
//! - [`RandomChooser`] picks uniformly at random. Seeded, it is
//!   reproducible.
//! - [`FirstChooser`] picks the first candidate in table order.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use gauto_core::Edge;

use crate::transition::Transition;

/// Picks one transition among the candidates applicable to an edge.
pub trait TransitionChooser {
    /// Return one of `candidates`, or `None` when there are none.
    fn choose<'t>(&mut self, edge: &Edge, candidates: &[&'t Transition]) -> Option<&'t Transition>;
}

/// Uniform random choice.
#[derive(Debug)]
pub struct RandomChooser<R = StdRng> {
    rng: R,
}

impl RandomChooser<StdRng> {
    /// Seeded from `seed` when given, from OS entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_rng(StdRng::seed_from_u64(seed)),
            None => Self::with_rng(StdRng::from_entropy()),
        }
    }
}

impl<R: Rng> RandomChooser<R> {
    /// Use a caller-supplied generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> TransitionChooser for RandomChooser<R> {
    fn choose<'t>(&mut self, edge: &Edge, candidates: &[&'t Transition]) -> Option<&'t Transition> {
        let chosen = candidates.choose(&mut self.rng).copied();
        if candidates.len() > 1 {
            if let Some(transition) = chosen {
                tracing::trace!(
                    node = %edge.parent,
                    candidates = candidates.len(),
                    state = %transition.parent,
                    "picked among competing transitions"
                );
            }
        }
        chosen
    }
}

/// Always the first candidate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChooser;

impl TransitionChooser for FirstChooser {
    fn choose<'t>(&mut self, _edge: &Edge, candidates: &[&'t Transition]) -> Option<&'t Transition> {
        candidates.first().copied()
    }
}
