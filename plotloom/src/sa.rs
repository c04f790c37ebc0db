// Simulated annealing over unit orderings.
//
// The search state is a permutation of unit indices. Each step proposes a
// single transposition of two distinct positions, scores the neighbor with
// the composite story score, and accepts it by the Metropolis criterion:
// strictly better neighbors always, others with probability exp(delta / T).
// Temperature falls linearly from `start_temp` toward `end_temp` over the
// fixed iteration budget. The best permutation seen is tracked separately and
// is what the run returns, so the result never scores below the input order.
//
// Randomness comes only from the `SearchRng` the caller passes in. Per step
// the stream yields two index draws, plus one acceptance draw when the
// neighbor is not strictly better. A fixed seed therefore replays a run
// exactly.
//
// Caller data is never mutated: the permutation is applied to clones of the
// units once, after the search.
//
// Depends on composite.rs for the objective.

use crate::composite::story_score_texts;
use crate::config::ScoringWeights;
use crate::types::{Intent, Unit};
use plotloom_prng::SearchRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Annealing schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealConfig {
    /// Number of proposal steps. Zero disables the search.
    pub iterations: usize,
    /// Temperature at step 0.
    pub start_temp: f64,
    /// Temperature approached at the last step.
    pub end_temp: f64,
    /// Seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        AnnealConfig {
            iterations: 500,
            start_temp: 1.0,
            end_temp: 0.01,
            seed: None,
        }
    }
}

impl AnnealConfig {
    /// A generator for this schedule: seeded if a seed is configured.
    pub fn rng(&self) -> SearchRng {
        match self.seed {
            Some(seed) => SearchRng::new(seed),
            None => SearchRng::from_entropy(),
        }
    }

    /// Temperature at `step` of the linear schedule.
    pub fn temperature(&self, step: usize) -> f64 {
        if self.iterations == 0 {
            return self.start_temp;
        }
        let progress = step as f64 / self.iterations as f64;
        self.start_temp + (self.end_temp - self.start_temp) * progress
    }
}

/// Outcome of an annealing run.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnealResult {
    /// Best ordering found, as indices into the input units.
    pub order: Vec<usize>,
    /// Story score of the input order.
    pub initial_score: f64,
    /// Story score of `order`.
    pub best_score: f64,
    /// Steps actually evaluated.
    pub iterations: usize,
    /// Proposals accepted (better or Metropolis).
    pub accepted: usize,
    /// Times a new best was recorded.
    pub improvements: usize,
}

impl AnnealResult {
    /// Clone `units` into the best order.
    pub fn apply(&self, units: &[Unit]) -> Vec<Unit> {
        self.order.iter().map(|&i| units[i].clone()).collect()
    }
}

/// Run the search and report the best ordering with run statistics.
pub fn anneal_order(
    intent: &Intent,
    units: &[Unit],
    config: &AnnealConfig,
    weights: &ScoringWeights,
    rng: &mut SearchRng,
) -> AnnealResult {
    let n = units.len();
    let score_of = |order: &[usize]| {
        story_score_texts(intent, order.iter().map(|&i| units[i].text()), weights)
    };

    let mut current: Vec<usize> = (0..n).collect();
    let initial_score = score_of(&current);

    if n < 2 || config.iterations == 0 {
        return AnnealResult {
            order: current,
            initial_score,
            best_score: initial_score,
            iterations: 0,
            accepted: 0,
            improvements: 0,
        };
    }

    debug!(
        units = n,
        iterations = config.iterations,
        start_temp = config.start_temp,
        end_temp = config.end_temp,
        initial_score,
        "annealing unit order"
    );

    let mut current_score = initial_score;
    let mut best = current.clone();
    let mut best_score = initial_score;
    let mut accepted = 0;
    let mut improvements = 0;

    for step in 0..config.iterations {
        let temp = config.temperature(step);

        let (i, j) = rng.pick_two_distinct(n);
        current.swap(i, j);
        let neighbor_score = score_of(&current);
        let delta = neighbor_score - current_score;

        if metropolis_accept(delta, temp, rng) {
            current_score = neighbor_score;
            accepted += 1;

            if current_score > best_score {
                best.clone_from(&current);
                best_score = current_score;
                improvements += 1;
                trace!(step, best_score, "new best order");
            }
        } else {
            current.swap(i, j);
        }
    }

    debug!(
        accepted,
        improvements,
        best_score,
        gain = best_score - initial_score,
        "annealing finished"
    );

    AnnealResult {
        order: best,
        initial_score,
        best_score,
        iterations: config.iterations,
        accepted,
        improvements,
    }
}

/// Reorder `units` to maximize the story score.
///
/// Returns a reordered copy (same units, same length). Fewer than two units or
/// zero iterations return the input order unchanged.
pub fn optimize_order(
    intent: &Intent,
    units: &[Unit],
    iterations: usize,
    start_temp: f64,
    end_temp: f64,
    rng: &mut SearchRng,
) -> Vec<Unit> {
    let config = AnnealConfig {
        iterations,
        start_temp,
        end_temp,
        seed: None,
    };
    anneal_order(intent, units, &config, &ScoringWeights::default(), rng).apply(units)
}

/// Metropolis acceptance. Draws once whenever the move is not strictly
/// better. At non-positive temperature only equal-score moves pass.
fn metropolis_accept(delta: f64, temp: f64, rng: &mut SearchRng) -> bool {
    if delta > 0.0 {
        return true;
    }
    let probability = if temp > 0.0 {
        (delta / temp).exp()
    } else if delta == 0.0 {
        1.0
    } else {
        0.0
    };
    rng.next_f64() < probability
}
