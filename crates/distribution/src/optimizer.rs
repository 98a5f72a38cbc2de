//! Nelder-Mead driver for maximum-likelihood estimation.
//!
//! Wraps the `argmin` crate to minimise a negative log-likelihood over an
//! unconstrained parameter vector (log-transformed scales).
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor, State, TerminationReason};
use argmin::solver::neldermead::NelderMead;
use tracing::{debug, trace};

use crate::error::DistributionError;
use crate::family::Family;

/// Iteration cap for a single fit.
const MAX_ITERS: u64 = 5_000;

/// Simplex cost standard deviation at which the search stops.
const SD_TOLERANCE: f64 = 1e-10;

/// Cost reported for parameter vectors outside the support. Kept finite so
/// that the simplex statistics stay well defined.
pub(crate) const PENALTY: f64 = 1e12;

/// Negative log-likelihood over an unconstrained parameter vector.
pub(crate) type NegLogLik = fn(theta: &[f64], data: &[f64]) -> f64;

/// Minimises `nll` over `data` starting from `start` and returns the best
/// parameter vector.
///
/// The initial simplex is `start` plus one vertex per dimension displaced by
/// the matching entry of `steps`.
pub(crate) fn minimize(
    family: Family,
    data: &[f64],
    start: &[f64],
    steps: &[f64],
    nll: NegLogLik,
) -> Result<Vec<f64>, DistributionError> {
    let fail = |reason: String| DistributionError::FitConvergence {
        family,
        n: data.len(),
        reason,
    };

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(start.len() + 1);
    simplex.push(start.to_vec());
    for (i, step) in steps.iter().enumerate() {
        let mut vertex = start.to_vec();
        vertex[i] += step;
        simplex.push(vertex);
    }

    let cost = MleCost { data, nll };
    let solver = NelderMead::new(simplex)
        .with_sd_tolerance(SD_TOLERANCE)
        .map_err(|e| fail(format!("invalid simplex: {e}")))?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(MAX_ITERS))
        .run()
        .map_err(|e| fail(format!("optimizer error: {e}")))?;

    let state = result.state();
    let iterations = state.get_iter();
    if matches!(
        state.get_termination_reason(),
        Some(TerminationReason::MaxItersReached)
    ) {
        debug!(%family, n = data.len(), iterations, "nelder-mead hit the iteration cap");
        return Err(fail(format!("iteration cap of {MAX_ITERS} reached")));
    }

    let theta = state
        .best_param
        .clone()
        .ok_or_else(|| fail("optimizer returned no parameters".to_string()))?;
    let best_cost = state.best_cost;
    if !best_cost.is_finite() || best_cost >= PENALTY {
        return Err(fail(format!(
            "no parameter vector inside the support (best cost {best_cost})"
        )));
    }

    trace!(%family, n = data.len(), iterations, cost = best_cost, "nelder-mead converged");
    Ok(theta)
}

/// Cost function for argmin: penalised negative log-likelihood.
struct MleCost<'a> {
    data: &'a [f64],
    nll: NegLogLik,
}

impl CostFunction for MleCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let value = (self.nll)(theta, self.data);
        if value.is_finite() && value < PENALTY {
            Ok(value)
        } else {
            Ok(PENALTY)
        }
    }
}
