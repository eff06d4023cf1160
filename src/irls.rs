//! Iteratively re-weighted least squares algorithm

use crate::error::{FireError, Result};
use crate::glm::Glm;
use crate::model::Model;
use ndarray::{Array1, Array2};
use ndarray_linalg::SolveH;
use std::marker::PhantomData;

/// Number of times a rejected step is halved before giving up on the
/// iteration.
const MAX_STEP_HALVES: usize = 6;

/// Iterate over updates via iteratively re-weighted least squares until the
/// relative change of the log-likelihood is within tolerance.
pub(crate) struct Irls<'a, M>
where
    M: Glm,
{
    model: PhantomData<M>,
    data: &'a Model<M>,
    /// The current parameter estimate.
    guess: Array1<f64>,
    /// The number of iterations taken so far.
    pub n_iter: usize,
    /// The likelihood of the previous iteration.
    last_like: f64,
    /// Set when the last improvement was within tolerance, so the iteration
    /// should return the current estimate but exit on the next call.
    done: bool,
}

/// A step in the IRLS: the accepted estimate and its log-likelihood.
pub(crate) struct IrlsStep {
    pub guess: Array1<f64>,
    pub like: f64,
}

impl<'a, M> Irls<'a, M>
where
    M: Glm,
{
    pub fn new(data: &'a Model<M>, initial: Array1<f64>, initial_like: f64) -> Self {
        Self {
            model: PhantomData,
            data,
            guess: initial,
            n_iter: 0,
            last_like: initial_like,
            done: false,
        }
    }

    pub fn guess(&self) -> &Array1<f64> {
        &self.guess
    }

    pub fn last_like(&self) -> f64 {
        self.last_like
    }

    /// Accept a new estimate, checking the iteration cap.
    fn step_with(&mut self, next_guess: Array1<f64>, next_like: f64) -> Result<IrlsStep> {
        self.guess.assign(&next_guess);
        self.last_like = next_like;
        self.n_iter += 1;
        if self.n_iter >= self.data.max_iter {
            return Err(FireError::MaxIter(self.data.max_iter));
        }
        Ok(IrlsStep {
            guess: next_guess,
            like: next_like,
        })
    }

    /// The (LHS, RHS) of the IRLS update equation at the current estimate.
    fn irls_mat_vec(&self) -> (Array2<f64>, Array1<f64>) {
        let linear_predictor: Array1<f64> = self.data.x.dot(&self.guess);
        // the expected response under the current estimate
        let predictor: Array1<f64> = linear_predictor.mapv(M::mean);
        // condition the variances away from zero so the update matrix stays
        // positive-definite under complete separation
        let var_diag: Array1<f64> = predictor.mapv(M::variance).mapv(|v| v + f64::EPSILON);
        let errors: Array1<f64> = &self.data.y - &predictor;
        let neg_hessian: Array2<f64> = (&self.data.x.t() * &var_diag).dot(&self.data.x);
        let target: Array1<f64> = (var_diag * linear_predictor) + errors;
        let rhs: Array1<f64> = self.data.x.t().dot(&target);
        (neg_hessian, rhs)
    }
}

impl<'a, M> Iterator for Irls<'a, M>
where
    M: Glm,
{
    type Item = Result<IrlsStep>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (irls_mat, irls_vec) = self.irls_mat_vec();
        let mut next_guess: Array1<f64> = match irls_mat.solveh_into(irls_vec) {
            Ok(solution) => solution,
            Err(_) => return Some(Err(FireError::SingularMatrix)),
        };

        let mut next_like = M::log_likelihood(&self.data.y, &self.data.x, &next_guess);
        // positive for an improved estimate
        let mut rel = (next_like - self.last_like) / (f64::EPSILON + next_like.abs());
        if rel > self.data.tol {
            return Some(self.step_with(next_guess, next_like));
        }
        if rel.abs() <= self.data.tol {
            // Within tolerance. Accept the step if it is not a regression and
            // quit on the next call. The comparison includes zero so iteration
            // terminates when the likelihood has not changed at all.
            if rel >= 0.0 {
                self.done = true;
                return Some(self.step_with(next_guess, next_like));
            }
            return None;
        }

        // The likelihood decreased; try step halving toward the last estimate.
        let mut step_halves = 0;
        let mut step_multiplier = 0.5;
        while rel < -self.data.tol && step_halves < MAX_STEP_HALVES {
            let next_guess_sh: Array1<f64> = next_guess.mapv(|x| x * step_multiplier)
                + self.guess.mapv(|x| x * (1.0 - step_multiplier));
            let next_like_sh = M::log_likelihood(&self.data.y, &self.data.x, &next_guess_sh);
            let next_rel = (next_like_sh - self.last_like) / (f64::EPSILON + next_like_sh.abs());
            if next_rel >= rel {
                next_guess = next_guess_sh;
                next_like = next_like_sh;
                rel = next_rel;
                step_multiplier = 0.5;
            } else {
                step_multiplier *= 0.5;
            }
            step_halves += 1;
        }

        if rel > 0.0 {
            Some(self.step_with(next_guess, next_like))
        } else {
            // No direction of improvement was found; terminate here.
            None
        }
    }
}
