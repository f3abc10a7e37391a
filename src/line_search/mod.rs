use super::*;

pub mod backtracking;
pub use backtracking::*;

pub mod nosearch;
pub use nosearch::*;

/// The outer loop's step-length rule once `compute_direction` has produced
/// a descent direction. The direction core itself never calls this — it
/// only reaches for `iteration_null_string` when formatting a line where
/// line search wasn't consulted.
pub trait LineSearch {
    fn compute_step_len(
        &mut self,
        x_k: &DVector<Floating>,
        eval_x_k: &Evaluation,
        direction_k: &DVector<Floating>,
        oracle: &dyn Oracle,
        max_iter: usize,
    ) -> Floating;

    fn iteration_null_string(&self) -> &'static str {
        "---------"
    }
}
