use super::*;

/// Always takes a full step. Useful when the direction itself already
/// carries the right scale (e.g. while chasing a cheap-step shortcut) and
/// a line search would just spend evaluations confirming it.
pub struct NoSearch;

impl LineSearch for NoSearch {
    fn compute_step_len(
        &mut self,
        _x_k: &DVector<Floating>,
        _eval_x_k: &Evaluation,
        _direction_k: &DVector<Floating>,
        _oracle: &dyn Oracle,
        _max_iter: usize,
    ) -> Floating {
        1.0
    }
}
