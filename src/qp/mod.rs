use super::*;

pub mod default_qp;
pub use default_qp::*;

/// Outcome of one QP (re-)solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QpStatus {
    Success,
    IterationLimit,
    NumericalFailure,
}

/// The structured convex QP the direction core repeatedly builds and
/// solves:
///
/// ```text
/// min_d  1/2 d^T H d + max_i (b_i + <g_i, d>)   s.t.  ||d|| <= Delta
/// ```
///
/// `G`/`b` are bulk-replaced by `set_vector_list`/cold solves and
/// incrementally extended by `add_data`/hot solves; dual weights `omega`
/// live on the simplex over bundle rows.
pub trait QpSolver {
    fn set_scalar(&mut self, delta: Floating);
    fn set_inexact_solution_tolerance(&mut self, rho: Floating);

    /// Bulk replace (G, b); used by cold solves.
    fn set_vector_list(&mut self, g: Vec<Rc<DVector<Floating>>>, b: Vec<Floating>);

    /// Incremental append for hot-start solves.
    fn add_data(&mut self, g_new: Vec<Rc<DVector<Floating>>>, b_new: Vec<Floating>);

    fn solve_qp(&mut self, inverse_hessian: &DMatrix<Floating>);
    fn solve_qp_hot(&mut self, inverse_hessian: &DMatrix<Floating>);

    fn set_primal_solution_to_zero(&mut self);

    fn status(&self) -> QpStatus;
    fn primal_solution(&self) -> &DVector<Floating>;
    fn primal_solution_norm2_squared(&self) -> Floating;
    fn primal_solution_norm_inf(&self) -> Floating;
    fn dual_objective_quadratic_value(&self) -> Floating;
    fn combination_translated_norm2_squared(&self) -> Floating;
    fn dual_solution_omega_length(&self) -> usize;
    fn dual_solution_omega(&self) -> &[Floating];
    fn number_of_iterations(&self) -> usize;
    fn vector_list_length(&self) -> usize;
    fn kkt_error_dual(&self) -> Floating;
}
