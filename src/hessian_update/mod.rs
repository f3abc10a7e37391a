use super::*;

pub mod identity;
pub use identity::*;

pub mod bfgs;
pub use bfgs::*;

pub mod sr1;
pub use sr1::*;

/// Supplies the regularization matrix `H` (via its inverse, which is what
/// the QP's dual actually needs — see `qp::BundleQpSolver`) the QP solver
/// uses to build `1/2 d^T H d`. `BFGS`/`SR1` implementations are
/// generalized here to operate on bare `(s, y)` correction pairs instead
/// of owning their own line search and iterate.
pub trait HessianUpdate {
    fn inverse_hessian(&self) -> &DMatrix<Floating>;

    /// `s = x_{k+1} - x_k`, `y = g_{k+1} - g_k`. Implementations may
    /// reject the update (e.g. `s.dot(&y)` too small) without error.
    fn update(&mut self, s: &DVector<Floating>, y: &DVector<Floating>);

    fn iteration_null_string(&self) -> &'static str {
        "--------- ---------"
    }
}
