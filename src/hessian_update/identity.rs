use super::*;

/// The do-nothing Hessian update: `H^{-1} = I` forever. Used as the
/// `Strategies` default and by the direction core's QP-failure recovery
/// path, which re-solves against the seed cut alone and shouldn't be
/// fighting a stale curvature estimate too.
pub struct IdentityHessian {
    inverse: DMatrix<Floating>,
}

impl IdentityHessian {
    pub fn new(n: usize) -> Self {
        IdentityHessian {
            inverse: DMatrix::identity(n, n),
        }
    }
}

impl HessianUpdate for IdentityHessian {
    fn inverse_hessian(&self) -> &DMatrix<Floating> {
        &self.inverse
    }

    fn update(&mut self, _s: &DVector<Floating>, _y: &DVector<Floating>) {}
}
