use super::*;

/// BFGS inverse-Hessian update, generalized to a bare `(s, y)` correction
/// pair rather than a self-contained solver owning its own line search
/// and iterate.
#[derive(derive_getters::Getters)]
pub struct Bfgs {
    approx_inv_hessian: DMatrix<Floating>,
    identity: DMatrix<Floating>,
    correction_tol: Floating,
}

impl Bfgs {
    pub fn new(n: usize, correction_tol: Floating) -> Self {
        let identity = DMatrix::identity(n, n);
        Bfgs {
            approx_inv_hessian: identity.clone(),
            identity,
            correction_tol,
        }
    }
}

impl HessianUpdate for Bfgs {
    fn inverse_hessian(&self) -> &DMatrix<Floating> {
        &self.approx_inv_hessian
    }

    fn update(&mut self, s: &DVector<Floating>, y: &DVector<Floating>) {
        if s.norm() < self.correction_tol || y.norm() < self.correction_tol {
            return;
        }
        let ys = y.dot(s);
        if ys.abs() < self.correction_tol {
            return;
        }
        let rho = 1.0 / ys;
        let w_a = s * y.transpose();
        let w_b = y * s.transpose();
        let innovation = s * s.transpose();
        let left_term = &self.identity - (w_a * rho);
        let right_term = &self.identity - (w_b * rho);
        self.approx_inv_hessian =
            (left_term * &self.approx_inv_hessian * right_term) + innovation * rho;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_correction_matches_hand_derivation() {
        let mut bfgs = Bfgs::new(2, 1e-12);
        let s = DVector::from_vec(vec![1.0, 0.0]);
        let y = DVector::from_vec(vec![2.0, 0.0]);
        bfgs.update(&s, &y);
        let h = bfgs.inverse_hessian();
        let d = h * DVector::from_vec(vec![-2.0, 0.0]);
        assert!((d - DVector::from_vec(vec![-1.0, 0.0])).norm() < 1e-9);
    }

    #[test]
    fn degenerate_correction_is_skipped() {
        let mut bfgs = Bfgs::new(2, 1e-6);
        let before = bfgs.inverse_hessian().clone();
        bfgs.update(
            &DVector::from_vec(vec![0.0, 0.0]),
            &DVector::from_vec(vec![1.0, 1.0]),
        );
        assert_eq!(*bfgs.inverse_hessian(), before);
    }
}
