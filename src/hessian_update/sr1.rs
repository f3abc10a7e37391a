use super::*;

/// Symmetric-rank-one inverse-Hessian update, generalized the same way
/// `Bfgs` is: a bare `(s, y)` correction rather than a self-contained
/// solver.
#[derive(derive_getters::Getters)]
pub struct Sr1 {
    approx_inv_hessian: DMatrix<Floating>,
    correction_tol: Floating,
}

impl Sr1 {
    pub fn new(n: usize, correction_tol: Floating) -> Self {
        Sr1 {
            approx_inv_hessian: DMatrix::identity(n, n),
            correction_tol,
        }
    }
}

impl HessianUpdate for Sr1 {
    fn inverse_hessian(&self) -> &DMatrix<Floating> {
        &self.approx_inv_hessian
    }

    fn update(&mut self, s: &DVector<Floating>, y: &DVector<Floating>) {
        if s.norm() < self.correction_tol || y.norm() < self.correction_tol {
            return;
        }
        let hy = &self.approx_inv_hessian * y;
        let shy = s - &hy;
        let denom = shy.dot(y);
        // SR1's classic safeguard: skip the update when the denominator is
        // small relative to the vectors involved, since the rank-one term
        // would otherwise blow up (or divide by zero outright).
        if denom.abs() < 1e-12 || denom.abs() < self.correction_tol * shy.norm() * y.norm() {
            return;
        }
        self.approx_inv_hessian += (&shy * shy.transpose()) / denom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_correction_reduces_to_rank_one_step() {
        let mut sr1 = Sr1::new(2, 1e-12);
        let s = DVector::from_vec(vec![1.0, 0.0]);
        let y = DVector::from_vec(vec![2.0, 0.0]);
        sr1.update(&s, &y);
        let h = sr1.inverse_hessian();
        // H y should reproduce s exactly for a single SR1 correction.
        let hy = h * &y;
        assert!((hy - s).norm() < 1e-9);
    }

    #[test]
    fn near_singular_denominator_is_skipped() {
        let mut sr1 = Sr1::new(2, 1e-3);
        let before = sr1.inverse_hessian().clone();
        // s is almost exactly H0 * y, so s - H0*y is tiny and the
        // denominator (s - H0*y).dot(y) is smaller still.
        sr1.update(
            &DVector::from_vec(vec![1.0, 1e-6]),
            &DVector::from_vec(vec![1.0, 0.0]),
        );
        assert_eq!(*sr1.inverse_hessian(), before);
    }
}
